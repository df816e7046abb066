pub mod bench;
pub mod build;
pub mod query;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use log::info;
use trawl_engine::{BuildParams, DictionaryKind, SearchIndex, SegmentPolicy};

pub use bench::BenchArgs;
pub use build::BuildArgs;
pub use query::QueryArgs;

/// Common error type for command handlers.
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the index and report its shape.
    ///
    /// Example:
    ///   trawl build --table part.tbl --dump entry_tree.txt
    Build(BuildArgs),

    /// Build the index, then evaluate a LIKE pattern against it.
    ///
    /// Example:
    ///   trawl query '%chocolate%mon%' --table part.tbl --dict art
    Query(QueryArgs),

    /// Repeatedly rebuild and query, appending timings to a CSV file.
    Bench(BenchArgs),
}

/// Options shared by every command that builds an index.
#[derive(Debug, Args)]
pub struct IndexOptions {
    /// Path to the pipe-delimited table file
    #[arg(long, default_value = "part.tbl")]
    pub table: PathBuf,

    /// Dictionary structure: entry-tree or art
    #[arg(long, default_value = "entry-tree")]
    pub dict: DictionaryKind,

    /// Byte budget for inline posting lists
    #[arg(long, default_value_t = 384)]
    pub max_inline_bytes: usize,

    /// Posting-tree leaf minimum size in bytes
    #[arg(long, default_value_t = 400)]
    pub seg_min_bytes: usize,

    /// Posting-tree leaf target size in bytes
    #[arg(long, default_value_t = 800)]
    pub seg_target_bytes: usize,

    /// Posting-tree leaf maximum size in bytes
    #[arg(long, default_value_t = 1600)]
    pub seg_max_bytes: usize,

    /// Posting-tree internal fanout
    #[arg(long, default_value_t = 16)]
    pub branching: usize,
}

impl IndexOptions {
    pub fn params(&self) -> BuildParams {
        BuildParams {
            max_inline_bytes: self.max_inline_bytes,
            segments: SegmentPolicy::new(
                self.seg_min_bytes,
                self.seg_target_bytes,
                self.seg_max_bytes,
            ),
            branching: self.branching,
            dictionary: self.dict,
        }
    }

    /// Read the table and build the index, logging row and key counts.
    pub fn build_index(&self) -> CommandResult<SearchIndex> {
        anyhow::ensure!(
            self.seg_min_bytes <= self.seg_target_bytes
                && self.seg_target_bytes <= self.seg_max_bytes,
            "segment sizes must satisfy min <= target <= max"
        );

        let rows = trawl_table::read_table(&self.table)
            .with_context(|| format!("failed to read table {}", self.table.display()))?;

        let index = SearchIndex::build(
            rows.into_iter().map(|row| (row.id, row.name)),
            self.params(),
        );

        let stats = index.stats();
        info!(
            "indexed {} rows into {} keys ({} inline, {} tree)",
            stats.rows, stats.keys, stats.inline_tuples, stats.tree_tuples
        );
        Ok(index)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
