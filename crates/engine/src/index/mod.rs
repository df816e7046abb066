use std::io::{self, Write};

use crate::dict::TrigramDict;
use crate::query::{QueryEngine, QueryError};
use crate::timing::QueryMetrics;
use crate::trigram::Rid;

mod builder;
mod params;
mod rowstore;

pub use builder::IndexBuilder;
pub use params::BuildParams;
pub use rowstore::RowStore;

/// Counters describing a built index.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexStats {
    /// Rows ingested (including rows with no trigrams).
    pub rows: usize,
    /// Distinct trigram keys in the dictionary.
    pub keys: usize,
    /// Entry tuples carrying an inline posting list.
    pub inline_tuples: usize,
    /// Entry tuples carrying a posting tree.
    pub tree_tuples: usize,
    /// Logical bytes of posting storage across all tuples.
    pub posting_bytes: usize,
}

/// The built, read-only index: row store plus trigram dictionary.
///
/// Everything is immutable after [`build`](Self::build); concurrent queries
/// are safe because nothing mutates and all interior references are stable.
pub struct SearchIndex {
    rows: RowStore,
    dict: Box<dyn TrigramDict>,
    params: BuildParams,
    stats: IndexStats,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("params", &self.params)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl SearchIndex {
    /// Build an index over `(rid, text)` pairs.
    pub fn build<I>(rows: I, params: BuildParams) -> Self
    where
        I: IntoIterator<Item = (Rid, String)>,
    {
        let mut builder = IndexBuilder::new(params);
        builder.add_batch(rows);
        builder.finish()
    }

    pub(crate) fn from_parts(
        rows: RowStore,
        dict: Box<dyn TrigramDict>,
        params: BuildParams,
        stats: IndexStats,
    ) -> Self {
        SearchIndex { rows, dict, params, stats }
    }

    /// Evaluate a `LIKE` pattern against the index.
    pub fn query(&self, pattern: &str) -> Result<Vec<Rid>, QueryError> {
        QueryEngine::new(self.dict.as_ref(), &self.rows).run(pattern)
    }

    /// As [`query`](Self::query), also reporting per-stage timings.
    pub fn query_timed(&self, pattern: &str) -> (Result<Vec<Rid>, QueryError>, QueryMetrics) {
        QueryEngine::new(self.dict.as_ref(), &self.rows).run_timed(pattern)
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn dictionary(&self) -> &dyn TrigramDict {
        self.dict.as_ref()
    }

    pub fn params(&self) -> &BuildParams {
        &self.params
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Write a human-readable rendering of the dictionary structure.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        self.dict.dump(out)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
