use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use log::info;
use trawl_engine::QueryError;

use crate::commands::{CommandResult, IndexOptions};

#[derive(Debug, Args)]
pub struct BenchArgs {
    #[command(flatten)]
    pub index: IndexOptions,

    /// Pattern to time; repeat the flag to time several
    #[arg(long = "pattern", required = true)]
    pub patterns: Vec<String>,

    /// How many build+query rounds to run
    #[arg(long, default_value_t = 10)]
    pub iterations: usize,

    /// CSV file receiving one line per iteration and pattern
    #[arg(long, default_value = "bench_results.csv")]
    pub output: PathBuf,
}

pub fn run(args: BenchArgs) -> ExitCode {
    match execute(args) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Read the table file once and drop the buffer, leaving the data in the
/// page cache so the first timed build does not pay for cold I/O.
fn warm_up_cache(args: &BenchArgs) -> CommandResult<()> {
    let bytes = fs::read(&args.index.table)
        .with_context(|| format!("failed to warm up {}", args.index.table.display()))?;
    info!("warmup: read {} bytes from {}", bytes.len(), args.index.table.display());
    Ok(())
}

fn execute(args: BenchArgs) -> CommandResult<()> {
    warm_up_cache(&args)?;

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "iteration,build_secs,pattern,query_secs,matches")?;

    for iteration in 1..=args.iterations {
        let build_start = Instant::now();
        let index = args.index.build_index()?;
        let build_secs = build_start.elapsed().as_secs_f64();

        for pattern in &args.patterns {
            let query_start = Instant::now();
            let result = index.query(pattern);
            let query_secs = query_start.elapsed().as_secs_f64();

            let matches = match result {
                Ok(hits) => hits.len(),
                Err(QueryError::UnsupportedPattern) => {
                    anyhow::bail!("pattern {pattern:?} has no required trigrams");
                }
            };

            writeln!(
                out,
                "{iteration},{build_secs:.6},{},{query_secs:.6},{matches}",
                csv_escape(pattern)
            )?;
        }

        info!("iteration {iteration}/{}: build {build_secs:.6}s", args.iterations);
    }

    out.flush()?;
    println!(
        "wrote {} iterations x {} patterns to {}",
        args.iterations,
        args.patterns.len(),
        args.output.display()
    );
    Ok(())
}

/// Quote a CSV field if it contains a delimiter or quote.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "bench_tests.rs"]
mod tests;
