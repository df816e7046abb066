use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use log::debug;
use trawl_engine::QueryError;

use crate::commands::{CommandResult, IndexOptions};
use crate::printer::{OutputFormat, Printer, PrinterConfig, QueryReport, ReportRow};

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// The LIKE pattern to evaluate (literals and % wildcards)
    pub pattern: String,

    #[command(flatten)]
    pub index: IndexOptions,

    /// Maximum number of rows to display
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,

    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// Suppress timing statistics
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn run(args: QueryArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(1)
        }
    }
}

fn execute(args: QueryArgs) -> CommandResult<ExitCode> {
    let build_start = Instant::now();
    let index = args.index.build_index()?;
    let build_time = build_start.elapsed();
    debug!("index built in {:.6}s", build_time.as_secs_f64());

    let (result, metrics) = index.query_timed(&args.pattern);
    let hits = match result {
        Ok(hits) => hits,
        Err(QueryError::UnsupportedPattern) => {
            eprintln!(
                "[error] pattern {:?} has no required trigrams; the index cannot serve it",
                args.pattern
            );
            return Ok(ExitCode::from(2));
        }
    };

    let format = if args.json { OutputFormat::Json } else { OutputFormat::Human };
    let config = PrinterConfig {
        format,
        limit: args.limit,
        show_timing: !args.quiet,
    };

    let rows: Vec<ReportRow> = hits
        .iter()
        .take(args.limit)
        .map(|&rid| ReportRow {
            rid,
            text: index.rows().get(rid).unwrap_or_default().to_string(),
        })
        .collect();

    let report = QueryReport {
        pattern: &args.pattern,
        total: hits.len(),
        truncated: hits.len() > args.limit,
        build_time,
        metrics: &metrics,
        rows,
    };

    let mut printer = Printer::stdout(config);
    printer.print(&report)?;

    Ok(ExitCode::from(0))
}
