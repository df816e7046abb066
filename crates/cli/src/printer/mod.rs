use std::io::{self, Stdout, Write};
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use trawl_engine::QueryMetrics;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Configuration for printing query results.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    /// Maximum number of rows to print.
    pub limit: usize,
    /// Whether to show timing statistics.
    pub show_timing: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        PrinterConfig {
            format: OutputFormat::Human,
            limit: 20,
            show_timing: true,
        }
    }
}

/// One printable hit.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub rid: i32,
    pub text: String,
}

/// Everything the printer needs about one query execution.
pub struct QueryReport<'a> {
    pub pattern: &'a str,
    pub total: usize,
    pub truncated: bool,
    pub build_time: Duration,
    pub metrics: &'a QueryMetrics,
    pub rows: Vec<ReportRow>,
}

pub struct Printer<W: Write> {
    config: PrinterConfig,
    out: W,
}

impl Printer<Stdout> {
    pub fn stdout(config: PrinterConfig) -> Self {
        Printer::new(config, io::stdout())
    }
}

impl<W: Write> Printer<W> {
    pub fn new(config: PrinterConfig, out: W) -> Self {
        Printer { config, out }
    }

    pub fn print(&mut self, report: &QueryReport<'_>) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Human => self.print_human(report),
            OutputFormat::Json => self.print_json(report),
        }
    }

    fn print_human(&mut self, report: &QueryReport<'_>) -> io::Result<()> {
        for row in &report.rows {
            writeln!(self.out, "{:>8}  {}", row.rid, row.text)?;
        }

        if report.truncated {
            writeln!(
                self.out,
                "{} matches (showing first {})",
                report.total, self.config.limit
            )?;
        } else {
            writeln!(self.out, "{} matches", report.total)?;
        }

        if self.config.show_timing {
            writeln!(self.out, "build:     {:.6}s", report.build_time.as_secs_f64())?;
            let m = report.metrics;
            for (stage, time) in [
                ("extract", m.extract_time),
                ("lookup", m.lookup_time),
                ("intersect", m.intersect_time),
                ("verify", m.verify_time),
            ] {
                if let Some(t) = time {
                    writeln!(self.out, "{stage:<10}{:.6}s", t.as_secs_f64())?;
                }
            }
            writeln!(self.out, "query:     {:.6}s", m.total().as_secs_f64())?;
        }

        self.out.flush()
    }

    /// One header object, then one object per row.
    fn print_json(&mut self, report: &QueryReport<'_>) -> io::Result<()> {
        let header = json!({
            "kind": "query",
            "pattern": report.pattern,
            "total": report.total,
            "truncated": report.truncated,
            "build_secs": report.build_time.as_secs_f64(),
            "query_secs": report.metrics.total().as_secs_f64(),
        });
        serde_json::to_writer(&mut self.out, &header)?;
        writeln!(self.out)?;

        for row in &report.rows {
            serde_json::to_writer(&mut self.out, row)?;
            writeln!(self.out)?;
        }

        self.out.flush()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
