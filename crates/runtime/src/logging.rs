use std::sync::OnceLock;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

/// Minimal stderr logger behind the `log` facade.
///
/// The level is fixed at init time; there is no runtime reconfiguration.
pub struct Logger {
    filter: LevelFilter,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            eprintln!(
                "{} {:<5} {} {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Parse a `LevelFilter` from an env-style string, defaulting to `Warn`.
fn parse_filter(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

fn filter_from_env() -> LevelFilter {
    let raw = std::env::var(PROGRAM_LOG_LEVEL).ok();
    parse_filter(raw.as_deref())
}

pub fn init() -> Result<(), SetLoggerError> {
    _init(filter_from_env())
}

pub fn _init(filter: LevelFilter) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // log::set_max_level uses the passed-in filter, so make sure we only
    // apply it on the call that actually installed the logger.
    let init_call = LOGGER.get().is_none();

    let logger = LOGGER.get_or_init(|| Logger { filter });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(filter);
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
