use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::record::TableRow;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table file")]
    Io(#[from] io::Error),

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid {field} {value:?}")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Read a pipe-delimited table file.
///
/// Record layout, one per line, no header:
/// `id|name|mfgr|brand|type|size|container|retailprice|comment`
///
/// Empty lines are skipped. Any unparsable field aborts the read.
pub fn read_table(path: &Path) -> Result<Vec<TableRow>, TableError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        rows.push(parse_line(&line, idx + 1)?);
    }

    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn parse_line(line: &str, lineno: usize) -> Result<TableRow, TableError> {
    let mut fields = line.split('|');

    let mut next_field = |field: &'static str| {
        fields
            .next()
            .ok_or(TableError::MissingField { line: lineno, field })
    };

    let id_raw = next_field("id")?;
    let name = next_field("name")?.to_string();
    let mfgr = next_field("mfgr")?.to_string();
    let brand = next_field("brand")?.to_string();
    let kind = next_field("type")?.to_string();
    let size_raw = next_field("size")?;
    let container = next_field("container")?.to_string();
    let price_raw = next_field("retailprice")?;
    let comment = next_field("comment")?.to_string();

    let id = parse_i32(id_raw, lineno, "id")?;
    let size = parse_i32(size_raw, lineno, "size")?;
    let retail_price = parse_f64(price_raw, lineno, "retailprice")?;

    Ok(TableRow {
        id,
        name,
        mfgr,
        brand,
        kind,
        size,
        container,
        retail_price,
        comment,
    })
}

fn parse_i32(raw: &str, line: usize, field: &'static str) -> Result<i32, TableError> {
    raw.trim().parse().map_err(|_| TableError::Parse {
        line,
        field,
        value: raw.to_string(),
    })
}

fn parse_f64(raw: &str, line: usize, field: &'static str) -> Result<f64, TableError> {
    raw.trim().parse().map_err(|_| TableError::Parse {
        line,
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
