use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

fn write_table(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reads_well_formed_rows() {
    let file = write_table(
        "1|goldenrod lavender spring|Manufacturer#1|Brand#13|PROMO BURNISHED COPPER|7|JUMBO PKG|901.00|ly. slyly ironi\n\
         2|blush thistle blue|Manufacturer#1|Brand#13|LARGE BRUSHED BRASS|1|LG CASE|902.00|lar accounts amo\n",
    );

    let rows = read_table(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].name, "goldenrod lavender spring");
    assert_eq!(rows[0].size, 7);
    assert_eq!(rows[1].id, 2);
    assert_eq!(rows[1].retail_price, 902.00);
    assert_eq!(rows[1].comment, "lar accounts amo");
}

#[test]
fn skips_empty_lines() {
    let file = write_table("1|a|m|b|t|1|c|1.0|x\n\n2|b|m|b|t|2|c|2.0|y\n\n");
    let rows = read_table(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].id, 2);
}

#[test]
fn rejects_bad_integer() {
    let file = write_table("one|a|m|b|t|1|c|1.0|x\n");
    let err = read_table(file.path()).unwrap_err();
    match err {
        TableError::Parse { line, field, value } => {
            assert_eq!(line, 1);
            assert_eq!(field, "id");
            assert_eq!(value, "one");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_bad_price() {
    let file = write_table("1|a|m|b|t|1|c|cheap|x\n");
    let err = read_table(file.path()).unwrap_err();
    assert!(matches!(
        err,
        TableError::Parse {
            field: "retailprice",
            ..
        }
    ));
}

#[test]
fn rejects_truncated_record() {
    let file = write_table("1|a|m\n");
    let err = read_table(file.path()).unwrap_err();
    assert!(matches!(err, TableError::MissingField { line: 1, .. }));
}

#[test]
fn missing_file_is_io_error() {
    let err = read_table(std::path::Path::new("/nonexistent/part.tbl")).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}
