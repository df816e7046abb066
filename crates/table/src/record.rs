/// One record of the pipe-delimited part table.
///
/// Only `id` and `name` feed the index; the remaining fields are carried
/// through so callers can display full rows, but the engine never reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: i32,
    /// The indexed text column.
    pub name: String,
    pub mfgr: String,
    pub brand: String,
    pub kind: String,
    pub size: i32,
    pub container: String,
    pub retail_price: f64,
    pub comment: String,
}
