//! CSV row loader.

use std::path::Path;

use crate::error::{SummaryError, SummaryResult};
use crate::types::{is_blank_row, Header, Row, Table};

/// Load a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The first line is the header; an input with no header line is an error.
/// - Fields may be quoted per standard CSV quoting.
/// - Rows whose cells are all blank are dropped.
/// - Ragged rows are kept as-is (not padded or truncated).
/// - Invalid UTF-8 anywhere in the input is an error.
///
/// Errors are annotated with `path`.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> SummaryResult<Table> {
    let path = path.as_ref();
    let mut rdr = reader_builder()
        .from_path(path)
        .map_err(|e| SummaryError::from(e).with_path(path))?;
    load_csv_from_reader(&mut rdr).map_err(|e| e.with_path(path))
}

/// Load CSV text held in memory.
pub fn load_csv_from_str(input: &str) -> SummaryResult<Table> {
    let mut rdr = reader_builder().from_reader(input.as_bytes());
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
///
/// The reader should be configured with headers enabled and `flexible(true)`; otherwise ragged
/// rows are rejected by the `csv` crate itself.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> SummaryResult<Table> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(SummaryError::MissingHeader);
    }
    let header = Header::new(headers.iter());

    let mut rows: Vec<Row> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: Row = record.iter().map(str::to_owned).collect();
        if is_blank_row(&row) {
            continue;
        }
        rows.push(row);
    }

    Ok(Table::new(header, rows))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}
