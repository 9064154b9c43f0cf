//! Core data model: the header, raw string rows and the loaded [`Table`].
//!
//! Cells are kept verbatim as `String`s. Type decisions happen later, per row set and per column,
//! in [`crate::summary`].

/// A single data row: string cells positionally aligned to the [`Header`].
///
/// Rows may be ragged (shorter or longer than the header). Use [`cell`] for bounds-checked access.
pub type Row = Vec<String>;

/// Returns `true` if `value` is empty or contains only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` if every cell of `row` is blank (including a row with no cells).
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|c| is_blank(c.as_ref()))
}

/// Bounds-checked cell accessor.
///
/// Positions past the end of a short row read as the blank sentinel `""`.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Ordered list of column names read from the first line of the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    /// Create a header from column names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the position of the first column named `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// In-memory dataset produced by the row loader.
///
/// Owns the header and rows for the lifetime of a report run. Fully blank rows have already been
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Column names.
    pub header: Header,
    /// Data rows in input order.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from a header and rows.
    pub fn new(header: Header, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the values of column `idx` across all rows, reading missing positions as blank.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| cell(row, idx))
    }
}
