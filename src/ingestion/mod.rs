//! Input loading.
//!
//! The loader reads delimited text into a [`crate::types::Table`]: a header plus the non-blank
//! rows in input order. No typing happens here; every cell stays a raw string.
//!
//! - [`csv`]: comma-separated input (path, reader or in-memory string)

pub mod csv;

pub use self::csv::{load_csv_from_path, load_csv_from_reader, load_csv_from_str};
