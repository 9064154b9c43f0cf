//! Descriptive statistics over raw string rows.
//!
//! The pipeline is strictly layered:
//!
//! - [`classify()`]: decides numeric vs. categorical for one column of one row set
//! - [`numeric_summary()`] / [`categorical_summary()`]: per-column statistic calculators
//! - [`summarize()`]: one [`RowSetSummary`] per row set, columns in header order
//! - [`grouped_summary()`]: partitions rows by a composite key and summarizes each partition
//!
//! ## Example
//!
//! ```rust
//! use tabular_summary::ingestion::load_csv_from_str;
//! use tabular_summary::summary::{grouped_summary, summarize, ColumnKind};
//!
//! let table = load_csv_from_str("id,score\n1,10\n1,20\n2,abc\n").unwrap();
//!
//! // "abc" makes the whole column categorical over the full dataset...
//! let overall = summarize(&table.header, &table.rows);
//! assert_eq!(overall.get("score").unwrap().kind(), ColumnKind::Categorical);
//!
//! // ...but group id=1 only sees numbers.
//! let by_id = grouped_summary(&table.header, &table.rows, &["id"]).unwrap();
//! let score = by_id.get(&["1"]).unwrap().get("score").unwrap();
//! assert_eq!(score.as_numeric().unwrap().mean, 15.0);
//! ```

pub mod classify;
pub mod compose;
pub mod group;
pub mod stats;

pub use classify::{classify, parse_number, ColumnKind};
pub use compose::{summarize, summarize_column, ColumnEntry, ColumnSummary, RowSetSummary};
pub use group::{grouped_summary, partition, resolve_key_columns, GroupKey, GroupedSummary, Partition};
pub use stats::{categorical_summary, numeric_summary, round4, CategoricalSummary, NumericSummary};
