//! `tabular-summary` computes descriptive statistics over delimited tabular data (social-media
//! post and ad exports, for example) without a dataframe library.
//!
//! Every cell is kept as a raw string. For each column of each row set the crate decides whether
//! the column is numeric or categorical, computes the matching summary, and can repeat the same
//! computation for every group of rows sharing a composite key.
//!
//! ## Pipeline
//!
//! - [`ingestion`]: CSV → [`types::Table`] (header + rows, fully blank rows dropped)
//! - [`summary`]: column classification, statistic calculators, row-set and grouped summaries
//! - [`execution`]: optional parallel summarization of groups, with metrics and observer hooks
//! - [`report`]: layouts, presets, text/JSON rendering, atomic report sinks, run observers
//! - [`error`]: the crate-wide error type
//!
//! ## Column summaries
//!
//! A column is numeric for a given row set when every non-blank value parses as a float:
//!
//! - numeric: `count`, `mean`, `min`, `max`, `std` (population standard deviation)
//! - categorical: `count`, `unique`, `top`, `freq` (blank values excluded; ties go to the value
//!   seen first)
//!
//! The decision is made fresh for every row set, so a column can be categorical overall and
//! numeric inside a group.
//!
//! ## Quick example
//!
//! ```rust
//! use tabular_summary::ingestion::load_csv_from_str;
//! use tabular_summary::summary::{grouped_summary, summarize};
//!
//! let table = load_csv_from_str("id,score\n1,10\n1,20\n2,abc\n").unwrap();
//!
//! let overall = summarize(&table.header, &table.rows);
//! let score = overall.get("score").unwrap().as_categorical().unwrap();
//! assert_eq!((score.count, score.unique, score.freq), (3, 3, 1));
//! assert_eq!(score.top.as_deref(), Some("10"));
//!
//! let by_id = grouped_summary(&table.header, &table.rows, &["id"]).unwrap();
//! let score = by_id.get(&["1"]).unwrap().get("score").unwrap().as_numeric().unwrap();
//! assert_eq!((score.count, score.mean, score.std), (2, 15.0, 5.0));
//! ```
//!
//! ## Writing a report
//!
//! ```no_run
//! use tabular_summary::report::{DatasetPreset, ReportRequest};
//!
//! # fn main() -> Result<(), tabular_summary::SummaryError> {
//! let request = ReportRequest::for_preset(
//!     "data/2024_tw_posts_president_scored_anon.csv",
//!     "twitter_full_report.txt",
//!     DatasetPreset::TwitterPosts,
//! );
//! let stats = request.run()?;
//! println!("rows={} groups={}", stats.rows, stats.groups);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod report;
pub mod summary;
pub mod types;

pub use error::{SummaryError, SummaryResult};
