use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type SummaryResult<T> = Result<T, SummaryError>;

/// Error type returned by loading, summarizing and report generation.
///
/// Every variant is fatal for a report run. Recoverable data conditions (non-numeric cells in an
/// otherwise numeric column, blank columns, ragged rows) never surface as errors.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error other than an encoding failure.
    #[error("csv error: {0}")]
    Csv(csv::Error),

    /// The input could not be decoded as UTF-8 text.
    #[error("input is not valid UTF-8{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Encoding { line: Option<u64>, message: String },

    /// The input has no header line at all.
    #[error("missing header line")]
    MissingHeader,

    /// A grouping column is not present in the header.
    #[error("unknown grouping column '{column}'. headers={header:?}")]
    UnknownGroupColumn { column: String, header: Vec<String> },

    /// A grouping was requested with no key columns.
    #[error("grouping requires at least one key column")]
    EmptyGroupKeys,

    /// A load error, annotated with the input path it came from.
    #[error("failed to load '{}': {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: Box<SummaryError>,
    },

    /// A dataset preset name did not match any known preset.
    #[error("unknown dataset preset '{name}' (expected one of {expected:?})")]
    UnknownPreset { name: String, expected: Vec<String> },

    /// The report could not be written to its destination.
    #[error("failed to write report '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error for layouts and JSON reports.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool for parallel group summarization could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<csv::Error> for SummaryError {
    fn from(err: csv::Error) -> Self {
        let utf8 = match err.kind() {
            csv::ErrorKind::Utf8 { pos, err } => {
                Some((pos.as_ref().map(|p| p.line()), err.to_string()))
            }
            _ => None,
        };
        match utf8 {
            Some((line, message)) => Self::Encoding { line, message },
            None => Self::Csv(err),
        }
    }
}

impl SummaryError {
    /// Attach the offending input path to a load error.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self::Source {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`SummaryError::Source`] wrappers.
    pub fn root(&self) -> &SummaryError {
        match self {
            Self::Source { source, .. } => source.root(),
            other => other,
        }
    }
}
