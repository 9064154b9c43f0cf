//! Row-set summaries: classify and summarize every column of a set of rows.

use serde::Serialize;

use crate::types::{cell, is_blank, Header};

use super::classify::{classify, parse_number, ColumnKind};
use super::stats::{categorical_summary, numeric_summary, CategoricalSummary, NumericSummary};

/// Statistics for one column over one row set.
///
/// The variant is decided independently for every row set, so the same column can be numeric in
/// one summary and categorical in another.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    /// Which statistic family this summary belongs to.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Number of non-blank values summarized.
    pub fn count(&self) -> usize {
        match self {
            Self::Numeric(s) => s.count,
            Self::Categorical(s) => s.count,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            Self::Numeric(s) => Some(s),
            Self::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSummary> {
        match self {
            Self::Categorical(s) => Some(s),
            Self::Numeric(_) => None,
        }
    }
}

/// One header column paired with its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnEntry {
    /// Column name.
    pub name: String,
    /// Column statistics.
    #[serde(flatten)]
    pub summary: ColumnSummary,
}

/// Summaries for every header column of one row set, in header order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RowSetSummary {
    columns: Vec<ColumnEntry>,
}

impl RowSetSummary {
    /// Column entries in header order.
    pub fn columns(&self) -> &[ColumnEntry] {
        &self.columns
    }

    /// Look up a column summary by name (first match for duplicated names).
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.summary)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Summarize one column's values.
///
/// Blank values never reach the numeric calculator.
pub fn summarize_column<'a, I>(values: I) -> ColumnSummary
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let values = values.into_iter();
    match classify(values.clone()) {
        ColumnKind::Numeric => {
            let nums: Vec<f64> = values
                .filter(|v| !is_blank(v))
                .filter_map(parse_number)
                .collect();
            ColumnSummary::Numeric(numeric_summary(&nums))
        }
        ColumnKind::Categorical => ColumnSummary::Categorical(categorical_summary(values)),
    }
}

/// Summarize every column of `rows` against `header`.
///
/// Columns are visited in header order. Rows are read through the bounds-checked accessor, so a
/// short row contributes a blank for its missing positions.
pub fn summarize<R: AsRef<[String]>>(header: &Header, rows: &[R]) -> RowSetSummary {
    let columns = header
        .names()
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnEntry {
            name: name.clone(),
            summary: summarize_column(rows.iter().map(|row| cell(row.as_ref(), idx))),
        })
        .collect();
    RowSetSummary { columns }
}
