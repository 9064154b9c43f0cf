//! Numeric vs. categorical column classification.

use serde::Serialize;

use crate::types::is_blank;

/// The statistic family chosen for one column over one row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-blank value parses as a number.
    Numeric,
    /// At least one non-blank value is not a number, or every value is blank.
    Categorical,
}

/// Parse a cell as a floating-point number.
///
/// Accepts standard decimal and scientific notation (plus `inf`/`nan` spellings) with surrounding
/// whitespace. Locale grouping characters such as `1,000` are rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Classify a column from its cell values.
///
/// Blank values are ignored. A column with no non-blank values is [`ColumnKind::Categorical`].
pub fn classify<'a, I>(values: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a str>,
{
    let mut saw_value = false;
    for value in values.into_iter().filter(|v| !is_blank(v)) {
        if parse_number(value).is_none() {
            return ColumnKind::Categorical;
        }
        saw_value = true;
    }
    if saw_value {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
