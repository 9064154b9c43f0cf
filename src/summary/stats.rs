//! Per-column statistic calculators.
//!
//! Both calculators are pure functions over one column's values for one row set.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::is_blank;

/// Summary of a numeric column.
///
/// `mean` and `std` are stored at full precision; reports round them with [`round4`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Number of (non-blank) values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation (divides by `count`).
    pub std: f64,
}

impl NumericSummary {
    /// The defined result for an empty input: every field zero.
    pub const EMPTY: Self = Self {
        count: 0,
        mean: 0.0,
        min: 0.0,
        max: 0.0,
        std: 0.0,
    };
}

/// Summary of a categorical column. Blank values are excluded from every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    /// Number of non-blank values.
    pub count: usize,
    /// Number of distinct non-blank values.
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first. `None` when `count == 0`.
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: usize,
}

/// Compute count/mean/min/max/std over already-parsed values.
///
/// Callers must exclude blank cells before parsing. An empty slice yields
/// [`NumericSummary::EMPTY`].
pub fn numeric_summary(values: &[f64]) -> NumericSummary {
    if values.is_empty() {
        return NumericSummary::EMPTY;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let (min, max) = values[1..]
        .iter()
        .fold((values[0], values[0]), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    NumericSummary {
        count: values.len(),
        mean,
        min,
        max,
        std: var.sqrt(),
    }
}

/// Compute count/unique/top/freq, ignoring blank values.
///
/// Values are compared verbatim (no trimming or case folding). Among values tied for the highest
/// frequency, the one encountered first wins.
pub fn categorical_summary<'a, I>(values: I) -> CategoricalSummary
where
    I: IntoIterator<Item = &'a str>,
{
    // Insertion order doubles as first-seen order for tie-breaking.
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values.into_iter().filter(|v| !is_blank(v)) {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for (&value, &freq) in &counts {
        match top {
            Some((_, best)) if freq <= best => {}
            _ => top = Some((value, freq)),
        }
    }

    CategoricalSummary {
        count: counts.values().sum(),
        unique: counts.len(),
        top: top.map(|(v, _)| v.to_owned()),
        freq: top.map(|(_, f)| f).unwrap_or(0),
    }
}

/// Round to 4 decimal places. Non-finite values pass through unchanged.
pub fn round4(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Rounded once from the exact stored value.
    format!("{value:.4}").parse::<f64>().unwrap_or(value)
}
