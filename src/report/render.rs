//! Text rendering of summaries.
//!
//! Renderers only format; they never reorder columns or groups.

use crate::error::SummaryResult;
use crate::summary::{round4, ColumnSummary, GroupedSummary, RowSetSummary};

use super::document::Report;

/// Width of the `=` rule that brackets every section title.
pub const SEPARATOR_WIDTH: usize = 60;

/// The section separator rule.
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Format a float the way Python's `repr` does.
///
/// Integral values keep a trailing `.0`; very small or very large magnitudes switch to
/// scientific notation with a signed two-digit exponent (`1e-05`, `1e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{value:e}");
        if let Some((mantissa, exp)) = sci.split_once('e') {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            return format!("{mantissa}e{sign}{:02}", exp.abs());
        }
        return sci;
    }

    let plain = format!("{value}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// Metric name/value pairs for one column, in report order.
///
/// `mean` and `std` are rounded to 4 decimals; `min`/`max` keep full precision.
pub fn metrics(summary: &ColumnSummary) -> Vec<(&'static str, String)> {
    match summary {
        ColumnSummary::Numeric(s) => vec![
            ("count", s.count.to_string()),
            ("mean", format_float(round4(s.mean))),
            ("min", format_float(s.min)),
            ("max", format_float(s.max)),
            ("std", format_float(round4(s.std))),
        ],
        ColumnSummary::Categorical(s) => vec![
            ("count", s.count.to_string()),
            ("unique", s.unique.to_string()),
            ("top", s.top.clone().unwrap_or_else(|| "None".to_string())),
            ("freq", s.freq.to_string()),
        ],
    }
}

fn push_columns(out: &mut Vec<String>, summary: &RowSetSummary, indent: &str, blank_after_column: bool) {
    for column in summary.columns() {
        out.push(format!("{indent}Column: {}", column.name));
        for (metric, value) in metrics(&column.summary) {
            out.push(format!("{indent}  - {metric}: {value}"));
        }
        if blank_after_column {
            out.push(String::new());
        }
    }
}

/// Render a row-set summary: a `Column:` line per column, one indented line per metric, and a
/// blank line after each column.
pub fn render_summary(summary: &RowSetSummary) -> Vec<String> {
    let mut out = Vec::new();
    push_columns(&mut out, summary, "", true);
    out
}

/// Render the header line of one group: `label = value` pairs joined by `, `.
pub fn render_group_key(labels: &[String], values: &[String]) -> String {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| format!("{label} = {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a grouped summary, labelling key components with the grouping column names.
pub fn render_grouped(grouped: &GroupedSummary) -> Vec<String> {
    render_grouped_with_labels(grouped, grouped.key_columns())
}

/// Render a grouped summary with custom key labels.
///
/// One block per group in stored order: the key line, the group's columns indented by two
/// spaces, then a blank line.
pub fn render_grouped_with_labels(grouped: &GroupedSummary, labels: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for (key, summary) in grouped.groups() {
        out.push(render_group_key(labels, key.values()));
        push_columns(&mut out, summary, "  ", false);
        out.push(String::new());
    }
    out
}

/// Bracket a section body with the separator rule and title.
pub fn render_section(title: &str, body: Vec<String>) -> Vec<String> {
    let sep = separator();
    let mut out = Vec::with_capacity(body.len() + 3);
    out.push(sep.clone());
    out.push(title.to_string());
    out.push(sep);
    out.extend(body);
    out
}

/// Render a full report as text: the overall section, then each grouped section in order.
pub fn render_report(report: &Report) -> Vec<String> {
    let mut out = render_section(&report.overall.title, render_summary(&report.overall.summary));
    for section in &report.grouped {
        out.extend(render_section(
            &section.title,
            render_grouped_with_labels(&section.summary, &section.labels),
        ));
    }
    out
}

/// Render a full report as pretty-printed JSON, split into lines.
pub fn render_report_json(report: &Report) -> SummaryResult<Vec<String>> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json.lines().map(str::to_owned).collect())
}
