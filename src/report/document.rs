//! The computed report: overall and grouped summaries ready to render.

use serde::Serialize;

use crate::error::SummaryResult;
use crate::execution::ExecutionEngine;
use crate::summary::{resolve_key_columns, summarize, GroupedSummary, RowSetSummary};
use crate::types::Table;

use super::layout::ReportLayout;

/// The overall-summary section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSection {
    pub title: String,
    pub summary: RowSetSummary,
}

/// One grouped section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSection {
    pub title: String,
    /// Names printed for each key component in group headers.
    pub labels: Vec<String>,
    pub summary: GroupedSummary,
}

/// Every section of a report, in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Data rows summarized (after blank-row removal).
    pub rows: usize,
    pub overall: OverallSection,
    pub grouped: Vec<GroupedSection>,
}

impl Report {
    /// Total groups across all grouped sections.
    pub fn group_count(&self) -> usize {
        self.grouped.iter().map(|s| s.summary.len()).sum()
    }
}

/// Compute every section of `layout` over `table`.
///
/// All grouping keys are checked against the header first, so a bad key fails the run before any
/// summary work.
pub fn build_report(table: &Table, layout: &ReportLayout, engine: &ExecutionEngine) -> SummaryResult<Report> {
    for grouping in &layout.groupings {
        resolve_key_columns(&table.header, &grouping.keys)?;
    }

    let overall = OverallSection {
        title: layout.overall_title.clone(),
        summary: summarize(&table.header, &table.rows),
    };

    let grouped = layout
        .groupings
        .iter()
        .map(|grouping| {
            Ok(GroupedSection {
                title: grouping.resolved_title(),
                labels: grouping.resolved_labels(),
                summary: engine.grouped_summary(&table.header, &table.rows, &grouping.keys)?,
            })
        })
        .collect::<SummaryResult<Vec<_>>>()?;

    Ok(Report {
        rows: table.row_count(),
        overall,
        grouped,
    })
}
