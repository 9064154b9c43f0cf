//! Report generation: load → summarize → group → render → write.
//!
//! Most callers should use [`generate_report`] (or [`ReportRequest::run`]), which:
//!
//! - loads the CSV input into a [`crate::types::Table`]
//! - validates every grouping of the [`ReportLayout`] against the header
//! - computes the overall summary and one grouped summary per grouping
//! - renders the whole document in memory and hands it to a [`ReportSink`] in one call
//! - optionally reports success/failure/alerts to a [`ReportObserver`]
//!
//! ## Example
//!
//! ```rust
//! use tabular_summary::report::{build_report, render_report, GroupingSpec, ReportLayout};
//! use tabular_summary::execution::ExecutionEngine;
//! use tabular_summary::ingestion::load_csv_from_str;
//!
//! let table = load_csv_from_str("id,score\n1,10\n1,20\n2,abc\n").unwrap();
//! let layout = ReportLayout::new("SCORES").with_grouping(GroupingSpec::new(["id"]));
//! let report = build_report(&table, &layout, &ExecutionEngine::sequential()).unwrap();
//! let lines = render_report(&report);
//!
//! assert_eq!(lines[1], "SCORES");
//! assert!(lines.iter().any(|l| l == "id = 1"));
//! assert!(lines.iter().any(|l| l == "    - mean: 15.0"));
//! ```

pub mod document;
pub mod layout;
pub mod observability;
pub mod render;
pub mod sink;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::SummaryResult;
use crate::execution::{ExecutionEngine, ExecutionOptions};
use crate::ingestion::load_csv_from_path;

pub use document::{build_report, GroupedSection, OverallSection, Report};
pub use layout::{DatasetPreset, GroupingSpec, ReportLayout};
pub use observability::{
    CompositeObserver, FileObserver, ReportContext, ReportObserver, ReportSeverity, ReportStats, StdErrObserver,
};
pub use render::{
    format_float, render_grouped, render_grouped_with_labels, render_report, render_report_json, render_summary,
};
pub use sink::{AtomicFileSink, MemorySink, ReportSink};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain-text sections.
    #[default]
    Text,
    /// Pretty-printed JSON of the full [`Report`].
    Json,
}

/// Options controlling report generation.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ReportOptions {
    /// Output format.
    pub format: ReportFormat,
    /// How grouped summaries are executed.
    pub execution: ExecutionOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ReportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ReportSeverity,
}

impl fmt::Debug for ReportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportOptions")
            .field("format", &self.format)
            .field("execution", &self.execution)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            execution: ExecutionOptions::default(),
            observer: None,
            alert_at_or_above: ReportSeverity::Critical,
        }
    }
}

/// Generate a report for the CSV at `input` and write it to `sink`.
///
/// The sink is written exactly once, after every section has been computed and rendered; any
/// fatal error (unreadable or non-UTF-8 input, missing header, unknown grouping column) returns
/// before the sink is touched.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with [`ReportStats`]
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tabular_summary::report::{
///     generate_report, AtomicFileSink, DatasetPreset, ReportOptions, StdErrObserver,
/// };
///
/// # fn main() -> Result<(), tabular_summary::SummaryError> {
/// let opts = ReportOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let mut sink = AtomicFileSink::new("fb_ads_president_full_report.txt");
/// generate_report(
///     "data/2024_fb_ads_president_scored_anon.csv",
///     &DatasetPreset::FacebookAds.layout(),
///     &mut sink,
///     &opts,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn generate_report(
    input: impl AsRef<Path>,
    layout: &ReportLayout,
    sink: &mut dyn ReportSink,
    options: &ReportOptions,
) -> SummaryResult<ReportStats> {
    let input = input.as_ref();
    let ctx = ReportContext {
        input: input.to_path_buf(),
        destination: sink.describe(),
        format: options.format,
    };

    let result = run_report(input, layout, sink, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(stats) => obs.on_success(&ctx, *stats),
            Err(e) => {
                let sev = ReportSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn run_report(
    input: &Path,
    layout: &ReportLayout,
    sink: &mut dyn ReportSink,
    options: &ReportOptions,
) -> SummaryResult<ReportStats> {
    let table = load_csv_from_path(input)?;
    let engine = ExecutionEngine::new(&options.execution)?;
    let report = build_report(&table, layout, &engine)?;

    let lines = match options.format {
        ReportFormat::Text => render_report(&report),
        ReportFormat::Json => render_report_json(&report)?,
    };
    sink.write_lines(&lines)?;

    Ok(ReportStats {
        rows: report.rows,
        columns: table.header.len(),
        sections: 1 + report.grouped.len(),
        groups: report.group_count(),
        lines: lines.len(),
    })
}

/// An owned description of one report run: input, output file, layout and options.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Path to the CSV input.
    pub input: PathBuf,
    /// Path of the report file to (atomically) create or replace.
    pub output: PathBuf,
    /// Sections to compute.
    pub layout: ReportLayout,
    /// Options controlling the run.
    pub options: ReportOptions,
}

impl ReportRequest {
    /// A request using a built-in dataset layout and default options.
    pub fn for_preset(input: impl Into<PathBuf>, output: impl Into<PathBuf>, preset: DatasetPreset) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            layout: preset.layout(),
            options: ReportOptions::default(),
        }
    }

    /// Execute the request, writing the report to `output`.
    pub fn run(&self) -> SummaryResult<ReportStats> {
        let mut sink = AtomicFileSink::new(&self.output);
        generate_report(&self.input, &self.layout, &mut sink, &self.options)
    }
}
