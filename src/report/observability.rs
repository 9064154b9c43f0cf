use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SummaryError;

use super::ReportFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (run failed on bad input or configuration).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

impl ReportSeverity {
    /// Classify a failed run.
    pub fn for_error(e: &SummaryError) -> Self {
        match e {
            SummaryError::Io(_) | SummaryError::Output { .. } | SummaryError::ThreadPool(_) => Self::Critical,
            SummaryError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            SummaryError::Json(err) if err.is_io() => Self::Critical,
            SummaryError::Source { source, .. } => Self::for_error(source),
            SummaryError::Json(_)
            | SummaryError::Encoding { .. }
            | SummaryError::MissingHeader
            | SummaryError::UnknownGroupColumn { .. }
            | SummaryError::EmptyGroupKeys
            | SummaryError::UnknownPreset { .. } => Self::Error,
        }
    }
}

/// Context about a report run.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// The input path.
    pub input: PathBuf,
    /// Where the report goes (see [`super::ReportSink::describe`]).
    pub destination: String,
    /// Output format.
    pub format: ReportFormat,
}

/// Stats reported on a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
    /// Data rows loaded (blank rows excluded).
    pub rows: usize,
    /// Header columns.
    pub columns: usize,
    /// Sections written, including the overall section.
    pub sections: usize,
    /// Groups across all grouped sections.
    pub groups: usize,
    /// Lines handed to the sink.
    pub lines: usize,
}

/// Observer interface for report runs.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ReportObserver: Send + Sync {
    /// Called when a report has been written.
    fn on_success(&self, _ctx: &ReportContext, _stats: ReportStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &ReportContext, _severity: ReportSeverity, _error: &SummaryError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ReportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ReportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ReportObserver for CompositeObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ReportStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs report events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ReportObserver for StdErrObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ReportStats) {
        eprintln!(
            "[report][ok] input={} output={} format={:?} rows={} columns={} sections={} groups={}",
            ctx.input.display(),
            ctx.destination,
            ctx.format,
            stats.rows,
            stats.columns,
            stats.sections,
            stats.groups
        );
    }

    fn on_failure(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        eprintln!(
            "[report][{:?}] input={} output={} err={}",
            severity,
            ctx.input.display(),
            ctx.destination,
            error_chain(error)
        );
    }

    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        eprintln!(
            "[ALERT][report][{:?}] input={} output={} err={}",
            severity,
            ctx.input.display(),
            ctx.destination,
            error_chain(error)
        );
    }
}

/// Appends report events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ReportObserver for FileObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ReportStats) {
        self.append_line(&format!(
            "{} ok input={} output={} rows={} sections={} groups={} lines={}",
            unix_ts(),
            ctx.input.display(),
            ctx.destination,
            stats.rows,
            stats.sections,
            stats.groups,
            stats.lines
        ));
    }

    fn on_failure(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        self.append_line(&format!(
            "{} fail severity={:?} input={} output={} err={}",
            unix_ts(),
            severity,
            ctx.input.display(),
            ctx.destination,
            error_chain(error)
        ));
    }

    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &SummaryError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} input={} output={} err={}",
            unix_ts(),
            severity,
            ctx.input.display(),
            ctx.destination,
            error_chain(error)
        ));
    }
}

/// The error and its sources joined with `: `, skipping sources already spelled out in the
/// message.
fn error_chain(e: &(dyn StdError + 'static)) -> String {
    let mut msg = e.to_string();
    let mut cur = e.source();
    while let Some(err) = cur {
        let part = err.to_string();
        if !msg.contains(&part) {
            msg.push_str(": ");
            msg.push_str(&part);
        }
        cur = err.source();
    }
    msg
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
