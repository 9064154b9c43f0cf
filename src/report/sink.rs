//! Report sinks.
//!
//! A report is composed fully in memory and handed to its sink in a single call, so a failed run
//! never leaves a half-written report behind.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{SummaryError, SummaryResult};

/// Destination for rendered report lines.
pub trait ReportSink {
    /// Write the complete report. Called once per run.
    fn write_lines(&mut self, lines: &[String]) -> SummaryResult<()>;

    /// Human-readable destination used in log lines.
    fn describe(&self) -> String {
        "<sink>".to_string()
    }
}

/// Writes a report file atomically.
///
/// Lines go to a temporary file in the destination's directory, which is renamed over `path`
/// only after everything has been written and synced. On any failure the temporary file is
/// removed and an existing file at `path` is left untouched.
#[derive(Debug, Clone)]
pub struct AtomicFileSink {
    path: PathBuf,
}

impl AtomicFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn output_error(&self, source: std::io::Error) -> SummaryError {
        SummaryError::Output {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReportSink for AtomicFileSink {
    fn write_lines(&mut self, lines: &[String]) -> SummaryResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.output_error(e))?;
        {
            let mut w = BufWriter::new(&mut tmp);
            for line in lines {
                writeln!(w, "{line}").map_err(|e| self.output_error(e))?;
            }
            w.flush().map_err(|e| self.output_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.output_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.output_error(e.error))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Collects report lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The report as one string, each line newline-terminated (same bytes a file sink writes).
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}

impl ReportSink for MemorySink {
    fn write_lines(&mut self, lines: &[String]) -> SummaryResult<()> {
        self.lines.extend_from_slice(lines);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
