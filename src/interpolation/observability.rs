//! Run reports: how far an interpolation run got and why it stopped.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::error::InterpolationError;
use crate::reader::ReaderStats;
use crate::types::RowIndex;

/// How bad an aborted run was; compared against the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InterpolationSeverity {
    /// The input ended where a row was required.
    Warning,
    /// Malformed input or unusable settings.
    Error,
    /// The input could not be opened or read.
    Critical,
}

impl InterpolationSeverity {
    pub fn for_error(e: &InterpolationError) -> Self {
        match e {
            InterpolationError::Io(_) => Self::Critical,
            InterpolationError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            InterpolationError::Config(_) | InterpolationError::InvalidConfiguration { .. } => Self::Error,
            InterpolationError::EndOfInput => Self::Warning,
        }
    }
}

/// Rows written so far and the counters of the row reader behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterpolationStats {
    /// Number of rows written.
    pub rows: u64,
    /// Seek, read and cache-hit counters of the row source.
    pub reader: ReaderStats,
}

impl fmt::Display for InterpolationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows={} seeks={} reads={} cache_hits={}",
            self.rows, self.reader.seeks, self.reader.reads, self.reader.cache_hits
        )
    }
}

/// Why and where a run stopped early.
#[derive(Debug)]
pub struct RunFailure<'a> {
    pub severity: InterpolationSeverity,
    pub error: &'a InterpolationError,
    /// Output row being produced when the run stopped; `None` if no row was requested yet
    /// (the file could not be opened or the format was rejected).
    pub row: Option<RowIndex>,
    /// Progress up to the failure.
    pub progress: InterpolationStats,
}

impl fmt::Display for RunFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "severity={:?} ", self.severity)?;
        match self.row {
            Some(row) => write!(f, "row={row} ")?,
            None => f.write_str("row=- ")?,
        }
        write!(f, "{} err={}", self.progress, self.error)
    }
}

/// Receives the outcome of [`super::interpolate_from_path`].
pub trait InterpolationObserver: Send + Sync {
    /// The whole input was written.
    fn on_finished(&self, _path: &Path, _stats: &InterpolationStats) {}

    /// The run stopped on an error.
    fn on_aborted(&self, _path: &Path, _failure: &RunFailure<'_>) {}

    /// Called after [`Self::on_aborted`] when the severity meets the alert threshold.
    fn on_alert(&self, _path: &Path, _failure: &RunFailure<'_>) {}
}

/// Writes one `[interpolate]` line per event to a sink, stderr for the CLI.
///
/// Write errors are ignored so logging never changes the outcome of a run.
#[derive(Debug)]
pub struct LineLogObserver<W> {
    sink: Mutex<W>,
}

impl LineLogObserver<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LineLogObserver<W> {
    pub fn new(sink: W) -> Self {
        Self { sink: Mutex::new(sink) }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self, line: fmt::Arguments<'_>) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(sink, "{line}");
    }
}

impl<W: Write + Send> InterpolationObserver for LineLogObserver<W> {
    fn on_finished(&self, path: &Path, stats: &InterpolationStats) {
        self.log(format_args!("[interpolate] finished path={} {stats}", path.display()));
    }

    fn on_aborted(&self, path: &Path, failure: &RunFailure<'_>) {
        self.log(format_args!("[interpolate] aborted path={} {failure}", path.display()));
    }

    fn on_alert(&self, path: &Path, failure: &RunFailure<'_>) {
        self.log(format_args!("[interpolate][ALERT] path={} {failure}", path.display()));
    }
}
