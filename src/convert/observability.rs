use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConvertError;

use super::scan::SourceFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (conversion failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Why a source file was skipped rather than converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A columnar output with the same stem already exists.
    OutputExists,
    /// No field delimiter could be determined from the first content line.
    DelimiterUndetected,
}

/// Context about one conversion attempt.
#[derive(Debug, Clone)]
pub struct ConvertContext {
    /// The source path.
    pub path: PathBuf,
    /// The source format the dispatcher selected.
    pub format: SourceFormat,
}

/// Stats reported on a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertStats {
    /// Rows in the converted table.
    pub rows: usize,
    /// Columns in the converted table.
    pub columns: usize,
    /// Names of columns the normalizer coerced to text.
    pub coerced_columns: Vec<String>,
}

/// Observer interface for conversion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ConvertObserver: Send + Sync {
    /// Called after a source file converts successfully.
    fn on_converted(&self, _ctx: &ConvertContext, _stats: &ConvertStats) {}

    /// Called when a source file is skipped.
    fn on_skipped(&self, _ctx: &ConvertContext, _reason: SkipReason) {}

    /// Called when a conversion fails.
    fn on_failed(&self, _ctx: &ConvertContext, _severity: Severity, _error: &ConvertError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failed`].
    fn on_alert(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        self.on_failed(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConvertObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConvertObserver>>) -> Self {
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

impl ConvertObserver for CompositeObserver {
    fn on_converted(&self, ctx: &ConvertContext, stats: &ConvertStats) {
        for o in &self.observers {
            o.on_converted(ctx, stats);
        }
    }

    fn on_skipped(&self, ctx: &ConvertContext, reason: SkipReason) {
        for o in &self.observers {
            o.on_skipped(ctx, reason);
        }
    }

    fn on_failed(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        for o in &self.observers {
            o.on_failed(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs conversion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConvertObserver for StdErrObserver {
    fn on_converted(&self, ctx: &ConvertContext, stats: &ConvertStats) {
        eprintln!(
            "[convert][ok] format={:?} path={} rows={} columns={}",
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.columns
        );
        for column in &stats.coerced_columns {
            eprintln!(
                "[convert][mixed] column '{column}' coerced to text path={}",
                ctx.path.display()
            );
        }
    }

    fn on_skipped(&self, ctx: &ConvertContext, reason: SkipReason) {
        eprintln!(
            "[convert][skip] reason={:?} format={:?} path={}",
            reason,
            ctx.format,
            ctx.path.display()
        );
    }

    fn on_failed(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        eprintln!(
            "[convert][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        eprintln!(
            "[ALERT][convert][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }
}

/// Appends conversion events to a local log file.
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

impl ConvertObserver for FileObserver {
    fn on_converted(&self, ctx: &ConvertContext, stats: &ConvertStats) {
        self.append_line(&format!(
            "{} ok format={:?} path={} rows={} columns={} coerced={:?}",
            unix_ts(),
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.columns,
            stats.coerced_columns
        ));
    }

    fn on_skipped(&self, ctx: &ConvertContext, reason: SkipReason) {
        self.append_line(&format!(
            "{} skip reason={:?} format={:?} path={}",
            unix_ts(),
            reason,
            ctx.format,
            ctx.path.display()
        ));
    }

    fn on_failed(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ConvertContext, severity: Severity, error: &ConvertError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.path.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
