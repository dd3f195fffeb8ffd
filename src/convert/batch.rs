//! The batch conversion dispatcher.
//!
//! [`run_batch`] walks the configured directories and, for every source file
//! whose stem has no columnar output yet, invokes the matching loader and the
//! Parquet writer. Formats are processed in the fixed order csv, xlsx, dat,
//! txt; ordering is irrelevant to correctness since conversions are
//! independent, but it makes runs reproducible.
//!
//! Error policy is uniform across formats: a per-file failure is reported and
//! counted, and the run continues with the next file. An undetectable
//! delimiter is reported as a skip (with the file and reason), not a failure.
//! Scan-level errors — a missing watched directory — abort the run.

use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConvertConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::types::Table;

use super::csv::load_csv;
use super::excel::load_excel;
use super::normalize::normalize_mixed_columns;
use super::observability::{ConvertContext, ConvertObserver, ConvertStats, Severity, SkipReason};
use super::parquet::write_parquet;
use super::scan::{OUTPUT_EXTENSION, SourceFormat, scan_directory};
use super::text::load_delimited;

/// Options controlling batch behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct BatchOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConvertObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for BatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// What one run did, per source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Output paths written this run.
    pub converted: Vec<PathBuf>,
    /// Source paths skipped because their output already existed.
    pub skipped_existing: Vec<PathBuf>,
    /// Source paths skipped because no delimiter could be determined.
    pub skipped_undetected: Vec<PathBuf>,
    /// Source paths whose conversion failed, with the error text.
    pub failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// `true` when no conversion failed (skips are fine).
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The outcome of converting a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Path of the written columnar output.
    pub output: PathBuf,
    /// Row/column counts and coerced-column names.
    pub stats: ConvertStats,
}

/// Run the batch conversion over every directory in `config`.
///
/// Each directory is scanned once; a stem is skipped when a `.parquet` output
/// for it was found at scan time or was produced earlier in this run, so at
/// most one output is ever written per stem. Re-running over an unchanged
/// tree is a no-op.
pub fn run_batch(config: &ConvertConfig, options: &BatchOptions) -> ConvertResult<RunSummary> {
    let mut summary = RunSummary::default();
    for dir in &config.directories {
        convert_directory(dir, &config.formats, options, &mut summary)?;
    }
    Ok(summary)
}

/// Convert every unconverted source file in one directory.
pub fn convert_directory(
    dir: &Path,
    formats: &[SourceFormat],
    options: &BatchOptions,
    summary: &mut RunSummary,
) -> ConvertResult<()> {
    let scan = scan_directory(dir)?;
    let mut converted: BTreeSet<String> = scan.converted_stems().clone();

    for &format in formats {
        let stems: Vec<String> = scan.stems(format).map(str::to_string).collect();
        for stem in stems {
            let source = dir.join(format!("{stem}.{}", format.extension()));
            let ctx = ConvertContext {
                path: source.clone(),
                format,
            };

            if converted.contains(&stem) {
                report_skip(options, &ctx, SkipReason::OutputExists);
                summary.skipped_existing.push(source);
                continue;
            }

            match convert_file(&source, format) {
                Ok(conversion) => {
                    report_converted(options, &ctx, &conversion.stats);
                    converted.insert(stem);
                    summary.converted.push(conversion.output);
                }
                Err(ConvertError::DelimiterNotFound { path }) => {
                    report_skip(options, &ctx, SkipReason::DelimiterUndetected);
                    summary.skipped_undetected.push(path);
                }
                Err(e) => {
                    report_failure(options, &ctx, &e);
                    summary.failed.push((source, e.to_string()));
                }
            }
        }
    }

    Ok(())
}

/// Convert one source file to Parquet, unconditionally.
///
/// The output shares the source's stem and directory with the columnar
/// extension. Spreadsheet tables pass through the mixed-type normalizer
/// before writing; text formats get whole-column inference at load and need
/// no normalization. Callers wanting skip-if-exists semantics use
/// [`run_batch`] / [`convert_directory`].
pub fn convert_file(path: &Path, format: SourceFormat) -> ConvertResult<Conversion> {
    let mut table = match format {
        SourceFormat::Csv => load_csv(path)?,
        SourceFormat::Excel => load_excel(path)?,
        SourceFormat::DelimitedDat | SourceFormat::DelimitedTxt => load_delimited(path)?,
    };

    let coerced_columns = match format {
        SourceFormat::Excel => normalize_mixed_columns(&mut table),
        _ => Vec::new(),
    };

    let output = path.with_extension(OUTPUT_EXTENSION);
    write_parquet(&table, &output)?;

    Ok(Conversion {
        output,
        stats: stats_for(&table, coerced_columns),
    })
}

fn stats_for(table: &Table, coerced_columns: Vec<String>) -> ConvertStats {
    ConvertStats {
        rows: table.row_count(),
        columns: table.column_count(),
        coerced_columns,
    }
}

fn report_converted(options: &BatchOptions, ctx: &ConvertContext, stats: &ConvertStats) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_converted(ctx, stats);
    }
}

fn report_skip(options: &BatchOptions, ctx: &ConvertContext, reason: SkipReason) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_skipped(ctx, reason);
    }
}

fn report_failure(options: &BatchOptions, ctx: &ConvertContext, error: &ConvertError) {
    if let Some(obs) = options.observer.as_ref() {
        let severity = severity_for_error(error);
        obs.on_failed(ctx, severity, error);
        if severity >= options.alert_at_or_above {
            obs.on_alert(ctx, severity, error);
        }
    }
}

fn severity_for_error(e: &ConvertError) -> Severity {
    match e {
        ConvertError::Io(_) => Severity::Critical,
        ConvertError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        ConvertError::Parquet(err) => {
            // Parquet errors often wrap IO, but not always in a structured
            // way; walk the source chain before deciding.
            if error_chain_contains_io(err) {
                Severity::Critical
            } else {
                Severity::Error
            }
        }
        ConvertError::Excel(_)
        | ConvertError::Config(_)
        | ConvertError::DelimiterNotFound { .. }
        | ConvertError::MixedColumn { .. }
        | ConvertError::Malformed { .. } => Severity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::severity_for_error;
    use crate::convert::observability::Severity;
    use crate::error::ConvertError;

    #[test]
    fn io_errors_are_critical() {
        let e = ConvertError::Io(std::io::Error::other("gone"));
        assert_eq!(severity_for_error(&e), Severity::Critical);
    }

    #[test]
    fn mixed_column_is_error_severity() {
        let e = ConvertError::MixedColumn {
            column: "code".to_string(),
        };
        assert_eq!(severity_for_error(&e), Severity::Error);
    }
}
