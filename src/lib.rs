//! `tabular-batch-convert` converts directories of downloaded tabular files —
//! comma-separated text, Excel workbooks, and free-text delimited extracts —
//! into Parquet, one output per source file.
//!
//! The primary entrypoint is [`convert::run_batch`], which scans each watched
//! directory and converts every source file that does not already have a
//! columnar output. Existence of the output is the idempotency marker:
//! re-running over an unchanged tree does nothing.
//!
//! ## What gets converted
//!
//! **Recognized source extensions:**
//!
//! - **CSV**: `.csv`
//! - **Excel workbooks**: `.xlsx` (first sheet)
//! - **Delimited text**: `.dat` and `.txt` — the field delimiter is sniffed
//!   from the first non-blank line (pipe, then comma, then space)
//!
//! `.parquet` files are the outputs, and their presence marks a stem as done.
//!
//! **Typing:**
//!
//! Text formats get one inferred type per column (integer, float, bool, or
//! text). Spreadsheet cells keep their own types, so a workbook column can
//! silently blend numbers and text; such *mixed* columns — values that are
//! not mutually order-comparable — are detected and coerced to text before
//! writing (see [`convert::normalize`]).
//!
//! ## Quick example
//!
//! ```no_run
//! use tabular_batch_convert::config::ConvertConfig;
//! use tabular_batch_convert::convert::{run_batch, BatchOptions};
//!
//! # fn main() -> Result<(), tabular_batch_convert::ConvertError> {
//! let config = ConvertConfig::with_directories(["downloads/extracts"]);
//! let summary = run_batch(&config, &BatchOptions::default())?;
//! println!(
//!     "converted={} skipped={} failed={}",
//!     summary.converted.len(),
//!     summary.skipped_existing.len(),
//!     summary.failed.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Reporting
//!
//! Attach a [`convert::ConvertObserver`] to see per-file outcomes:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tabular_batch_convert::config::ConvertConfig;
//! use tabular_batch_convert::convert::{run_batch, BatchOptions, Severity, StdErrObserver};
//!
//! # fn main() -> Result<(), tabular_batch_convert::ConvertError> {
//! let options = BatchOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     alert_at_or_above: Severity::Critical,
//! };
//! let _summary = run_batch(&ConvertConfig::default(), &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error policy
//!
//! A failure converting one file is reported, counted in the
//! [`convert::RunSummary`], and does not stop the run. A delimited-text file
//! whose delimiter cannot be determined is skipped and reported. A missing
//! watched directory aborts the run.
//!
//! ## Modules
//!
//! - [`convert`]: scanning, dispatch, loaders, normalization, Parquet output
//! - [`config`]: the configuration object passed to the entry point
//! - [`types`]: the in-memory column-major table model
//! - [`error`]: the error type used across the crate

pub mod config;
pub mod convert;
pub mod error;
pub mod types;

pub use error::{ConvertError, ConvertResult};
