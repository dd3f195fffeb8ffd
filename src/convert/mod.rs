//! The conversion pipeline.
//!
//! Most callers should use [`run_batch`] (from [`batch`]) which:
//!
//! - scans each watched directory for recognized source files
//! - skips every stem that already has columnar output
//! - routes the rest to the format-specific loader and the Parquet writer
//! - optionally reports outcomes to a [`ConvertObserver`]
//!
//! Format-specific pieces are also available directly:
//! - [`csv`] / [`excel`] / [`text`]: loaders
//! - [`sniff`]: delimiter detection for free-text formats
//! - [`normalize`]: mixed-type column detection and coercion
//! - [`parquet`]: the columnar writer

pub mod batch;
pub mod csv;
pub mod excel;
pub mod normalize;
pub mod observability;
pub mod parquet;
pub mod scan;
pub mod sniff;
pub mod text;

pub use batch::{BatchOptions, Conversion, RunSummary, convert_directory, convert_file, run_batch};
pub use normalize::{compare_values, is_mixed, normalize_mixed_columns};
pub use observability::{
    CompositeObserver, ConvertContext, ConvertObserver, ConvertStats, FileObserver, Severity,
    SkipReason, StdErrObserver,
};
pub use scan::{DirectoryScan, OUTPUT_EXTENSION, SourceFormat, scan_directory};
pub use sniff::{Delimiter, sniff_delimiter};
