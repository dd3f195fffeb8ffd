use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error type returned by conversion functions.
///
/// This is a single error enum shared across scanning, loading (CSV, Excel,
/// delimited text), normalization, and Parquet output.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Underlying I/O error (e.g. watched directory not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV / delimited-text reading error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Excel workbook reading error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Parquet writing error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Malformed configuration file.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The first content line of a delimited-text file contained none of the
    /// recognized separators (pipe, comma, space). The batch dispatcher turns
    /// this into a reported skip rather than a failure.
    #[error("unable to determine delimiter for {}", path.display())]
    DelimiterNotFound { path: PathBuf },

    /// A column holding mutually incomparable value kinds reached the writer.
    ///
    /// Loaders either infer one type per column or normalize mixed columns to
    /// text first, so this indicates an upstream bug and always propagates.
    #[error("column '{column}' holds incomparable value kinds")]
    MixedColumn { column: String },

    /// Structurally unusable input (e.g. a sheet with no non-empty rows).
    #[error("malformed input {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}
