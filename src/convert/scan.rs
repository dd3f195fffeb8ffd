//! Directory scanning: group source stems by recognized extension and record
//! which stems already have columnar output.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{ConvertError, ConvertResult};

/// Extension of the columnar output files, which double as skip markers.
pub const OUTPUT_EXTENSION: &str = "parquet";

/// Recognized source file formats, identified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Comma-separated text, `.csv`.
    #[serde(rename = "csv")]
    Csv,
    /// Excel workbook, `.xlsx`.
    #[serde(rename = "xlsx")]
    Excel,
    /// Free-text delimited data, `.dat` (delimiter sniffed per file).
    #[serde(rename = "dat")]
    DelimitedDat,
    /// Free-text delimited data, `.txt` (delimiter sniffed per file).
    #[serde(rename = "txt")]
    DelimitedTxt,
}

impl SourceFormat {
    /// All formats, in the fixed order the dispatcher processes them.
    pub const DISPATCH_ORDER: [SourceFormat; 4] = [
        SourceFormat::Csv,
        SourceFormat::Excel,
        SourceFormat::DelimitedDat,
        SourceFormat::DelimitedTxt,
    ];

    /// The file extension for this format, lowercase, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Excel => "xlsx",
            SourceFormat::DelimitedDat => "dat",
            SourceFormat::DelimitedTxt => "txt",
        }
    }

    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Excel),
            "dat" => Some(Self::DelimitedDat),
            "txt" => Some(Self::DelimitedTxt),
            _ => None,
        }
    }
}

/// The result of scanning one watched directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryScan {
    stems: BTreeMap<SourceFormat, BTreeSet<String>>,
    converted: BTreeSet<String>,
}

impl DirectoryScan {
    /// Source stems present with the given format's extension, sorted.
    pub fn stems(&self, format: SourceFormat) -> impl Iterator<Item = &str> {
        self.stems
            .get(&format)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Stems that already have a columnar output file.
    pub fn converted_stems(&self) -> &BTreeSet<String> {
        &self.converted
    }

    /// Total number of source files across all recognized formats.
    pub fn source_count(&self) -> usize {
        self.stems.values().map(BTreeSet::len).sum()
    }
}

/// Scan one directory level for recognized source files and output markers.
///
/// Files with unrecognized extensions (and subdirectories) are ignored.
/// A missing or unreadable directory propagates as an I/O error; there is no
/// retry.
pub fn scan_directory(dir: impl AsRef<Path>) -> ConvertResult<DirectoryScan> {
    let mut scan = DirectoryScan::default();

    for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            ConvertError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed")),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let (Some(stem), Some(ext)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.extension().and_then(|s| s.to_str()),
        ) else {
            continue;
        };

        if ext.eq_ignore_ascii_case(OUTPUT_EXTENSION) {
            scan.converted.insert(stem.to_string());
        } else if let Some(format) = SourceFormat::from_extension(ext) {
            scan.stems.entry(format).or_default().insert(stem.to_string());
        }
    }

    Ok(scan)
}
