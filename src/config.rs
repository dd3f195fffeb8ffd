//! Batch configuration.
//!
//! The directories watched and the formats handled are explicit values passed
//! to the entry point, not embedded constants. [`Default`] supplies the
//! conventional download layout; [`ConvertConfig::from_json_path`] loads a
//! configuration from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::convert::SourceFormat;
use crate::error::ConvertResult;

/// Configuration for a batch conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Watched directories scanned for source files.
    pub directories: Vec<PathBuf>,
    /// Formats handled, in dispatch order.
    pub formats: Vec<SourceFormat>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            directories: vec![
                PathBuf::from("downloads/extracts"),
                PathBuf::from("downloads/lookups"),
            ],
            formats: SourceFormat::DISPATCH_ORDER.to_vec(),
        }
    }
}

impl ConvertConfig {
    /// Configuration for the given directories with the default format order.
    pub fn with_directories<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults; unknown fields are
    /// rejected.
    pub fn from_json_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
