//! Provenance metadata carried with each dataset snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about where a dataset came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Number of rows in the snapshot.
    pub row_count: usize,
    /// Size of the source in bytes.
    pub byte_size: u64,
    /// Display name of the source (usually the file name).
    pub source_name: String,
    /// Detected format (csv, tsv, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// SHA-256 hash of the source bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// When the source was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl DatasetMetadata {
    /// Create metadata for a source that has just been loaded.
    pub fn new(source_name: impl Into<String>, byte_size: u64, row_count: usize) -> Self {
        Self {
            row_count,
            byte_size,
            source_name: source_name.into(),
            format: None,
            hash: None,
            loaded_at: Utc::now(),
        }
    }

    /// Set the detected format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the content hash.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}
