//! Error types for the Tabwise library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tabwise operations.
///
/// Bad *data* never produces an error: malformed cells, unmatched join keys
/// and non-numeric selections all degrade to empty or partial results.
/// Errors are reserved for adapter failures, caller mistakes, and the one
/// structural condition the engines cannot recover from.
#[derive(Debug, Error)]
pub enum TabwiseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no columns to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The two datasets share no column and cannot be joined.
    #[error("Datasets '{left}' and '{right}' have no column in common")]
    Incomparable { left: String, right: String },

    /// The requested join key is not a column of both datasets.
    #[error("Invalid join key: '{0}' is not a column shared by both datasets")]
    InvalidJoinKey(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Tabwise operations.
pub type Result<T> = std::result::Result<T, TabwiseError>;
