//! Error types for the scour library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scour operations.
///
/// Only structural problems surface here. Bad cell values are never errors:
/// they are coerced to absent and reported as findings.
#[derive(Debug, Error)]
pub enum ScourError {
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

    /// A data row has a different number of fields than the header.
    #[error("Ragged row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column's length disagrees with the rest of the table.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
