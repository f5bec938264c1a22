//! Error types for label and baseline file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing label and baseline files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column is missing from the header
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column (after alias mapping)
        column: String,
    },

    /// A key column holds a value that is not an integer
    #[error("Non-integer {column} value '{value}' on line {line}")]
    NonIntegerKey {
        /// Key column name
        column: String,
        /// Offending cell
        value: String,
        /// 1-based line number in the file
        line: u64,
    },

    /// The file has no header row
    #[error("File has no header row: {path:?}")]
    EmptyFile {
        /// Path of the empty file
        path: PathBuf,
    },
}

impl FormatError {
    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a non-integer key error.
    pub fn non_integer_key(column: impl Into<String>, value: impl Into<String>, line: u64) -> Self {
        Self::NonIntegerKey {
            column: column.into(),
            value: value.into(),
            line,
        }
    }
}
