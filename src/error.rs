//! Error types shared by persistence, settings and window validation.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// File system failure (read, write, create dir).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header row lacks a required column.
    #[error("CSV is missing required columns. Found headers: {found:?}. Need columns for: title, date.")]
    MissingColumns { found: Vec<String> },

    /// Nothing usable came out of an import.
    #[error("No valid intervals found in CSV ({skipped} rows skipped)")]
    EmptyImport { skipped: usize },

    /// A visible window that cannot be projected into.
    #[error("Invalid visible window: {0}")]
    InvalidWindow(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
