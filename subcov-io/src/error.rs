use std::io;
use thiserror::Error;

/// Error type for subcov-io operations.
#[derive(Error, Debug)]
pub enum ReportError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize gene statistics.
    #[error("Failed to serialize gene statistics: {0}")]
    Json(#[from] serde_json::Error),

    /// Output format name not recognised.
    #[error("Unknown report format: {0}")]
    UnknownFormat(String),
}

/// Result type alias for subcov-io operations.
pub type Result<T> = std::result::Result<T, ReportError>;
