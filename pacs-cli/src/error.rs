//! Error types for the CLI

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// CLI error types
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the message toolkit
    #[error(transparent)]
    Pacs(#[from] pacs_msg::Error),

    /// I/O error while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad or missing command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The checked message failed one or more checks
    #[error("Message failed {0} check(s)")]
    InvalidMessage(usize),
}
