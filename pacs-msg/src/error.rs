//! Error types for pacs.008 parameter validation and export

use thiserror::Error;

/// Result type alias for pacs.008 operations
pub type Result<T> = std::result::Result<T, Error>;

/// pacs.008 error types
#[derive(Debug, Error)]
pub enum Error {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// BIC validation error
    #[error("Invalid BIC: {0}")]
    InvalidBic(String),

    /// IBAN validation error
    #[error("Invalid IBAN: {0}")]
    InvalidIban(String),

    /// Currency code validation error
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// Amount validation error
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Message identifier validation error
    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),

    /// Party name validation error
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Invalid enum value
    #[error("Invalid {field} value: {value}")]
    InvalidEnumValue { field: String, value: String },

    /// Validation error with multiple issues
    #[error("Validation failed: {issues:?}")]
    ValidationFailed { issues: Vec<String> },

    /// Export filename is empty or escapes the target directory
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
