//! Error types for wealthsync.

use thiserror::Error;

/// Result type alias using wealthsync's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for wealthsync operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Temporary staging or provider-side file upload failed
    #[error("Staging error: {0}")]
    Staging(String),

    /// Model call failed or returned an empty response
    #[error("Generation error: {0}")]
    Generation(String),

    /// Model output was not valid JSON after fence stripping
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output parsed but is missing required document keys
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Chat model label is not in the label table
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Vendor API failure, normalized at the adapter boundary
    #[error("Provider error ({vendor}): {message}")]
    ProviderCall { vendor: String, message: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(i64),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (authenticated but not authorized)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Construct a provider-call error for the given vendor.
    pub fn provider(vendor: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProviderCall {
            vendor: vendor.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
