//! Transform failures
//!
//! The `Display` text of an `AdapterError` is the message surfaced to the
//! user when a node cannot be loaded.

use thiserror::Error;

/// Errors a transform can report for a single node request
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("No transform registered for app '{0}'")]
    UnknownApp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for transform operations
pub type AdapterResult<T> = Result<T, AdapterError>;
