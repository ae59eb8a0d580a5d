//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Variants follow where a failure comes from rather than what caused it:
/// the caller decides how to present a remote failure versus a local one,
/// but nothing in the core retries either.
#[derive(Error, Debug)]
pub enum Error {
    /// Local key-value store failure (open, read, write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote record store failure, carrying the store's own message
    #[error("Fetch failed: {0}")]
    Remote(String),

    /// Natural-language extraction failure
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a remote (fetch) error
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
