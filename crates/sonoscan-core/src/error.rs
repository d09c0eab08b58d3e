//! Error types for sonoscan.

use thiserror::Error;

/// The main error type for sonoscan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// An argument was outside the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ScanError {
    /// Shorthand for building a [`ScanError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// A specialized Result type for sonoscan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
