//! Error types for the solar quick-check service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Schema violations are not errors in this sense; they are collected into
//! [`crate::validation::ValidationErrors`] and returned to the client.

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// The request body could not be read as JSON at all.
///
/// Kept apart from schema violations so the client can tell a broken
/// request from wrong answers.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Body is empty, not UTF-8, or not well-formed JSON
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),
}

/// Errors raised while reading or answering an HTTP request.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Socket I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request line or headers could not be parsed
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Declared body length exceeds the configured limit
    #[error("Request body of {size} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { size: usize, limit: usize },

    /// Client did not deliver the request in time
    #[error("Request timeout")]
    Timeout,
}

impl ServerError {
    /// HTTP status code to answer with, if the connection is still usable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::MalformedRequest(_) => Some(400),
            Self::BodyTooLarge { .. } => Some(413),
            Self::Io(_) | Self::Timeout => None,
        }
    }
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ServerError
pub type ServerResult<T> = Result<T, ServerError>;
