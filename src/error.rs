//! Common error types for docrelay

use thiserror::Error;

/// Common result type for docrelay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the service and worker
#[derive(Error, Debug)]
pub enum Error {
    /// Document store operation error
    #[error("Store error: {0}")]
    Store(String),

    /// Notification bus operation error
    #[error("Bus error: {0}")]
    Bus(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for Error {
    fn from(e: mongodb::error::Error) -> Self {
        Error::Store(e.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(e: redis::RedisError) -> Self {
        Error::Bus(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}
