//! Error types for the observer system
//!
//! The notification path itself is infallible: `attach`, `detach` and
//! `set_state` either succeed or do nothing. Errors surface only from the
//! edges (configuration loading, dropped subjects, closed queues).

use thiserror::Error;

/// Result type alias for observer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the observer system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The subject an observer was bound to no longer exists
    #[error("Subject has been dropped")]
    SubjectDropped,

    /// The receiving side of a notification queue is gone
    #[error("Notification queue closed")]
    QueueClosed,

    /// A bounded notification queue had no room for a state change
    #[error("Notification queue full, state change {0} dropped")]
    QueueFull(u64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors (config files, output sinks)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
