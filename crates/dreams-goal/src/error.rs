// error.rs - Error types for the dreams store and its persistence.

use thiserror::Error;

/// Errors that can occur while loading, saving, or configuring the store.
///
/// The six store operations never surface these: bad input is a no-op and
/// persistence failures are logged. They show up at the adapter and config
/// boundaries, and in front ends resolving user-supplied ids.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The configuration file exists but could not be parsed.
    #[error("invalid config at {path}: {message}")]
    Config { path: String, message: String },

    /// No goal or task matched the given reference.
    #[error("not found: {0}")]
    NotFound(String),

    /// A store observer failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),
}
