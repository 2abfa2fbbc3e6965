//! Core error types for timelog-core.
//!
//! Every fallible operation in the library reports through this hierarchy;
//! nothing is logged-and-swallowed internally. Retry policy belongs to the
//! caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timelog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state machine rejected an operation
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operation attempted in a timer state that forbids it.
///
/// Always recoverable: the engine state is unchanged after the error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// `start` while a session is already being tracked
    #[error("timer already running since {since}")]
    AlreadyRunning { since: chrono::DateTime<chrono::Utc> },

    /// `stop` while idle
    #[error("timer is not running")]
    NotRunning,
}

/// Storage-specific errors.
///
/// When one of these is returned, the store's visible state is exactly what
/// it was before the failed call.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Caller attempted to persist a malformed session.
///
/// Indicates a caller bug: the timer engine only ever hands out finalized
/// sessions, so these should not occur in normal use.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Session has no end time (still in progress)
    #[error("session has no end time; in-progress sessions cannot be persisted")]
    MissingEndTime,

    /// Session has no duration
    #[error("session has no duration; in-progress sessions cannot be persisted")]
    MissingDuration,

    /// Session duration is negative
    #[error("session duration is negative: {secs}s")]
    NegativeDuration { secs: f64 },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
