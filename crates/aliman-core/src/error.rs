//! Core error types for aliman-core.
//!
//! Classification and reply generation never fail, so every error here comes
//! from session bookkeeping, plan records, storage, or configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionId;

/// Core error type for aliman-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session, plan, chat and day-boundary misuse
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller misuse of the session, plan and chat operations.
///
/// These are surfaced verbatim; none of them is transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required argument was out of range or empty
    #[error("Invalid value for '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// No record with this id belongs to the owner
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// The session already reached its terminal state
    #[error("Session {0} has already ended")]
    AlreadyEnded(SessionId),
}

impl DomainError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn session_not_found(id: SessionId) -> Self {
        DomainError::NotFound { kind: "Session", id }
    }

    pub fn plan_not_found(id: i64) -> Self {
        DomainError::NotFound { kind: "Plan", id }
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
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

    /// A stored value could not be decoded
    #[error("Corrupt {column} value: {value}")]
    Corrupt { column: &'static str, value: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
