//! Error types for Strongroom core operations.
//!
//! This module defines the error hierarchy for all storage operations.
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Strongroom operations.
pub type Result<T> = std::result::Result<T, StrongroomError>;

/// Core error type for Strongroom operations.
#[derive(Debug, Error)]
pub enum StrongroomError {
    /// Configuration missing or unreadable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A storage engine was already installed for this process
    #[error("Storage engine is a singleton and is already installed for {0}")]
    SingletonViolation(String),

    /// Lookup by name found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Secret name already taken within its vault
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Caller supplied an unusable combination of arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Tables missing or malformed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Integrity check failed
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
