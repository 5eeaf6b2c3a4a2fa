//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use strongroom_core::StrongroomError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Configuration missing or unreadable
    Config { message: String, hint: String },

    /// Resource not found
    NotFound(String),

    /// Invalid user input
    InvalidInput(String),

    /// Secret name already taken
    AlreadyExists(String),

    /// Integrity check failed
    IntegrityFailed(String),

    /// Anything else
    Unexpected(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::NotFound(message)
            | CliError::InvalidInput(message)
            | CliError::AlreadyExists(message)
            | CliError::IntegrityFailed(message)
            | CliError::Unexpected(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a Config error with message and hint.
    pub fn config(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::Config {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Classify an error that escaped a command handler.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cli) = err.downcast_ref::<CliError>() {
            return cli.clone();
        }
        match err.downcast_ref::<StrongroomError>() {
            Some(core) => CliError::from(core),
            None => CliError::Unexpected(format!("{:#}", err)),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG,
            CliError::NotFound(_) => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::AlreadyExists(_) => exit_codes::ALREADY_EXISTS,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
            CliError::Unexpected(_) => exit_codes::UNEXPECTED,
        }
    }
}

impl From<&StrongroomError> for CliError {
    fn from(err: &StrongroomError) -> Self {
        let message = err.to_string();
        match err {
            StrongroomError::Config(_) => CliError::config(message, config_hint()),
            StrongroomError::NotFound(_) => CliError::NotFound(message),
            StrongroomError::InvalidArgument(_) => CliError::InvalidInput(message),
            StrongroomError::AlreadyExists(_) => CliError::AlreadyExists(message),
            StrongroomError::Integrity(_) => CliError::IntegrityFailed(message),
            _ => CliError::Unexpected(message),
        }
    }
}

/// Hint printed under configuration errors.
pub fn config_hint() -> &'static str {
    "Run:\n  strongroom config init\n\nOr specify a database path:\n  STRONGROOM_DB=/path/to/strongroom.db strongroom <command>"
}
