//! Path and settings resolution for config and database files.

use std::path::{Path, PathBuf};

use strongroom_core::storage::CommitPolicy;

use crate::cli::Cli;
use crate::config::{default_config_path, read_config};
use crate::errors::{config_hint, CliError};

/// Settings in effect for this run, after merging CLI flags and config.
#[derive(Debug)]
pub struct Settings {
    pub config_path: PathBuf,
    pub config_loaded: bool,
    pub db_path: Option<PathBuf>,
    pub commit_policy: CommitPolicy,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub openssl_path: Option<String>,
}

/// Resolve the config file path, checking STRONGROOM_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("STRONGROOM_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Merge the config file (when present) with CLI overrides.
///
/// A config file that exists but cannot be read or parsed is a
/// configuration error. A missing file is not; commands that need a
/// database report it later through [`Settings::require_db_path`].
pub fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_path = resolve_config_path()?;
    let config = if config_path.exists() {
        Some(read_config(&config_path).map_err(|e| CliError::config(e.to_string(), config_hint()))?)
    } else {
        None
    };

    let db_path = cli
        .db
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| config.as_ref().map(|c| PathBuf::from(&c.storage.path)));

    Ok(match config {
        Some(config) => Settings {
            config_path,
            config_loaded: true,
            db_path,
            commit_policy: CommitPolicy::from_commit_on_error(config.storage.commit_on_error),
            log_level: config.logging.level.clone(),
            log_file: config.logging.file.as_ref().map(PathBuf::from),
            openssl_path: Some(config.encryption.openssl_path().to_string()),
        },
        None => Settings {
            config_path,
            config_loaded: false,
            db_path,
            commit_policy: CommitPolicy::default(),
            log_level: "warn".to_string(),
            log_file: None,
            openssl_path: None,
        },
    })
}

impl Settings {
    /// The database path, or a configuration error explaining how to set one.
    pub fn require_db_path(&self) -> Result<&Path, CliError> {
        self.db_path
            .as_deref()
            .ok_or_else(|| CliError::config(missing_config_message(&self.config_path), config_hint()))
    }
}

/// Error message when config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No database configured: no config file at {} and no --db given",
        config_path.display()
    )
}

/// Error message when the database has not been provisioned.
pub fn missing_schema_message(db_path: &Path) -> String {
    format!("No Strongroom tables found in {}", db_path.display())
}

/// Hint for provisioning a database.
pub fn reset_schema_hint() -> &'static str {
    "Run:\n  strongroom reset-schema\n\nWARNING: reset-schema drops all existing vaults and secrets."
}
