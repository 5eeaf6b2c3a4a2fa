//! Application context for the Strongroom CLI.
//!
//! Bundles CLI arguments with resolved settings and the lazily installed
//! storage engine.

use once_cell::unsync::OnceCell;

use strongroom_core::storage::SqliteStorage;

use crate::cli::Cli;
use crate::errors::CliError;

use super::resolver::{missing_schema_message, reset_schema_hint, Settings};

/// Application context handed to every command handler.
///
/// The storage engine is installed on first use, so commands that never
/// touch the database (completions, config) never open it.
pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: Settings,
    storage: OnceCell<&'static SqliteStorage>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli, settings: Settings) -> Self {
        Self {
            cli,
            settings,
            storage: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The process-wide engine, installed on first call.
    ///
    /// Does not check that the schema exists; see [`Self::storage`].
    pub fn engine(&self) -> anyhow::Result<&'static SqliteStorage> {
        self.storage
            .get_or_try_init(|| -> anyhow::Result<&'static SqliteStorage> {
                let db_path = self.settings.require_db_path()?;
                Ok(SqliteStorage::install(db_path, self.settings.commit_policy)?)
            })
            .copied()
    }

    /// The engine, after confirming the database holds both tables.
    pub fn storage(&self) -> anyhow::Result<&'static SqliteStorage> {
        let db_path = self.settings.require_db_path()?;
        if !db_path.exists() {
            return Err(CliError::config(missing_schema_message(db_path), reset_schema_hint()).into());
        }
        let storage = self.engine()?;
        if !storage.is_provisioned()? {
            return Err(CliError::config(missing_schema_message(db_path), reset_schema_hint()).into());
        }
        Ok(storage)
    }
}
