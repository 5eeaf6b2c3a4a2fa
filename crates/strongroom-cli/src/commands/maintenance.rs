use strongroom_core::{StorageEngine, StrongroomError};

use crate::app::AppContext;
use crate::config::{default_db_path, default_log_path, write_config, StrongroomConfig};
use crate::errors::CliError;

/// Drop and recreate both tables. Destroys every vault and secret.
///
/// Deliberately has no confirmation prompt and no flags; it only runs when
/// invoked by name.
pub fn handle_reset_schema(ctx: &AppContext) -> anyhow::Result<()> {
    let db_path = ctx.settings().require_db_path()?;
    let storage = ctx.engine()?;
    storage.reset_schema()?;
    if !ctx.quiet() {
        println!("Schema reset: {}", db_path.display());
        println!("- Vaults: created");
        println!("- Secrets: created");
    }
    Ok(())
}

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let storage = ctx.storage()?;
    match storage.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- tables: OK");
                println!("- pages: OK");
                println!("- foreign keys: OK");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            match err {
                StrongroomError::Integrity(message) | StrongroomError::Schema(message) => {
                    Err(CliError::IntegrityFailed(message).into())
                }
                other => Err(other.into()),
            }
        }
    }
}

pub fn handle_config_init(ctx: &AppContext, db_path: Option<&str>) -> anyhow::Result<()> {
    let config_path = &ctx.settings().config_path;
    if config_path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Config already exists at {}",
            config_path.display()
        ))
        .into());
    }

    let db_path = match db_path.map(std::path::PathBuf::from) {
        Some(path) => path,
        None => default_db_path()?,
    };
    let config = StrongroomConfig::new(db_path, Some(default_log_path()?));
    write_config(config_path, &config)?;

    if !ctx.quiet() {
        println!("Wrote config to {}", config_path.display());
        println!("Database: {}", config.storage.path);
        println!();
        println!("Next, create the tables:");
        println!("  strongroom reset-schema");
    }
    Ok(())
}

pub fn handle_config_show(ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.settings();
    let unset = || "<unset>".to_string();

    println!(
        "config: {}{}",
        settings.config_path.display(),
        if settings.config_loaded { "" } else { " (missing)" }
    );
    println!(
        "database: {}",
        settings
            .db_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "commit_on_error: {}",
        settings.commit_policy == strongroom_core::storage::CommitPolicy::CommitAlways
    );
    println!("log_level: {}", settings.log_level);
    println!(
        "log_file: {}",
        settings
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stderr>".to_string())
    );
    println!(
        "openssl_path: {}",
        settings.openssl_path.clone().unwrap_or_else(unset)
    );
    Ok(())
}
