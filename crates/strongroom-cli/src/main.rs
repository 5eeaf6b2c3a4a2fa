//! Strongroom CLI - a local secrets vault backed by a single SQLite file
//!
//! This is the command-line interface for Strongroom. It resolves
//! configuration, sets up logging, installs the storage engine once, and
//! dispatches to the command handlers. `main` is the error boundary: any
//! error escaping a handler is logged and mapped to an exit code.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::Parser;

use app::{resolve_settings, AppContext};
use cli::{Cli, Commands, ConfigCommands};
use constants::exit_codes;
use errors::CliError;

fn main() {
    let cli = Cli::parse();

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            let err = CliError::from_anyhow(&err);
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = logging::init(&settings.log_level, settings.log_file.as_deref()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_codes::CONFIG);
    }
    logging::install_panic_hook();
    let log_to_file = settings.log_file.is_some();

    let ctx = AppContext::new(&cli, settings);
    if let Err(err) = run(&ctx) {
        let cli_err = CliError::from_anyhow(&err);
        match &cli_err {
            CliError::Unexpected(_) => {
                tracing::error!(error = %format!("{:#}", err), "*** UNHANDLED ERROR ***")
            }
            // Without a log file the record would repeat the message below on stderr.
            _ if log_to_file => tracing::warn!(
                exit_code = cli_err.exit_code(),
                error = %err,
                "command failed"
            ),
            _ => {}
        }
        eprintln!("Error: {}", cli_err);
        std::process::exit(cli_err.exit_code());
    }
}

fn run(ctx: &AppContext) -> anyhow::Result<()> {
    match &ctx.cli().command {
        Commands::ResetSchema => commands::handle_reset_schema(ctx),
        Commands::Vault { name } => commands::handle_vault(ctx, name),
        Commands::Vaults { json } => commands::handle_vaults(ctx, *json),
        Commands::Put(args) => commands::handle_put(ctx, args),
        Commands::List(args) => commands::handle_list(ctx, args),
        Commands::Show { id, json } => commands::handle_show(ctx, *id, *json),
        Commands::SecretId { name } => commands::handle_secret_id(ctx, name),
        Commands::Check => commands::handle_check(ctx),
        Commands::Config { command } => match command {
            ConfigCommands::Init { db_path } => {
                commands::handle_config_init(ctx, db_path.as_deref())
            }
            ConfigCommands::Show => commands::handle_config_show(ctx),
        },
        Commands::Completions { shell } => commands::handle_completions(*shell),
    }
}
