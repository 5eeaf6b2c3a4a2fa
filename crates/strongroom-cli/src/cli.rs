use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use strongroom_core::VERSION;

/// Strongroom - a local secrets vault backed by a single SQLite file
#[derive(Parser)]
#[command(name = "strongroom")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true, env = "STRONGROOM_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// DANGEROUS: drop and recreate the Vaults and Secrets tables.
    ///
    /// Every stored vault and secret is destroyed. There is no prompt.
    ResetSchema,

    /// Resolve a vault by name, creating it if needed, and print its ID
    Vault {
        /// Vault name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List all vaults
    Vaults {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store a new secret
    Put(PutArgs),

    /// List the secrets of one vault
    List(ListArgs),

    /// Show a secret by ID
    Show {
        /// Secret ID
        #[arg(value_name = "ID")]
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the ID of the secret with this name (searched across all vaults)
    SecretId {
        /// Secret name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Check database integrity
    Check,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Database path to record (defaults to the XDG data directory)
        #[arg(long, value_name = "PATH")]
        db_path: Option<String>,
    },

    /// Print the effective configuration
    Show,
}

/// Arguments for the `put` command
#[derive(Args)]
pub struct PutArgs {
    /// Vault to store the secret in (created if missing)
    #[arg(value_name = "VAULT")]
    pub vault: String,

    /// Secret name, unique within the vault
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Secret description
    #[arg(long)]
    pub description: Option<String>,

    /// Secret value (otherwise read from --file, a prompt, or stdin)
    #[arg(long, conflicts_with = "file")]
    pub value: Option<String>,

    /// Read the secret value from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Vault ID
    #[arg(long, value_name = "ID")]
    pub vault_id: Option<i64>,

    /// Vault name (created if missing)
    #[arg(long, value_name = "NAME")]
    pub vault: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
