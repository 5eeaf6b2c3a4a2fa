//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying vaults and
//! secrets as JSON or as text tables.

mod json;
mod text;

// Re-export public API
pub use json::{secret_json, summaries_json, vaults_json};
pub use text::{print_secret, print_secret_list, print_vault_list};
