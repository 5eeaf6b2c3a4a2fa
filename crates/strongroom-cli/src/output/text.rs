//! Text and table output formatting.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use strongroom_core::storage::{Secret, SecretSummary, Vault};

/// Render a payload for the terminal: UTF-8 as-is, anything else as base64.
pub fn payload_text(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => format!("base64:{}", STANDARD.encode(data)),
    }
}

/// Print a single secret in human-readable format.
///
/// In quiet mode only the payload is printed.
pub fn print_secret(secret: &Secret, vault: Option<&Vault>, quiet: bool) {
    if !quiet {
        println!("ID: {}", secret.id);
        println!("Name: {}", secret.name);
        match vault {
            Some(vault) => println!("Vault: {} ({})", vault.name, vault.id),
            None => println!("Vault: {}", secret.vault_id),
        }
        if let Some(description) = secret.description.as_deref().filter(|d| !d.is_empty()) {
            println!("Description: {}", description);
        }
        println!();
    }
    println!("{}", payload_text(&secret.data));
}

/// Print secret summaries as a table.
pub fn print_secret_list(secrets: &[SecretSummary], quiet: bool) {
    if secrets.is_empty() {
        if !quiet {
            println!("No secrets found.");
        }
        return;
    }
    if quiet {
        for secret in secrets {
            println!("{}\t{}", secret.id, secret.name);
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Description"]);
    for secret in secrets {
        table.add_row(vec![
            secret.id.to_string(),
            secret.name.clone(),
            secret.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
}

/// Print vaults as a table.
pub fn print_vault_list(vaults: &[Vault], quiet: bool) {
    if vaults.is_empty() {
        if !quiet {
            println!("No vaults found.");
        }
        return;
    }
    if quiet {
        for vault in vaults {
            println!("{}\t{}", vault.id, vault.name);
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Company"]);
    for vault in vaults {
        table.add_row(vec![
            vault.id.to_string(),
            vault.name.clone(),
            vault
                .company_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_text() {
        assert_eq!(payload_text(b"hunter2"), "hunter2");
        assert_eq!(payload_text(&[0xff, 0xfe]), "base64://4=");
    }
}
