//! JSON output formatting for vaults and secrets.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use strongroom_core::storage::{Secret, SecretSummary, Vault};

/// Convert a secret to JSON for output.
///
/// The payload is emitted twice: base64 always, and `data_utf8` when the
/// bytes are valid UTF-8.
pub fn secret_json(secret: &Secret, vault: Option<&Vault>) -> serde_json::Value {
    serde_json::json!({
        "id": secret.id,
        "name": secret.name,
        "description": secret.description,
        "vault_id": secret.vault_id,
        "vault_name": vault.map(|v| v.name.as_str()),
        "data_base64": STANDARD.encode(&secret.data),
        "data_utf8": std::str::from_utf8(&secret.data).ok(),
    })
}

/// Convert secret summaries to a JSON array for output.
pub fn summaries_json(secrets: &[SecretSummary]) -> serde_json::Value {
    serde_json::to_value(secrets).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}

/// Convert vaults to a JSON array for output.
pub fn vaults_json(vaults: &[Vault]) -> serde_json::Value {
    serde_json::to_value(vaults).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}
