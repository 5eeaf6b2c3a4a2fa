//! Core data types for the storage layer.

use serde::{Deserialize, Serialize};

/// A named container of secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Store-assigned identifier
    pub id: i64,

    /// Vault name, unique per company scope
    pub name: String,

    /// Owning company, if any
    pub company_id: Option<i64>,
}

/// A full secret row, payload included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Store-assigned identifier
    pub id: i64,

    /// Secret name, unique within its vault
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Opaque payload, stored verbatim
    pub data: Vec<u8>,

    /// Owning vault
    pub vault_id: i64,
}

/// A secret as returned by listings: no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Builder for inserting a secret.
#[derive(Debug, Clone)]
pub struct NewSecret {
    /// Vault to place the secret in; created if it does not exist
    pub vault_name: String,

    /// Secret name
    pub name: String,

    /// Payload
    pub data: Vec<u8>,

    /// Description, empty unless set
    pub description: String,
}

impl NewSecret {
    pub fn new(
        vault_name: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            vault_name: vault_name.into(),
            name: name.into(),
            data: data.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Selector for listing the secrets of one vault.
///
/// At least one of `vault_id` and `vault_name` must be set. When both are
/// set, `vault_id` wins.
#[derive(Debug, Clone, Default)]
pub struct SecretListQuery {
    pub vault_id: Option<i64>,
    pub vault_name: Option<String>,
}

impl SecretListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vault_id(mut self, id: i64) -> Self {
        self.vault_id = Some(id);
        self
    }

    pub fn vault_name(mut self, name: impl Into<String>) -> Self {
        self.vault_name = Some(name.into());
        self
    }

    /// True when neither selector is set.
    pub fn is_empty(&self) -> bool {
        self.vault_id.is_none() && self.vault_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_secret_builder() {
        let secret = NewSecret::new("VaultA", "DBPass", b"encrypted-bytes".to_vec())
            .with_description("prod db");

        assert_eq!(secret.vault_name, "VaultA");
        assert_eq!(secret.name, "DBPass");
        assert_eq!(secret.data, b"encrypted-bytes");
        assert_eq!(secret.description, "prod db");
    }

    #[test]
    fn test_new_secret_description_defaults_empty() {
        let secret = NewSecret::new("VaultA", "DBPass", "raw");
        assert_eq!(secret.description, "");
    }

    #[test]
    fn test_list_query_builder() {
        assert!(SecretListQuery::new().is_empty());

        let query = SecretListQuery::new().vault_id(3).vault_name("VaultA");
        assert_eq!(query.vault_id, Some(3));
        assert_eq!(query.vault_name.as_deref(), Some("VaultA"));
        assert!(!query.is_empty());
    }

    #[test]
    fn test_secret_serializes_payload_as_bytes() {
        let secret = Secret {
            id: 1,
            name: "DBPass".to_string(),
            description: None,
            data: vec![1, 2, 3],
            vault_id: 7,
        };
        let value = serde_json::to_value(&secret).unwrap();
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["description"], serde_json::Value::Null);
    }
}
