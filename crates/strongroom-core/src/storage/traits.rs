//! Storage engine trait definition.
//!
//! The `StorageEngine` trait is the single entry point for vault and secret
//! operations. Callers hold a reference to one engine for the life of the
//! process and pass it explicitly to whatever needs storage.

use super::types::{NewSecret, Secret, SecretListQuery, SecretSummary, Vault};
use crate::error::Result;

/// Storage engine interface for the secrets vault.
///
/// All implementations must ensure:
/// - Every operation either finishes its transaction or leaves no trace
/// - `(company_id, vault name)` and `(vault_id, secret name)` stay unique
/// - A vault that owns secrets cannot be deleted
pub trait StorageEngine: Send + Sync {
    /// Look up a vault by name, creating it if it does not exist.
    ///
    /// The lookup matches on name alone, ignoring company scope; when
    /// several vaults share the name the one with the lowest id is returned.
    /// Vaults created here have no company.
    fn resolve_or_create_vault(&self, name: &str) -> Result<i64>;

    /// Look up a secret id by secret name, across all vaults.
    ///
    /// When several vaults hold a secret with this name the lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns `StrongroomError::NotFound` if no secret has this name.
    fn resolve_secret_id(&self, name: &str) -> Result<i64>;

    /// Insert a new secret, creating its vault if needed.
    ///
    /// # Returns
    ///
    /// Returns the id of the created secret.
    ///
    /// # Errors
    ///
    /// Returns `StrongroomError::AlreadyExists` if the vault already holds a
    /// secret with the same name. The existing row is left untouched.
    fn insert_secret(&self, secret: &NewSecret) -> Result<i64>;

    /// List the secrets of one vault, in insertion order.
    ///
    /// Selecting by name goes through [`resolve_or_create_vault`], so an
    /// unknown name creates an empty vault.
    ///
    /// # Errors
    ///
    /// Returns `StrongroomError::InvalidArgument` if the query selects no
    /// vault. No database access happens in that case.
    ///
    /// [`resolve_or_create_vault`]: StorageEngine::resolve_or_create_vault
    fn list_secrets(&self, query: &SecretListQuery) -> Result<Vec<SecretSummary>>;

    /// Get a secret by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(secret))` if found, `Ok(None)` if not found.
    fn get_secret(&self, id: i64) -> Result<Option<Secret>>;

    /// Get a vault by id.
    fn get_vault(&self, id: i64) -> Result<Option<Vault>>;

    /// List all vaults, in creation order.
    fn list_vaults(&self) -> Result<Vec<Vault>>;

    // --- Maintenance operations ---

    /// Check database integrity.
    ///
    /// Verifies:
    /// - Both tables exist
    /// - SQLite page integrity
    /// - Foreign key relationships
    fn check_integrity(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_engine: &dyn StorageEngine) {}
    }
}
