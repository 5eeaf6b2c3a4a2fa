//! SQLite storage backend.
//!
//! `SqliteStorage` holds only the database path and the commit policy.
//! Each operation opens its own [`ConnectionScope`], so an engine can be
//! shared freely; SQLite's file locking arbitrates between processes.

mod row;

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Result, StrongroomError};
use crate::storage::schema;
use crate::storage::scope::{CommitPolicy, ConnectionScope};
use crate::storage::traits::StorageEngine;
use crate::storage::types::{NewSecret, Secret, SecretListQuery, SecretSummary, Vault};

use row::{
    secret_from_row, summary_from_row, vault_from_row, SECRET_COLUMNS, SUMMARY_COLUMNS,
    VAULT_COLUMNS,
};

static INSTALLED: OnceCell<SqliteStorage> = OnceCell::new();

/// SQLite-backed storage engine.
#[derive(Debug)]
pub struct SqliteStorage {
    path: PathBuf,
    policy: CommitPolicy,
}

impl SqliteStorage {
    pub(crate) fn new(path: impl Into<PathBuf>, policy: CommitPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// Build an engine outside the process-wide guard.
    ///
    /// Only compiled for tests; every other caller goes through [`Self::install`].
    #[cfg(any(test, feature = "test-support"))]
    #[doc(hidden)]
    pub fn unregistered(path: impl Into<PathBuf>, policy: CommitPolicy) -> Self {
        Self::new(path, policy)
    }

    /// Install the process-wide engine. This is the only way to obtain one.
    ///
    /// Nothing is opened until the first operation.
    ///
    /// # Errors
    ///
    /// Returns `StrongroomError::Config` for an empty path and
    /// `StrongroomError::SingletonViolation` if an engine is already
    /// installed. Callers should treat the latter as a programming error.
    pub fn install(path: impl Into<PathBuf>, policy: CommitPolicy) -> Result<&'static Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StrongroomError::Config("database path is empty".to_string()));
        }
        let storage = Self::new(path, policy);
        info!(path = %storage.path.display(), ?policy, "install storage engine");
        INSTALLED.try_insert(storage).map_err(|(existing, _)| {
            StrongroomError::SingletonViolation(existing.path.display().to_string())
        })
    }

    /// The process-wide engine, if one has been installed.
    pub fn installed() -> Option<&'static Self> {
        INSTALLED.get()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scope(&self) -> Result<ConnectionScope> {
        ConnectionScope::open(&self.path, self.policy)
    }

    /// Drop and recreate both tables. Every vault and secret is lost.
    ///
    /// Creates the database's parent directory when it is missing.
    pub fn reset_schema(&self) -> Result<()> {
        info!(path = %self.path.display(), "reset_schema");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.scope()?.run(schema::provision)
    }

    /// Whether the database file holds both tables.
    pub fn is_provisioned(&self) -> Result<bool> {
        self.scope()?.run(schema::is_provisioned)
    }
}

enum VaultRef<'a> {
    Id(i64),
    Name(&'a str),
}

fn find_or_create_vault(conn: &Connection, name: &str) -> Result<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT Vault_ID FROM Vaults WHERE Vault_Name = ? ORDER BY Vault_ID LIMIT 1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute("INSERT INTO Vaults (Vault_Name) VALUES (?)", [name])?;
    let id = conn.last_insert_rowid();
    debug!(vault_id = id, vault_name = %name, "vault created");
    Ok(id)
}

impl StorageEngine for SqliteStorage {
    fn resolve_or_create_vault(&self, name: &str) -> Result<i64> {
        info!(vault_name = %name, "resolve_or_create_vault");
        self.scope()?.run(|conn| find_or_create_vault(conn, name))
    }

    fn resolve_secret_id(&self, name: &str) -> Result<i64> {
        info!(secret_name = %name, "resolve_secret_id");
        self.scope()?.run(|conn| {
            conn.query_row(
                "SELECT Secret_ID FROM Secrets WHERE Secret_Name = ? ORDER BY Secret_ID LIMIT 1",
                [name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .ok_or_else(|| StrongroomError::NotFound(format!("There is no secret named {}", name)))
        })
    }

    fn insert_secret(&self, secret: &NewSecret) -> Result<i64> {
        info!(
            vault_name = %secret.vault_name,
            secret_name = %secret.name,
            data_len = secret.data.len(),
            description = %secret.description,
            "insert_secret"
        );
        self.scope()?.run(|conn| {
            let vault_id = find_or_create_vault(conn, &secret.vault_name)?;

            let existing: Option<i64> = conn
                .query_row(
                    "SELECT Secret_ID FROM Secrets WHERE Vault_ID = ? AND Secret_Name = ?",
                    (vault_id, &secret.name),
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Err(StrongroomError::AlreadyExists(format!(
                    "Vault {} already has a secret named {}",
                    secret.vault_name, secret.name
                )));
            }

            conn.execute(
                "INSERT INTO Secrets (Secret_Name, Secret_Data, Secret_Description, Vault_ID) VALUES (?, ?, ?, ?)",
                (&secret.name, &secret.data, &secret.description, vault_id),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn list_secrets(&self, query: &SecretListQuery) -> Result<Vec<SecretSummary>> {
        info!(vault_id = ?query.vault_id, vault_name = ?query.vault_name, "list_secrets");
        let selector = match (query.vault_id, query.vault_name.as_deref()) {
            (Some(id), _) => VaultRef::Id(id),
            (None, Some(name)) => VaultRef::Name(name),
            (None, None) => {
                return Err(StrongroomError::InvalidArgument(
                    "one of vault_id or vault_name is required".to_string(),
                ))
            }
        };

        self.scope()?.run(|conn| {
            let vault_id = match selector {
                VaultRef::Id(id) => id,
                VaultRef::Name(name) => find_or_create_vault(conn, name)?,
            };

            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM Secrets WHERE Vault_ID = ? ORDER BY Secret_ID",
                SUMMARY_COLUMNS
            ))?;
            let secrets = stmt
                .query_map([vault_id], summary_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(secrets)
        })
    }

    fn get_secret(&self, id: i64) -> Result<Option<Secret>> {
        info!(secret_id = id, "get_secret");
        self.scope()?.run(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {} FROM Secrets WHERE Secret_ID = ?", SECRET_COLUMNS),
                    [id],
                    secret_from_row,
                )
                .optional()?)
        })
    }

    fn get_vault(&self, id: i64) -> Result<Option<Vault>> {
        info!(vault_id = id, "get_vault");
        self.scope()?.run(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {} FROM Vaults WHERE Vault_ID = ?", VAULT_COLUMNS),
                    [id],
                    vault_from_row,
                )
                .optional()?)
        })
    }

    fn list_vaults(&self) -> Result<Vec<Vault>> {
        info!("list_vaults");
        self.scope()?.run(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM Vaults ORDER BY Vault_ID",
                VAULT_COLUMNS
            ))?;
            let vaults = stmt
                .query_map([], vault_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(vaults)
        })
    }

    fn check_integrity(&self) -> Result<()> {
        info!("check_integrity");
        self.scope()?.run(schema::check_integrity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn provisioned(policy: CommitPolicy) -> (TempDir, SqliteStorage) {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("strongroom.db"), policy);
        storage.reset_schema().unwrap();
        (dir, storage)
    }

    #[test]
    fn test_resolve_or_create_vault_is_idempotent() {
        let (_dir, storage) = provisioned(CommitPolicy::default());

        let first = storage.resolve_or_create_vault("VaultA").unwrap();
        let second = storage.resolve_or_create_vault("VaultA").unwrap();

        assert_eq!(first, second);
        assert_eq!(storage.list_vaults().unwrap().len(), 1);
    }

    #[test]
    fn test_created_vault_has_no_company() {
        let (_dir, storage) = provisioned(CommitPolicy::default());
        let id = storage.resolve_or_create_vault("VaultA").unwrap();

        let vault = storage.get_vault(id).unwrap().unwrap();
        assert_eq!(vault.name, "VaultA");
        assert_eq!(vault.company_id, None);
    }

    #[test]
    fn test_vault_lookup_ignores_company() {
        let (_dir, storage) = provisioned(CommitPolicy::default());
        let scoped = storage
            .scope()
            .unwrap()
            .run(|conn| {
                conn.execute(
                    "INSERT INTO Vaults (Vault_Name, Company_ID) VALUES ('Shared', 9)",
                    [],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .unwrap();

        assert_eq!(storage.resolve_or_create_vault("Shared").unwrap(), scoped);
    }

    #[test]
    fn test_insert_duplicate_leaves_original() {
        let (_dir, storage) = provisioned(CommitPolicy::default());
        let id = storage
            .insert_secret(&NewSecret::new("VaultA", "DBPass", b"first".to_vec()))
            .unwrap();

        let err = storage
            .insert_secret(&NewSecret::new("VaultA", "DBPass", b"second".to_vec()))
            .unwrap_err();
        assert!(matches!(err, StrongroomError::AlreadyExists(_)));

        let secret = storage.get_secret(id).unwrap().unwrap();
        assert_eq!(secret.data, b"first");
    }

    #[test]
    fn test_duplicate_with_commit_always_is_still_rejected() {
        let (_dir, storage) = provisioned(CommitPolicy::CommitAlways);
        storage
            .insert_secret(&NewSecret::new("VaultA", "DBPass", b"first".to_vec()))
            .unwrap();
        let err = storage
            .insert_secret(&NewSecret::new("VaultA", "DBPass", b"second".to_vec()))
            .unwrap_err();
        assert!(matches!(err, StrongroomError::AlreadyExists(_)));

        let vault_id = storage.resolve_or_create_vault("VaultA").unwrap();
        let listed = storage
            .list_secrets(&SecretListQuery::new().vault_id(vault_id))
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_list_requires_selector() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never-opened.db");
        let storage = SqliteStorage::new(&path, CommitPolicy::default());

        let err = storage.list_secrets(&SecretListQuery::new()).unwrap_err();
        assert!(matches!(err, StrongroomError::InvalidArgument(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_list_prefers_vault_id() {
        let (_dir, storage) = provisioned(CommitPolicy::default());
        storage
            .insert_secret(&NewSecret::new("VaultA", "A1", b"a".to_vec()))
            .unwrap();
        storage
            .insert_secret(&NewSecret::new("VaultB", "B1", b"b".to_vec()))
            .unwrap();
        let vault_a = storage.resolve_or_create_vault("VaultA").unwrap();

        let listed = storage
            .list_secrets(&SecretListQuery::new().vault_id(vault_a).vault_name("VaultB"))
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "A1");
    }

    #[test]
    fn test_list_by_unknown_name_creates_empty_vault() {
        let (_dir, storage) = provisioned(CommitPolicy::default());

        let listed = storage
            .list_secrets(&SecretListQuery::new().vault_name("Fresh"))
            .unwrap();
        assert!(listed.is_empty());
        assert_eq!(storage.list_vaults().unwrap()[0].name, "Fresh");
    }

    #[test]
    fn test_resolve_secret_id_matches_across_vaults() {
        let (_dir, storage) = provisioned(CommitPolicy::default());
        let first = storage
            .insert_secret(&NewSecret::new("VaultA", "DBPass", b"a".to_vec()))
            .unwrap();
        storage
            .insert_secret(&NewSecret::new("VaultB", "DBPass", b"b".to_vec()))
            .unwrap();

        assert_eq!(storage.resolve_secret_id("DBPass").unwrap(), first);
    }

    #[test]
    fn test_unprovisioned_database() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("empty.db"), CommitPolicy::default());

        assert!(!storage.is_provisioned().unwrap());
        assert!(storage.resolve_or_create_vault("VaultA").is_err());
    }

    #[test]
    fn test_check_integrity_after_writes() {
        let (_dir, storage) = provisioned(CommitPolicy::default());
        storage
            .insert_secret(&NewSecret::new("VaultA", "DBPass", b"x".to_vec()))
            .unwrap();
        storage.check_integrity().unwrap();
    }

    #[test]
    fn test_install_rejects_empty_path() {
        let err = SqliteStorage::install("", CommitPolicy::default()).unwrap_err();
        assert!(matches!(err, StrongroomError::Config(_)));
        assert!(SqliteStorage::installed().is_none());
    }

    #[test]
    fn test_reset_schema_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("strongroom.db");
        let storage = SqliteStorage::new(&path, CommitPolicy::default());

        storage.reset_schema().unwrap();
        assert!(path.exists());
        assert!(storage.is_provisioned().unwrap());
    }

    #[test]
    fn test_reset_schema_reports_unusable_parent() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let storage = SqliteStorage::new(blocker.join("strongroom.db"), CommitPolicy::default());

        let err = storage.reset_schema().unwrap_err();
        assert!(matches!(err, StrongroomError::Io { .. }));
    }
}
