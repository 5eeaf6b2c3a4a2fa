//! Table layout and administrative schema operations.
//!
//! [`provision`] is destructive: it drops both tables and every row in them.
//! It is only ever run on explicit request (`strongroom reset-schema`),
//! never as part of normal request handling.

use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::{Result, StrongroomError};

/// Tables every provisioned database contains.
pub const TABLES: [&str; 2] = ["Vaults", "Secrets"];

const PROVISION_SQL: &str = r#"
DROP TABLE IF EXISTS Secrets;
DROP TABLE IF EXISTS Vaults;

CREATE TABLE Vaults (
    Vault_ID    INTEGER PRIMARY KEY NOT NULL,
    Vault_Name  TEXT NOT NULL,
    Company_ID  INTEGER NULL,

    UNIQUE (Company_ID, Vault_Name)
);

CREATE INDEX index_vault_name ON Vaults (Vault_Name);
CREATE INDEX index_company_id ON Vaults (Company_ID);

CREATE TABLE Secrets (
    Secret_ID           INTEGER PRIMARY KEY NOT NULL,
    Secret_Name         TEXT NOT NULL,
    Secret_Description  TEXT NULL,
    Secret_Data         BLOB NOT NULL,
    Vault_ID            INTEGER NOT NULL,

    UNIQUE (Vault_ID, Secret_Name),
    FOREIGN KEY (Vault_ID) REFERENCES Vaults (Vault_ID)
        ON DELETE RESTRICT ON UPDATE NO ACTION
);

CREATE INDEX index_secret_name ON Secrets (Secret_Name);
CREATE INDEX index_vault_id ON Secrets (Vault_ID);
CREATE INDEX index_secret_description ON Secrets (Secret_Description);
"#;

/// Drop and recreate both tables and their indexes.
///
/// Runs as a single batch. All existing vaults and secrets are lost.
pub fn provision(conn: &Connection) -> Result<()> {
    warn!("dropping and recreating Vaults and Secrets tables");
    conn.execute_batch(PROVISION_SQL)?;
    info!("schema provisioned");
    Ok(())
}

/// Whether both tables exist.
pub fn is_provisioned(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN (?, ?)",
        TABLES,
        |row| row.get(0),
    )?;
    Ok(count == TABLES.len() as i64)
}

/// Verify page-level integrity and foreign key consistency.
pub fn check_integrity(conn: &Connection) -> Result<()> {
    if !is_provisioned(conn)? {
        return Err(StrongroomError::Schema(
            "Vaults and Secrets tables are missing".to_string(),
        ));
    }

    let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if status != "ok" {
        return Err(StrongroomError::Integrity(format!(
            "integrity_check reported: {}",
            status
        )));
    }

    let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
    let mut rows = stmt.query([])?;
    if rows.next()?.is_some() {
        return Err(StrongroomError::Integrity(
            "Foreign key integrity check failed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provisioned() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        provision(&conn).unwrap();
        conn
    }

    #[test]
    fn test_provision_creates_tables_and_indexes() {
        let conn = provisioned();
        assert!(is_provisioned(&conn).unwrap());

        let indexes: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'index_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indexes, 5);
    }

    #[test]
    fn test_empty_database_is_not_provisioned() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!is_provisioned(&conn).unwrap());
        assert!(matches!(
            check_integrity(&conn),
            Err(StrongroomError::Schema(_))
        ));
    }

    #[test]
    fn test_provision_wipes_existing_rows() {
        let conn = provisioned();
        conn.execute("INSERT INTO Vaults (Vault_Name) VALUES ('VaultA')", [])
            .unwrap();

        provision(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Vaults", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_vault_name_unique_per_company() {
        let conn = provisioned();
        conn.execute(
            "INSERT INTO Vaults (Vault_Name, Company_ID) VALUES ('Shared', 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO Vaults (Vault_Name, Company_ID) VALUES ('Shared', 2)",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO Vaults (Vault_Name, Company_ID) VALUES ('Shared', 1)",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_delete_vault_with_secrets_is_restricted() {
        let conn = provisioned();
        conn.execute("INSERT INTO Vaults (Vault_Name) VALUES ('VaultA')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO Secrets (Secret_Name, Secret_Data, Vault_ID) VALUES ('DBPass', x'00', 1)",
            [],
        )
        .unwrap();

        let result = conn.execute("DELETE FROM Vaults WHERE Vault_ID = 1", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_secret_requires_existing_vault() {
        let conn = provisioned();
        let result = conn.execute(
            "INSERT INTO Secrets (Secret_Name, Secret_Data, Vault_ID) VALUES ('Orphan', x'00', 42)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_check_integrity_ok_on_fresh_schema() {
        let conn = provisioned();
        check_integrity(&conn).unwrap();
    }
}
