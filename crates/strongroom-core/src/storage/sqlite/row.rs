//! Row mapping for `Vaults` and `Secrets` queries.
//!
//! Column order in each `*_COLUMNS` constant must match the getter indexes
//! in the mapping function below it.

use rusqlite::Row;

use crate::storage::types::{Secret, SecretSummary, Vault};

pub const VAULT_COLUMNS: &str = "Vault_ID, Vault_Name, Company_ID";

pub fn vault_from_row(row: &Row<'_>) -> rusqlite::Result<Vault> {
    Ok(Vault {
        id: row.get(0)?,
        name: row.get(1)?,
        company_id: row.get(2)?,
    })
}

pub const SECRET_COLUMNS: &str =
    "Secret_ID, Secret_Name, Secret_Description, Secret_Data, Vault_ID";

pub fn secret_from_row(row: &Row<'_>) -> rusqlite::Result<Secret> {
    Ok(Secret {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        data: row.get(3)?,
        vault_id: row.get(4)?,
    })
}

pub const SUMMARY_COLUMNS: &str = "Secret_ID, Secret_Name, Secret_Description";

pub fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<SecretSummary> {
    Ok(SecretSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
