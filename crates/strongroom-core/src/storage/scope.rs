//! Connection scope: one connection, one transaction, per unit of work.

use std::path::Path;

use rusqlite::{Connection, Transaction};
use tracing::{debug, warn};

use crate::error::{Result, StrongroomError};

/// How a scope finishes its transaction when the unit of work fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Commit on success, roll back on error.
    #[default]
    RollbackOnError,

    /// Commit whatever the unit of work wrote, even when it returned an
    /// error. Partial writes made before the error are persisted.
    CommitAlways,
}

impl CommitPolicy {
    pub fn from_commit_on_error(commit_on_error: bool) -> Self {
        if commit_on_error {
            CommitPolicy::CommitAlways
        } else {
            CommitPolicy::RollbackOnError
        }
    }
}

/// An open connection that is consumed by exactly one unit of work.
pub struct ConnectionScope {
    conn: Connection,
    policy: CommitPolicy,
}

impl ConnectionScope {
    /// Open a connection to the database file at `path`.
    ///
    /// Foreign key enforcement is switched on for the connection so that
    /// restrict-on-delete holds.
    pub fn open(path: &Path, policy: CommitPolicy) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        debug!(path = %path.display(), "connection opened");
        Ok(Self { conn, policy })
    }

    /// Run `work` inside a transaction, finish the transaction according to
    /// the policy, and close the connection.
    ///
    /// The connection is closed on every path. A panic inside `work` drops
    /// the transaction, which rolls it back.
    pub fn run<T, F>(self, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let ConnectionScope { mut conn, policy } = self;

        let tx = conn.transaction()?;
        let outcome = work(&tx);
        let finished = finish(tx, policy, outcome.is_ok());

        let closed = conn
            .close()
            .map_err(|(_, err)| StrongroomError::Storage(format!("Close failed: {}", err)));

        match outcome {
            Ok(value) => {
                finished?;
                closed?;
                Ok(value)
            }
            Err(err) => {
                if let Err(finish_err) = finished.and(closed) {
                    warn!(error = %finish_err, "failed to finish scope after error");
                }
                Err(err)
            }
        }
    }
}

fn finish(tx: Transaction<'_>, policy: CommitPolicy, succeeded: bool) -> Result<()> {
    match (succeeded, policy) {
        (true, _) | (false, CommitPolicy::CommitAlways) => {
            tx.commit()?;
            debug!(succeeded, "transaction committed");
        }
        (false, CommitPolicy::RollbackOnError) => {
            tx.rollback()?;
            debug!("transaction rolled back");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn count_rows(path: &Path) -> i64 {
        let conn = Connection::open(path).unwrap();
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap()
    }

    fn setup(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER);").unwrap();
    }

    #[test]
    fn test_commits_on_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scope.db");
        setup(&path);

        let scope = ConnectionScope::open(&path, CommitPolicy::RollbackOnError).unwrap();
        let inserted = scope
            .run(|conn| Ok(conn.execute("INSERT INTO t (v) VALUES (1)", [])?))
            .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(count_rows(&path), 1);
    }

    #[test]
    fn test_rolls_back_on_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scope.db");
        setup(&path);

        let scope = ConnectionScope::open(&path, CommitPolicy::RollbackOnError).unwrap();
        let result: Result<()> = scope.run(|conn| {
            conn.execute("INSERT INTO t (v) VALUES (1)", [])?;
            Err(StrongroomError::InvalidArgument("abort".to_string()))
        });

        assert!(matches!(result, Err(StrongroomError::InvalidArgument(_))));
        assert_eq!(count_rows(&path), 0);
    }

    #[test]
    fn test_commit_always_persists_partial_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scope.db");
        setup(&path);

        let scope = ConnectionScope::open(&path, CommitPolicy::CommitAlways).unwrap();
        let result: Result<()> = scope.run(|conn| {
            conn.execute("INSERT INTO t (v) VALUES (1)", [])?;
            Err(StrongroomError::InvalidArgument("abort".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(count_rows(&path), 1);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scope.db");

        let scope = ConnectionScope::open(&path, CommitPolicy::default()).unwrap();
        let enabled: i64 = scope
            .run(|conn| Ok(conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(
            CommitPolicy::from_commit_on_error(true),
            CommitPolicy::CommitAlways
        );
        assert_eq!(
            CommitPolicy::from_commit_on_error(false),
            CommitPolicy::RollbackOnError
        );
    }
}
