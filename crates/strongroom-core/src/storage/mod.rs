//! Storage abstraction for Strongroom.
//!
//! This module defines the `StorageEngine` trait and the types that flow
//! through it.
//!
//! ## Architecture
//!
//! Every operation is a self-contained unit of work: open a connection,
//! run its statements inside one transaction, finish the transaction and
//! close the connection. Nothing is pooled or shared between operations;
//! concurrent access from other processes is left to SQLite's file locking.
//!
//! ## Persisted layout
//!
//! One SQLite file holding exactly two tables, `Vaults` and `Secrets`.
//! See [`schema`] for the DDL.

pub mod schema;
pub mod scope;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use scope::{CommitPolicy, ConnectionScope};
pub use sqlite::SqliteStorage;
pub use traits::StorageEngine;
pub use types::{NewSecret, Secret, SecretListQuery, SecretSummary, Vault};
