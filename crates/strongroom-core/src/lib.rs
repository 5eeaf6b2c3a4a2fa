//! # Strongroom Core
//!
//! Core library for Strongroom - a local secrets vault that groups named
//! secrets under named vaults in a single SQLite file.
//!
//! This crate provides the storage model, the schema provisioner and the
//! storage engine, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage::schema**: table layout, destructive provisioning, integrity checks
//! - **storage::scope**: one connection and one transaction per operation
//! - **storage::sqlite**: the `StorageEngine` implementation over SQLite
//!
//! Payloads are opaque bytes. Encrypting them is the caller's job.

pub mod error;
pub mod storage;

pub use error::{Result, StrongroomError};
pub use storage::StorageEngine;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
