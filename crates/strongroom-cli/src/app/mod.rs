//! Application-level utilities for the Strongroom CLI.
//!
//! This module provides:
//! - Path and settings resolution for config and database files
//! - The application context that owns the storage engine reference

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_settings;
