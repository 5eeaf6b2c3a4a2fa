//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: Unexpected error
/// - 2: Configuration error (also what clap uses for usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unexpected error caught at the top-level boundary.
    pub const UNEXPECTED: i32 = 1;

    /// Configuration missing, unreadable, or invalid.
    pub const CONFIG: i32 = 2;

    /// Secret or other resource not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Secret name already taken in the vault.
    pub const ALREADY_EXISTS: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}
