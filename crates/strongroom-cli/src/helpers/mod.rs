//! Helper functions for the CLI.

mod input;

pub use input::read_secret_value;
