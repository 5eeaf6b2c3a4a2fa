//! Command handlers, one module per command group.

mod maintenance;
mod misc;
mod secrets;
mod vaults;

pub use maintenance::{handle_check, handle_config_init, handle_config_show, handle_reset_schema};
pub use misc::handle_completions;
pub use secrets::{handle_list, handle_put, handle_secret_id, handle_show};
pub use vaults::{handle_vault, handle_vaults};
