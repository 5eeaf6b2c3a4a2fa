use strongroom_core::StorageEngine;

use crate::app::AppContext;
use crate::output::{print_vault_list, vaults_json};

pub fn handle_vault(ctx: &AppContext, name: &str) -> anyhow::Result<()> {
    let storage = ctx.storage()?;
    let id = storage.resolve_or_create_vault(name)?;
    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Vault {}: {}", name, id);
    }
    Ok(())
}

pub fn handle_vaults(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let storage = ctx.storage()?;
    let vaults = storage.list_vaults()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&vaults_json(&vaults))?);
    } else {
        print_vault_list(&vaults, ctx.quiet());
    }
    Ok(())
}
