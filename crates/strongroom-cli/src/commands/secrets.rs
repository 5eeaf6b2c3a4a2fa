use strongroom_core::storage::{NewSecret, SecretListQuery};
use strongroom_core::StorageEngine;

use crate::app::AppContext;
use crate::cli::{ListArgs, PutArgs};
use crate::errors::CliError;
use crate::helpers::read_secret_value;
use crate::output::{print_secret, print_secret_list, secret_json, summaries_json};

pub fn handle_put(ctx: &AppContext, args: &PutArgs) -> anyhow::Result<()> {
    let storage = ctx.storage()?;
    let data = read_secret_value(args.value.clone(), args.file.as_deref())?;

    let mut secret = NewSecret::new(args.vault.as_str(), args.name.as_str(), data.to_vec());
    if let Some(description) = args.description.as_deref() {
        secret = secret.with_description(description);
    }
    let result = storage.insert_secret(&secret);
    zeroize::Zeroize::zeroize(&mut secret.data);
    let id = result?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Stored secret {} in vault {} (ID {})", args.name, args.vault, id);
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let storage = ctx.storage()?;

    let mut query = SecretListQuery::new();
    if let Some(id) = args.vault_id {
        query = query.vault_id(id);
    }
    if let Some(ref name) = args.vault {
        query = query.vault_name(name.clone());
    }

    let secrets = storage.list_secrets(&query)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries_json(&secrets))?);
    } else {
        print_secret_list(&secrets, ctx.quiet());
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, id: i64, json: bool) -> anyhow::Result<()> {
    let storage = ctx.storage()?;

    let secret = storage.get_secret(id)?.ok_or_else(|| {
        CliError::NotFound(format!(
            "Secret {} not found\nHint: Run `strongroom list --vault <NAME>` to find secret IDs.",
            id
        ))
    })?;
    let vault = storage.get_vault(secret.vault_id)?;

    if json {
        let output = serde_json::to_string_pretty(&secret_json(&secret, vault.as_ref()))?;
        println!("{}", output);
    } else {
        print_secret(&secret, vault.as_ref(), ctx.quiet());
    }
    Ok(())
}

pub fn handle_secret_id(ctx: &AppContext, name: &str) -> anyhow::Result<()> {
    let storage = ctx.storage()?;
    let id = storage.resolve_secret_id(name)?;
    println!("{}", id);
    Ok(())
}
