// src/cli/handlers/new.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;
use crate::core::scripts;
use crate::core::store::StoreError;
use crate::models::Rule;

use anyhow::{Result, anyhow};
use colored::Colorize;

pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<()> {
    let (name, command_parts) = match args.split_first() {
        Some((name, rest)) if !rest.is_empty() => (name.clone(), rest),
        _ => {
            return Err(anyhow!(
                "Incorrect usage of -n. It should be: abbr -n <name> '<command>'"
            ));
        }
    };
    let command = command_parts.join(" ");

    let mut store = commons::load_store(&ctx.settings)?;
    let overwrite_confirmed = if store.exists(&name) {
        commons::confirm_overwrite(&name)?
    } else {
        false
    };

    match store.upsert(&name, &command, overwrite_confirmed) {
        Ok(_) => {}
        Err(StoreError::OverwriteDeclined { .. }) => {
            println!("Operation cancelled.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    scripts::write_script(
        &ctx.settings,
        &Rule {
            name: name.clone(),
            command: command.clone(),
        },
    )?;
    commons::log_event_best_effort(
        &ctx.settings,
        "CREATE_RULE",
        &format!("Name: {name}, Command: {command}"),
    );

    println!(
        "Rule '{}' successfully added. You can now use it directly by typing '{}'",
        name.green(),
        name
    );
    Ok(())
}
