// src/cli/handlers/update.rs

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
                "Incorrect usage of -c. It should be: abbr -c <name> '<command>'"
            ));
        }
    };
    let command = command_parts.join(" ");

    let mut store = commons::load_store(&ctx.settings)?;
    if !store.exists(&name) {
        return Err(StoreError::NotFound { name }.into());
    }
    // Explicit update of a named rule is its own confirmation.
    store.upsert(&name, &command, true)?;

    scripts::write_script(
        &ctx.settings,
        &Rule {
            name: name.clone(),
            command: command.clone(),
        },
    )?;
    commons::log_event_best_effort(
        &ctx.settings,
        "UPDATE_RULE",
        &format!("Name: {name}, New Command: {command}"),
    );

    println!("Rule '{}' successfully updated.", name.green());
    Ok(())
}
