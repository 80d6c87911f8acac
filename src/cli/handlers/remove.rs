// src/cli/handlers/remove.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;
use crate::core::scripts;

use anyhow::{Result, anyhow};

pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<()> {
    if args.is_empty() {
        return Err(anyhow!(
            "Incorrect usage of -r. It should be: abbr -r <name> [<name>...] or abbr -r a"
        ));
    }

    let mut store = commons::load_store(&ctx.settings)?;

    if args.len() == 1 && args[0] == "a" {
        store.delete_all()?;
        // Destructive to the whole scripts directory, not just rule scripts.
        let failures = scripts::purge_all(&ctx.settings)?;
        for failure in &failures {
            println!("Error deleting script {failure}");
        }
        commons::log_event_best_effort(&ctx.settings, "DELETE_RULE", "All rules deleted");
        println!("All rules have been successfully deleted.");
        return Ok(());
    }

    // Each name is attempted independently; failures are reported and do
    // not abort the rest of the batch.
    for name in &args {
        match store.delete(name) {
            Ok(()) => {
                if let Err(e) = scripts::remove_script(&ctx.settings, name) {
                    println!("Error deleting script for '{name}': {e}");
                }
                commons::log_event_best_effort(
                    &ctx.settings,
                    "DELETE_RULE",
                    &format!("Name: {name}"),
                );
                println!("Rule '{name}' successfully deleted.");
            }
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}
