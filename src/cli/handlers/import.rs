// src/cli/handlers/import.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;
use crate::core::store::StoreError;
use crate::core::{scripts, transfer};
use crate::models::UpsertOutcome;

use anyhow::{Context, Result, anyhow};
use std::fs;

/// Imports rules from a portable-format file. Each extracted rule goes
/// through the same exists/overwrite confirmation as a create; its script
/// is generated immediately, and the store file is rewritten once at the
/// end. Not transactional: a crash mid-import can leave scripts for rules
/// not yet persisted.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<()> {
    let path = match args.as_slice() {
        [path] => path,
        _ => {
            return Err(anyhow!(
                "Incorrect usage of -i. It should be: abbr -i <file path>"
            ));
        }
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read import file '{path}'"))?;
    let (rules, rejected) = transfer::extract_rules(&text);
    for entry in &rejected {
        println!("Skipping malformed entry: {entry}");
    }
    if rules.is_empty() {
        println!("No rules found in '{path}'.");
        return Ok(());
    }

    let mut store = commons::load_store(&ctx.settings)?;
    let mut imported = 0usize;
    for rule in rules {
        let overwrite_confirmed = if store.exists(&rule.name) {
            commons::confirm_overwrite(&rule.name)?
        } else {
            false
        };
        match store.apply(&rule.name, &rule.command, overwrite_confirmed) {
            Ok(outcome) => {
                if let Err(e) = scripts::write_script(&ctx.settings, &rule) {
                    println!("Error creating script for rule {}: {e}", rule.name);
                }
                commons::log_event_best_effort(
                    &ctx.settings,
                    "IMPORT_RULE",
                    &format!(
                        "From File: {path}, Name: {}, Command: {}",
                        rule.name, rule.command
                    ),
                );
                match outcome {
                    UpsertOutcome::Created => println!("Rule '{}' added.", rule.name),
                    UpsertOutcome::Updated => println!("Rule '{}' updated.", rule.name),
                }
                imported += 1;
            }
            Err(StoreError::OverwriteDeclined { .. }) => {
                println!("Skipping rule '{}'.", rule.name);
            }
            Err(e) => println!("{e}"),
        }
    }
    store.save()?;

    println!("{imported} rule(s) imported successfully.");
    Ok(())
}
