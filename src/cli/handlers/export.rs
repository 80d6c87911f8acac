// src/cli/handlers/export.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;
use crate::constants;
use crate::core::transfer;
use crate::models::Rule;

use anyhow::{Context, Result, anyhow};
use dialoguer::{Input, theme::ColorfulTheme};
use std::fs;
use std::path::PathBuf;

/// Interactive export: select rules (blank = all), optionally add a
/// comment line, pick a destination directory (blank = home), and write
/// the portable file.
pub fn handle(_args: Vec<String>, ctx: &AppContext) -> Result<()> {
    let store = commons::load_store(&ctx.settings)?;
    if store.list().is_empty() {
        println!("No rules have been created in abbr yet.");
        return Ok(());
    }

    println!("Exporting rules in progress... Press ctrl+c to quit");
    println!("You can export rules in bulk, e.g., <rule1> <rule2>");

    let selected: Vec<Rule> = loop {
        let line: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Which rule(s) do you want to export? Leave blank to export all")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break store.list().to_vec();
        }
        let names: Vec<&str> = line.split_whitespace().collect();
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !store.exists(name))
            .collect();
        if missing.is_empty() {
            break names
                .iter()
                .filter_map(|name| store.find(name).cloned())
                .collect();
        }
        println!("The following rules were not found: {}", missing.join(", "));
        println!("Please re-enter the correct rules or leave blank to export all.");
    };

    let comment: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Do you want to add a comment? Leave blank to continue")
        .allow_empty(true)
        .interact_text()?;

    let destination: PathBuf = loop {
        let line: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Where do you want to store your file? Leave blank to store in $HOME")
            .allow_empty(true)
            .interact_text()?;
        let candidate = if line.trim().is_empty() {
            dirs::home_dir().ok_or_else(|| anyhow!("Could not resolve home directory."))?
        } else {
            PathBuf::from(line.trim())
        };
        if candidate.is_dir() {
            break candidate;
        }
        println!("Location not found or not a directory.");
    };

    let comment = comment.trim();
    let content = transfer::render_export(
        &selected,
        if comment.is_empty() { None } else { Some(comment) },
    );
    let out_path = destination.join(constants::EXPORT_FILENAME);
    fs::write(&out_path, content)
        .with_context(|| format!("Could not write export file '{}'", out_path.display()))?;

    println!("Rules successfully exported to: {}", out_path.display());

    let exported_names: Vec<&str> = selected.iter().map(|r| r.name.as_str()).collect();
    commons::log_event_best_effort(
        &ctx.settings,
        "EXPORT_RULES",
        &format!(
            "Exported rules: {}, To file: {}",
            exported_names.join(", "),
            out_path.display()
        ),
    );
    Ok(())
}
