// src/cli/handlers/list.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;

use anyhow::Result;
use colored::Colorize;

pub fn handle(_args: Vec<String>, ctx: &AppContext) -> Result<()> {
    let store = commons::load_store(&ctx.settings)?;
    if store.list().is_empty() {
        println!("No rules have been created in abbr yet.");
        return Ok(());
    }

    println!("{}", "Rules:".yellow().bold());
    for rule in store.list() {
        println!("Rule Name: {}", rule.name.green());
        println!("Command: {}\n", rule.command);
    }
    Ok(())
}
