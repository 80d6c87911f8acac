// src/cli/handlers/run.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;
use crate::core::bottles::{self, PromptSource};
use crate::system::executor;

use anyhow::Result;
use std::time::Instant;

/// Invokes one or more rules by name: store lookup, bottle substitution,
/// then execution through the shell. Unknown names and failed commands are
/// reported and do not stop the remaining invocations.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<()> {
    let store = commons::load_store(&ctx.settings)?;
    let mut source = PromptSource;

    let mut resolved = Vec::new();
    for name in &args {
        match store.find(name) {
            Some(rule) => {
                let command = bottles::substitute(&rule.command, &ctx.bottles, &mut source)?;
                resolved.push((name.clone(), command));
            }
            None => println!("Error: rule '{name}' not found"),
        }
    }

    if resolved.is_empty() {
        println!("No rules found to execute.");
        return Ok(());
    }

    for (i, (name, command)) in resolved.iter().enumerate() {
        println!("Executing command {}: {}", i + 1, command);
        let start = Instant::now();
        let result = executor::execute_command(command);
        let duration = start.elapsed();

        let result_tag = match &result {
            Ok(()) => "Success".to_string(),
            Err(e) => {
                println!("Error executing command {}: {}", i + 1, e);
                format!("Error: {e}")
            }
        };
        commons::log_event_best_effort(
            &ctx.settings,
            "EXECUTE_RULE",
            &format!(
                "Rule: {name}, Command: \"{command}\", Result: {result_tag}, Duration: {:.2?}",
                duration
            ),
        );
    }
    Ok(())
}
