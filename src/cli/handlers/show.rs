// src/cli/handlers/show.rs

use crate::cli::AppContext;
use crate::cli::handlers::commons;
use crate::core::record;

use anyhow::{Result, anyhow};

pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<()> {
    let name = match args.as_slice() {
        [name] => name,
        _ => {
            return Err(anyhow!(
                "Incorrect usage of -ln. It should be: abbr -ln <name>"
            ));
        }
    };

    let store = commons::load_store(&ctx.settings)?;
    match store.find(name) {
        Some(rule) => println!("{}", record::format(rule)),
        None => println!("Rule '{name}' does not exist."),
    }
    Ok(())
}
