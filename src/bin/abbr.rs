// src/bin/abbr.rs

use abbr::cli::{self, AppContext, Cli, handlers};
use abbr::core::{bottles, paths, scripts, store::RuleStore};
use abbr::system::path_check;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::collections::HashMap;

/// Defines a flag token, its case variants, and its handler.
struct CommandDefinition {
    token: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &AppContext) -> Result<()>,
}

/// The single source of truth for the flag-dispatch grammar. Any argument
/// vector not starting with one of these tokens is a rule invocation.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        token: "-n",
        aliases: &["-N"],
        handler: handlers::new::handle,
    },
    CommandDefinition {
        token: "-l",
        aliases: &["-L"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        token: "-r",
        aliases: &["-R"],
        handler: handlers::remove::handle,
    },
    CommandDefinition {
        token: "-c",
        aliases: &["-C"],
        handler: handlers::update::handle,
    },
    CommandDefinition {
        token: "-ln",
        aliases: &["-LN", "-Ln", "-lN"],
        handler: handlers::show::handle,
    },
    CommandDefinition {
        token: "-i",
        aliases: &["-I"],
        handler: handlers::import::handle,
    },
    CommandDefinition {
        token: "-e",
        aliases: &["-E"],
        handler: handlers::export::handle,
    },
];

/// Finds a command definition in the registry by its token or an alias.
fn find_command(token: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.token == token || cmd.aliases.contains(&token))
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    // The only process-fatal failure: resolving the user's directories.
    let settings = paths::default_settings()?;

    // Split `-b=token:value` flags out of the command stream.
    let mut bottle_values = HashMap::new();
    let mut commands = Vec::new();
    for arg in cli.args {
        if arg.starts_with("-b=") {
            match bottles::parse_bottle_flag(&arg) {
                Some((token, value)) => {
                    bottle_values.insert(token, value);
                }
                None => {
                    println!("Ignoring malformed bottle flag '{arg}'. Expected -b=<token:value>.");
                }
            }
        } else {
            commands.push(arg);
        }
    }

    let ctx = AppContext {
        settings,
        bottles: bottle_values,
    };

    // Startup reconciliation keeps the scripts directory in lockstep with
    // the store before any operation runs.
    match RuleStore::load(&ctx.settings.store_path) {
        Ok(store) => match scripts::reconcile(&ctx.settings, store.list()) {
            Ok(report) => {
                for failure in &report.failures {
                    log::warn!("Reconciliation: {failure}");
                }
            }
            Err(e) => {
                println!("Warning: Unable to synchronize rules with scripts: {e}");
                println!(
                    "This may be normal on a first run. The program will continue, but some functionality may be limited."
                );
            }
        },
        Err(e) => println!("Warning: could not read the rule store: {e}"),
    }

    if let Err(e) = path_check::ensure_scripts_dir_on_path(&ctx.settings) {
        log::warn!("PATH check skipped: {e}");
    }

    let (first, rest) = match commands.split_first() {
        Some((first, rest)) => (first.clone(), rest.to_vec()),
        None => {
            cli::print_help();
            return Ok(());
        }
    };

    match first.as_str() {
        "-h" | "-H" => {
            cli::print_help();
            Ok(())
        }
        "-v" | "-V" => {
            println!("abbr version {}", clap::crate_version!());
            Ok(())
        }
        _ => {
            if let Some(command) = find_command(&first) {
                (command.handler)(rest, &ctx)
            } else if first.starts_with('-') {
                println!("Unrecognized option. Use abbr -h to see the available options.");
                Ok(())
            } else {
                // Free-form invocation: every argument is a rule name.
                let mut names = vec![first];
                names.extend(rest);
                handlers::run::handle(names, &ctx)
            }
        }
    }
}
