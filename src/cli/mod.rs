// src/cli/mod.rs

use crate::models::Settings;

use clap::Parser;
use colored::Colorize;
use std::collections::HashMap;

pub mod handlers;

/// abbr: a personal command-abbreviation manager.
///
/// The grammar is flag-token dispatch over a raw argument vector (`-n`,
/// `-l`, ... and free-form rule names), so clap only collects the tokens;
/// the dispatcher in the binary interprets them. Its built-in `-h`/`-V`
/// handling is disabled because those tokens belong to our own registry.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Raw argument vector, hyphen tokens included.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Shared state handed to every handler: resolved settings plus any bottle
/// values pre-supplied with `-b=token:value` flags.
#[derive(Debug)]
pub struct AppContext {
    pub settings: Settings,
    pub bottles: HashMap<String, String>,
}

/// Prints the full usage text.
pub fn print_help() {
    println!("{}", "Usage: abbr <option>".bold());
    println!();
    println!("{}", "Available options:".yellow().bold());
    println!("  -n <name> '<command>'   Create a new rule");
    println!("  -l                      List stored rules");
    println!("  -r <name> [<name>...]   Delete existing rules");
    println!("  -r a                    Delete all rules");
    println!("  -c <name> '<command>'   Update the command of a rule");
    println!("  -ln <name>              Show the contents of a specific rule");
    println!("  -i <file path>          Import rules from a local file");
    println!("  -e                      Export rules to a text file (backup)");
    println!("  -b=<token:value>        Pre-define the content of a bottle");
    println!("  -h                      Show this help");
    println!("  -v                      Show the program version");
    println!();
    println!("{}", "Usage examples:".yellow().bold());
    println!("  Create a new rule:       abbr -n update 'sudo apt update -y'");
    println!("  The next time just run:  update");
    println!();
    println!("  Rule with a bottle:      abbr -n ssh 'ssh -p 2222 <bottle:username>@example.com'");
    println!("  Running 'ssh' asks for the username value, or takes it from -b=username:alice");
}
