// src/system/path_check.rs

use crate::models::Settings;

use anyhow::{Context, Result};
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Warns when the scripts directory is missing from `PATH` and offers to
/// append an export line to the shell profile matching `$SHELL`. Rules
/// cannot be invoked by name from a shell until the directory is on
/// `PATH`; declining leaves abbr usable but rules not directly runnable.
pub fn ensure_scripts_dir_on_path(settings: &Settings) -> Result<()> {
    let path_var = env::var("PATH").unwrap_or_default();
    if env::split_paths(&path_var).any(|p| p == settings.scripts_dir) {
        return Ok(());
    }

    let scripts_dir = settings.scripts_dir.display();
    println!("{scripts_dir} is not in your PATH. This is necessary to run your rules by name.");
    let add = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Do you want to add it to your shell profile?")
        .default(false)
        .interact()?;
    if !add {
        println!("You can keep using abbr, but your rules will not run by name.");
        return Ok(());
    }

    let profile = profile_file();
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&profile)
        .with_context(|| format!("Could not open profile file '{}'", profile.display()))?;
    writeln!(file, "\nexport PATH={scripts_dir}:$PATH")?;
    println!(
        "{scripts_dir} has been added to your PATH. Restart your terminal or run 'source {}' to apply the change.",
        profile.display()
    );
    Ok(())
}

/// Picks the profile file for the user's shell, defaulting to `.profile`
/// for unknown shells.
fn profile_file() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_default();
    let shell = env::var("SHELL").unwrap_or_default();
    if shell.contains("zsh") {
        home.join(".zshrc")
    } else if shell.contains("fish") {
        home.join(".config/fish/config.fish")
    } else if shell.contains("bash") {
        home.join(".bashrc")
    } else {
        home.join(".profile")
    }
}
