// src/cli/handlers/commons.rs

use crate::core::store::RuleStore;
use crate::models::Settings;
use crate::system::event_log;

use anyhow::Result;
use dialoguer::{Confirm, theme::ColorfulTheme};

/// Loads a fresh store snapshot for this invocation.
pub fn load_store(settings: &Settings) -> Result<RuleStore> {
    Ok(RuleStore::load(&settings.store_path)?)
}

/// y/n confirmation before overwriting an existing rule. Blocks on the
/// terminal; there is no timeout.
pub fn confirm_overwrite(name: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "The rule '{name}' already exists. Do you want to overwrite it?"
        ))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Fire-and-forget event logging: failures are warnings, never fatal to
/// the operation that triggered them.
pub fn log_event_best_effort(settings: &Settings, event_type: &str, details: &str) {
    if let Err(e) = event_log::log_event(settings, event_type, details) {
        log::warn!("Failed to log event: {e}");
    }
}
