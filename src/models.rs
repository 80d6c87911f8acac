// src/models.rs

use std::path::PathBuf;

/// A single stored abbreviation: a short name bound to a raw shell command
/// line. The command may contain `<bottle:token>` placeholders, which are
/// only recognized at substitution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub command: String,
}

/// Explicit configuration handed to every component at construction.
/// Business logic never performs ambient environment lookups; everything it
/// touches on disk is named here.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The flat text file holding one `name = command` line per rule.
    pub store_path: PathBuf,
    /// The directory of generated executable wrapper scripts, one per rule.
    pub scripts_dir: PathBuf,
    /// The process-wide event log appended to by scripts and handlers.
    pub log_path: PathBuf,
}

/// Result of applying a rule to the in-memory store sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The name was new; the rule was appended.
    Created,
    /// The name existed and its command was overwritten in place.
    Updated,
}

/// Outcome of one reconciliation pass over the scripts directory.
/// Reconciliation is best-effort: per-file failures are collected here
/// rather than aborting the pass.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Scripts (re)written for current rules.
    pub written: usize,
    /// Orphaned scripts removed because no rule bears their name.
    pub removed: usize,
    /// Human-readable descriptions of per-file failures.
    pub failures: Vec<String>,
}
