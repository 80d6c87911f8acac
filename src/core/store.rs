// src/core/store.rs

use crate::constants;
use crate::core::record;
use crate::models::{Rule, UpsertOutcome};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur during operations on the [`RuleStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// A filesystem I/O error occurred.
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
    /// The candidate name collides with the protected name set.
    #[error("Unable to use '{name}' as a rule name: it is a reserved command name.")]
    ReservedName {
        /// The rejected name.
        name: String,
    },
    /// The candidate name cannot be expressed in the store's line format.
    #[error("Malformed rule name '{name}': names must be non-empty and must not contain '='.")]
    MalformedRecord {
        /// The rejected name.
        name: String,
    },
    /// The named rule is absent from the store.
    #[error("Rule '{name}' not found.")]
    NotFound {
        /// The missing name.
        name: String,
    },
    /// The rule exists and the operator declined to overwrite it.
    #[error("Rule '{name}' already exists and overwriting was declined.")]
    OverwriteDeclined {
        /// The conflicting name.
        name: String,
    },
}

type StoreResult<T> = Result<T, StoreError>;

/// An in-memory snapshot of the persisted rule store.
///
/// The store holds no long-lived cross-invocation cache: every CLI
/// invocation loads the full file, mutates the in-memory sequence, and
/// rewrites the file in full. Insertion order is preserved; updates happen
/// in place. Concurrent invocations against the same file are
/// unsynchronized (last writer wins) — an accepted limitation.
#[derive(Debug)]
pub struct RuleStore {
    path: PathBuf,
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Loads the store from disk. A missing file yields an empty store;
    /// lines that do not match the `name = command` pattern are skipped.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let rules = match fs::read_to_string(&path) {
            Ok(content) => content.lines().filter_map(record::parse).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Loaded {} rule(s) from {}", rules.len(), path.display());
        Ok(Self { path, rules })
    }

    /// All rules, in insertion order.
    pub fn list(&self) -> &[Rule] {
        &self.rules
    }

    pub fn find(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Inserts or overwrites a rule in the in-memory sequence only.
    ///
    /// Overwriting an existing name requires `overwrite_confirmed` (the
    /// caller's y/n prompt result); without it the call fails with
    /// [`StoreError::OverwriteDeclined`] and the sequence is untouched.
    /// Reserved and malformed names are rejected before anything else.
    pub fn apply(
        &mut self,
        name: &str,
        command: &str,
        overwrite_confirmed: bool,
    ) -> StoreResult<UpsertOutcome> {
        validate_name(name)?;
        if let Some(existing) = self.rules.iter_mut().find(|r| r.name == name) {
            if !overwrite_confirmed {
                return Err(StoreError::OverwriteDeclined {
                    name: name.to_string(),
                });
            }
            existing.command = command.to_string();
            Ok(UpsertOutcome::Updated)
        } else {
            self.rules.push(Rule {
                name: name.to_string(),
                command: command.to_string(),
            });
            Ok(UpsertOutcome::Created)
        }
    }

    /// [`Self::apply`] followed by a full rewrite of the store file.
    pub fn upsert(
        &mut self,
        name: &str,
        command: &str,
        overwrite_confirmed: bool,
    ) -> StoreResult<UpsertOutcome> {
        let outcome = self.apply(name, command, overwrite_confirmed)?;
        self.save()?;
        Ok(outcome)
    }

    /// Removes a rule and rewrites the store file. A missing name fails
    /// with [`StoreError::NotFound`] and performs no file writes.
    pub fn delete(&mut self, name: &str) -> StoreResult<()> {
        if constants::is_reserved(name) {
            return Err(StoreError::ReservedName {
                name: name.to_string(),
            });
        }
        match self.rules.iter().position(|r| r.name == name) {
            Some(index) => {
                self.rules.remove(index);
                self.save()
            }
            None => Err(StoreError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Truncates the persisted store to empty. The caller is responsible
    /// for purging the scripts directory alongside.
    pub fn delete_all(&mut self) -> StoreResult<()> {
        self.rules.clear();
        self.save()
    }

    /// Rewrites the whole store file atomically: the sequence is written to
    /// a temporary file in the same directory, which then replaces the
    /// store by rename. A crash mid-write can never leave a truncated
    /// store behind.
    pub fn save(&self) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        for rule in &self.rules {
            writeln!(tmp, "{}", record::format(rule))?;
        }
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        log::debug!("Wrote {} rule(s) to {}", self.rules.len(), self.path.display());
        Ok(())
    }
}

fn validate_name(name: &str) -> StoreResult<()> {
    if name.is_empty() || name.contains('=') {
        return Err(StoreError::MalformedRecord {
            name: name.to_string(),
        });
    }
    if constants::is_reserved(name) {
        return Err(StoreError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}
