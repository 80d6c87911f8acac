// src/core/paths.rs

use crate::constants;
use crate::models::Settings;

use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not find system data directory.")]
    DataDirNotFound,
    #[error("Could not create directory at '{path}': {source}")]
    DirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves the default [`Settings`] from the platform directories:
/// store at `<config_dir>/abbr/rules.conf`, scripts at
/// `<data_dir>/abbr/bin/`, event log at `<data_dir>/abbr/abbr.log`.
/// Creates the base directories if absent.
///
/// This is the only resolution failure treated as process-fatal; every
/// other error is reported and survived.
pub fn default_settings() -> Result<Settings, PathError> {
    let config_dir = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(constants::ABBR_DIR);
    let data_dir = dirs::data_dir()
        .ok_or(PathError::DataDirNotFound)?
        .join(constants::ABBR_DIR);

    for dir in [&config_dir, &data_dir] {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| PathError::DirCreation {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
    }

    Ok(Settings {
        store_path: config_dir.join(constants::STORE_FILENAME),
        scripts_dir: data_dir.join(constants::SCRIPTS_DIRNAME),
        log_path: data_dir.join(constants::LOG_FILENAME),
    })
}
