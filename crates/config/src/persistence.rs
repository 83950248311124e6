//! File system persistence for configuration
//!
//! Reads and writes the config file with atomic writes (no partial files),
//! directory creation, and graceful error handling.

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a new persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads configuration from file
    ///
    /// A missing file yields the default config; an empty or unparsable
    /// file is an error so callers can distinguish "fresh install" from
    /// "corrupted".
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        if let Err(errors) = config.validate() {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::ValidationError(message));
        }

        Ok(config)
    }

    /// Saves configuration to file atomically
    ///
    /// Writes to a temp file in the target directory, then renames over the
    /// config path, so the file is never observed half-written.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::ValidationError(message));
        }

        let contents = toml::to_string_pretty(config)?;

        let dir = self
            .config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        fs::create_dir_all(&dir).map_err(|e| ConfigError::DirectoryCreationError {
            path: dir.clone(),
            source: e,
        })?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| ConfigError::WriteError {
            path: self.config_path.clone(),
            source: e,
        })?;

        temp.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e,
            })?;

        temp.persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::debug!("Saved config to {}", self.config_path.display());
        Ok(())
    }
}
