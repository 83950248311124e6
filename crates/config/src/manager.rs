//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Main configuration manager
///
/// The primary interface for loading and saving configuration. Handles file
/// paths, defaults, and validation.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// The default directory follows the XDG base directory specification:
    /// - Linux: `~/.config/taledeck/`
    /// - macOS: `~/Library/Application Support/taledeck/`
    /// - Windows: `%APPDATA%\taledeck\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::with_directory(config_dir))
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> Self {
        let persistence = ConfigPersistence::new(config_dir.join("config.toml"));
        Self {
            persistence,
            config_dir,
        }
    }

    /// Returns the default config directory based on the platform
    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "taledeck")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Loads the configuration from file
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    ///
    /// Errors are logged but the function always returns a usable config.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration to file
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Updates the configuration using a closure
    ///
    /// Loads the current config, applies the update, and saves atomically.
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }
}
