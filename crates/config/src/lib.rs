//! Taledeck Configuration System
//!
//! TOML configuration with per-section validation and atomic writes. New
//! features add sections by implementing the `ConfigSection` trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use taledeck_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load_or_default();
//!
//! println!("Skip forward: {}s", config.player.skip_forward_secs);
//! ```

mod error;
mod manager;
mod persistence;
mod player_config;
mod storage_config;
mod validation;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::ConfigManager;
pub use player_config::PlayerConfig;
pub use storage_config::StorageConfig;
pub use validation::{ConfigSection, Validator};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Player preferences
    pub player: PlayerConfig,

    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.player.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.storage.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            player: PlayerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_across_sections() {
        let mut config = Config::default();
        config.player.default_speed = 0.0;
        config.storage.max_connections = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str("[player]\nskip_forward_secs = 60\n").unwrap();
        assert_eq!(parsed.player.skip_forward_secs, 60);
        assert_eq!(parsed.player.persist_interval_secs, 20);
        assert_eq!(parsed.storage, StorageConfig::default());
    }
}
