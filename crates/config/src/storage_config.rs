//! Storage configuration section

use crate::validation::{ConfigSection, Validator};
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// On-device storage settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the progress database file
    pub database_path: String,

    /// Maximum number of pooled database connections
    pub max_connections: u32,

    /// Enable Write-Ahead Logging for the database
    pub enable_wal: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "taledeck.db".to_string(),
            max_connections: 5,
            enable_wal: true,
        }
    }
}

impl ConfigSection for StorageConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::non_empty(&self.database_path, "storage.database_path"),
            Validator::in_range(self.max_connections, 1, 32, "storage.max_connections"),
        ])
    }

    fn section_name(&self) -> &'static str {
        "storage"
    }
}
