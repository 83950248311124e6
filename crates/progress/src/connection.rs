//! Database connection management

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use taledeck_core::AppError;

/// Database connection pool
pub type DbPool = Pool<Sqlite>;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Enable Write-Ahead Logging (WAL) mode
    pub enable_wal: bool,
    /// Create database if it doesn't exist
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "taledeck.db".to_string(),
            max_connections: 5,
            enable_wal: true,
            create_if_missing: true,
        }
    }
}

impl DatabaseConfig {
    /// Creates a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enables or disables WAL mode
    pub fn with_wal(mut self, enable: bool) -> Self {
        self.enable_wal = enable;
        self
    }
}

/// Establishes a connection pool to the database
pub async fn connect(config: DatabaseConfig) -> Result<DbPool, AppError> {
    let mut options = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path))
        .map_err(|e| AppError::database("Invalid database path", e))?
        .create_if_missing(config.create_if_missing);

    // WAL keeps progress writes from stalling concurrent reads
    if config.enable_wal {
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database("Failed to connect to database", e))?;

    Ok(pool)
}

/// Creates an in-memory database for testing
pub async fn create_test_db() -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| AppError::database("Failed to create test database", e))?
        .journal_mode(SqliteJournalMode::Memory);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database("Failed to connect to test database", e))?;

    Ok(pool)
}

/// Closes the database connection pool
pub async fn close(pool: DbPool) {
    pool.close().await;
}
