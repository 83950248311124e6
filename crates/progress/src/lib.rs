//! Taledeck progress persistence
//!
//! On-device storage for listening progress, backed by SQLite through sqlx.
//! The session controller only sees the [`ProgressGateway`] trait; screens
//! that need the "continue listening" shelf use [`SqliteProgressStore`]
//! directly.

pub mod connection;
mod gateway;
pub mod migrations;
pub mod queries;

pub use connection::{connect, close, DatabaseConfig, DbPool};
pub use gateway::{ProgressGateway, SqliteProgressStore};
pub use migrations::{run_migrations, verify_integrity, CURRENT_VERSION};
