//! Progress persistence gateway
//!
//! The session controller persists through this trait; the SQLite store
//! below is the on-device implementation. Server-backed implementations
//! live with the backend client, out of this workspace.

use crate::queries::progress as queries;
use crate::DbPool;
use async_trait::async_trait;
use taledeck_core::{AudiobookId, ProgressRecord, Result, UserId};

/// Read/write access to listening progress records
#[async_trait]
pub trait ProgressGateway: Send + Sync {
    /// Saves a progress record, overwriting any previous one for the pair
    async fn upsert(&self, record: &ProgressRecord) -> Result<()>;

    /// Loads the progress record for a (user, audiobook) pair, if any
    async fn fetch(
        &self,
        user_id: UserId,
        audiobook_id: AudiobookId,
    ) -> Result<Option<ProgressRecord>>;
}

/// SQLite-backed progress store
#[derive(Debug, Clone)]
pub struct SqliteProgressStore {
    pool: DbPool,
}

impl SqliteProgressStore {
    /// Creates a store over an existing connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Lists a user's most recently touched titles, newest first
    pub async fn fetch_recent(&self, user_id: UserId, limit: u32) -> Result<Vec<ProgressRecord>> {
        queries::list_recent_progress(&self.pool, user_id, limit).await
    }

    /// Removes the record for a (user, audiobook) pair
    pub async fn delete(&self, user_id: UserId, audiobook_id: AudiobookId) -> Result<()> {
        queries::delete_progress(&self.pool, user_id, audiobook_id).await
    }
}

#[async_trait]
impl ProgressGateway for SqliteProgressStore {
    async fn upsert(&self, record: &ProgressRecord) -> Result<()> {
        queries::upsert_progress(&self.pool, record).await
    }

    async fn fetch(
        &self,
        user_id: UserId,
        audiobook_id: AudiobookId,
    ) -> Result<Option<ProgressRecord>> {
        queries::get_progress(&self.pool, user_id, audiobook_id).await
    }
}
