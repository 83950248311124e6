//! Listening progress records

use crate::types::{AudiobookId, Duration, Timestamp, Validator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random UserId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the UserId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a user last left off within an audiobook
///
/// One record per (user, audiobook); the chapter index and position inside
/// that chapter are overwritten on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub audiobook_id: AudiobookId,
    pub chapter_index: u32,
    pub position: Duration,
    pub is_completed: bool,
    pub updated_at: Timestamp,
}

impl ProgressRecord {
    /// Creates a progress record stamped with the current time
    pub fn new(
        user_id: UserId,
        audiobook_id: AudiobookId,
        chapter_index: u32,
        position: Duration,
        is_completed: bool,
    ) -> Self {
        Self {
            user_id,
            audiobook_id,
            chapter_index,
            position,
            is_completed,
            updated_at: Timestamp::now(),
        }
    }
}

impl Validator for ProgressRecord {
    fn validate(&self) -> Result<(), Vec<String>> {
        // Position and chapter index are clamped by the session before a
        // record is built; nothing here can be structurally invalid.
        Ok(())
    }
}
