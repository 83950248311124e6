//! Audiobook and chapter domain models

use crate::types::{Duration, Validator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an audiobook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudiobookId(Uuid);

impl AudiobookId {
    /// Creates a new random AudiobookId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AudiobookId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the AudiobookId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for AudiobookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AudiobookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterId(Uuid);

impl ChapterId {
    /// Creates a new random ChapterId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ChapterId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the ChapterId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of content an audiobook entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Book,
    Music,
}

/// A marketplace title as seen by the playback session
///
/// This is the slice of the catalog record the player needs; storefront
/// fields (price, narrator, reviews) stay with the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audiobook {
    pub id: AudiobookId,
    pub title: String,
    pub cover_url: Option<String>,
    pub content_type: ContentType,
    pub is_free: bool,
}

impl Audiobook {
    /// Creates a new audiobook reference
    pub fn new(title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: AudiobookId::new(),
            title: title.into(),
            cover_url: None,
            content_type,
            is_free: false,
        }
    }

    /// Sets the cover art URL
    pub fn with_cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    /// Marks the title as free content
    pub fn with_free(mut self, free: bool) -> Self {
        self.is_free = free;
        self
    }
}

impl Validator for Audiobook {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One playable unit (chapter or track) within an audiobook
///
/// Playback order is the position within the chapter list handed to the
/// session; chapters do not carry their own index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub duration: Duration,
    pub is_preview: bool,
    /// Streaming URL resolved by the storage backend
    pub media_url: String,
}

impl Chapter {
    /// Creates a new chapter
    pub fn new(
        title: impl Into<String>,
        duration: Duration,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            id: ChapterId::new(),
            title: title.into(),
            duration,
            is_preview: false,
            media_url: media_url.into(),
        }
    }

    /// Marks the chapter as a free preview
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.is_preview = preview;
        self
    }
}

impl Validator for Chapter {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Chapter title cannot be empty".to_string());
        }

        if self.duration.is_zero() {
            errors.push("Chapter duration must be greater than zero".to_string());
        }

        if self.media_url.trim().is_empty() {
            errors.push("Chapter media URL cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
