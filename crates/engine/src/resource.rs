//! Media resource references

use serde::{Deserialize, Serialize};
use taledeck_core::{AudiobookId, ChapterId, Duration};

/// What the engine is asked to load: one chapter of one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResource {
    pub audiobook_id: AudiobookId,
    pub chapter_id: ChapterId,
    /// Streaming or download URL resolved by the storage backend
    pub url: String,
}

impl MediaResource {
    /// Creates a new resource reference
    pub fn new(audiobook_id: AudiobookId, chapter_id: ChapterId, url: impl Into<String>) -> Self {
        Self {
            audiobook_id,
            chapter_id,
            url: url.into(),
        }
    }

    /// Returns true if this reference points at the same media as `other`
    pub fn same_media(&self, other: &MediaResource) -> bool {
        self.audiobook_id == other.audiobook_id && self.chapter_id == other.chapter_id
    }
}

/// What the engine reports once a resource is ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedMedia {
    /// Duration the engine discovered for the loaded media
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_new() {
        let resource = MediaResource::new(
            AudiobookId::new(),
            ChapterId::new(),
            "https://cdn.example.com/ch1.m4a",
        );
        assert!(resource.url.ends_with("ch1.m4a"));
    }

    #[test]
    fn test_same_media_ignores_url() {
        let audiobook_id = AudiobookId::new();
        let chapter_id = ChapterId::new();
        let a = MediaResource::new(audiobook_id, chapter_id, "https://a.example.com/x");
        let b = MediaResource::new(audiobook_id, chapter_id, "https://b.example.com/y");
        assert!(a.same_media(&b));
    }

    #[test]
    fn test_same_media_differs_by_chapter() {
        let audiobook_id = AudiobookId::new();
        let a = MediaResource::new(audiobook_id, ChapterId::new(), "u");
        let b = MediaResource::new(audiobook_id, ChapterId::new(), "u");
        assert!(!a.same_media(&b));
    }
}
