//! Domain types for Taledeck
//!
//! This module contains all domain models organized by responsibility:
//! - `audiobook`: Audiobook and Chapter types
//! - `playback`: Playback speed
//! - `entitlement`: Content access rules
//! - `progress`: Listening progress records
//! - `common`: Shared traits and utilities

mod audiobook;
mod common;
mod entitlement;
mod playback;
mod progress;

// Re-export all public types
pub use audiobook::{Audiobook, AudiobookId, Chapter, ChapterId, ContentType};
pub use common::{Duration, Timestamp, Validator};
pub use entitlement::{check_access, AccessDecision, SubscriptionStatus};
pub use playback::PlaybackSpeed;
pub use progress::{ProgressRecord, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let t2 = Timestamp::now();
        assert!(t2 > t1);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(AudiobookId::new(), AudiobookId::new());
        assert_ne!(ChapterId::new(), ChapterId::new());
        assert_ne!(UserId::new(), UserId::new());
    }
}
