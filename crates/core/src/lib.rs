pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, Result};
pub use types::{
    AccessDecision, Audiobook, AudiobookId, Chapter, ChapterId, ContentType, Duration,
    PlaybackSpeed, ProgressRecord, SubscriptionStatus, Timestamp, UserId, Validator,
    check_access,
};
