//! Entitlement seam
//!
//! Ownership lives with the marketplace backend; the session resolves it
//! once when a title starts and caches the decision for the rest of the
//! session, so chapter-navigation guards stay synchronous.

use async_trait::async_trait;
use taledeck_core::{
    check_access, AccessDecision, Audiobook, AudiobookId, Result, SubscriptionStatus, UserId,
};

/// Access to the backend's entitlement data
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Whether the user has purchased the given title
    async fn is_owned(&self, user_id: UserId, audiobook_id: AudiobookId) -> Result<bool>;

    /// The user's subscription state in this deployment
    fn subscription_status(&self) -> SubscriptionStatus;
}

/// Combines the cached ownership flag with the title's own flags
pub fn resolve_access(
    audiobook: &Audiobook,
    is_owned: bool,
    status: SubscriptionStatus,
) -> AccessDecision {
    check_access(is_owned, audiobook.is_free, status.active, status.available)
}
