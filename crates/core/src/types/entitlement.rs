//! Content access rules
//!
//! A single pure function decides whether a user may play a title. Owned
//! content is always accessible. Paid content that isn't owned requires a
//! purchase (handled by the storefront, not here). Free content is gated on
//! subscriptions when the deployment sells them.

use serde::{Deserialize, Serialize};

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the content may be played right now
    pub can_access: bool,
    /// Whether subscribing would unlock it
    pub needs_subscription: bool,
}

impl AccessDecision {
    /// Decision that grants playback
    pub const GRANTED: Self = Self {
        can_access: true,
        needs_subscription: false,
    };
}

/// Subscription state of the current user within this deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    /// The user currently has an active subscription
    pub active: bool,
    /// This deployment sells subscriptions at all
    pub available: bool,
}

/// Decides whether content is playable for the given entitlement inputs
///
/// Deterministic for a given 4-tuple; no side effects, no internal state.
pub fn check_access(
    is_owned: bool,
    is_free: bool,
    subscription_active: bool,
    subscription_available: bool,
) -> AccessDecision {
    if is_owned {
        return AccessDecision::GRANTED;
    }

    if !is_free {
        // Purchase required; subscribing would not help.
        return AccessDecision {
            can_access: false,
            needs_subscription: false,
        };
    }

    if !subscription_available || subscription_active {
        AccessDecision::GRANTED
    } else {
        AccessDecision {
            can_access: false,
            needs_subscription: true,
        }
    }
}
