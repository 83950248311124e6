//! Player configuration section

use crate::validation::{ConfigSection, Validator};
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Player preferences and session behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Default playback speed
    pub default_speed: f32,

    /// Seconds jumped by the skip-forward control
    pub skip_forward_secs: u64,

    /// Seconds jumped by the skip-backward control
    pub skip_backward_secs: u64,

    /// How often listening progress is saved while playing, in seconds
    pub persist_interval_secs: u64,

    /// Fraction of a chapter that must be heard for it to count as finished
    pub completion_threshold: f32,

    /// Whether this deployment sells subscriptions
    pub subscriptions_available: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_speed: 1.0,
            skip_forward_secs: 30,
            skip_backward_secs: 15,
            persist_interval_secs: 20,
            completion_threshold: 0.95,
            subscriptions_available: false,
        }
    }
}

impl ConfigSection for PlayerConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::in_range(self.default_speed, 0.25, 4.0, "player.default_speed"),
            Validator::in_range(self.skip_forward_secs, 1, 300, "player.skip_forward_secs"),
            Validator::in_range(self.skip_backward_secs, 1, 300, "player.skip_backward_secs"),
            Validator::in_range(
                self.persist_interval_secs,
                5,
                120,
                "player.persist_interval_secs",
            ),
            Validator::in_range(
                self.completion_threshold,
                0.5,
                1.0,
                "player.completion_threshold",
            ),
        ])
    }

    fn section_name(&self) -> &'static str {
        "player"
    }
}
