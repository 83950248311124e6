//! Playback speed

use serde::{Deserialize, Serialize};

/// Playback rate multiplier
///
/// The session accepts any positive, finite rate; the screens only offer
/// the values in [`PlaybackSpeed::PRESETS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSpeed(f32);

impl PlaybackSpeed {
    /// The speed steps offered by the player UI
    pub const PRESETS: [f32; 7] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

    /// Creates a new playback speed; rejects non-positive or non-finite rates
    pub fn new(rate: f32) -> Result<Self, String> {
        if !rate.is_finite() || rate <= 0.0 {
            Err(format!("Playback speed must be positive, got {}", rate))
        } else {
            Ok(Self(rate))
        }
    }

    /// Returns the rate value
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns true if the rate is one of the UI preset steps
    pub fn is_preset(&self) -> bool {
        Self::PRESETS.iter().any(|p| (p - self.0).abs() < 1e-6)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl std::fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.0)
    }
}
