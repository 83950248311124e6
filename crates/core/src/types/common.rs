//! Common types and utilities shared across domain models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in milliseconds since Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp for the current moment
    ///
    /// If system time is somehow before UNIX_EPOCH (should never happen),
    /// gracefully falls back to timestamp 0 instead of panicking.
    pub fn now() -> Self {
        Self(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_else(|_| std::time::Duration::from_secs(0))
                .as_millis() as i64,
        )
    }

    /// Creates a timestamp from milliseconds since Unix epoch
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as milliseconds since Unix epoch
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch
    pub fn as_seconds(&self) -> i64 {
        self.0 / 1000
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Duration in milliseconds
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration(u64);

impl Duration {
    /// Zero duration constant
    pub const ZERO: Self = Self(0);

    /// Creates a duration from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a duration from seconds
    pub const fn from_seconds(seconds: u64) -> Self {
        Self(seconds * 1000)
    }

    /// Creates a duration from minutes
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes * 60 * 1000)
    }

    /// Returns the duration in milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns the duration in seconds
    pub fn as_seconds(&self) -> u64 {
        self.0 / 1000
    }

    /// Returns the duration in fractional seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Returns true if the duration is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds another duration, saturating at the numeric limit
    pub fn saturating_add(&self, other: Duration) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts another duration, saturating at zero
    pub fn saturating_sub(&self, other: Duration) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Clamps the duration into `[ZERO, max]`
    pub fn clamp_to(&self, max: Duration) -> Self {
        Self(self.0.min(max.0))
    }

    /// Formats as H:MM:SS (always shows hours)
    pub fn as_hms(&self) -> String {
        let total_seconds = self.as_seconds();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hms())
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self(d.as_millis() as u64)
    }
}

/// Trait for types that can validate themselves
pub trait Validator {
    /// Validates the instance and returns errors if invalid
    fn validate(&self) -> Result<(), Vec<String>>;

    /// Returns true if the instance is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
