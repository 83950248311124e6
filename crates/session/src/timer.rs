//! Sleep timer state machine
//!
//! Two flavors of auto-pause: a fixed countdown and end-of-current-chapter.
//! The countdown is driven by one-second ticks from the session loop; the
//! end-of-chapter variant carries no countdown and is resolved by the
//! chapter-completion handler. At most one timer exists at a time: arming a
//! new one replaces whatever was set before.

use taledeck_core::Duration;

/// Current sleep timer setting, as exposed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepTimerMode {
    /// No auto-pause pending
    #[default]
    Off,
    /// Pause when the current chapter finishes
    EndOfChapter,
    /// Pause when the countdown reaches zero
    Timed { remaining: Duration },
}

/// Result of advancing the countdown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTimerTick {
    /// Nothing to do
    Idle,
    /// The countdown hit zero; playback must be paused now
    Expired,
}

/// Owns the sleep timer state for one session
#[derive(Debug, Default)]
pub struct SleepTimer {
    mode: SleepTimerMode,
}

impl SleepTimer {
    /// Creates a timer in the off state
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current mode
    pub fn mode(&self) -> SleepTimerMode {
        self.mode
    }

    /// Arms a fixed countdown, replacing any previous timer
    pub fn set_timed(&mut self, minutes: u64) {
        self.mode = SleepTimerMode::Timed {
            remaining: Duration::from_minutes(minutes),
        };
    }

    /// Arms the end-of-chapter trigger, replacing any previous timer
    pub fn set_end_of_chapter(&mut self) {
        self.mode = SleepTimerMode::EndOfChapter;
    }

    /// Disarms the timer; pending remaining time is discarded
    ///
    /// Cancelling only removes the pending auto-pause. It never resumes
    /// playback that is already paused.
    pub fn cancel(&mut self) {
        self.mode = SleepTimerMode::Off;
    }

    /// Returns true if a countdown is running
    pub fn is_counting(&self) -> bool {
        matches!(self.mode, SleepTimerMode::Timed { .. })
    }

    /// Consumes an armed end-of-chapter trigger
    ///
    /// Returns true exactly once per arming: the trigger resets to off as it
    /// fires, so a second chapter completion does not pause again.
    pub fn take_end_of_chapter(&mut self) -> bool {
        if self.mode == SleepTimerMode::EndOfChapter {
            self.mode = SleepTimerMode::Off;
            true
        } else {
            false
        }
    }

    /// Advances the countdown by `elapsed`
    ///
    /// Returns [`SleepTimerTick::Expired`] on the tick that reaches zero;
    /// the mode resets to off at that moment so the expiry fires only once.
    pub fn tick(&mut self, elapsed: Duration) -> SleepTimerTick {
        match self.mode {
            SleepTimerMode::Timed { remaining } => {
                let remaining = remaining.saturating_sub(elapsed);
                if remaining.is_zero() {
                    self.mode = SleepTimerMode::Off;
                    SleepTimerTick::Expired
                } else {
                    self.mode = SleepTimerMode::Timed { remaining };
                    SleepTimerTick::Idle
                }
            }
            _ => SleepTimerTick::Idle,
        }
    }
}
