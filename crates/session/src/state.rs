//! Session state snapshots
//!
//! One [`SessionState`] value is owned by the session controller task;
//! screens receive read-only clones through a watch channel and render from
//! them. All mutation happens inside the controller.

use crate::timer::SleepTimerMode;
use taledeck_core::{AccessDecision, Audiobook, Chapter, Duration, PlaybackSpeed};

/// Coarse lifecycle state derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No audiobook loaded
    Idle,
    /// A play request is in flight; the resource is not ready yet
    Loading,
    /// The engine failed; a retry affordance should be shown
    Error,
    /// The whole audiobook finished playing
    Completed,
    /// The engine is stalled refilling its buffer
    Buffering,
    Playing,
    Paused,
}

/// Snapshot of everything the player screens render from
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The title currently loaded, if any
    pub audiobook: Option<Audiobook>,
    /// Chapters in playback order
    pub chapters: Vec<Chapter>,
    /// Index into `chapters`; meaningless while `chapters` is empty
    pub current_chapter: usize,
    /// Raw playhead position; read through [`SessionState::position`]
    pub(crate) position: Duration,
    /// Duration of the loaded chapter as reported by the engine
    pub duration: Duration,
    pub is_playing: bool,
    pub is_loading: bool,
    pub is_buffering: bool,
    pub has_error: bool,
    pub error_message: Option<String>,
    pub speed: PlaybackSpeed,
    pub sleep_timer: SleepTimerMode,
    /// Where this chapter started playing from; drawn as a marker in the UI
    /// and never moved mid-session
    pub session_start_position: Duration,
    /// Whether the user owns the loaded title (cached per session)
    pub is_owned: bool,
    /// Entitlement decision resolved when the session started
    pub access: Option<AccessDecision>,
    /// The final chapter has played to its end
    pub completed: bool,
}

impl SessionState {
    /// Creates the empty (idle) state
    pub fn new() -> Self {
        Self {
            audiobook: None,
            chapters: Vec::new(),
            current_chapter: 0,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            is_playing: false,
            is_loading: false,
            is_buffering: false,
            has_error: false,
            error_message: None,
            speed: PlaybackSpeed::default(),
            sleep_timer: SleepTimerMode::Off,
            session_start_position: Duration::ZERO,
            is_owned: false,
            access: None,
            completed: false,
        }
    }

    /// Playhead position, clamped into `[0, duration]`
    ///
    /// Engines may transiently report positions past the end at chapter
    /// boundaries; observers always see the clamped value.
    pub fn position(&self) -> Duration {
        self.position.clamp_to(self.duration)
    }

    /// Derives the coarse lifecycle state from the flags
    ///
    /// Error is checked before idle: a failed play request can leave the
    /// session in the error state without any resource loaded.
    pub fn status(&self) -> SessionStatus {
        if self.has_error {
            SessionStatus::Error
        } else if self.audiobook.is_none() {
            SessionStatus::Idle
        } else if self.is_loading {
            SessionStatus::Loading
        } else if self.completed {
            SessionStatus::Completed
        } else if self.is_buffering {
            SessionStatus::Buffering
        } else if self.is_playing {
            SessionStatus::Playing
        } else {
            SessionStatus::Paused
        }
    }

    /// The chapter the playhead is in, if a session is active
    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.current_chapter)
    }

    /// Whether the chapter at `index` may be played in this session
    ///
    /// Preview chapters are always playable; everything else needs the
    /// access decision cached when the session started.
    pub fn chapter_playable(&self, index: usize) -> bool {
        match self.chapters.get(index) {
            Some(chapter) => {
                chapter.is_preview || self.access.map(|a| a.can_access).unwrap_or(false)
            }
            None => false,
        }
    }

    /// True when a chapter after the current one exists
    pub fn has_next_chapter(&self) -> bool {
        !self.chapters.is_empty() && self.current_chapter + 1 < self.chapters.len()
    }

    /// Fraction of the current chapter heard so far, in `[0, 1]`
    pub fn progress_fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.position().as_secs_f64() / self.duration.as_secs_f64()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
