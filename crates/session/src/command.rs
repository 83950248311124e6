//! Commands dispatched into the session controller

use taledeck_core::{Audiobook, Chapter, Duration, PlaybackSpeed};

/// A request to start playing a title
#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub audiobook: Audiobook,
    /// Chapters in playback order; an empty list is rejected
    pub chapters: Vec<Chapter>,
    /// Requested starting chapter; clamped into range
    pub chapter_index: usize,
    /// Explicit resume offset; when absent the persisted position is used
    pub seek_to: Option<Duration>,
}

impl PlayRequest {
    /// Creates a request starting at the given chapter
    pub fn new(audiobook: Audiobook, chapters: Vec<Chapter>, chapter_index: usize) -> Self {
        Self {
            audiobook,
            chapters,
            chapter_index,
            seek_to: None,
        }
    }

    /// Sets an explicit resume offset
    pub fn with_seek_to(mut self, position: Duration) -> Self {
        self.seek_to = Some(position);
        self
    }
}

/// Commands the screens dispatch against the controller
///
/// Commands are applied strictly in the order they were sent.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    Play(PlayRequest),
    TogglePlayPause,
    Seek(Duration),
    SkipForward(Duration),
    SkipBackward(Duration),
    NextChapter,
    PreviousChapter,
    GoToChapter(usize),
    SetSpeed(PlaybackSpeed),
    SetSleepTimer { minutes: u64 },
    SetSleepTimerEndOfChapter,
    CancelSleepTimer,
    Retry,
    PersistNow,
    Stop,
}
