//! Taledeck playback session
//!
//! The controller every player surface talks to: it owns the session state,
//! mediates transport commands, advances chapters, runs the sleep timer,
//! and persists listening progress. Screens observe state snapshots and
//! dispatch commands; they never touch the engine or the database.

mod access;
mod command;
mod controller;
mod state;
mod timer;

pub use access::{resolve_access, EntitlementProvider};
pub use command::{PlayRequest, SessionCommand};
pub use controller::{SessionController, SessionHandle};
pub use state::{SessionState, SessionStatus};
pub use timer::{SleepTimer, SleepTimerMode, SleepTimerTick};

// Convenience re-exports for consumers building play requests
pub use taledeck_core::{Audiobook, Chapter, PlaybackSpeed};
