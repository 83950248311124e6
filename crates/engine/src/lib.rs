//! Playback engine adapter contract for Taledeck
//!
//! The real audio engine lives outside this workspace (a platform player or
//! streaming library). This crate defines the seam the session controller
//! talks through: a command surface, an event stream with sequence-stamped
//! events, and the resource reference the engine loads.

mod error;
mod events;
mod resource;

use async_trait::async_trait;
use taledeck_core::Duration;

pub use error::{EngineError, EngineResult};
pub use events::{EngineEvent, EngineEventKind, EventSink, EventStamper};
pub use resource::{LoadedMedia, MediaResource};

/// Contract every playback engine adapter implements
///
/// `load` performs the only long-running operation; the transport commands
/// are dispatches against an already-loaded resource and return as soon as
/// the underlying player has accepted them. Outcomes of transport commands
/// (position movement, buffering, completion, failure) arrive asynchronously
/// on the adapter's event stream.
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    /// Opens the resource and prepares it for playback
    ///
    /// Resolves once the media is ready to play; the adapter reports the
    /// media duration it discovered. Events for the new resource are only
    /// emitted after `load` resolves.
    async fn load(&self, resource: MediaResource) -> EngineResult<LoadedMedia>;

    /// Starts or resumes playback of the loaded resource
    fn play(&self) -> EngineResult<()>;

    /// Pauses playback, keeping the resource loaded
    fn pause(&self) -> EngineResult<()>;

    /// Moves the playhead to the given position
    fn seek(&self, position: Duration) -> EngineResult<()>;

    /// Sets the playback rate multiplier
    fn set_speed(&self, rate: f32) -> EngineResult<()>;

    /// Sequence number of the most recently emitted event
    ///
    /// Callers snapshot this when issuing a command that invalidates
    /// previously emitted events (load, seek); any event stamped at or below
    /// the snapshot predates the command and can be discarded as stale.
    fn event_watermark(&self) -> u64;
}
