//! Engine event stream
//!
//! Adapters push events into an unbounded channel owned by the session
//! controller. Event delivery is not ordered relative to commands the
//! controller issues, so every event carries a strictly increasing sequence
//! number; the controller compares these against watermark snapshots to
//! discard events that predate a load or seek.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use taledeck_core::Duration;
use tokio::sync::mpsc;

/// One event emitted by a playback engine adapter
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    /// Adapter-stamped sequence number, strictly increasing per adapter
    pub seq: u64,
    pub kind: EngineEventKind,
}

/// What happened inside the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEventKind {
    /// Playhead progress report
    Position {
        position: Duration,
        duration: Duration,
    },
    /// Buffering started (true) or ended (false)
    Buffering(bool),
    /// The loaded resource played to its end
    Completed,
    /// The engine failed mid-playback
    Error(String),
}

/// Monotonic sequence counter shared between an adapter and its watermark
#[derive(Debug, Default)]
pub struct EventStamper {
    next: AtomicU64,
}

impl EventStamper {
    /// Creates a stamper starting at sequence 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next sequence number
    pub fn stamp(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Sequence number of the most recently claimed stamp
    pub fn watermark(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Stamping sender adapters emit through
///
/// Bundles the event channel with the shared stamper so an adapter cannot
/// emit an unstamped event. Cloneable; clones share the same sequence.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<EngineEvent>,
    stamper: Arc<EventStamper>,
}

impl EventSink {
    /// Creates a sink and the receiver the session controller consumes
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                stamper: Arc::new(EventStamper::new()),
            },
            rx,
        )
    }

    /// Stamps and emits an event; returns the sequence it was stamped with
    ///
    /// A closed receiver is not an error for the adapter: the session has
    /// gone away and the event is simply dropped.
    pub fn emit(&self, kind: EngineEventKind) -> u64 {
        let seq = self.stamper.stamp();
        if self.tx.send(EngineEvent { seq, kind }).is_err() {
            log::trace!("Engine event {} dropped; session receiver closed", seq);
        }
        seq
    }

    /// Sequence number of the most recently emitted event
    pub fn watermark(&self) -> u64 {
        self.stamper.watermark()
    }
}
