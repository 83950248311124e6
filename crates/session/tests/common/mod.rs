//! Shared test doubles for session controller tests
//!
//! A scripted engine that records transport calls and lets tests emit
//! events, a recording progress gateway, and a canned entitlement provider.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;
use taledeck_config::PlayerConfig;
use taledeck_core::{
    AppError, Audiobook, AudiobookId, Chapter, ChapterId, ContentType, Duration, ProgressRecord,
    Result, SubscriptionStatus, UserId,
};
use taledeck_engine::{
    EngineError, EngineEvent, EngineEventKind, EngineResult, EventStamper, LoadedMedia,
    MediaResource, PlaybackEngine,
};
use taledeck_progress::ProgressGateway;
use taledeck_session::{
    EntitlementProvider, PlayRequest, SessionController, SessionHandle, SessionState,
};
use tokio::sync::{mpsc, Notify};

// ===== Engine double =====

#[derive(Default)]
struct EngineInner {
    load_calls: Vec<MediaResource>,
    play_calls: u32,
    pause_calls: u32,
    seek_calls: Vec<Duration>,
    speed_calls: Vec<f32>,
    durations: HashMap<ChapterId, Duration>,
    fail_next_load: Option<String>,
    hold_loads: bool,
    pending: Vec<Arc<Notify>>,
}

/// Scripted playback engine
///
/// Loads resolve immediately unless `hold_loads` is set, in which case each
/// load parks until the test releases it by index. Events are emitted
/// manually by the test through the `emit_*` helpers.
pub struct FakeEngine {
    tx: mpsc::UnboundedSender<EngineEvent>,
    stamper: EventStamper,
    inner: Mutex<EngineInner>,
}

impl FakeEngine {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Self {
            tx,
            stamper: EventStamper::new(),
            inner: Mutex::new(EngineInner::default()),
        });
        (engine, rx)
    }

    /// Sets the duration the engine reports for a chapter's media
    pub fn set_duration(&self, chapter_id: ChapterId, duration: Duration) {
        self.inner.lock().unwrap().durations.insert(chapter_id, duration);
    }

    /// Makes the next load fail with the given message
    pub fn fail_next_load(&self, message: &str) {
        self.inner.lock().unwrap().fail_next_load = Some(message.to_string());
    }

    /// Parks subsequent loads until released
    pub fn hold_loads(&self, hold: bool) {
        self.inner.lock().unwrap().hold_loads = hold;
    }

    /// Releases the `index`-th held load (in call order)
    pub fn release_load(&self, index: usize) {
        let pending = {
            let inner = self.inner.lock().unwrap();
            Arc::clone(&inner.pending[index])
        };
        pending.notify_one();
    }

    pub fn load_count(&self) -> usize {
        self.inner.lock().unwrap().load_calls.len()
    }

    pub fn load_calls(&self) -> Vec<MediaResource> {
        self.inner.lock().unwrap().load_calls.clone()
    }

    pub fn play_count(&self) -> u32 {
        self.inner.lock().unwrap().play_calls
    }

    pub fn pause_count(&self) -> u32 {
        self.inner.lock().unwrap().pause_calls
    }

    pub fn seeks(&self) -> Vec<Duration> {
        self.inner.lock().unwrap().seek_calls.clone()
    }

    pub fn speeds(&self) -> Vec<f32> {
        self.inner.lock().unwrap().speed_calls.clone()
    }

    // Event emission, stamped like a real adapter

    pub fn emit_position(&self, position: Duration, duration: Duration) {
        self.emit(EngineEventKind::Position { position, duration });
    }

    pub fn emit_buffering(&self, buffering: bool) {
        self.emit(EngineEventKind::Buffering(buffering));
    }

    pub fn emit_completed(&self) {
        self.emit(EngineEventKind::Completed);
    }

    pub fn emit_error(&self, message: &str) {
        self.emit(EngineEventKind::Error(message.to_string()));
    }

    fn emit(&self, kind: EngineEventKind) {
        let seq = self.stamper.stamp();
        let _ = self.tx.send(EngineEvent { seq, kind });
    }

    /// Emits an event with an explicit (typically outdated) sequence number
    pub fn emit_with_seq(&self, seq: u64, kind: EngineEventKind) {
        let _ = self.tx.send(EngineEvent { seq, kind });
    }

    pub fn watermark(&self) -> u64 {
        self.stamper.watermark()
    }
}

#[async_trait]
impl PlaybackEngine for FakeEngine {
    async fn load(&self, resource: MediaResource) -> EngineResult<LoadedMedia> {
        let (gate, loaded) = {
            let mut inner = self.inner.lock().unwrap();
            inner.load_calls.push(resource.clone());

            if let Some(message) = inner.fail_next_load.take() {
                return Err(EngineError::LoadError(message));
            }

            let gate = if inner.hold_loads {
                let notify = Arc::new(Notify::new());
                inner.pending.push(Arc::clone(&notify));
                Some(notify)
            } else {
                None
            };

            let duration = inner
                .durations
                .get(&resource.chapter_id)
                .copied()
                .unwrap_or(Duration::from_seconds(300));

            (gate, LoadedMedia { duration })
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(loaded)
    }

    fn play(&self) -> EngineResult<()> {
        self.inner.lock().unwrap().play_calls += 1;
        Ok(())
    }

    fn pause(&self) -> EngineResult<()> {
        self.inner.lock().unwrap().pause_calls += 1;
        Ok(())
    }

    fn seek(&self, position: Duration) -> EngineResult<()> {
        self.inner.lock().unwrap().seek_calls.push(position);
        Ok(())
    }

    fn set_speed(&self, rate: f32) -> EngineResult<()> {
        self.inner.lock().unwrap().speed_calls.push(rate);
        Ok(())
    }

    fn event_watermark(&self) -> u64 {
        self.stamper.watermark()
    }
}

// ===== Gateway double =====

#[derive(Default)]
struct GatewayInner {
    stored: HashMap<(UserId, AudiobookId), ProgressRecord>,
    writes: Vec<ProgressRecord>,
    fail_writes: bool,
}

/// In-memory progress gateway that records every write
#[derive(Default)]
pub struct RecordingGateway {
    inner: Mutex<GatewayInner>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds a record as if a previous session had saved it
    pub fn preload(&self, record: ProgressRecord) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .stored
            .insert((record.user_id, record.audiobook_id), record);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn writes(&self) -> Vec<ProgressRecord> {
        self.inner.lock().unwrap().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().writes.len()
    }

    pub fn last_write(&self) -> Option<ProgressRecord> {
        self.inner.lock().unwrap().writes.last().cloned()
    }
}

#[async_trait]
impl ProgressGateway for RecordingGateway {
    async fn upsert(&self, record: &ProgressRecord) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(AppError::database(
                "gateway unavailable",
                std::io::Error::new(std::io::ErrorKind::Other, "offline"),
            ));
        }
        inner
            .stored
            .insert((record.user_id, record.audiobook_id), record.clone());
        inner.writes.push(record.clone());
        Ok(())
    }

    async fn fetch(
        &self,
        user_id: UserId,
        audiobook_id: AudiobookId,
    ) -> Result<Option<ProgressRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.stored.get(&(user_id, audiobook_id)).cloned())
    }
}

// ===== Entitlement double =====

/// Entitlement provider with canned answers
pub struct StaticEntitlements {
    owned: bool,
    status: SubscriptionStatus,
}

impl StaticEntitlements {
    /// User owns everything
    pub fn owner() -> Arc<Self> {
        Arc::new(Self {
            owned: true,
            status: SubscriptionStatus::default(),
        })
    }

    /// User owns nothing; deployment has no subscriptions
    pub fn visitor() -> Arc<Self> {
        Arc::new(Self {
            owned: false,
            status: SubscriptionStatus::default(),
        })
    }

    /// User owns nothing; subscriptions exist but none is active
    pub fn subscription_required() -> Arc<Self> {
        Arc::new(Self {
            owned: false,
            status: SubscriptionStatus {
                active: false,
                available: true,
            },
        })
    }
}

#[async_trait]
impl EntitlementProvider for StaticEntitlements {
    async fn is_owned(&self, _user_id: UserId, _audiobook_id: AudiobookId) -> Result<bool> {
        Ok(self.owned)
    }

    fn subscription_status(&self) -> SubscriptionStatus {
        self.status
    }
}

// ===== Session wiring =====

/// A controller wired to fresh doubles
pub struct TestSession {
    pub handle: SessionHandle,
    pub engine: Arc<FakeEngine>,
    pub gateway: Arc<RecordingGateway>,
    pub user_id: UserId,
}

pub fn spawn_session(entitlements: Arc<StaticEntitlements>) -> TestSession {
    spawn_session_with_config(entitlements, PlayerConfig::default())
}

pub fn spawn_session_with_config(
    entitlements: Arc<StaticEntitlements>,
    config: PlayerConfig,
) -> TestSession {
    let (engine, events) = FakeEngine::new();
    let gateway = RecordingGateway::new();
    let user_id = UserId::new();

    let handle = SessionController::spawn(
        Arc::clone(&engine) as Arc<dyn PlaybackEngine>,
        events,
        Arc::clone(&gateway) as Arc<dyn ProgressGateway>,
        entitlements as Arc<dyn EntitlementProvider>,
        user_id,
        config,
    );

    TestSession {
        handle,
        engine,
        gateway,
        user_id,
    }
}

// ===== Fixtures =====

/// A three-chapter audiobook (300 s / 240 s / 180 s)
pub fn test_book() -> (Audiobook, Vec<Chapter>) {
    let audiobook = Audiobook::new("The Test Chronicles", ContentType::Book);
    let chapters = vec![
        Chapter::new("Chapter 1", Duration::from_seconds(300), "https://cdn.test/1.m4a"),
        Chapter::new("Chapter 2", Duration::from_seconds(240), "https://cdn.test/2.m4a"),
        Chapter::new("Chapter 3", Duration::from_seconds(180), "https://cdn.test/3.m4a"),
    ];
    (audiobook, chapters)
}

/// A paid book whose first chapter is a free preview
pub fn preview_book() -> (Audiobook, Vec<Chapter>) {
    let audiobook = Audiobook::new("Locked Tales", ContentType::Book);
    let chapters = vec![
        Chapter::new("Preview", Duration::from_seconds(120), "https://cdn.test/p.m4a")
            .with_preview(true),
        Chapter::new("Chapter 1", Duration::from_seconds(300), "https://cdn.test/c1.m4a"),
    ];
    (audiobook, chapters)
}

/// Teaches the fake engine the catalog durations for these chapters
pub fn register_durations(engine: &FakeEngine, chapters: &[Chapter]) {
    for chapter in chapters {
        engine.set_duration(chapter.id, chapter.duration);
    }
}

/// Convenience: a play request for chapter `index` of the fixture book
pub fn play_request(audiobook: &Audiobook, chapters: &[Chapter], index: usize) -> PlayRequest {
    PlayRequest::new(audiobook.clone(), chapters.to_vec(), index)
}

// ===== Await helpers =====

/// Waits until a state snapshot satisfies the predicate
pub async fn wait_for<F>(handle: &SessionHandle, mut predicate: F) -> SessionState
where
    F: FnMut(&SessionState) -> bool,
{
    let mut rx = handle.subscribe();
    tokio::time::timeout(StdDuration::from_secs(5), async move {
        loop {
            let state = rx.borrow_and_update().clone();
            if predicate(&state) {
                return state;
            }
            rx.changed().await.expect("session controller stopped");
        }
    })
    .await
    .expect("session state condition not reached in time")
}

/// Polls an arbitrary condition (for assertions on the doubles)
pub async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(StdDuration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(StdDuration::from_millis(2)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
