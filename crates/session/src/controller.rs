//! Playback session controller
//!
//! One tokio task owns the session state and processes everything that can
//! change it: commands from the screens, events from the engine adapter,
//! load completions, and the one-second tick that drives the sleep timer
//! and the persistence cadence. Because every mutation runs on this single
//! task, the state needs no locking; observers get snapshots over a watch
//! channel.
//!
//! Loads run as spawned tasks tagged with a resource epoch. Switching titles
//! bumps the epoch, so a load that resolves after it was superseded reports
//! into a stale epoch and is dropped. Engine events carry adapter-stamped
//! sequence numbers; the controller snapshots the adapter watermark whenever
//! it issues a load or seek and discards events stamped at or below it.

use crate::access::{resolve_access, EntitlementProvider};
use crate::command::{PlayRequest, SessionCommand};
use crate::state::SessionState;
use crate::timer::{SleepTimer, SleepTimerTick};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use taledeck_config::PlayerConfig;
use taledeck_core::{
    AccessDecision, AppError, Audiobook, Chapter, Duration, PlaybackSpeed, ProgressRecord, Result,
    UserId,
};
use taledeck_engine::{EngineEvent, EngineEventKind, MediaResource, PlaybackEngine};
use taledeck_progress::ProgressGateway;
use tokio::sync::{mpsc, watch};

/// One second, the resolution of the sleep timer and persistence cadence
const TICK: Duration = Duration::from_millis(1000);

/// Spawns session controllers
pub struct SessionController;

impl SessionController {
    /// Starts a controller task and returns the handle the screens use
    ///
    /// `engine_events` is the receiving half of the adapter's event channel
    /// (see [`taledeck_engine::EventSink::channel`]). Must be called from
    /// within a tokio runtime.
    pub fn spawn(
        engine: Arc<dyn PlaybackEngine>,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
        gateway: Arc<dyn ProgressGateway>,
        entitlements: Arc<dyn EntitlementProvider>,
        user_id: UserId,
        config: PlayerConfig,
    ) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();

        let mut state = SessionState::new();
        state.speed = PlaybackSpeed::new(config.default_speed).ok().unwrap_or_default();
        let (watch_tx, watch_rx) = watch::channel(state.clone());

        let controller = Controller {
            state,
            timer: SleepTimer::new(),
            engine,
            gateway,
            entitlements,
            user_id,
            config,
            epoch: 0,
            stale_barrier: 0,
            secs_since_persist: 0,
            watch_tx,
            internal_tx,
        };

        tokio::spawn(controller.run(command_rx, engine_events, internal_rx));

        SessionHandle {
            command_tx,
            watch_rx,
        }
    }
}

/// Cloneable handle to a running session controller
///
/// Command methods enqueue and return immediately; they only fail once the
/// controller task has shut down. Commands are applied in send order.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    watch_rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    fn send(&self, command: SessionCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| AppError::SessionClosed)
    }

    /// Starts playing a title
    pub fn play(&self, request: PlayRequest) -> Result<()> {
        self.send(SessionCommand::Play(request))
    }

    /// Flips between playing and paused; retries when in the error state
    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(SessionCommand::TogglePlayPause)
    }

    /// Moves the playhead; the target is clamped into the chapter
    pub fn seek(&self, position: Duration) -> Result<()> {
        self.send(SessionCommand::Seek(position))
    }

    /// Jumps forward by `amount`; zero amounts are ignored
    pub fn skip_forward(&self, amount: Duration) -> Result<()> {
        self.send(SessionCommand::SkipForward(amount))
    }

    /// Jumps backward by `amount`; zero amounts are ignored
    pub fn skip_backward(&self, amount: Duration) -> Result<()> {
        self.send(SessionCommand::SkipBackward(amount))
    }

    /// Moves to the next chapter if it exists and is playable
    pub fn next_chapter(&self) -> Result<()> {
        self.send(SessionCommand::NextChapter)
    }

    /// Moves to the previous chapter if there is one
    pub fn previous_chapter(&self) -> Result<()> {
        self.send(SessionCommand::PreviousChapter)
    }

    /// Jumps to the chapter at `index` if it is playable
    pub fn go_to_chapter(&self, index: usize) -> Result<()> {
        self.send(SessionCommand::GoToChapter(index))
    }

    /// Changes the playback rate
    pub fn set_speed(&self, speed: PlaybackSpeed) -> Result<()> {
        self.send(SessionCommand::SetSpeed(speed))
    }

    /// Arms a countdown sleep timer, replacing any existing timer
    pub fn set_sleep_timer(&self, minutes: u64) -> Result<()> {
        self.send(SessionCommand::SetSleepTimer { minutes })
    }

    /// Arms an end-of-chapter sleep timer, replacing any existing timer
    pub fn set_sleep_timer_end_of_chapter(&self) -> Result<()> {
        self.send(SessionCommand::SetSleepTimerEndOfChapter)
    }

    /// Disarms the sleep timer without touching playback
    pub fn cancel_sleep_timer(&self) -> Result<()> {
        self.send(SessionCommand::CancelSleepTimer)
    }

    /// Re-attempts the last play request after an error
    pub fn retry(&self) -> Result<()> {
        self.send(SessionCommand::Retry)
    }

    /// Persists progress immediately (app backgrounding hook)
    pub fn persist_now(&self) -> Result<()> {
        self.send(SessionCommand::PersistNow)
    }

    /// Tears the session down and returns to the idle state
    pub fn stop(&self) -> Result<()> {
        self.send(SessionCommand::Stop)
    }

    /// Current state snapshot
    pub fn state(&self) -> SessionState {
        self.watch_rx.borrow().clone()
    }

    /// Subscribes to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.watch_rx.clone()
    }
}

/// Completion report from a spawned load task
struct LoadFinished {
    epoch: u64,
    autoplay: bool,
    outcome: Result<LoadedSession>,
}

/// What a successful load resolved
struct LoadedSession {
    duration: Duration,
    start_position: Duration,
    is_owned: bool,
    access: AccessDecision,
}

struct Controller {
    state: SessionState,
    timer: SleepTimer,
    engine: Arc<dyn PlaybackEngine>,
    gateway: Arc<dyn ProgressGateway>,
    entitlements: Arc<dyn EntitlementProvider>,
    user_id: UserId,
    config: PlayerConfig,
    /// Identity of the current load generation; bumped on every load/stop
    epoch: u64,
    /// Engine events stamped at or below this are stale
    stale_barrier: u64,
    secs_since_persist: u64,
    watch_tx: watch::Sender<SessionState>,
    internal_tx: mpsc::UnboundedSender<LoadFinished>,
}

impl Controller {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        mut events: mpsc::UnboundedReceiver<EngineEvent>,
        mut internal: mpsc::UnboundedReceiver<LoadFinished>,
    ) {
        let mut ticker = tokio::time::interval(StdDuration::from_secs(1));
        let mut events_open = true;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    // All handles dropped: tear down.
                    None => break,
                },
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle_engine_event(event),
                    None => events_open = false,
                },
                Some(finished) = internal.recv() => self.handle_load_finished(finished),
                _ = ticker.tick() => self.handle_tick(),
            }
        }

        self.persist_on_teardown().await;
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Play(request) => self.handle_play(request),
            SessionCommand::TogglePlayPause => self.handle_toggle_play_pause(),
            SessionCommand::Seek(position) => self.handle_seek(position),
            SessionCommand::SkipForward(amount) => self.handle_skip_forward(amount),
            SessionCommand::SkipBackward(amount) => self.handle_skip_backward(amount),
            SessionCommand::NextChapter => self.handle_next_chapter(),
            SessionCommand::PreviousChapter => self.handle_previous_chapter(),
            SessionCommand::GoToChapter(index) => self.handle_go_to_chapter(index),
            SessionCommand::SetSpeed(speed) => self.handle_set_speed(speed),
            SessionCommand::SetSleepTimer { minutes } => self.handle_set_sleep_timer(minutes),
            SessionCommand::SetSleepTimerEndOfChapter => self.handle_set_sleep_timer_eoc(),
            SessionCommand::CancelSleepTimer => self.handle_cancel_sleep_timer(),
            SessionCommand::Retry => self.handle_retry(),
            SessionCommand::PersistNow => self.handle_persist_now(),
            SessionCommand::Stop => self.handle_stop(),
        }
    }

    // ===== Play and load path =====

    fn handle_play(&mut self, request: PlayRequest) {
        if request.chapters.is_empty() {
            log::error!(
                "Play request for '{}' has no chapters",
                request.audiobook.title
            );
            // Only surface the failure when nothing is playing; an active
            // session must not be killed by a malformed request.
            if self.state.audiobook.is_none() {
                self.state.has_error = true;
                self.state.error_message =
                    Some("This title has no playable chapters.".to_string());
                self.publish();
            }
            return;
        }

        let index = request.chapter_index.min(request.chapters.len() - 1);

        // Re-entrant start of the active resource is a no-op: double taps
        // and navigation-triggered replays must not restart the engine.
        if self.is_active_resource(&request.audiobook, &request.chapters[index])
            && (self.state.is_playing || self.state.is_loading)
        {
            log::debug!(
                "Ignoring duplicate play of '{}'",
                request.audiobook.title
            );
            return;
        }

        let switching_titles =
            self.state.audiobook.as_ref().map(|b| b.id) != Some(request.audiobook.id);
        if switching_titles {
            // A sleep timer belongs to the title it was set for.
            self.timer.cancel();
            self.state.sleep_timer = self.timer.mode();
        }
        let cached = if switching_titles {
            None
        } else {
            self.cached_entitlement()
        };

        self.state.audiobook = Some(request.audiobook);
        self.state.chapters = request.chapters;
        self.state.current_chapter = index;
        self.state.position = Duration::ZERO;
        self.state.session_start_position = Duration::ZERO;
        self.state.duration = self.state.chapters[index].duration;
        self.state.completed = false;

        self.start_load(request.seek_to, true, cached);
    }

    /// Kicks off an epoch-tagged load of the current chapter
    fn start_load(
        &mut self,
        seek_to: Option<Duration>,
        autoplay: bool,
        cached: Option<(bool, AccessDecision)>,
    ) {
        self.epoch += 1;
        self.stale_barrier = self.engine.event_watermark();
        self.secs_since_persist = 0;

        self.state.is_loading = true;
        self.state.is_playing = false;
        self.state.is_buffering = false;
        self.state.has_error = false;
        self.state.error_message = None;
        self.publish();

        let (Some(audiobook), Some(chapter)) = (
            self.state.audiobook.clone(),
            self.state.active_chapter().cloned(),
        ) else {
            return;
        };
        let chapter_index = self.state.current_chapter as u32;

        let engine = Arc::clone(&self.engine);
        let gateway = Arc::clone(&self.gateway);
        let entitlements = Arc::clone(&self.entitlements);
        let internal_tx = self.internal_tx.clone();
        let user_id = self.user_id;
        let epoch = self.epoch;

        tokio::spawn(async move {
            let outcome = load_session(
                engine,
                gateway,
                entitlements,
                user_id,
                audiobook,
                chapter,
                chapter_index,
                seek_to,
                cached,
            )
            .await;
            // The controller may have moved on; it checks the epoch.
            let _ = internal_tx.send(LoadFinished {
                epoch,
                autoplay,
                outcome,
            });
        });
    }

    fn handle_load_finished(&mut self, finished: LoadFinished) {
        if finished.epoch != self.epoch {
            log::trace!("Dropping load result from a superseded request");
            return;
        }

        self.state.is_loading = false;
        match finished.outcome {
            Ok(loaded) => {
                self.state.duration = loaded.duration;
                self.state.position = loaded.start_position;
                self.state.session_start_position = loaded.start_position;
                self.state.is_owned = loaded.is_owned;
                self.state.access = Some(loaded.access);

                if finished.autoplay {
                    match self.engine.play() {
                        Ok(()) => self.state.is_playing = true,
                        Err(e) => {
                            self.enter_error(AppError::engine("Failed to start playback", e));
                            return;
                        }
                    }
                }
                self.publish();
            }
            Err(e) => self.enter_error(e),
        }
    }

    // ===== Transport commands =====

    fn handle_toggle_play_pause(&mut self) {
        if self.state.has_error {
            self.handle_retry();
            return;
        }
        if self.state.audiobook.is_none() || self.state.is_loading {
            log::debug!("Ignoring play/pause toggle without a ready session");
            return;
        }

        if self.state.is_playing {
            match self.engine.pause() {
                Ok(()) => {
                    self.state.is_playing = false;
                    self.spawn_persist(self.state.completed);
                    self.publish();
                }
                Err(e) => self.enter_error(AppError::engine("Failed to pause playback", e)),
            }
        } else {
            match self.engine.play() {
                Ok(()) => {
                    self.state.is_playing = true;
                    self.state.completed = false;
                    self.publish();
                }
                Err(e) => self.enter_error(AppError::engine("Failed to resume playback", e)),
            }
        }
    }

    fn handle_seek(&mut self, position: Duration) {
        if self.state.audiobook.is_none() || self.state.is_loading {
            log::debug!("Ignoring seek without a ready session");
            return;
        }

        let target = position.clamp_to(self.state.duration);
        // Position reports emitted before this point are now meaningless.
        self.stale_barrier = self.engine.event_watermark();

        match self.engine.seek(target) {
            Ok(()) => {
                self.state.position = target;
                self.publish();
            }
            Err(e) => log::warn!("Seek to {} failed: {}", target, e),
        }
    }

    fn handle_skip_forward(&mut self, amount: Duration) {
        if amount.is_zero() {
            log::debug!("Ignoring skip forward by zero");
            return;
        }
        let target = self.state.position().saturating_add(amount);
        self.handle_seek(target);
    }

    fn handle_skip_backward(&mut self, amount: Duration) {
        if amount.is_zero() {
            log::debug!("Ignoring skip backward by zero");
            return;
        }
        let target = self.state.position().saturating_sub(amount);
        self.handle_seek(target);
    }

    fn handle_set_speed(&mut self, speed: PlaybackSpeed) {
        if self.state.audiobook.is_some() {
            if let Err(e) = self.engine.set_speed(speed.value()) {
                log::warn!("Speed change to {} failed: {}", speed, e);
                return;
            }
        }
        self.state.speed = speed;
        self.publish();
    }

    // ===== Chapter navigation =====

    fn handle_next_chapter(&mut self) {
        self.handle_go_to_chapter(self.state.current_chapter + 1);
    }

    fn handle_previous_chapter(&mut self) {
        if self.state.current_chapter == 0 {
            log::debug!("Already at the first chapter");
            return;
        }
        self.handle_go_to_chapter(self.state.current_chapter - 1);
    }

    fn handle_go_to_chapter(&mut self, index: usize) {
        if self.state.audiobook.is_none() || self.state.is_loading {
            log::debug!("Ignoring chapter navigation without a ready session");
            return;
        }
        if index == self.state.current_chapter {
            return;
        }
        // Invalid targets fail silently; the screens disable these
        // affordances before they are reachable.
        if index >= self.state.chapters.len() || !self.state.chapter_playable(index) {
            log::debug!("Ignoring navigation to unavailable chapter {}", index);
            return;
        }

        self.change_chapter(index);
    }

    /// Moves to `index`, persisting the outgoing chapter first
    fn change_chapter(&mut self, index: usize) {
        self.spawn_persist(self.chapter_finished());

        let autoplay = self.state.is_playing;
        self.state.current_chapter = index;
        self.state.position = Duration::ZERO;
        self.state.session_start_position = Duration::ZERO;
        self.state.duration = self.state.chapters[index].duration;
        self.state.completed = false;

        self.start_load(Some(Duration::ZERO), autoplay, self.cached_entitlement());
    }

    /// Whether enough of the current chapter was heard to call it finished
    fn chapter_finished(&self) -> bool {
        if self.state.duration.is_zero() {
            return false;
        }
        self.state.position().as_secs_f64()
            >= self.state.duration.as_secs_f64() * self.config.completion_threshold as f64
    }

    fn handle_chapter_completed(&mut self) {
        self.state.position = self.state.duration;

        // An armed end-of-chapter timer is terminal: pause, do not advance.
        if self.timer.take_end_of_chapter() {
            self.state.sleep_timer = self.timer.mode();
            if let Err(e) = self.engine.pause() {
                log::warn!("Pause at end of chapter failed: {}", e);
            }
            self.state.is_playing = false;
            self.spawn_persist(true);
            self.publish();
            return;
        }

        let next = self.state.current_chapter + 1;
        if next < self.state.chapters.len() && self.state.chapter_playable(next) {
            self.change_chapter(next);
        } else {
            if let Err(e) = self.engine.pause() {
                log::warn!("Pause at end of audiobook failed: {}", e);
            }
            self.state.is_playing = false;
            self.state.completed = true;
            self.spawn_persist(true);
            self.publish();
        }
    }

    // ===== Sleep timer =====

    fn handle_set_sleep_timer(&mut self, minutes: u64) {
        self.timer.set_timed(minutes);
        self.state.sleep_timer = self.timer.mode();
        self.publish();
    }

    fn handle_set_sleep_timer_eoc(&mut self) {
        self.timer.set_end_of_chapter();
        self.state.sleep_timer = self.timer.mode();
        self.publish();
    }

    fn handle_cancel_sleep_timer(&mut self) {
        self.timer.cancel();
        self.state.sleep_timer = self.timer.mode();
        self.publish();
    }

    // ===== Error handling =====

    fn handle_retry(&mut self) {
        if !self.state.has_error {
            log::debug!("Retry without an error is a no-op");
            return;
        }
        if self.state.audiobook.is_none() {
            // The error predates any active resource; just clear it.
            self.state.has_error = false;
            self.state.error_message = None;
            self.publish();
            return;
        }

        let resume = self.state.position();
        self.start_load(Some(resume), true, self.cached_entitlement());
    }

    fn enter_error(&mut self, error: AppError) {
        log::error!("{}", error);
        self.state.has_error = true;
        self.state.error_message = Some(error.user_message());
        self.state.is_playing = false;
        self.state.is_loading = false;
        self.state.is_buffering = false;
        self.publish();
    }

    // ===== Engine events =====

    fn handle_engine_event(&mut self, event: EngineEvent) {
        if event.seq <= self.stale_barrier {
            log::trace!("Dropping stale engine event (seq {})", event.seq);
            return;
        }
        if self.state.audiobook.is_none() {
            return;
        }

        match event.kind {
            EngineEventKind::Position { position, duration } => {
                // Position reports are not trusted until the load resolves.
                if self.state.is_loading {
                    log::trace!("Ignoring position report while loading");
                    return;
                }
                if !duration.is_zero() {
                    self.state.duration = duration;
                }
                self.state.position = position.clamp_to(self.state.duration);
                self.publish();
            }
            EngineEventKind::Buffering(buffering) => {
                if self.state.is_loading {
                    return;
                }
                self.state.is_buffering = buffering;
                self.publish();
            }
            EngineEventKind::Completed => {
                if self.state.is_loading {
                    return;
                }
                self.handle_chapter_completed();
            }
            EngineEventKind::Error(message) => {
                log::error!("Engine reported an error: {}", message);
                self.enter_error(AppError::EngineFailure {
                    message,
                    source: None,
                });
            }
        }
    }

    // ===== Ticks: sleep timer countdown and persistence cadence =====

    fn handle_tick(&mut self) {
        if self.timer.is_counting() {
            if self.timer.tick(TICK) == SleepTimerTick::Expired {
                log::info!("Sleep timer expired, pausing playback");
                // Force-pause, never force-play: expiring while already
                // paused only clears the timer.
                if self.state.is_playing {
                    if let Err(e) = self.engine.pause() {
                        log::warn!("Sleep timer pause failed: {}", e);
                    }
                    self.state.is_playing = false;
                    self.spawn_persist(self.state.completed);
                }
            }
            self.state.sleep_timer = self.timer.mode();
            self.publish();
        }

        if self.state.is_playing && !self.state.is_loading {
            self.secs_since_persist += 1;
            if self.secs_since_persist >= self.config.persist_interval_secs {
                self.spawn_persist(self.state.completed);
            }
        }
    }

    // ===== Persistence =====

    fn handle_persist_now(&mut self) {
        if self.state.audiobook.is_some() {
            self.spawn_persist(self.state.completed);
        }
    }

    /// Fire-and-forget progress write; failures are logged, never surfaced
    fn spawn_persist(&mut self, is_completed: bool) {
        let Some(audiobook) = &self.state.audiobook else {
            return;
        };
        let record = ProgressRecord::new(
            self.user_id,
            audiobook.id,
            self.state.current_chapter as u32,
            self.state.position(),
            is_completed,
        );
        self.secs_since_persist = 0;

        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            if let Err(e) = gateway.upsert(&record).await {
                log::warn!("Failed to persist listening progress: {}", e);
            }
        });
    }

    async fn persist_on_teardown(&self) {
        let Some(audiobook) = &self.state.audiobook else {
            return;
        };
        let record = ProgressRecord::new(
            self.user_id,
            audiobook.id,
            self.state.current_chapter as u32,
            self.state.position(),
            self.state.completed,
        );
        if let Err(e) = self.gateway.upsert(&record).await {
            log::warn!("Failed to persist progress during teardown: {}", e);
        }
    }

    // ===== Teardown =====

    fn handle_stop(&mut self) {
        if self.state.audiobook.is_some() {
            self.spawn_persist(self.state.completed);
            if let Err(e) = self.engine.pause() {
                log::debug!("Pause during teardown failed: {}", e);
            }
        }

        // Anything still in flight belongs to the torn-down session.
        self.epoch += 1;
        self.stale_barrier = self.engine.event_watermark();
        self.timer.cancel();

        let speed = self.state.speed;
        self.state = SessionState::new();
        self.state.speed = speed;
        self.publish();
    }

    // ===== Helpers =====

    fn is_active_resource(&self, audiobook: &Audiobook, chapter: &Chapter) -> bool {
        match (&self.state.audiobook, self.state.active_chapter()) {
            (Some(active), Some(current)) => {
                active.id == audiobook.id && current.id == chapter.id
            }
            _ => false,
        }
    }

    fn cached_entitlement(&self) -> Option<(bool, AccessDecision)> {
        self.state.access.map(|access| (self.state.is_owned, access))
    }

    fn publish(&self) {
        self.watch_tx.send_replace(self.state.clone());
    }
}

/// Resolves entitlement and start position, then loads the media
///
/// Runs on a spawned task so a slow backend or engine never blocks the
/// controller loop. Gateway and entitlement failures degrade (start at zero,
/// assume not owned); only an engine load failure is an error.
#[allow(clippy::too_many_arguments)]
async fn load_session(
    engine: Arc<dyn PlaybackEngine>,
    gateway: Arc<dyn ProgressGateway>,
    entitlements: Arc<dyn EntitlementProvider>,
    user_id: UserId,
    audiobook: Audiobook,
    chapter: Chapter,
    chapter_index: u32,
    seek_to: Option<Duration>,
    cached: Option<(bool, AccessDecision)>,
) -> Result<LoadedSession> {
    let (is_owned, access) = match cached {
        Some(cached) => cached,
        None => {
            let is_owned = match entitlements.is_owned(user_id, audiobook.id).await {
                Ok(owned) => owned,
                Err(e) => {
                    log::warn!("Entitlement check failed, assuming not owned: {}", e);
                    false
                }
            };
            let status = entitlements.subscription_status();
            (is_owned, resolve_access(&audiobook, is_owned, status))
        }
    };

    let start = match seek_to {
        Some(position) => position,
        None => match gateway.fetch(user_id, audiobook.id).await {
            Ok(Some(record))
                if record.chapter_index == chapter_index && !record.is_completed =>
            {
                record.position
            }
            Ok(_) => Duration::ZERO,
            Err(e) => {
                log::warn!("Could not read saved position: {}", e);
                Duration::ZERO
            }
        },
    };

    let resource = MediaResource::new(audiobook.id, chapter.id, chapter.media_url.clone());
    let loaded = engine
        .load(resource)
        .await
        .map_err(|e| AppError::engine("Failed to load media", e))?;

    let start = start.clamp_to(loaded.duration);
    if !start.is_zero() {
        if let Err(e) = engine.seek(start) {
            log::warn!("Seek to saved position failed, starting from zero: {}", e);
            return Ok(LoadedSession {
                duration: loaded.duration,
                start_position: Duration::ZERO,
                is_owned,
                access,
            });
        }
    }

    Ok(LoadedSession {
        duration: loaded.duration,
        start_position: start,
        is_owned,
        access,
    })
}
