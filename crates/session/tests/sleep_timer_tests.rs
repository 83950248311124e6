//! Sleep timer behavior against a paused tokio clock
//!
//! The countdown runs on the controller's one-second tick. With the clock
//! paused, tests advance time explicitly; the runtime may auto-advance
//! through a handful of extra ticks while tests await state changes, so
//! assertions use comfortable margins rather than exact tick counts.

mod common;

use common::*;
use std::time::Duration as StdDuration;
use taledeck_session::{SessionStatus, SleepTimerMode};
use tokio::time::advance;

async fn playing_session() -> TestSession {
    let session = spawn_session(StaticEntitlements::owner());
    let (book, chapters) = test_book();
    register_durations(&session.engine, &chapters);
    session
        .handle
        .play(play_request(&book, &chapters, 0))
        .unwrap();
    wait_for(&session.handle, |s| s.status() == SessionStatus::Playing).await;
    session
}

#[tokio::test(start_paused = true)]
async fn test_timed_timer_pauses_playback_when_it_expires() {
    let session = playing_session().await;

    session.handle.set_sleep_timer(1).unwrap();
    wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { .. })
    })
    .await;

    advance(StdDuration::from_secs(61)).await;

    let state = wait_for(&session.handle, |s| {
        s.status() == SessionStatus::Paused && s.sleep_timer == SleepTimerMode::Off
    })
    .await;
    assert!(!state.is_playing);
    assert_eq!(session.engine.pause_count(), 1, "exactly one pause fires");
}

#[tokio::test(start_paused = true)]
async fn test_countdown_is_observable_in_state() {
    let session = playing_session().await;

    session.handle.set_sleep_timer(30).unwrap();
    wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { .. })
    })
    .await;

    advance(StdDuration::from_secs(60)).await;

    let state = wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { remaining }
            if remaining.as_seconds() <= 30 * 60 - 60)
    })
    .await;
    // Still counting, still playing.
    assert!(state.is_playing);
    assert_eq!(session.engine.pause_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_new_timer_replaces_running_countdown() {
    let session = playing_session().await;

    session.handle.set_sleep_timer(1).unwrap();
    wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { .. })
    })
    .await;

    // Shortly before the first timer would fire, arm a longer one. Wait for
    // the countdown to reflect the elapsed time first, so the burst of
    // catch-up ticks lands on the old timer rather than the replacement.
    advance(StdDuration::from_secs(50)).await;
    wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { remaining }
            if remaining.as_seconds() <= 15)
    })
    .await;
    session.handle.set_sleep_timer(2).unwrap();
    wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { remaining }
            if remaining.as_seconds() > 60)
    })
    .await;

    // Past the first timer's deadline: the replacement must not fire yet.
    advance(StdDuration::from_secs(70)).await;
    session.engine.emit_buffering(true);
    let state = wait_for(&session.handle, |s| s.is_buffering).await;
    assert!(state.is_playing, "replaced timer must not pause");
    assert_eq!(session.engine.pause_count(), 0);

    // Run the replacement out; only one pause in total.
    advance(StdDuration::from_secs(60)).await;
    wait_for(&session.handle, |s| {
        !s.is_playing && s.sleep_timer == SleepTimerMode::Off
    })
    .await;
    assert_eq!(session.engine.pause_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_removes_pending_pause() {
    let session = playing_session().await;

    session.handle.set_sleep_timer(1).unwrap();
    wait_for(&session.handle, |s| {
        matches!(s.sleep_timer, SleepTimerMode::Timed { .. })
    })
    .await;

    session.handle.cancel_sleep_timer().unwrap();
    wait_for(&session.handle, |s| s.sleep_timer == SleepTimerMode::Off).await;

    advance(StdDuration::from_secs(120)).await;
    session.engine.emit_buffering(true);
    let state = wait_for(&session.handle, |s| s.is_buffering).await;

    assert!(state.is_playing);
    assert_eq!(session.engine.pause_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_does_not_resume_paused_playback() {
    let session = playing_session().await;

    session.handle.toggle_play_pause().unwrap();
    wait_for(&session.handle, |s| s.status() == SessionStatus::Paused).await;

    session.handle.set_sleep_timer(1).unwrap();
    session.handle.cancel_sleep_timer().unwrap();
    wait_for(&session.handle, |s| s.sleep_timer == SleepTimerMode::Off).await;

    let state = session.handle.state();
    assert!(!state.is_playing, "cancel only removes the pending pause");
}

#[tokio::test(start_paused = true)]
async fn test_expiry_while_paused_only_clears_the_timer() {
    let session = playing_session().await;

    session.handle.toggle_play_pause().unwrap();
    wait_for(&session.handle, |s| s.status() == SessionStatus::Paused).await;
    assert_eq!(session.engine.pause_count(), 1);

    session.handle.set_sleep_timer(1).unwrap();
    advance(StdDuration::from_secs(61)).await;
    wait_for(&session.handle, |s| s.sleep_timer == SleepTimerMode::Off).await;

    // Force-pause never force-plays, and never pauses twice.
    let state = session.handle.state();
    assert!(!state.is_playing);
    assert_eq!(session.engine.pause_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_end_of_chapter_replaces_countdown_entirely() {
    let session = playing_session().await;

    session.handle.set_sleep_timer(1).unwrap();
    session.handle.set_sleep_timer_end_of_chapter().unwrap();
    wait_for(&session.handle, |s| {
        s.sleep_timer == SleepTimerMode::EndOfChapter
    })
    .await;

    // The old countdown is gone: nothing fires at its deadline.
    advance(StdDuration::from_secs(120)).await;
    session.engine.emit_buffering(true);
    let state = wait_for(&session.handle, |s| s.is_buffering).await;
    assert!(state.is_playing);
    assert_eq!(session.engine.pause_count(), 0);

    // The end-of-chapter trigger still resolves.
    session.engine.emit_completed();
    let state = wait_for(&session.handle, |s| !s.is_playing).await;
    assert_eq!(state.current_chapter, 0);
    assert_eq!(state.sleep_timer, SleepTimerMode::Off);
}
