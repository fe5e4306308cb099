//! Integration Tests
//!
//! End-to-end scenarios for the playback transport: controller over the
//! scripted mock engine, and a full polled session over the simulated
//! engine.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use varispeed::engine::{MockEngine, SimEngine};
use varispeed::format::format_time;
use varispeed::poll::Ticker;
use varispeed::{PlaybackState, Track, TransportController, TransportState};

fn loaded_controller(duration: f64) -> TransportController<MockEngine> {
    let mut engine = MockEngine::new();
    engine.complete_load(duration);
    let track = Track::new("./assets/music/Popular-Potpourri.mp3").unwrap();
    let mut controller = TransportController::new(engine, track);
    controller.tick();
    controller
}

// === Scenario: load a 125-second track ===

#[test]
fn test_load_play_finish_scenario() {
    let mut controller = loaded_controller(125.0);

    assert_eq!(controller.state(), TransportState::Ready);
    assert_eq!(format_time(controller.duration_secs()), "2:05");
    assert_eq!(controller.track().title(), "Popular-Potpourri");

    controller.toggle_play();
    assert!(controller.is_playing());

    // Polling does not disturb the play state.
    controller.tick();
    assert!(controller.is_playing());

    controller.seek(120.0);
    controller.tick();
    assert_eq!(controller.time_display(), "2:00 / 2:05");
}

// === Scenario: pitch and speed adjustments ===

#[test]
fn test_pitch_scenario() {
    let mut controller = loaded_controller(125.0);

    controller.set_pitch(1.5);
    assert_eq!(controller.pitch_display(), "6.00");

    controller.set_pitch(0.6);
    assert_eq!(controller.pitch_display(), "-9.60");

    controller.set_rate(1.75);
    assert_eq!(controller.rate_display(), "1.75");
}

// === Snapshot serialization ===

#[test]
fn test_snapshot_json_round_trip() {
    let mut controller = loaded_controller(125.0);
    controller.seek(65.0);
    controller.set_pitch(0.75);
    controller.toggle_repeat();

    let json = serde_json::to_string(&controller.snapshot()).unwrap();
    let restored: PlaybackState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, controller.snapshot());
    assert_eq!(restored.title, "Popular-Potpourri");
    assert_eq!(restored.position_secs, 65.0);
    assert!(restored.repeat);
}

// === Full polled session over the simulated engine ===

#[test]
fn test_polled_session_runs_to_finish() {
    let track = Track::new("session.mp3").unwrap();
    let engine = SimEngine::new(0.05);
    let mut controller = TransportController::new(engine, track);

    let (mut ticker, ticks) = Ticker::spawn(Duration::from_millis(10)).unwrap();

    // First tick delivers the load completion.
    ticks.recv_timeout(Duration::from_secs(2)).unwrap();
    controller.tick();
    assert_eq!(controller.state(), TransportState::Ready);
    assert_eq!(controller.duration_secs(), 0.05);

    controller.toggle_play();
    assert!(controller.is_playing());

    // Poll until the 50ms track finishes.
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.is_playing() {
        assert!(Instant::now() < deadline, "track never finished");
        ticks.recv_timeout(Duration::from_secs(2)).unwrap();
        controller.tick();
    }

    assert_eq!(controller.state(), TransportState::Paused);
    assert_eq!(controller.position_secs(), 0.05);

    // Teardown: cancel the poller, then release the engine. No tick or
    // engine callback is observable afterwards.
    ticker.cancel();
    while ticks.try_recv().is_ok() {}
    assert!(ticks.try_recv().is_err());
    controller.release();
}

#[test]
fn test_polled_session_repeat_keeps_playing() {
    let track = Track::new("looper.mp3").unwrap();
    let engine = SimEngine::new(0.05);
    let mut controller = TransportController::new(engine, track);

    let (_ticker, ticks) = Ticker::spawn(Duration::from_millis(10)).unwrap();

    ticks.recv_timeout(Duration::from_secs(2)).unwrap();
    controller.tick();

    controller.toggle_repeat();
    controller.toggle_play();

    // Several track lengths later the loop instruction keeps it playing.
    for _ in 0..10 {
        ticks.recv_timeout(Duration::from_secs(2)).unwrap();
        controller.tick();
        assert!(controller.is_playing());
        assert!(controller.position_secs() <= controller.duration_secs());
    }
}

// === Load failure surfaces as a terminal state ===

#[test]
fn test_failed_load_scenario() {
    let mut engine = MockEngine::new();
    engine.fail_load("bundled resource missing");
    let track = Track::new("gone.mp3").unwrap();
    let mut controller = TransportController::new(engine, track);
    controller.tick();

    assert_eq!(controller.state(), TransportState::Failed);
    let err = controller.load_error().unwrap();
    assert_eq!(err.error_code(), "LOAD_FAILED");
    assert_eq!(
        err.to_string(),
        "failed to load track 'gone': bundled resource missing"
    );

    // Controls stay inert; teardown still works.
    controller.toggle_play();
    assert!(!controller.is_playing());
    controller.release();
}
