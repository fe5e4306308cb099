//! Scripted engine for tests.
//!
//! Records every command the controller issues and lets tests deliver the
//! asynchronous signals (load completion, load failure, finish) at exactly
//! the moment under test. Position is advanced by hand.

use crate::engine::{AudioEngine, EngineEvent};
use crate::track::Track;

/// Deterministic [`AudioEngine`] that records commands and replays scripted
/// events.
#[derive(Debug, Default)]
pub struct MockEngine {
    pending: Vec<EngineEvent>,
    duration: f64,
    position: f64,

    /// Source references passed to `load`.
    pub loads: Vec<String>,
    /// Number of `play` calls.
    pub play_calls: usize,
    /// Number of `pause` calls.
    pub pause_calls: usize,
    /// Volumes set, in order.
    pub volumes: Vec<f64>,
    /// Loop-count instructions, in order.
    pub loop_counts: Vec<i32>,
    /// Absolute seek targets, in order.
    pub seeks: Vec<f64>,
    /// Pitch ratios forwarded, in order.
    pub pitches: Vec<f64>,
    /// Speed ratios forwarded, in order.
    pub speeds: Vec<f64>,
    /// Number of `release` calls.
    pub release_calls: usize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful load completion reporting `duration_secs`.
    pub fn complete_load(&mut self, duration_secs: f64) {
        self.duration = duration_secs;
        self.pending.push(EngineEvent::Loaded { duration_secs });
    }

    /// Queue a load failure.
    pub fn fail_load(&mut self, reason: &str) {
        self.pending.push(EngineEvent::LoadFailed {
            reason: reason.to_string(),
        });
    }

    /// Queue the playback-finished signal, parking the clock at the end.
    pub fn finish(&mut self) {
        self.position = self.duration;
        self.pending.push(EngineEvent::Finished);
    }

    /// Move the engine clock, as real playback would between polls.
    pub fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }
}

impl AudioEngine for MockEngine {
    fn load(&mut self, track: &Track) {
        self.loads.push(track.source().to_string());
    }

    fn play(&mut self) {
        self.play_calls += 1;
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volumes.push(volume);
    }

    fn set_loop_count(&mut self, count: i32) {
        self.loop_counts.push(count);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
        self.seeks.push(seconds);
    }

    fn set_pitch(&mut self, ratio: f64) {
        self.pitches.push(ratio);
    }

    fn set_speed(&mut self, ratio: f64) {
        self.speeds.push(ratio);
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }

    fn release(&mut self) {
        self.release_calls += 1;
    }
}
