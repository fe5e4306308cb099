//! Transport state machine.
//!
//! Mirrors the play/pause/seek/repeat/pitch/speed state of one loaded track
//! and forwards every user action to the engine. The engine owns real
//! playback; this controller owns nothing but the handle and the mirrored
//! state the display reads.

use std::fmt;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::engine::{AudioEngine, EngineEvent, LOOP_FOREVER, LOOP_NONE};
use crate::error::VarispeedError;
use crate::format::{display_pitch, display_rate, format_time};
use crate::track::Track;

/// Lower bound for pitch and rate ratios.
pub const MIN_RATIO: f64 = 0.5;

/// Upper bound for pitch and rate ratios.
pub const MAX_RATIO: f64 = 2.0;

/// Skip step used by the back/forward buttons, in seconds.
pub const SKIP_STEP_SECS: f64 = 10.0;

/// Transport states for a single-track player.
///
/// `Loading` covers the window between issuing the load command and the
/// engine reporting a duration. A finished track collapses back to `Paused`
/// at its end position; there is no separate finished state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    /// Waiting for the engine's load completion.
    #[default]
    Loading,
    /// Loaded, never started (or stopped at the end).
    Ready,
    /// Audio is actively playing.
    Playing,
    /// Playback suspended at the current position.
    Paused,
    /// The load failed; terminal for this session.
    Failed,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportState::Loading => write!(f, "Loading"),
            TransportState::Ready => write!(f, "Ready"),
            TransportState::Playing => write!(f, "Playing"),
            TransportState::Paused => write!(f, "Paused"),
            TransportState::Failed => write!(f, "Failed"),
        }
    }
}

/// Serializable snapshot of everything the control surface displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub title: String,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub playing: bool,
    pub loading: bool,
    pub repeat: bool,
    pub pitch_ratio: f64,
    pub rate_ratio: f64,
}

/// Owns the engine handle for one track and mediates every interaction
/// with it.
///
/// Created at track-load time, polled once per timer tick, and released
/// (explicitly or on drop) when the screen goes away so no engine callback
/// outlives the controller.
#[derive(Debug)]
pub struct TransportController<E: AudioEngine> {
    engine: E,
    track: Track,
    state: TransportState,
    position: f64,
    duration: f64,
    repeat: bool,
    pitch: f64,
    rate: f64,
    load_error: Option<VarispeedError>,
    released: bool,
}

impl<E: AudioEngine> TransportController<E> {
    /// Take ownership of the engine handle and start loading `track`.
    pub fn new(mut engine: E, track: Track) -> Self {
        debug!("[TRANSPORT] Loading '{}'", track.source());
        engine.load(&track);
        Self {
            engine,
            track,
            state: TransportState::Loading,
            position: 0.0,
            duration: 0.0,
            repeat: false,
            pitch: 1.0,
            rate: 1.0,
            load_error: None,
            released: false,
        }
    }

    // ========================================================================
    // Transport Controls
    // ========================================================================

    /// Flip between playing and paused.
    ///
    /// State transitions:
    /// - Ready/Paused -> Playing (one `engine.play` call)
    /// - Playing -> Paused
    /// - Loading/Failed -> no-op
    pub fn toggle_play(&mut self) {
        match self.state {
            TransportState::Ready | TransportState::Paused => {
                self.engine.play();
                self.state = TransportState::Playing;
                debug!("[TRANSPORT] Play from {:.3}s", self.position);
            }
            TransportState::Playing => {
                self.engine.pause();
                self.state = TransportState::Paused;
                debug!("[TRANSPORT] Paused at {:.3}s", self.position);
            }
            TransportState::Loading => {
                warn!("[TRANSPORT] Ignoring play toggle while loading");
            }
            TransportState::Failed => {
                warn!("[TRANSPORT] Ignoring play toggle after failed load");
            }
        }
    }

    /// Jump to an absolute position, clamped into `[0, duration]`.
    ///
    /// Does not change the play state.
    pub fn seek(&mut self, target_secs: f64) {
        let clamped = target_secs.clamp(0.0, self.duration);
        self.engine.seek(clamped);
        self.position = clamped;
        debug!("[TRANSPORT] Seek to {:.3}s", clamped);
    }

    /// Seek relative to the current position. Overshooting either end lands
    /// exactly on that boundary.
    pub fn skip(&mut self, delta_secs: f64) {
        self.seek(self.position + delta_secs);
    }

    /// Set the pitch ratio, clamped into `[0.5, 2.0]`, and forward it.
    pub fn set_pitch(&mut self, ratio: f64) {
        let clamped = ratio.clamp(MIN_RATIO, MAX_RATIO);
        self.engine.set_pitch(clamped);
        self.pitch = clamped;
    }

    /// Set the speed ratio, clamped into `[0.5, 2.0]`, and forward it.
    pub fn set_rate(&mut self, ratio: f64) {
        let clamped = ratio.clamp(MIN_RATIO, MAX_RATIO);
        self.engine.set_speed(clamped);
        self.rate = clamped;
    }

    /// Flip the repeat flag and reissue the matching loop-count instruction.
    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        self.engine.set_loop_count(self.loop_count());
        debug!("[TRANSPORT] Repeat {}", if self.repeat { "on" } else { "off" });
    }

    /// Forward a volume change in `[0.0, 1.0]`.
    pub fn set_volume(&mut self, volume: f64) {
        self.engine.set_volume(volume.clamp(0.0, 1.0));
    }

    fn loop_count(&self) -> i32 {
        if self.repeat {
            LOOP_FOREVER
        } else {
            LOOP_NONE
        }
    }

    // ========================================================================
    // Polling
    // ========================================================================

    /// One timer tick: drain engine events, then mirror the engine clock.
    ///
    /// If the engine starts reporting positions before the load completion
    /// arrives, the controller leaves `Loading` on that evidence alone and
    /// takes the duration from the engine.
    pub fn tick(&mut self) {
        if self.released {
            return;
        }

        for event in self.engine.poll_events() {
            self.handle_event(event);
        }

        if self.state == TransportState::Failed {
            return;
        }

        let reported = self.engine.position();
        if self.state == TransportState::Loading {
            if reported > 0.0 {
                self.duration = self.engine.duration();
                self.state = TransportState::Ready;
                self.position = reported.clamp(0.0, self.duration);
                debug!(
                    "[TRANSPORT] Ready via position poll, duration {:.3}s",
                    self.duration
                );
            }
        } else {
            self.position = reported.clamp(0.0, self.duration);
        }
    }

    fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Loaded { duration_secs } => {
                self.duration = duration_secs;
                self.engine.set_volume(1.0);
                self.engine.set_loop_count(self.loop_count());
                if self.state == TransportState::Loading {
                    self.state = TransportState::Ready;
                }
                debug!(
                    "[TRANSPORT] Loaded '{}', duration {:.3}s",
                    self.track.title(),
                    duration_secs
                );
            }
            EngineEvent::LoadFailed { reason } => {
                let err = VarispeedError::LoadFailed {
                    title: self.track.title().to_string(),
                    reason,
                };
                error!("[TRANSPORT] {}", err);
                self.load_error = Some(err);
                self.state = TransportState::Failed;
            }
            EngineEvent::Finished => {
                // No rewind: stay parked where the engine stopped.
                if self.state == TransportState::Playing {
                    self.state = TransportState::Paused;
                    debug!("[TRANSPORT] Finished at {:.3}s", self.position);
                }
            }
        }
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.state == TransportState::Loading
    }

    pub fn position_secs(&self) -> f64 {
        self.position
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    pub fn repeat_enabled(&self) -> bool {
        self.repeat
    }

    pub fn pitch_ratio(&self) -> f64 {
        self.pitch
    }

    pub fn rate_ratio(&self) -> f64 {
        self.rate
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The load failure, if the engine reported one.
    pub fn load_error(&self) -> Option<&VarispeedError> {
        self.load_error.as_ref()
    }

    /// Snapshot of the full display state.
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            title: self.track.title().to_string(),
            position_secs: self.position,
            duration_secs: self.duration,
            playing: self.is_playing(),
            loading: self.is_loading(),
            repeat: self.repeat,
            pitch_ratio: self.pitch,
            rate_ratio: self.rate,
        }
    }

    // ========================================================================
    // Display helpers
    // ========================================================================

    /// Elapsed/total clock line, e.g. `1:05 / 2:05`.
    pub fn time_display(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.position),
            format_time(self.duration)
        )
    }

    /// Current pitch as a semitone offset string.
    pub fn pitch_display(&self) -> String {
        display_pitch(self.pitch)
    }

    /// Current speed ratio string.
    pub fn rate_display(&self) -> String {
        display_rate(self.rate)
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Release the engine's native resource. Idempotent; also runs on drop.
    ///
    /// After release the controller ignores ticks, so no late engine
    /// callback can mutate state.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.engine.release();
        self.released = true;
        debug!("[TRANSPORT] Released '{}'", self.track.title());
    }
}

impl<E: AudioEngine> Drop for TransportController<E> {
    fn drop(&mut self) {
        self.release();
    }
}
