//! Audio engine seam.
//!
//! The player never touches samples itself. Decoding, mixing, pitch shifting
//! and real playback timing all live behind [`AudioEngine`]; this crate only
//! issues commands to it and mirrors the state it reports back.

pub mod mock;
pub mod sim;
pub mod transport;

use crate::track::Track;

pub use mock::MockEngine;
pub use sim::SimEngine;
pub use transport::{PlaybackState, TransportController, TransportState};

/// Loop-count instruction for infinite repeat.
pub const LOOP_FOREVER: i32 = -1;

/// Loop-count instruction for single playthrough.
pub const LOOP_NONE: i32 = 0;

/// Asynchronous signal reported by the engine, drained once per poll tick.
///
/// The native collaborator this models delivers these as completion
/// callbacks; an engine implementation queues them instead and the
/// transport controller consumes the queue on its own tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The track finished loading and its duration is known.
    Loaded { duration_secs: f64 },
    /// The track could not be loaded. Terminal for this session.
    LoadFailed { reason: String },
    /// Playback reached the end of the track without a loop instruction.
    Finished,
}

/// Command surface of the external playback engine.
///
/// Commands are fire-and-forget: apart from load completion and the finish
/// signal (reported via [`AudioEngine::poll_events`]), every call is assumed
/// to succeed. `position` and `duration` read the engine's own clock; the
/// controller treats them as authoritative.
pub trait AudioEngine {
    /// Begin loading the bundled track. Completion arrives as an event.
    fn load(&mut self, track: &Track);

    /// Start or resume playback from the current position.
    fn play(&mut self);

    /// Pause playback, keeping the current position.
    fn pause(&mut self);

    /// Set output volume in [0.0, 1.0].
    fn set_volume(&mut self, volume: f64);

    /// Set the loop count: [`LOOP_FOREVER`] or [`LOOP_NONE`].
    fn set_loop_count(&mut self, count: i32);

    /// Total track length in seconds; 0.0 until loaded.
    fn duration(&self) -> f64;

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Jump to an absolute position in seconds.
    fn seek(&mut self, seconds: f64);

    /// Set the pitch ratio (1.0 = unmodified).
    fn set_pitch(&mut self, ratio: f64);

    /// Set the speed ratio (1.0 = unmodified).
    fn set_speed(&mut self, ratio: f64);

    /// Drain pending asynchronous signals, oldest first.
    fn poll_events(&mut self) -> Vec<EngineEvent>;

    /// Release the underlying native resource. No call is valid afterwards.
    fn release(&mut self);
}
