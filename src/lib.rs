//! Varispeed - single-track playback transport core
//!
//! A thin state-and-event layer over an external audio engine: one bundled
//! track, elapsed/total time display, play/pause, seek, skip, repeat, pitch
//! and speed. The engine (decode, mix, pitch shift, real timing) sits behind
//! the [`engine::AudioEngine`] trait and is never reimplemented here.
//!
//! # Architecture
//!
//! - [`format`] - pure display conversions (clock strings, semitone offsets)
//! - [`track`] - bundled track reference and display title
//! - [`engine`] - the engine trait, a scripted mock, a simulated backend,
//!   and the transport controller state machine
//! - [`poll`] - cancellable periodic tick source driving position refresh

pub mod cli;
pub mod engine;
pub mod error;
pub mod format;
pub mod poll;
pub mod track;

pub use engine::{
    AudioEngine, EngineEvent, PlaybackState, TransportController, TransportState,
};
pub use error::{Result, VarispeedError};
pub use track::Track;
