//! Wall-clock simulated engine.
//!
//! Stands in for the native playback library in the demo binary: it keeps a
//! real-time clock that advances at the configured speed ratio while
//! "playing", wraps around under an infinite loop instruction, and parks at
//! the end otherwise. No audio is produced.

use std::time::Instant;

use log::debug;

use crate::engine::{AudioEngine, EngineEvent, LOOP_FOREVER};
use crate::track::Track;

/// Simulated [`AudioEngine`] driven by the system clock.
#[derive(Debug)]
pub struct SimEngine {
    track_duration: f64,
    pending: Vec<EngineEvent>,
    loaded: bool,
    playing: bool,
    rate: f64,
    pitch: f64,
    volume: f64,
    loop_count: i32,
    // Position is anchored at the last state change and extrapolated from
    // the wall clock while playing.
    anchor_position: f64,
    anchor_instant: Instant,
}

impl SimEngine {
    /// Create a simulated engine whose bundled "track" runs for
    /// `track_duration` seconds.
    pub fn new(track_duration: f64) -> Self {
        Self {
            track_duration: track_duration.max(0.0),
            pending: Vec::new(),
            loaded: false,
            playing: false,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            loop_count: 0,
            anchor_position: 0.0,
            anchor_instant: Instant::now(),
        }
    }

    fn extrapolated(&self) -> f64 {
        if !self.playing {
            return self.anchor_position;
        }
        let elapsed = self.anchor_instant.elapsed().as_secs_f64();
        let raw = self.anchor_position + elapsed * self.rate;
        if self.loop_count == LOOP_FOREVER && self.track_duration > 0.0 {
            raw % self.track_duration
        } else {
            raw.min(self.track_duration)
        }
    }

    fn rebase(&mut self) {
        self.anchor_position = self.extrapolated();
        self.anchor_instant = Instant::now();
    }
}

impl AudioEngine for SimEngine {
    fn load(&mut self, track: &Track) {
        debug!("sim: loading '{}'", track.source());
        self.loaded = true;
        self.pending.push(EngineEvent::Loaded {
            duration_secs: self.track_duration,
        });
    }

    fn play(&mut self) {
        if !self.loaded || self.playing {
            return;
        }
        self.anchor_instant = Instant::now();
        self.playing = true;
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.rebase();
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_loop_count(&mut self, count: i32) {
        self.rebase();
        self.loop_count = count;
    }

    fn duration(&self) -> f64 {
        if self.loaded {
            self.track_duration
        } else {
            0.0
        }
    }

    fn position(&self) -> f64 {
        self.extrapolated()
    }

    fn seek(&mut self, seconds: f64) {
        self.anchor_position = seconds.clamp(0.0, self.track_duration);
        self.anchor_instant = Instant::now();
    }

    fn set_pitch(&mut self, ratio: f64) {
        // Pitch shifting has no effect on the simulated clock.
        self.pitch = ratio;
    }

    fn set_speed(&mut self, ratio: f64) {
        self.rebase();
        self.rate = ratio;
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        if self.playing
            && self.loop_count != LOOP_FOREVER
            && self.extrapolated() >= self.track_duration
        {
            self.playing = false;
            self.anchor_position = self.track_duration;
            self.pending.push(EngineEvent::Finished);
        }
        std::mem::take(&mut self.pending)
    }

    fn release(&mut self) {
        self.loaded = false;
        self.playing = false;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn loaded_engine(duration: f64) -> SimEngine {
        let mut engine = SimEngine::new(duration);
        let track = Track::new("sim.mp3").unwrap();
        engine.load(&track);
        engine.poll_events();
        engine
    }

    #[test]
    fn test_load_reports_duration() {
        let mut engine = SimEngine::new(125.0);
        let track = Track::new("sim.mp3").unwrap();
        engine.load(&track);
        assert_eq!(
            engine.poll_events(),
            vec![EngineEvent::Loaded {
                duration_secs: 125.0
            }]
        );
        assert_eq!(engine.duration(), 125.0);
    }

    #[test]
    fn test_position_advances_while_playing() {
        let mut engine = loaded_engine(60.0);
        engine.play();
        sleep(Duration::from_millis(30));
        assert!(engine.position() > 0.0);

        engine.pause();
        let frozen = engine.position();
        sleep(Duration::from_millis(20));
        assert_eq!(engine.position(), frozen);
    }

    #[test]
    fn test_finishes_without_loop() {
        let mut engine = loaded_engine(0.02);
        engine.play();
        sleep(Duration::from_millis(60));
        let events = engine.poll_events();
        assert_eq!(events, vec![EngineEvent::Finished]);
        assert_eq!(engine.position(), 0.02);
    }

    #[test]
    fn test_loops_forever_instead_of_finishing() {
        let mut engine = loaded_engine(0.02);
        engine.set_loop_count(LOOP_FOREVER);
        engine.play();
        sleep(Duration::from_millis(60));
        assert!(engine.poll_events().is_empty());
        assert!(engine.position() < 0.02);
    }

    #[test]
    fn test_seek_clamps_to_track() {
        let mut engine = loaded_engine(30.0);
        engine.seek(100.0);
        assert_eq!(engine.position(), 30.0);
        engine.seek(-5.0);
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn test_play_before_load_ignored() {
        let mut engine = SimEngine::new(30.0);
        engine.play();
        sleep(Duration::from_millis(20));
        assert_eq!(engine.position(), 0.0);
    }
}
