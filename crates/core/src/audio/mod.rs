//! Audio collaborators: the track's clock and the looping needle noise.

use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{PhonographError, PlaybackClock, Result};

/// Reference to the audio content of a record side (a path or URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioSource(String);

impl AudioSource {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Independent timeline of the record's audio. The engine treats it as the
/// ground truth for how much of the side has played.
pub trait AudioClock {
    fn load(&mut self, source: &AudioSource) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f64);
    fn current_time(&self) -> f64;
    /// Whether audio is actually advancing right now. A clock that was told
    /// to play but is starved for data reports `false`.
    fn is_playing(&self) -> bool;
    /// Chooses between a session that keeps playing in the background and an
    /// ambient one that is silenced with the host.
    fn configure_session(&mut self, _plays_in_background: bool) -> Result<()> {
        Ok(())
    }
}

/// Looping static heard while the stylus rides the record.
pub trait NoisePlayer {
    fn play(&mut self, looping: bool);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

#[derive(Debug, Default)]
pub struct SimulatedAudioState {
    pub loaded: Option<AudioSource>,
    pub requested_playing: bool,
    pub stalled: bool,
    pub clock: PlaybackClock,
    pub load_count: usize,
    pub play_count: usize,
    pub pause_count: usize,
    pub seeks: Vec<f64>,
    pub plays_in_background: Option<bool>,
    failing: HashSet<AudioSource>,
}

/// In-memory audio clock for headless runs and tests. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAudio {
    shared: Rc<RefCell<SimulatedAudioState>>,
}

impl SimulatedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, SimulatedAudioState> {
        self.shared.borrow()
    }

    /// Makes every later attempt to load `source` fail.
    pub fn fail_to_load(&self, source: AudioSource) {
        self.shared.borrow_mut().failing.insert(source);
    }

    /// Simulates starved playback: the clock stops advancing while stalled.
    pub fn set_stalled(&self, stalled: bool) {
        self.shared.borrow_mut().stalled = stalled;
    }

    /// Moves the audio timeline forward by `delta` seconds if it is playing.
    pub fn advance(&self, delta: f64) {
        let mut state = self.shared.borrow_mut();
        if state.requested_playing && !state.stalled {
            state.clock.advance(delta);
        }
    }
}

impl AudioClock for SimulatedAudio {
    fn load(&mut self, source: &AudioSource) -> Result<()> {
        let mut state = self.shared.borrow_mut();
        state.load_count += 1;
        state.requested_playing = false;
        state.clock.reset();
        if state.failing.contains(source) {
            state.loaded = None;
            return Err(PhonographError::Media(format!(
                "unable to load audio file {}",
                source.as_str()
            )));
        }
        state.loaded = Some(source.clone());
        Ok(())
    }

    fn play(&mut self) {
        let mut state = self.shared.borrow_mut();
        if state.loaded.is_some() {
            state.requested_playing = true;
            state.play_count += 1;
        }
    }

    fn pause(&mut self) {
        let mut state = self.shared.borrow_mut();
        state.requested_playing = false;
        state.pause_count += 1;
    }

    fn seek(&mut self, time: f64) {
        let mut state = self.shared.borrow_mut();
        state.clock.reset();
        state.clock.advance(time);
        state.seeks.push(time);
    }

    fn current_time(&self) -> f64 {
        self.shared.borrow().clock.time_seconds
    }

    fn is_playing(&self) -> bool {
        let state = self.shared.borrow();
        state.loaded.is_some() && state.requested_playing && !state.stalled
    }

    fn configure_session(&mut self, plays_in_background: bool) -> Result<()> {
        self.shared.borrow_mut().plays_in_background = Some(plays_in_background);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulatedNoiseState {
    pub playing: bool,
    pub looping: bool,
    pub volume: f32,
    pub play_count: usize,
    pub stop_count: usize,
}

/// In-memory needle noise player. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SimulatedNoise {
    shared: Rc<RefCell<SimulatedNoiseState>>,
}

impl SimulatedNoise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, SimulatedNoiseState> {
        self.shared.borrow()
    }
}

impl NoisePlayer for SimulatedNoise {
    fn play(&mut self, looping: bool) {
        let mut state = self.shared.borrow_mut();
        state.playing = true;
        state.looping = looping;
        state.play_count += 1;
    }

    fn stop(&mut self) {
        let mut state = self.shared.borrow_mut();
        state.playing = false;
        state.stop_count += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.shared.borrow_mut().volume = volume;
    }
}
