//! The playback engine. [`Phonograph`] owns the record queue, the tonearm
//! state machine and the collaborators, and keeps the tonearm angle, the
//! record spin and the audio clock consistent with each other.

mod drag;
mod observer;
mod sync;
mod transition;

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::audio::{AudioClock, NoisePlayer, SimulatedAudio, SimulatedNoise};
use crate::config::{clamp_volume, PhonographConfig};
use crate::geometry::{ControlPoints, Layout};
use crate::record::{Orientation, Style};
use crate::render::{CenterPeg, Easing, RecordTransform, RecordingSurface, VisualSurface};
use crate::timeline::{FrameClock, ManualFrameClock};
use crate::{PhonographError, Record, RecordQueue, Result, TonearmState};

pub use observer::PhonographObserver;
pub use transition::Completion;

use transition::{half_turn_to_zero, AfterRest, Continuation, Transitions};

/// The host-provided services the engine drives.
pub struct Collaborators {
    pub frame_clock: Box<dyn FrameClock>,
    pub audio: Box<dyn AudioClock>,
    pub noise: Box<dyn NoisePlayer>,
    pub surface: Box<dyn VisualSurface>,
}

/// In-memory collaborators for headless runs and tests. Every handle shares
/// state with the boxes returned by [`SimulatedCollaborators::collaborators`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedCollaborators {
    pub frame_clock: ManualFrameClock,
    pub audio: SimulatedAudio,
    pub noise: SimulatedNoise,
    pub surface: RecordingSurface,
}

impl SimulatedCollaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            frame_clock: Box::new(self.frame_clock.clone()),
            audio: Box::new(self.audio.clone()),
            noise: Box::new(self.noise.clone()),
            surface: Box::new(self.surface.clone()),
        }
    }
}

pub struct Phonograph {
    config: PhonographConfig,
    queue: RecordQueue,
    state: TonearmState,
    layout: Option<Layout>,
    control_points: Option<ControlPoints>,
    tonearm_angle: f64,
    record_transform: RecordTransform,
    is_assumed_buffering: bool,
    noise_playing: bool,
    audio_loaded: bool,
    transitions: Transitions,
    observer: Option<Weak<dyn PhonographObserver>>,
    frame_clock: Box<dyn FrameClock>,
    audio: Box<dyn AudioClock>,
    noise: Box<dyn NoisePlayer>,
    surface: Box<dyn VisualSurface>,
}

impl fmt::Debug for Phonograph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phonograph")
            .field("state", &self.state)
            .field("records", &self.queue.len())
            .field("tonearm_angle", &self.tonearm_angle)
            .field("is_assumed_buffering", &self.is_assumed_buffering)
            .field("animating", &self.transitions.is_animating())
            .finish()
    }
}

impl Phonograph {
    /// Wires the engine to its collaborators. Fails on an unusable config.
    pub fn new(config: PhonographConfig, collaborators: Collaborators) -> Result<Self> {
        let config = config.validate()?;
        let Collaborators {
            frame_clock,
            audio,
            noise,
            surface,
        } = collaborators;
        let mut phonograph = Self {
            config,
            queue: RecordQueue::new(),
            state: TonearmState::OnRest,
            layout: None,
            control_points: None,
            tonearm_angle: 0.0,
            record_transform: RecordTransform::default(),
            is_assumed_buffering: false,
            noise_playing: false,
            audio_loaded: false,
            transitions: Transitions::default(),
            observer: None,
            frame_clock,
            audio,
            noise,
            surface,
        };
        phonograph.noise.set_volume(phonograph.config.static_noise_volume);
        phonograph.configure_audio_session();
        phonograph.surface.set_flipper_interaction(true);
        Ok(phonograph)
    }

    /// Builds an engine wired to fresh simulated collaborators.
    pub fn simulated(config: PhonographConfig) -> Result<(Self, SimulatedCollaborators)> {
        let simulated = SimulatedCollaborators::new();
        let phonograph = Self::new(config, simulated.collaborators())?;
        Ok((phonograph, simulated))
    }

    pub fn set_observer<O: PhonographObserver + 'static>(&mut self, observer: &Rc<O>) {
        let observer: Weak<O> = Rc::downgrade(observer);
        self.observer = Some(observer);
    }

    pub fn config(&self) -> &PhonographConfig {
        &self.config
    }

    pub fn state(&self) -> TonearmState {
        self.state
    }

    pub fn queue(&self) -> &RecordQueue {
        &self.queue
    }

    pub fn current_record(&self) -> Option<&Record> {
        self.queue.current()
    }

    /// Index of the track playing on the side facing up.
    pub fn current_track(&self) -> Option<usize> {
        if !self.audio_loaded {
            return None;
        }
        self.queue
            .current()?
            .side_up()
            .track_at(self.audio.current_time())
    }

    pub fn control_points(&self) -> Option<&ControlPoints> {
        self.control_points.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Model value of the tonearm rotation. During an animated sweep this is
    /// already the destination.
    pub fn tonearm_angle(&self) -> f64 {
        self.tonearm_angle
    }

    pub fn record_transform(&self) -> RecordTransform {
        self.record_transform
    }

    pub fn is_assumed_buffering(&self) -> bool {
        self.is_assumed_buffering
    }

    pub fn is_animating(&self) -> bool {
        self.transitions.is_animating()
    }

    /// Moves the tonearm onto the vinyl track. With `at_time` the stylus is
    /// placed at that point of the side, otherwise at the audio clock's
    /// current time.
    pub fn play(
        &mut self,
        at_time: Option<f64>,
        animated: bool,
        completion: Option<Completion>,
    ) -> Result<()> {
        let Some(total) = self.queue.current().map(Record::total_duration) else {
            return Ok(());
        };
        if !self.audio_loaded {
            let error = self.refuse_without_audio();
            self.stop(false, None)?;
            return Err(error);
        }
        let time = at_time.unwrap_or_else(|| self.audio.current_time());
        let Some(points) = self.ensure_control_points() else {
            return Ok(());
        };
        let angle = points.angle_for_time(time, total);
        info!(time, angle, animated, "play requested");
        self.bring_tonearm_to_angle(
            angle,
            animated,
            Continuation::Play {
                seek_to: at_time,
                completion,
            },
        )
    }

    /// Returns the tonearm to rest.
    pub fn stop(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        self.stop_then(animated, AfterRest::Complete(completion))
    }

    fn stop_then(&mut self, animated: bool, after: AfterRest) -> Result<()> {
        let Some(zero) = self.control_points.map(|p| p.tonearm_true_zero_angle) else {
            return Ok(());
        };
        info!(animated, "stop requested");
        self.bring_tonearm_to_angle(zero, animated, Continuation::Rest(after))
    }

    /// Turns the current record over, stopping playback first if needed.
    pub fn flip(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        if self.state != TonearmState::OnRest {
            return self.stop_then(
                animated,
                AfterRest::Flip {
                    animated,
                    completion,
                },
            );
        }

        if animated {
            let edge_on = RecordTransform {
                flip: FRAC_PI_2,
                scale: self.config.animation.flip_peak_scale,
                ..self.record_transform
            };
            self.animate_record(edge_on, Easing::EaseIn, Continuation::FlipMidpoint { completion });
        } else {
            self.turn_current_record();
            if let Some(completion) = completion {
                completion();
            }
        }
        Ok(())
    }

    /// Adds `record` to the queue. Fails if its geometry cannot be solved
    /// against the current layout.
    pub fn enqueue_record(&mut self, record: Record) -> Result<()> {
        if let Some(layout) = &self.layout {
            for orientation in [Orientation::A, Orientation::B] {
                ControlPoints::solve(layout, &record.dimensions(orientation, layout))?;
            }
        }
        info!(name = record.name(), artist = record.artist(), "record enqueued");
        self.queue.enqueue(record);
        if self.queue.len() == 1 {
            self.load_current_record();
        }
        Ok(())
    }

    /// Removes the record at `index`. Removing the current record stops
    /// playback, clears the artwork and loads the record beneath it.
    pub fn dequeue_record(&mut self, index: usize) -> Result<Record> {
        if index >= self.queue.len() {
            return Err(PhonographError::Configuration(format!(
                "no record at queue index {index}"
            )));
        }
        let was_current = self.queue.is_current_index(index);
        if was_current {
            self.stop(false, None)?;
            self.surface.set_record_artwork(None);
            self.control_points = None;
        }
        let record = self.queue.remove(index)?;
        info!(name = record.name(), "record dequeued");
        if was_current {
            self.load_current_record();
        }
        Ok(record)
    }

    /// Discards the current record and brings up the one queued behind it.
    pub fn next(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        if self.queue.len() < 2 {
            return Err(PhonographError::Configuration(
                "next record was not found in the queue".into(),
            ));
        }
        if self.state != TonearmState::OnRest {
            return self.stop_then(
                animated,
                AfterRest::Next {
                    animated,
                    completion,
                },
            );
        }

        if let Some(record) = self.queue.pop_current() {
            info!(name = record.name(), "record removed for next");
        }
        self.control_points = None;

        if animated {
            let half_turn = half_turn_to_zero(self.record_transform.rotation);
            let away = RecordTransform {
                rotation: self.record_transform.rotation + half_turn,
                flip: 0.0,
                scale: self.config.animation.flip_peak_scale,
                opacity: 0.0,
            };
            self.animate_record(
                away,
                Easing::EaseIn,
                Continuation::NextMidpoint {
                    half_turn,
                    completion,
                },
            );
        } else {
            self.load_current_record();
            self.record_transform = RecordTransform::default();
            self.surface.set_record_transform(self.record_transform);
            if let Some(completion) = completion {
                completion();
            }
        }
        Ok(())
    }

    /// Applies a new layout and re-solves the geometry of the current record.
    pub fn layout_did_change(&mut self, layout: Layout) -> Result<()> {
        layout.validate()?;
        let solved = match self.queue.current() {
            Some(record) => Some(ControlPoints::solve(
                &layout,
                &record.dimensions(record.orientation(), &layout),
            )?),
            None => None,
        };
        debug!(?layout, "layout changed");
        self.layout = Some(layout);
        self.control_points = solved;
        if self.state == TonearmState::OnRest {
            self.set_tonearm_angle(layout.tonearm.rest_angle());
        }
        self.refresh_center_peg();

        if solved.is_some() && self.state == TonearmState::OnVinylTrack {
            self.play(None, false, None)?;
        }
        Ok(())
    }

    pub fn set_plays_in_background(&mut self, plays_in_background: bool) {
        self.config.plays_in_background = plays_in_background;
        self.configure_audio_session();
    }

    pub fn set_plays_when_not_active(&mut self, plays_when_not_active: bool) {
        self.config.plays_when_not_active = plays_when_not_active;
    }

    pub fn set_static_noise_volume(&mut self, volume: f32) {
        self.config.static_noise_volume = clamp_volume(volume);
        self.noise.set_volume(self.config.static_noise_volume);
    }

    pub fn set_only_plays_static_noise_when_buffering(&mut self, only_when_buffering: bool) {
        self.config.only_plays_static_noise_when_buffering = only_when_buffering;
        self.refresh_needle_noise();
    }

    /// The host stopped showing the turntable.
    pub fn host_did_detach(&mut self) -> Result<()> {
        if self.state.causes_record_to_spin() && !self.config.plays_when_not_active {
            info!("host detached, stopping playback");
            return self.stop(false, None);
        }
        Ok(())
    }

    /// The host is showing the turntable again. Re-aligns the stylus with
    /// audio that kept playing meanwhile.
    pub fn host_did_attach(&mut self) -> Result<()> {
        if self.state == TonearmState::OnVinylTrack {
            return self.play(None, false, None);
        }
        Ok(())
    }

    pub fn handle_audio_decode_error(&mut self, error: PhonographError) -> Result<()> {
        warn!(%error, "audio decode failed");
        self.report_media_error(&error);
        self.stop(true, None)
    }

    /// Another audio session took over the output.
    pub fn handle_audio_interruption(&mut self) -> Result<()> {
        info!("audio interrupted");
        self.stop(false, None)
    }

    /// The single place tonearm state changes. Effects run in a fixed order:
    /// observer, interaction, center label return, spin, audio, noise.
    pub(crate) fn set_state(&mut self, new: TonearmState) {
        let old = self.state;
        if old == new {
            return;
        }
        debug!(?old, ?new, "tonearm state change");
        self.notify(|observer| observer.tonearm_state_will_change(old, new));
        self.state = new;

        self.surface.set_flipper_interaction(new == TonearmState::OnRest);
        if new == TonearmState::OnCenterLabel {
            if let Some(zero) = self.control_points.map(|p| p.tonearm_true_zero_angle) {
                let returned = self.bring_tonearm_to_angle(
                    zero,
                    true,
                    Continuation::Rest(AfterRest::Complete(None)),
                );
                if let Err(error) = returned {
                    warn!(%error, "tonearm could not return to rest");
                }
            }
        }

        match (old.causes_record_to_spin(), new.causes_record_to_spin()) {
            (false, true) => self.frame_clock.start(self.config.frames_per_second),
            (true, false) => self.frame_clock.stop(),
            _ => {}
        }

        match (old.causes_track_to_play(), new.causes_track_to_play()) {
            (false, true) => self.start_track_audio(),
            (true, false) => self.stop_track_audio(),
            _ => {}
        }

        self.refresh_needle_noise();
    }

    pub(crate) fn set_tonearm_angle(&mut self, angle: f64) {
        self.tonearm_angle = angle;
        self.surface.set_tonearm_angle(angle);
    }

    pub(crate) fn ensure_control_points(&mut self) -> Option<&ControlPoints> {
        if self.control_points.is_none() {
            match self.solve_control_points()? {
                Ok(points) => self.control_points = Some(points),
                Err(error) => {
                    warn!(%error, "tonearm geometry could not be solved");
                    return None;
                }
            }
        }
        self.control_points.as_ref()
    }

    fn solve_control_points(&self) -> Option<Result<ControlPoints>> {
        let layout = self.layout.as_ref()?;
        let record = self.queue.current()?;
        Some(ControlPoints::solve(
            layout,
            &record.dimensions(record.orientation(), layout),
        ))
    }

    /// Flips the current record over and loads the side now facing up.
    pub(crate) fn turn_current_record(&mut self) {
        if let Some(record) = self.queue.current_mut() {
            record.flip();
            info!(name = record.name(), side = ?record.orientation(), "record flipped");
        }
        self.load_current_record();
    }

    pub(crate) fn load_current_record(&mut self) {
        let Some(record) = self.queue.current() else {
            return;
        };
        let side = record.side_up();
        let source = side.audio().clone();
        let artwork = side.artwork().clone();
        self.control_points = None;

        match self.audio.load(&source) {
            Ok(()) => {
                self.audio_loaded = true;
                debug!(source = source.as_str(), "audio loaded");
            }
            Err(error) => {
                self.audio_loaded = false;
                warn!(%error, source = source.as_str(), "audio failed to load");
                self.report_media_error(&error);
            }
        }
        self.surface.set_record_artwork(Some(&artwork));
        self.refresh_center_peg();
    }

    fn refresh_center_peg(&mut self) {
        let Some(record) = self.queue.current() else {
            return;
        };
        let peg = match record.style() {
            Style::Ep => CenterPeg::FortyFiveAdapter,
            Style::Lp | Style::Single => CenterPeg::Spindle,
        };
        let scale = self
            .layout
            .map_or(1.0, |layout| layout.record_scale(record.diameter()));
        self.surface
            .set_center_peg(peg, record.center_hole_diameter() * scale);
    }

    fn start_track_audio(&mut self) {
        let Some(total) = self.queue.current().map(Record::total_duration) else {
            return;
        };
        let Some(points) = self.control_points else {
            return;
        };
        let offset = points.time_for_angle(self.tonearm_angle, total);
        self.audio.seek(offset);
        self.audio.play();
        info!(offset, "track playing");
    }

    fn stop_track_audio(&mut self) {
        self.audio.pause();
        self.audio.seek(0.0);
        if self.is_assumed_buffering {
            self.set_assumed_buffering(false);
        }
        info!("track paused");
    }

    pub(crate) fn set_assumed_buffering(&mut self, buffering: bool) {
        self.is_assumed_buffering = buffering;
        self.notify(|observer| observer.is_assumed_buffering(buffering));
        self.refresh_needle_noise();
    }

    fn refresh_needle_noise(&mut self) {
        let wanted = if self.config.only_plays_static_noise_when_buffering {
            self.is_assumed_buffering
        } else {
            self.state.is_in_groove()
        };
        if wanted && !self.noise_playing {
            self.noise.play(true);
            self.noise_playing = true;
        } else if !wanted && self.noise_playing {
            self.noise.stop();
            self.noise_playing = false;
        }
    }

    fn configure_audio_session(&mut self) {
        if let Err(error) = self.audio.configure_session(self.config.plays_in_background) {
            warn!(%error, "audio session could not be configured");
        }
    }

    /// Moves into a zone the stylus reached on its own. A track with no
    /// audio behind it sends the tonearm back to rest instead.
    pub(crate) fn land_in(&mut self, state: TonearmState) {
        if !state.causes_track_to_play() || self.audio_loaded {
            self.set_state(state);
            return;
        }
        self.refuse_without_audio();
        if let Err(error) = self.stop(false, None) {
            warn!(%error, "tonearm could not return to rest");
        }
    }

    /// Reports that the side facing up has no playable audio.
    pub(crate) fn refuse_without_audio(&self) -> PhonographError {
        let error = PhonographError::Media("no audio loaded for the current side".into());
        warn!(%error, "playback refused");
        self.report_media_error(&error);
        error
    }

    fn report_media_error(&self, error: &PhonographError) {
        self.notify(|observer| observer.media_error(error));
    }

    fn notify(&self, deliver: impl FnOnce(&dyn PhonographObserver)) {
        if let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) {
            deliver(&*observer);
        }
    }
}

#[cfg(test)]
mod tests;
