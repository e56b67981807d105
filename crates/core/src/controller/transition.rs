//! Animated transitions and the work that resumes once they complete.
//!
//! An animated operation hands the surface an [`AnimationId`] and parks a
//! [`Continuation`] here. When the host reports the animation finished, the
//! continuation is taken out and run exactly once. Operations that must first
//! bring the tonearm to rest park themselves behind the stop instead of
//! recursing.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use tracing::debug;

use super::Phonograph;
use crate::render::{AnimationId, Easing, RecordTransform};
use crate::{Result, TonearmState};

/// Callback invoked once an operation has reached its final state.
pub type Completion = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnimationTarget {
    Tonearm,
    Record,
}

/// What to do once the tonearm has been brought back to rest.
pub(crate) enum AfterRest {
    Complete(Option<Completion>),
    Flip {
        animated: bool,
        completion: Option<Completion>,
    },
    Next {
        animated: bool,
        completion: Option<Completion>,
    },
}

pub(crate) enum Continuation {
    Play {
        seek_to: Option<f64>,
        completion: Option<Completion>,
    },
    Rest(AfterRest),
    FlipMidpoint {
        completion: Option<Completion>,
    },
    NextMidpoint {
        half_turn: f64,
        completion: Option<Completion>,
    },
    Finished {
        reset_rotation: bool,
        completion: Option<Completion>,
    },
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Play { .. } => "Play",
            Self::Rest(AfterRest::Complete(_)) => "Rest",
            Self::Rest(AfterRest::Flip { .. }) => "RestThenFlip",
            Self::Rest(AfterRest::Next { .. }) => "RestThenNext",
            Self::FlipMidpoint { .. } => "FlipMidpoint",
            Self::NextMidpoint { .. } => "NextMidpoint",
            Self::Finished { .. } => "Finished",
        };
        f.write_str(name)
    }
}

/// Bookkeeping for animations the surface is still running.
#[derive(Debug, Default)]
pub(crate) struct Transitions {
    next_id: u64,
    pending: BTreeMap<AnimationId, (AnimationTarget, Continuation)>,
}

impl Transitions {
    pub(crate) fn begin(&mut self, target: AnimationTarget, continuation: Continuation) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        debug!(id = id.value(), ?target, ?continuation, "animation started");
        self.pending.insert(id, (target, continuation));
        id
    }

    pub(crate) fn finish(&mut self, id: AnimationId) -> Option<(AnimationTarget, Continuation)> {
        self.pending.remove(&id)
    }

    pub(crate) fn is_animating(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn tonearm_in_flight(&self) -> bool {
        self.pending
            .values()
            .any(|(target, _)| *target == AnimationTarget::Tonearm)
    }
}

/// Rotation that, applied twice, brings the record back to zero.
pub(crate) fn half_turn_to_zero(rotation: f64) -> f64 {
    let half = (TAU - rotation.rem_euclid(TAU)) / 2.0;
    if half == 0.0 {
        std::f64::consts::PI
    } else {
        half
    }
}

impl Phonograph {
    /// Reports that the surface finished animation `id`. Unknown or already
    /// finished ids are ignored.
    pub fn finish_animation(&mut self, id: AnimationId) -> Result<()> {
        let Some((target, continuation)) = self.transitions.finish(id) else {
            return Ok(());
        };
        debug!(id = id.value(), ?target, ?continuation, "animation finished");
        if !self.transitions.is_animating() {
            self.surface.set_tonearm_interaction(true);
        }
        self.run_continuation(continuation)
    }

    pub(crate) fn bring_tonearm_to_angle(
        &mut self,
        angle: f64,
        animated: bool,
        continuation: Continuation,
    ) -> Result<()> {
        if let Some(points) = self.control_points.as_mut() {
            points.tonearm_last_touchdown_angle = None;
        }
        if !animated {
            self.set_tonearm_angle(angle);
            return self.run_continuation(continuation);
        }

        let from = self.tonearm_angle;
        let id = self.transitions.begin(AnimationTarget::Tonearm, continuation);
        self.tonearm_angle = angle;
        self.surface.set_tonearm_interaction(false);
        self.surface.animate_tonearm(
            id,
            from,
            angle,
            self.config.animation.tonearm_sweep_seconds,
            Easing::EaseInOut,
        );
        Ok(())
    }

    pub(crate) fn animate_record(
        &mut self,
        to: RecordTransform,
        easing: Easing,
        continuation: Continuation,
    ) {
        let from = self.record_transform;
        let id = self.transitions.begin(AnimationTarget::Record, continuation);
        self.record_transform = to;
        self.surface.set_tonearm_interaction(false);
        self.surface.animate_record(
            id,
            from,
            to,
            self.config.animation.flip_half_seconds,
            easing,
        );
    }

    pub(crate) fn run_continuation(&mut self, continuation: Continuation) -> Result<()> {
        match continuation {
            Continuation::Play {
                seek_to,
                completion,
            } => {
                let already_playing = self.state == TonearmState::OnVinylTrack;
                self.set_state(TonearmState::OnVinylTrack);
                if let (true, Some(time)) = (already_playing, seek_to) {
                    self.audio.seek(time);
                }
                complete(completion);
                Ok(())
            }
            Continuation::Rest(after) => {
                self.set_state(TonearmState::OnRest);
                match after {
                    AfterRest::Complete(completion) => {
                        complete(completion);
                        Ok(())
                    }
                    AfterRest::Flip {
                        animated,
                        completion,
                    } => self.flip(animated, completion),
                    AfterRest::Next {
                        animated,
                        completion,
                    } => self.next(animated, completion),
                }
            }
            Continuation::FlipMidpoint { completion } => {
                self.turn_current_record();
                let peak = self.config.animation.flip_peak_scale;
                let edge_on = RecordTransform {
                    flip: -FRAC_PI_2,
                    scale: peak,
                    ..self.record_transform
                };
                self.record_transform = edge_on;
                self.surface.set_record_transform(edge_on);
                let settled = RecordTransform {
                    flip: 0.0,
                    scale: 1.0,
                    ..edge_on
                };
                self.animate_record(
                    settled,
                    Easing::EaseOut,
                    Continuation::Finished {
                        reset_rotation: false,
                        completion,
                    },
                );
                Ok(())
            }
            Continuation::NextMidpoint {
                half_turn,
                completion,
            } => {
                self.load_current_record();
                let settled = RecordTransform {
                    rotation: self.record_transform.rotation + half_turn,
                    flip: 0.0,
                    scale: 1.0,
                    opacity: 1.0,
                };
                self.animate_record(
                    settled,
                    Easing::EaseOut,
                    Continuation::Finished {
                        reset_rotation: true,
                        completion,
                    },
                );
                Ok(())
            }
            Continuation::Finished {
                reset_rotation,
                completion,
            } => {
                if reset_rotation {
                    self.record_transform = RecordTransform::default();
                    self.surface.set_record_transform(self.record_transform);
                }
                complete(completion);
                Ok(())
            }
        }
    }
}

fn complete(completion: Option<Completion>) {
    if let Some(completion) = completion {
        completion();
    }
}
