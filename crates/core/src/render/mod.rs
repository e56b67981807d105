//! Visual surface abstraction. The engine only pushes plain angles and
//! transforms; layout and drawing stay with the host.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Reference to the artwork printed on a record side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artwork(String);

impl Artwork {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifies an in-flight animation. The host reports completion through
/// [`crate::Phonograph::finish_animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationId(pub(crate) u64);

impl AnimationId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `0..=1` onto the eased curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Pose of the record on screen: spin around the spindle, tilt of the flip,
/// uniform scale and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordTransform {
    pub rotation: f64,
    pub flip: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for RecordTransform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            flip: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl RecordTransform {
    pub fn rotated(rotation: f64) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    pub fn interpolate(&self, to: &Self, t: f64) -> Self {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            rotation: lerp(self.rotation, to.rotation),
            flip: lerp(self.flip, to.flip),
            scale: lerp(self.scale, to.scale),
            opacity: lerp(self.opacity, to.opacity),
        }
    }
}

/// Spindle decoration matching the record's center hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterPeg {
    Spindle,
    FortyFiveAdapter,
}

pub trait VisualSurface {
    fn set_tonearm_angle(&mut self, angle: f64);
    fn animate_tonearm(&mut self, id: AnimationId, from: f64, to: f64, duration: f64, easing: Easing);
    fn set_record_transform(&mut self, transform: RecordTransform);
    fn animate_record(
        &mut self,
        id: AnimationId,
        from: RecordTransform,
        to: RecordTransform,
        duration: f64,
        easing: Easing,
    );
    fn set_record_artwork(&mut self, artwork: Option<&Artwork>);
    fn set_center_peg(&mut self, peg: CenterPeg, hole_diameter: f64);
    /// Enables the gesture that flips the record by hand.
    fn set_flipper_interaction(&mut self, enabled: bool);
    fn set_tonearm_interaction(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    Tonearm { from: f64, to: f64 },
    Record { from: RecordTransform, to: RecordTransform },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunningAnimation {
    pub id: AnimationId,
    pub kind: AnimationKind,
    pub duration: f64,
    pub elapsed: f64,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurfaceState {
    pub tonearm_angle: f64,
    pub record_transform: RecordTransform,
    pub artwork: Option<Artwork>,
    pub artwork_loads: usize,
    pub center_peg: Option<(CenterPeg, f64)>,
    pub flipper_enabled: bool,
    pub tonearm_enabled: bool,
    pub animations: Vec<RunningAnimation>,
}

impl Default for RecordingSurfaceState {
    fn default() -> Self {
        Self {
            tonearm_angle: 0.0,
            record_transform: RecordTransform::default(),
            artwork: None,
            artwork_loads: 0,
            center_peg: None,
            flipper_enabled: true,
            tonearm_enabled: true,
            animations: Vec::new(),
        }
    }
}

/// Surface that keeps the latest model values and runs animations against a
/// caller-driven clock. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    shared: Rc<RefCell<RecordingSurfaceState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, RecordingSurfaceState> {
        self.shared.borrow()
    }

    pub fn pending_animations(&self) -> Vec<AnimationId> {
        self.shared.borrow().animations.iter().map(|a| a.id).collect()
    }

    /// Advances running animations by `delta` seconds and returns the ones
    /// that completed, oldest first.
    pub fn advance(&self, delta: f64) -> Vec<AnimationId> {
        let mut state = self.shared.borrow_mut();
        let mut finished = Vec::new();
        state.animations.retain_mut(|animation| {
            animation.elapsed += delta;
            if animation.elapsed >= animation.duration {
                finished.push(animation.id);
                false
            } else {
                true
            }
        });
        finished
    }

    /// Completes every running animation at once.
    pub fn finish_all(&self) -> Vec<AnimationId> {
        let mut state = self.shared.borrow_mut();
        state.animations.drain(..).map(|a| a.id).collect()
    }

    /// Tonearm angle currently on screen, following any running sweep.
    pub fn displayed_tonearm_angle(&self) -> f64 {
        let state = self.shared.borrow();
        state
            .animations
            .iter()
            .rev()
            .find_map(|animation| match animation.kind {
                AnimationKind::Tonearm { from, to } => {
                    let t = animation.easing.apply(animation.elapsed / animation.duration);
                    Some(from + (to - from) * t)
                }
                AnimationKind::Record { .. } => None,
            })
            .unwrap_or(state.tonearm_angle)
    }
}

impl VisualSurface for RecordingSurface {
    fn set_tonearm_angle(&mut self, angle: f64) {
        self.shared.borrow_mut().tonearm_angle = angle;
    }

    fn animate_tonearm(&mut self, id: AnimationId, from: f64, to: f64, duration: f64, easing: Easing) {
        let mut state = self.shared.borrow_mut();
        state.tonearm_angle = to;
        state.animations.push(RunningAnimation {
            id,
            kind: AnimationKind::Tonearm { from, to },
            duration,
            elapsed: 0.0,
            easing,
        });
    }

    fn set_record_transform(&mut self, transform: RecordTransform) {
        self.shared.borrow_mut().record_transform = transform;
    }

    fn animate_record(
        &mut self,
        id: AnimationId,
        from: RecordTransform,
        to: RecordTransform,
        duration: f64,
        easing: Easing,
    ) {
        let mut state = self.shared.borrow_mut();
        state.record_transform = to;
        state.animations.push(RunningAnimation {
            id,
            kind: AnimationKind::Record { from, to },
            duration,
            elapsed: 0.0,
            easing,
        });
    }

    fn set_record_artwork(&mut self, artwork: Option<&Artwork>) {
        let mut state = self.shared.borrow_mut();
        state.artwork = artwork.cloned();
        if artwork.is_some() {
            state.artwork_loads += 1;
        }
    }

    fn set_center_peg(&mut self, peg: CenterPeg, hole_diameter: f64) {
        self.shared.borrow_mut().center_peg = Some((peg, hole_diameter));
    }

    fn set_flipper_interaction(&mut self, enabled: bool) {
        self.shared.borrow_mut().flipper_enabled = enabled;
    }

    fn set_tonearm_interaction(&mut self, enabled: bool) {
        self.shared.borrow_mut().tonearm_enabled = enabled;
    }
}
