//! Core library for the phonograph turntable.
//!
//! The crate models a record player whose tonearm position, record spin and
//! audio playback stay in sync. Geometry and state rules are plain functions
//! over value types; the [`Phonograph`] engine drives host-provided
//! collaborators (frame clock, audio clock, noise player and visual surface)
//! through small traits so it can run headless or behind a real UI.

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod record;
pub mod render;
pub mod timeline;
pub mod tonearm;

pub use audio::{AudioClock, AudioSource, NoisePlayer, SimulatedAudio, SimulatedNoise};
pub use config::{AnimationConfig, LayoutConfig, PhonographConfig};
pub use controller::{
    Collaborators, Completion, Phonograph, PhonographObserver, SimulatedCollaborators,
};
pub use error::{PhonographError, Result};
pub use geometry::{
    ControlPoints, Layout, Point, Rect, RecordDimensions, Size, TonearmGeometry, TonearmShape,
};
pub use record::{Orientation, Record, RecordDescriptor, RecordQueue, Side, SideDescriptor, Style};
pub use render::{
    AnimationId, Artwork, CenterPeg, Easing, RecordTransform, RecordingSurface, VisualSurface,
};
pub use timeline::{FrameClock, ManualFrameClock, PlaybackClock};
pub use tonearm::{PointerEvent, PointerPhase, TonearmState};
