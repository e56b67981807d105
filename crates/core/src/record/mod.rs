//! Physical and timing description of a playable record.

pub mod queue;

use std::f64::consts::TAU;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioSource;
use crate::geometry::{Layout, RecordDimensions};
use crate::render::Artwork;
use crate::{PhonographError, Result};

pub use queue::RecordQueue;

/// Which side of the record faces up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    A,
    B,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Rotational speed of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Lp,
    Ep,
    Single,
}

impl Style {
    pub fn rotations_per_minute(self) -> f64 {
        match self {
            Self::Lp => 33.33,
            Self::Ep => 45.0,
            Self::Single => 78.0,
        }
    }

    /// Record rotation, in radians, covered by a single frame.
    pub fn angle_per_frame(self, frames_per_second: f64) -> f64 {
        self.rotations_per_minute() / 60.0 * TAU / frames_per_second
    }
}

/// Serializable description of a side, validated into a [`Side`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideDescriptor {
    pub audio: AudioSource,
    pub artwork: Artwork,
    /// Duration of each track in seconds.
    pub durations: Vec<f64>,
    pub run_out_groove_width: f64,
    /// Distance per second the stylus covers across the run-out groove.
    pub run_out_stylus_speed: f64,
}

/// Serializable description of a record, validated into a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    #[serde(default)]
    pub name: String,
    pub artist: String,
    pub side_a: SideDescriptor,
    pub side_b: SideDescriptor,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub orientation: Orientation,
    pub diameter: f64,
    pub lead_in_groove_width: f64,
    /// Distance per second the stylus covers across the lead-in groove.
    pub lead_in_stylus_speed: f64,
    pub center_label_diameter: f64,
    pub center_hole_diameter: f64,
}

impl RecordDescriptor {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// One playable face of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    audio: AudioSource,
    artwork: Artwork,
    durations: Vec<f64>,
    run_out_groove_width: f64,
    run_out_stylus_speed: f64,
}

impl Side {
    pub fn new(
        audio: AudioSource,
        artwork: Artwork,
        durations: Vec<f64>,
        run_out_groove_width: f64,
        run_out_stylus_speed: f64,
    ) -> Result<Self> {
        if durations.is_empty() {
            return Err(PhonographError::InvalidRecord(
                "a side needs at least one track duration".into(),
            ));
        }
        if let Some(bad) = durations.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(PhonographError::InvalidRecord(format!(
                "track durations must be non-negative, got {bad}"
            )));
        }
        if durations.iter().sum::<f64>() <= 0.0 {
            return Err(PhonographError::InvalidRecord(
                "a side must play for longer than zero seconds".into(),
            ));
        }
        check_groove("run-out", run_out_groove_width, run_out_stylus_speed)?;

        Ok(Self {
            audio,
            artwork,
            durations,
            run_out_groove_width,
            run_out_stylus_speed,
        })
    }

    pub fn audio(&self) -> &AudioSource {
        &self.audio
    }

    pub fn artwork(&self) -> &Artwork {
        &self.artwork
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn run_out_groove_width(&self) -> f64 {
        self.run_out_groove_width
    }

    pub fn run_out_stylus_speed(&self) -> f64 {
        self.run_out_stylus_speed
    }

    pub fn set_run_out_groove(&mut self, width: f64, stylus_speed: f64) -> Result<()> {
        check_groove("run-out", width, stylus_speed)?;
        self.run_out_groove_width = width;
        self.run_out_stylus_speed = stylus_speed;
        Ok(())
    }

    /// Sum of all track durations.
    pub fn total_duration(&self) -> f64 {
        self.durations.iter().sum()
    }

    /// Seconds the stylus needs to cross the run-out groove.
    pub fn run_out_groove_duration(&self) -> f64 {
        self.run_out_groove_width / self.run_out_stylus_speed
    }

    /// Index of the track playing `time` seconds into the side.
    pub fn track_at(&self, time: f64) -> Option<usize> {
        if !(0.0..self.total_duration()).contains(&time) {
            return None;
        }
        let mut elapsed = 0.0;
        for (index, duration) in self.durations.iter().enumerate() {
            elapsed += duration;
            if time < elapsed {
                return Some(index);
            }
        }
        None
    }
}

impl TryFrom<SideDescriptor> for Side {
    type Error = PhonographError;

    fn try_from(value: SideDescriptor) -> Result<Self> {
        Self::new(
            value.audio,
            value.artwork,
            value.durations,
            value.run_out_groove_width,
            value.run_out_stylus_speed,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    artist: String,
    side_a: Side,
    side_b: Side,
    style: Style,
    orientation: Orientation,
    diameter: f64,
    lead_in_groove_width: f64,
    lead_in_stylus_speed: f64,
    center_label_diameter: f64,
    center_hole_diameter: f64,
}

impl Record {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Turns the record over.
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    pub fn side(&self, orientation: Orientation) -> &Side {
        match orientation {
            Orientation::A => &self.side_a,
            Orientation::B => &self.side_b,
        }
    }

    pub fn side_mut(&mut self, orientation: Orientation) -> &mut Side {
        match orientation {
            Orientation::A => &mut self.side_a,
            Orientation::B => &mut self.side_b,
        }
    }

    /// The side currently facing up.
    pub fn side_up(&self) -> &Side {
        self.side(self.orientation)
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn lead_in_groove_width(&self) -> f64 {
        self.lead_in_groove_width
    }

    pub fn lead_in_stylus_speed(&self) -> f64 {
        self.lead_in_stylus_speed
    }

    pub fn set_lead_in_groove(&mut self, width: f64, stylus_speed: f64) -> Result<()> {
        check_groove("lead-in", width, stylus_speed)?;
        self.lead_in_groove_width = width;
        self.lead_in_stylus_speed = stylus_speed;
        Ok(())
    }

    /// Seconds the stylus needs to cross the lead-in groove.
    pub fn lead_in_groove_duration(&self) -> f64 {
        self.lead_in_groove_width / self.lead_in_stylus_speed
    }

    pub fn center_label_diameter(&self) -> f64 {
        self.center_label_diameter
    }

    pub fn center_hole_diameter(&self) -> f64 {
        self.center_hole_diameter
    }

    /// Total playing time of the side facing up.
    pub fn total_duration(&self) -> f64 {
        self.side_up().total_duration()
    }

    /// Groove layout of `orientation` at the scale `layout` renders it.
    pub fn dimensions(&self, orientation: Orientation, layout: &Layout) -> RecordDimensions {
        RecordDimensions {
            record_diameter: self.diameter,
            lead_in_groove_width: self.lead_in_groove_width,
            run_out_groove_width: self.side(orientation).run_out_groove_width,
            center_label_diameter: self.center_label_diameter,
            applied_scale: layout.record_scale(self.diameter),
        }
    }
}

impl TryFrom<RecordDescriptor> for Record {
    type Error = PhonographError;

    fn try_from(value: RecordDescriptor) -> Result<Self> {
        check_groove("lead-in", value.lead_in_groove_width, value.lead_in_stylus_speed)?;
        for (name, length) in [
            ("diameter", value.diameter),
            ("center label diameter", value.center_label_diameter),
            ("center hole diameter", value.center_hole_diameter),
        ] {
            if !length.is_finite() || length < 0.0 {
                return Err(PhonographError::InvalidRecord(format!(
                    "{name} must be non-negative, got {length}"
                )));
            }
        }
        if value.diameter <= value.center_label_diameter {
            return Err(PhonographError::InvalidRecord(format!(
                "diameter {} must exceed the center label diameter {}",
                value.diameter, value.center_label_diameter
            )));
        }

        Ok(Self {
            name: value.name,
            artist: value.artist,
            side_a: value.side_a.try_into()?,
            side_b: value.side_b.try_into()?,
            style: value.style,
            orientation: value.orientation,
            diameter: value.diameter,
            lead_in_groove_width: value.lead_in_groove_width,
            lead_in_stylus_speed: value.lead_in_stylus_speed,
            center_label_diameter: value.center_label_diameter,
            center_hole_diameter: value.center_hole_diameter,
        })
    }
}

fn check_groove(groove: &str, width: f64, stylus_speed: f64) -> Result<()> {
    if !width.is_finite() || width < 0.0 {
        return Err(PhonographError::InvalidRecord(format!(
            "{groove} groove width must be non-negative, got {width}"
        )));
    }
    if !stylus_speed.is_finite() || stylus_speed <= 0.0 {
        return Err(PhonographError::InvalidRecord(format!(
            "{groove} stylus speed must be positive, got {stylus_speed}"
        )));
    }
    Ok(())
}
