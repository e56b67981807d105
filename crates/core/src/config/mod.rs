use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{Layout, Point, Rect, TonearmShape};
use crate::{PhonographError, Result};

/// Top-level configuration structure for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonographConfig {
    pub frames_per_second: u32,
    /// Needle noise volume on a scale of zero to one.
    pub static_noise_volume: f32,
    /// Only play needle noise while the audio is assumed to be buffering.
    pub only_plays_static_noise_when_buffering: bool,
    pub plays_in_background: bool,
    /// Keep playing after the host detaches the turntable.
    pub plays_when_not_active: bool,
    pub animation: AnimationConfig,
    pub layout: LayoutConfig,
}

impl Default for PhonographConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            static_noise_volume: 0.5,
            only_plays_static_noise_when_buffering: false,
            plays_in_background: true,
            plays_when_not_active: false,
            animation: AnimationConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl PhonographConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Rejects unusable settings and clamps the rest into range.
    pub fn validate(mut self) -> Result<Self> {
        if self.frames_per_second == 0 {
            return Err(PhonographError::Configuration(
                "frames_per_second must be greater than zero".into(),
            ));
        }
        self.static_noise_volume = clamp_volume(self.static_noise_volume);
        self.animation.validate()?;
        Ok(self)
    }
}

pub(crate) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Durations and peaks of the tonearm and record animations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub tonearm_sweep_seconds: f64,
    /// Duration of each half of a flip or record change.
    pub flip_half_seconds: f64,
    pub flip_peak_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tonearm_sweep_seconds: 1.0,
            flip_half_seconds: 0.5,
            flip_peak_scale: 1.25,
        }
    }
}

impl AnimationConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tonearm_sweep_seconds", self.tonearm_sweep_seconds),
            ("flip_half_seconds", self.flip_half_seconds),
            ("flip_peak_scale", self.flip_peak_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhonographError::Configuration(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Board layout used when the host does not supply its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub board_width: f64,
    pub board_height: f64,
    pub record_center: Point,
    /// Rendered diameter of the record.
    pub record_display_diameter: f64,
    pub tonearm_length: f64,
    pub tonearm: TonearmShape,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            board_width: 300.0,
            board_height: 300.0,
            record_center: Point::new(135.0, 165.0),
            record_display_diameter: 225.0,
            tonearm_length: 200.0,
            tonearm: TonearmShape::default(),
        }
    }
}

impl LayoutConfig {
    pub fn to_layout(&self) -> Result<Layout> {
        Layout::fit(
            Rect::new(0.0, 0.0, self.board_width, self.board_height),
            Rect::square_around(self.record_center, self.record_display_diameter),
            self.tonearm,
            self.tonearm_length,
        )
    }
}
