//! Tonearm states and the rules that map angles onto them.

use serde::{Deserialize, Serialize};

use crate::geometry::{ControlPoints, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TonearmState {
    #[default]
    OnRest,
    NotOnRecord,
    UserHolding,
    OnLeadInGroove,
    OnVinylTrack,
    OnRunOutGroove,
    OnCenterLabel,
}

impl TonearmState {
    pub const ALL: [TonearmState; 7] = [
        Self::OnRest,
        Self::NotOnRecord,
        Self::UserHolding,
        Self::OnLeadInGroove,
        Self::OnVinylTrack,
        Self::OnRunOutGroove,
        Self::OnCenterLabel,
    ];

    pub fn causes_record_to_spin(self) -> bool {
        !matches!(self, Self::OnRest | Self::OnCenterLabel)
    }

    pub fn causes_track_to_play(self) -> bool {
        matches!(self, Self::OnVinylTrack)
    }

    /// Whether the stylus is riding one of the record's grooves.
    pub fn is_in_groove(self) -> bool {
        matches!(
            self,
            Self::OnLeadInGroove | Self::OnVinylTrack | Self::OnRunOutGroove
        )
    }

    /// The state the stylus drifts into once it reaches the inner edge of
    /// its current zone.
    pub fn next_zone(self) -> Option<Self> {
        match self {
            Self::OnLeadInGroove => Some(Self::OnVinylTrack),
            Self::OnVinylTrack => Some(Self::OnRunOutGroove),
            Self::OnRunOutGroove => Some(Self::OnCenterLabel),
            _ => None,
        }
    }

    /// Outer and inner edge of the zone this state rides, if any.
    pub fn zone_bounds(self, points: &ControlPoints) -> Option<(f64, f64)> {
        match self {
            Self::OnLeadInGroove => Some((
                points.lead_in_groove_start_angle,
                points.lead_in_groove_end_angle,
            )),
            Self::OnVinylTrack => Some((points.vinyl_track_start_angle, points.vinyl_track_end_angle)),
            Self::OnRunOutGroove => Some((
                points.run_out_groove_start_angle,
                points.run_out_groove_end_angle,
            )),
            _ => None,
        }
    }

    /// Classifies where a released tonearm landed. Zones are half-open,
    /// `[start, end)`; anything at or behind the rest angle is at rest.
    pub fn for_release_angle(angle: f64, points: &ControlPoints) -> Self {
        if angle <= points.tonearm_true_zero_angle {
            Self::OnRest
        } else if angle < points.lead_in_groove_start_angle {
            Self::NotOnRecord
        } else if angle < points.lead_in_groove_end_angle {
            Self::OnLeadInGroove
        } else if angle < points.vinyl_track_end_angle {
            Self::OnVinylTrack
        } else if angle < points.run_out_groove_end_angle {
            Self::OnRunOutGroove
        } else {
            Self::OnCenterLabel
        }
    }
}

/// Phase of a pointer gesture on the tonearm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl PointerPhase {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub location: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, location: Point) -> Self {
        Self { phase, location }
    }
}

/// Angle the tonearm is drawn at while following a pointer. The rod never
/// swings past the record center and snaps back to rest when the pointer
/// moves to the right of the pivot.
pub fn drag_angle(pointer: Point, points: &ControlPoints) -> f64 {
    let pointer_angle = points.angle_toward(pointer);
    if pointer_angle >= points.tonearm_true_center_angle {
        points.tonearm_true_center_angle
    } else if pointer.x >= points.tonearm_anchor_point.x {
        points.tonearm_true_zero_angle
    } else {
        pointer_angle
    }
}
