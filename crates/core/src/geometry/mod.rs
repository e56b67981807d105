//! Plain-value coordinate frame and the tonearm geometry solver.
//!
//! Every position is expressed in a single board coordinate space with the y
//! axis pointing down. The tonearm pivots around its anchor; at rest the rod
//! hangs straight down and positive rotation swings the stylus towards the
//! record, whose center sits one tonearm length away from the pivot at 45°
//! from the rest direction.

use std::f64::consts::{FRAC_PI_4, SQRT_2};

use serde::{Deserialize, Serialize};

use crate::{PhonographError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Builds a square centered on `center`.
    pub fn square_around(center: Point, side: f64) -> Self {
        Self::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns `true` when the rectangle has no usable area.
    pub fn is_empty(&self) -> bool {
        !(self.size.width.is_finite() && self.size.height.is_finite())
            || self.size.width <= 0.0
            || self.size.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Resolves a point given as fractions of this rectangle's size.
    pub fn point_at(&self, normalized: Point) -> Point {
        Point::new(
            self.origin.x + normalized.x * self.size.width,
            self.origin.y + normalized.y * self.size.height,
        )
    }
}

/// Where the pivot and the stylus sit on the tonearm artwork, as fractions of
/// its bounds, plus the artwork's height-to-width ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TonearmShape {
    pub anchor: Point,
    pub stylus: Point,
    pub aspect_ratio: f64,
}

impl Default for TonearmShape {
    fn default() -> Self {
        Self {
            anchor: Point::new(0.76, 0.2125),
            stylus: Point::new(0.1, 0.875),
            aspect_ratio: 1.0,
        }
    }
}

/// The tonearm's unrotated frame on the board together with its normalized
/// anchor and stylus points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TonearmGeometry {
    pub frame: Rect,
    pub anchor: Point,
    pub stylus: Point,
}

impl TonearmGeometry {
    pub fn anchor_location(&self) -> Point {
        self.frame.point_at(self.anchor)
    }

    pub fn stylus_location(&self) -> Point {
        self.frame.point_at(self.stylus)
    }

    pub fn length(&self) -> f64 {
        self.anchor_location().distance_to(self.stylus_location())
    }

    /// Rotation that makes the rod hang straight down from the pivot.
    pub fn rest_angle(&self) -> f64 {
        let anchor = self.anchor_location();
        let stylus = self.stylus_location();
        -((stylus.x - anchor.x).abs() / (stylus.y - anchor.y).abs()).atan()
    }
}

/// Everything the solver needs to know about the visual surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub board_bounds: Rect,
    /// Rendered frame of the record, centered on the rotation axis.
    pub record_frame: Rect,
    pub tonearm: TonearmGeometry,
}

impl Layout {
    /// Sizes and places the tonearm so that the pivot sits one tonearm length
    /// away from the record center, 45° up and to the right of it.
    pub fn fit(
        board_bounds: Rect,
        record_frame: Rect,
        shape: TonearmShape,
        tonearm_length: f64,
    ) -> Result<Self> {
        if board_bounds.is_empty() {
            return Err(PhonographError::Layout("board bounds are empty".into()));
        }
        if record_frame.is_empty() {
            return Err(PhonographError::Layout("record frame is empty".into()));
        }
        if !(tonearm_length.is_finite() && tonearm_length > 0.0) {
            return Err(PhonographError::Layout(format!(
                "tonearm length must be positive, got {tonearm_length}"
            )));
        }
        if !(shape.aspect_ratio.is_finite() && shape.aspect_ratio > 0.0) {
            return Err(PhonographError::Layout(format!(
                "tonearm aspect ratio must be positive, got {}",
                shape.aspect_ratio
            )));
        }

        let dx = shape.stylus.x - shape.anchor.x;
        let dy = (shape.stylus.y - shape.anchor.y) * shape.aspect_ratio;
        let normalized_length = dx.hypot(dy);
        if normalized_length <= f64::EPSILON {
            return Err(PhonographError::Layout(
                "tonearm anchor and stylus points coincide".into(),
            ));
        }

        let width = tonearm_length / normalized_length;
        let height = width * shape.aspect_ratio;
        let offset = tonearm_length / SQRT_2;
        let center = record_frame.center();
        let anchor = Point::new(center.x + offset, center.y - offset);

        let layout = Self {
            board_bounds,
            record_frame,
            tonearm: TonearmGeometry {
                frame: Rect::new(
                    anchor.x - shape.anchor.x * width,
                    anchor.y - shape.anchor.y * height,
                    width,
                    height,
                ),
                anchor: shape.anchor,
                stylus: shape.stylus,
            },
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_bounds.is_empty() {
            return Err(PhonographError::Layout("board bounds are empty".into()));
        }
        if self.record_frame.is_empty() {
            return Err(PhonographError::Layout("record frame is empty".into()));
        }
        if self.tonearm.frame.is_empty() {
            return Err(PhonographError::Layout("tonearm frame is empty".into()));
        }
        let anchor = self.tonearm.anchor_location();
        if !anchor.is_finite() || !self.tonearm.stylus_location().is_finite() {
            return Err(PhonographError::Layout(
                "tonearm points are not finite".into(),
            ));
        }
        if self.tonearm.length() <= f64::EPSILON {
            return Err(PhonographError::Layout(
                "tonearm anchor and stylus points coincide".into(),
            ));
        }
        if !self.board_bounds.contains(anchor) {
            return Err(PhonographError::Layout(format!(
                "tonearm pivot ({:.1}, {:.1}) lies outside the board",
                anchor.x, anchor.y
            )));
        }
        Ok(())
    }

    /// Ratio between the rendered record and its physical diameter.
    pub fn record_scale(&self, record_diameter: f64) -> f64 {
        self.record_frame.width() / record_diameter
    }
}

/// Groove layout of one record side, in the record's own distance units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordDimensions {
    pub record_diameter: f64,
    pub lead_in_groove_width: f64,
    pub run_out_groove_width: f64,
    pub center_label_diameter: f64,
    /// Rendered size divided by physical size.
    pub applied_scale: f64,
}

impl RecordDimensions {
    /// Boundary radii at the applied scale, outermost first: record edge,
    /// vinyl track edge, run-out groove edge, center label edge.
    pub fn radii(&self) -> [f64; 4] {
        let scale = self.applied_scale;
        [
            self.record_diameter * scale / 2.0,
            (self.record_diameter - self.lead_in_groove_width * 2.0) * scale / 2.0,
            (self.center_label_diameter + self.run_out_groove_width * 2.0) * scale / 2.0,
            self.center_label_diameter * scale / 2.0,
        ]
    }
}

/// Angular thresholds derived from the record and tonearm geometry. All
/// angles are tonearm rotations in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints {
    pub tonearm_anchor_point: Point,
    /// Stylus position while the tonearm is at rest.
    pub tonearm_stylus_point: Point,
    pub tonearm_length: f64,
    #[serde(default)]
    pub tonearm_last_touchdown_angle: Option<f64>,
    /// Rotation that brings the tonearm to its rest position.
    pub tonearm_true_zero_angle: f64,
    /// Rotation that puts the stylus over the center of the record.
    pub tonearm_true_center_angle: f64,
    pub lead_in_groove_start_angle: f64,
    pub lead_in_groove_end_angle: f64,
    pub vinyl_track_start_angle: f64,
    pub vinyl_track_end_angle: f64,
    pub run_out_groove_start_angle: f64,
    pub run_out_groove_end_angle: f64,
}

impl ControlPoints {
    pub fn solve(layout: &Layout, dimensions: &RecordDimensions) -> Result<Self> {
        layout.validate()?;
        if !(dimensions.applied_scale.is_finite() && dimensions.applied_scale > 0.0) {
            return Err(PhonographError::Layout(format!(
                "record scale must be positive, got {}",
                dimensions.applied_scale
            )));
        }

        let anchor = layout.tonearm.anchor_location();
        let stylus = layout.tonearm.stylus_location();
        let x_length = (stylus.x - anchor.x).abs();
        let y_length = (stylus.y - anchor.y).abs();
        let length = x_length.hypot(y_length);

        let zero = layout.tonearm.rest_angle();
        let angle_at = |radius: f64, boundary: &str| -> Result<f64> {
            intersection_angle(radius, length)
                .map(|angle| angle + zero)
                .ok_or_else(|| {
                    PhonographError::Geometry(format!(
                        "tonearm of length {length:.2} cannot reach the {boundary} (radius {radius:.2})"
                    ))
                })
        };

        let [record_radius, vinyl_radius, run_out_radius, label_radius] = dimensions.radii();
        let lead_in_start = angle_at(record_radius, "record edge")?;
        let lead_in_end = angle_at(vinyl_radius, "vinyl track edge")?;
        let vinyl_end = angle_at(run_out_radius, "run-out groove edge")?;
        let run_out_end = angle_at(label_radius, "center label edge")?;

        let points = Self {
            tonearm_anchor_point: anchor,
            tonearm_stylus_point: Point::new(anchor.x, anchor.y + length),
            tonearm_length: length,
            tonearm_last_touchdown_angle: None,
            tonearm_true_zero_angle: zero,
            tonearm_true_center_angle: zero + FRAC_PI_4,
            lead_in_groove_start_angle: lead_in_start,
            lead_in_groove_end_angle: lead_in_end,
            vinyl_track_start_angle: lead_in_end,
            vinyl_track_end_angle: vinyl_end,
            run_out_groove_start_angle: vinyl_end,
            run_out_groove_end_angle: run_out_end,
        };
        points.check_ordering()?;
        Ok(points)
    }

    fn check_ordering(&self) -> Result<()> {
        let ordered = [
            ("rest", self.tonearm_true_zero_angle),
            ("lead-in groove start", self.lead_in_groove_start_angle),
            ("vinyl track start", self.vinyl_track_start_angle),
            ("run-out groove start", self.run_out_groove_start_angle),
            ("run-out groove end", self.run_out_groove_end_angle),
        ];
        for pair in ordered.windows(2) {
            let (outer_name, outer) = pair[0];
            let (inner_name, inner) = pair[1];
            if inner <= outer {
                return Err(PhonographError::Geometry(format!(
                    "{inner_name} angle {inner:.4} does not follow {outer_name} angle {outer:.4}"
                )));
            }
        }
        if self.run_out_groove_end_angle > self.tonearm_true_center_angle {
            return Err(PhonographError::Geometry(
                "center label edge lies beyond the record center".into(),
            ));
        }
        Ok(())
    }

    pub fn record_center(&self) -> Point {
        let offset = self.tonearm_length / SQRT_2;
        Point::new(
            self.tonearm_anchor_point.x - offset,
            self.tonearm_anchor_point.y + offset,
        )
    }

    /// Where the stylus sits when the tonearm is rotated to `angle`.
    pub fn stylus_location(&self, angle: f64) -> Point {
        let swing = angle - self.tonearm_true_zero_angle;
        Point::new(
            self.tonearm_anchor_point.x - self.tonearm_length * swing.sin(),
            self.tonearm_anchor_point.y + self.tonearm_length * swing.cos(),
        )
    }

    /// Tonearm rotation that points the rod at `location`.
    pub fn angle_toward(&self, location: Point) -> f64 {
        let dx = (location.x - self.tonearm_anchor_point.x).abs();
        let dy = (location.y - self.tonearm_anchor_point.y).abs();
        (dx / dy).atan() + self.tonearm_true_zero_angle
    }

    pub fn lead_in_groove_range(&self) -> f64 {
        (self.lead_in_groove_end_angle - self.lead_in_groove_start_angle).abs()
    }

    pub fn vinyl_track_range(&self) -> f64 {
        (self.vinyl_track_end_angle - self.vinyl_track_start_angle).abs()
    }

    pub fn run_out_groove_range(&self) -> f64 {
        (self.run_out_groove_end_angle - self.run_out_groove_start_angle).abs()
    }

    /// Tonearm rotation that corresponds to `time` into a side lasting
    /// `total_duration` seconds.
    pub fn angle_for_time(&self, time: f64, total_duration: f64) -> f64 {
        let progress = if total_duration > 0.0 {
            (time / total_duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.vinyl_track_range() * progress + self.vinyl_track_start_angle
    }

    /// Inverse of [`ControlPoints::angle_for_time`].
    pub fn time_for_angle(&self, angle: f64, total_duration: f64) -> f64 {
        let progress = (angle - self.vinyl_track_start_angle).abs() / self.vinyl_track_range();
        progress.clamp(0.0, 1.0) * total_duration
    }
}

/// Angle, relative to the rest position, at which a stylus circle of the
/// tonearm's length around the pivot crosses a record circle of `radius`.
///
/// The record center is one tonearm length from the pivot, so the triangle
/// pivot / record center / stylus has two sides equal to `length` and the law
/// of cosines gives the swing between the center direction and the stylus.
fn intersection_angle(radius: f64, length: f64) -> Option<f64> {
    if !(radius.is_finite() && radius >= 0.0 && length.is_finite() && length > 0.0) {
        return None;
    }
    let cos_swing = 1.0 - radius * radius / (2.0 * length * length);
    if !(-1.0..=1.0).contains(&cos_swing) {
        return None;
    }
    Some(FRAC_PI_4 - cos_swing.acos())
}
