//! Per-frame synchronization between the spinning record, the stylus and the
//! audio clock.

use std::f64::consts::TAU;

use tracing::{debug, info};

use super::Phonograph;
use crate::geometry::ControlPoints;
use crate::{Record, TonearmState};

/// How far and how fast the stylus drifts through its current zone.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StylusAdvance {
    range: f64,
    duration: f64,
    limit: f64,
    next: TonearmState,
}

impl Phonograph {
    /// Advances the record and the stylus by one frame. The host calls this
    /// once per frame while the frame clock is running.
    pub fn on_frame(&mut self) {
        let Some(style) = self.queue.current().map(Record::style) else {
            return;
        };
        let Some(points) = self.control_points else {
            return;
        };
        let fps = f64::from(self.config.frames_per_second);

        let rotation = self.record_transform.rotation + style.angle_per_frame(fps);
        self.record_transform.rotation = rotation.rem_euclid(TAU);
        self.surface.set_record_transform(self.record_transform);

        if self.transitions.tonearm_in_flight() {
            return;
        }
        if let Some(advance) = self.stylus_advance(&points) {
            self.advance_stylus(advance, fps);
        }
    }

    fn stylus_advance(&mut self, points: &ControlPoints) -> Option<StylusAdvance> {
        let (start, end) = self.state.zone_bounds(points)?;
        let next = self.state.next_zone()?;
        let zone = (end - start).abs();

        // Outside the track the stylus covers what is left of the zone after
        // touchdown in the matching share of the groove duration.
        let (range, duration) = match self.state {
            TonearmState::OnLeadInGroove => {
                let touchdown = points
                    .tonearm_last_touchdown_angle
                    .unwrap_or(start)
                    .clamp(start, end);
                let remaining = (end - touchdown).abs();
                let groove = self.queue.current()?.lead_in_groove_duration();
                (remaining, groove * remaining / zone)
            }
            TonearmState::OnVinylTrack => {
                if !self.audio_is_advancing() {
                    return None;
                }
                (zone, self.queue.current()?.total_duration())
            }
            _ => {
                let touchdown = points
                    .tonearm_last_touchdown_angle
                    .map_or(start, |angle| angle.clamp(start, end));
                let remaining = (end - touchdown).abs();
                let groove = self.queue.current()?.side_up().run_out_groove_duration();
                (remaining, groove * remaining / zone)
            }
        };

        Some(StylusAdvance {
            range,
            duration,
            limit: end,
            next,
        })
    }

    fn advance_stylus(&mut self, advance: StylusAdvance, fps: f64) {
        let step = advance.range / advance.duration / fps;
        let angle = self.tonearm_angle + step;
        if angle < advance.limit {
            self.set_tonearm_angle(angle);
            return;
        }
        debug!(from = ?self.state, to = ?advance.next, "stylus reached zone boundary");
        self.set_tonearm_angle(advance.limit);
        if let Some(points) = self.control_points.as_mut() {
            points.tonearm_last_touchdown_angle = None;
        }
        self.land_in(advance.next);
    }

    /// Compares the audio clock with the track state and flags buffering
    /// when the audio stops advancing. Returns whether the stylus may move.
    fn audio_is_advancing(&mut self) -> bool {
        let playing = self.audio.is_playing();
        if playing == self.is_assumed_buffering {
            info!(buffering = !playing, "audio buffering changed");
            self.set_assumed_buffering(!playing);
        }
        playing
    }
}
