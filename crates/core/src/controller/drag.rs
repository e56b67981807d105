use tracing::debug;

use super::Phonograph;
use crate::tonearm::{drag_angle, PointerEvent};
use crate::TonearmState;

impl Phonograph {
    /// Feeds a pointer gesture on the tonearm. Ignored while the tonearm is
    /// locked by a running animation or before any geometry is known.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.transitions.is_animating() {
            return;
        }
        let Some(points) = self.ensure_control_points().copied() else {
            return;
        };

        let rendered = drag_angle(event.location, &points);
        if event.phase.is_active() {
            self.set_state(TonearmState::UserHolding);
            self.set_tonearm_angle(rendered);
            return;
        }

        self.set_tonearm_angle(rendered);
        let touchdown = points.angle_toward(points.stylus_location(rendered));
        if let Some(points) = self.control_points.as_mut() {
            points.tonearm_last_touchdown_angle = Some(touchdown);
        }
        let landed = TonearmState::for_release_angle(touchdown, &points);
        debug!(angle = touchdown, state = ?landed, "tonearm released");
        self.land_in(landed);
    }
}
