use crate::{PhonographError, TonearmState};

/// Receives engine notifications. The engine only holds a weak reference, so
/// dropping the observer silently ends delivery.
pub trait PhonographObserver {
    /// Called before the engine applies the effects of a state change.
    fn tonearm_state_will_change(&self, _old: TonearmState, _new: TonearmState) {}

    fn is_assumed_buffering(&self, _buffering: bool) {}

    /// Audio failed to load or decode.
    fn media_error(&self, _error: &PhonographError) {}
}
