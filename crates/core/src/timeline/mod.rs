//! Frame clock abstraction and simple time keeping.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Monotonic seconds counter used by simulated collaborators.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlaybackClock {
    pub time_seconds: f64,
}

impl PlaybackClock {
    pub fn reset(&mut self) {
        self.time_seconds = 0.0;
    }

    pub fn advance(&mut self, delta: f64) {
        self.time_seconds = (self.time_seconds + delta).max(0.0);
    }
}

/// Source of per-frame callbacks. While running, the host calls
/// [`crate::Phonograph::on_frame`] once per frame at the target rate.
pub trait FrameClock {
    fn start(&mut self, target_fps: u32);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManualFrameClockState {
    pub running: bool,
    pub target_fps: Option<u32>,
    pub start_count: usize,
    pub stop_count: usize,
}

/// Frame clock that only records start/stop requests; the owner decides when
/// frames happen. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameClock {
    shared: Rc<RefCell<ManualFrameClockState>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, ManualFrameClockState> {
        self.shared.borrow()
    }

    /// Seconds between frames at the requested rate.
    pub fn frame_interval(&self) -> Option<f64> {
        self.shared
            .borrow()
            .target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| 1.0 / fps as f64)
    }
}

impl FrameClock for ManualFrameClock {
    fn start(&mut self, target_fps: u32) {
        let mut state = self.shared.borrow_mut();
        state.running = true;
        state.target_fps = Some(target_fps);
        state.start_count += 1;
    }

    fn stop(&mut self) {
        let mut state = self.shared.borrow_mut();
        state.running = false;
        state.stop_count += 1;
    }

    fn is_running(&self) -> bool {
        self.shared.borrow().running
    }
}
