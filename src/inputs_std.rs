//! Simulated push-button for the host build.

use embassy_time::Instant;

use crate::button::ButtonInput;

/// Reports a short press at a fixed interval, cycling the screens without
/// hardware attached.
pub struct SimButton {
    interval_ms: u64,
    hold_ms: u64,
}

impl SimButton {
    pub fn new() -> Self {
        Self {
            interval_ms: 5_000,
            hold_ms: 60,
        }
    }
}

impl Default for SimButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonInput for SimButton {
    fn is_pressed(&mut self) -> bool {
        Instant::now().as_millis() % self.interval_ms < self.hold_ms
    }
}
