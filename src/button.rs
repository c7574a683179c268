//! Push-button input seam and press-edge detection.

/// Push-button level source. `true` means pressed; the hardware input is
/// active-low and implementations do the inversion.
pub trait ButtonInput {
    fn is_pressed(&mut self) -> bool;
}

/// Detects release→press transitions from sampled button levels.
pub struct EdgeDetector {
    last: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        // A pulled-up input reads released at boot.
        Self { last: false }
    }

    /// Feed one sampled level; returns true on a press edge.
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.last;
        self.last = pressed;
        edge
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
