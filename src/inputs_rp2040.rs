//! Push-button input on hardware.

use embassy_rp::gpio::Input;

use crate::button::ButtonInput;

/// Active-low button on a pulled-up input.
pub struct PushButton {
    input: Input<'static>,
}

impl PushButton {
    pub fn new(input: Input<'static>) -> Self {
        Self { input }
    }
}

impl ButtonInput for PushButton {
    fn is_pressed(&mut self) -> bool {
        self.input.is_low()
    }
}
