//! Simulated status LED for the host build.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::log::*;

/// Logs level changes instead of driving a pin.
pub struct SimLed;

impl ErrorType for SimLed {
    type Error = Infallible;
}

impl OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        debug!("heartbeat LED off");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        debug!("heartbeat LED on");
        Ok(())
    }
}
