//! Status LED heartbeat.

use embassy_time::Timer;
use embedded_hal::digital::OutputPin;

use crate::HEARTBEAT_HALF_PERIOD_MILLIS;

/// Fatal output-pin fault. Heartbeat loss is diagnostic-critical, so this
/// is escalated instead of retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

/// Two-state LED toggler driven on a fixed half-period.
pub struct Heartbeat<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Heartbeat<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    /// Flip the LED and return the new level.
    pub fn toggle(&mut self) -> Result<bool, PinFault> {
        self.on = !self.on;
        let result = if self.on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| PinFault)?;
        Ok(self.on)
    }

    pub async fn run(mut self) -> Result<(), PinFault> {
        loop {
            self.toggle()?;
            Timer::after_millis(HEARTBEAT_HALF_PERIOD_MILLIS).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    use super::*;

    #[derive(Default)]
    struct RecordingPin {
        levels: heapless::Vec<bool, 8>,
    }

    impl ErrorType for RecordingPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let _ = self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let _ = self.levels.push(true);
            Ok(())
        }
    }

    struct StuckPin;

    #[derive(Debug)]
    struct StuckPinError;

    impl Error for StuckPinError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for StuckPin {
        type Error = StuckPinError;
    }

    impl OutputPin for StuckPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(StuckPinError)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(StuckPinError)
        }
    }

    #[test]
    fn toggle_alternates_levels() {
        let mut heartbeat = Heartbeat::new(RecordingPin::default());
        assert_eq!(heartbeat.toggle(), Ok(true));
        assert_eq!(heartbeat.toggle(), Ok(false));
        assert_eq!(heartbeat.toggle(), Ok(true));
        assert_eq!(heartbeat.pin.levels.as_slice(), &[true, false, true]);
    }

    #[test]
    fn pin_fault_is_escalated() {
        let mut heartbeat = Heartbeat::new(StuckPin);
        assert_eq!(heartbeat.toggle(), Err(PinFault));
    }
}
