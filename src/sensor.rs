//! Sensor collaborator seam shared by the hardware drivers and the mocks.

use crate::state::SensorSnapshot;

/// A pressure/temperature source polled by the sampling task.
#[allow(async_fn_in_trait)]
pub trait PressureSensor {
    async fn poll(&mut self) -> Result<SensorSnapshot, PollError>;
}

/// Transient sensor/bus fault. Recovered locally: the previous snapshot is
/// kept and the poll retried on the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollError {
    /// The bus transaction failed.
    Bus,
    /// The device answered with data that does not parse.
    InvalidData,
}

impl PollError {
    pub fn describe(self) -> &'static str {
        match self {
            PollError::Bus => "bus transaction failed",
            PollError::InvalidData => "invalid sensor data",
        }
    }
}
