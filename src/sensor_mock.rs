//! Simulated pressure/temperature source for the host build.

use embassy_time::Instant;

use crate::sensor::{PollError, PressureSensor};
use crate::state::SensorSnapshot;

/// Drifts around a base reading on a fixed period so the screens visibly
/// update without hardware attached.
pub struct MockPressureSensor {
    base_pressure_pa: f32,
    base_temperature_c: f32,
    swing_pa: f32,
    period_ms: u64,
}

impl MockPressureSensor {
    pub fn new(base_pressure_pa: f32, base_temperature_c: f32) -> Self {
        Self {
            base_pressure_pa,
            base_temperature_c,
            swing_pa: 5_000.0,
            period_ms: 8_000,
        }
    }

    /// Triangle wave in -1..1 over the configured period.
    fn phase(&self) -> f32 {
        let t = (Instant::now().as_millis() % self.period_ms) as f32 / self.period_ms as f32;
        if t < 0.5 {
            t * 4.0 - 1.0
        } else {
            3.0 - t * 4.0
        }
    }
}

impl PressureSensor for MockPressureSensor {
    async fn poll(&mut self) -> Result<SensorSnapshot, PollError> {
        let phase = self.phase();
        Ok(SensorSnapshot {
            pressure_pa: self.base_pressure_pa + self.swing_pa * phase,
            temperature_c: self.base_temperature_c + 0.5 * phase,
        })
    }
}
