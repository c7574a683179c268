//! SMP3011 gauge pressure transducer (primary channel).
//!
//! The device converts on command. Each poll reads the block left by the
//! previous conversion and immediately triggers the next one, so a fresh
//! value is ready one sampling period later.

use embedded_hal_async::i2c::I2c;

use crate::sensor::{PollError, PressureSensor};
use crate::state::SensorSnapshot;

pub const ADDR: u8 = 0x78;

/// Combined pressure + temperature conversion command.
const CMD_MEASURE: u8 = 0xAC;

/// Busy flag in the status byte; set while a conversion is running.
const STATUS_BUSY: u8 = 0x20;

/// Output window: 10%..90% of the 24-bit code space maps onto the pressure
/// range.
const RAW_MIN: u32 = 1_677_722;
const RAW_MAX: u32 = 15_099_494;

/// Full-scale gauge pressure of the 1 MPa part.
const FULL_SCALE_PA: f32 = 1_000_000.0;

/// SMP3011 driver error
#[derive(Debug)]
pub enum Error<I2cE> {
    I2c(I2cE),
    Busy,
}

impl<I2cE> From<Error<I2cE>> for PollError {
    fn from(e: Error<I2cE>) -> Self {
        match e {
            Error::I2c(_) => PollError::Bus,
            Error::Busy => PollError::InvalidData,
        }
    }
}

/// SMP3011 driver
pub struct Smp3011<I2C> {
    i2c: I2C,
}

impl<I2C, E> Smp3011<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Kick off the first conversion so the first poll has data to read.
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        self.i2c.write(ADDR, &[CMD_MEASURE]).await.map_err(Error::I2c)
    }

    pub async fn read(&mut self) -> Result<SensorSnapshot, Error<E>> {
        let mut raw = [0u8; 6];
        self.i2c.read(ADDR, &mut raw).await.map_err(Error::I2c)?;
        self.i2c.write(ADDR, &[CMD_MEASURE]).await.map_err(Error::I2c)?;
        if raw[0] & STATUS_BUSY != 0 {
            return Err(Error::Busy);
        }
        Ok(parse_block(&raw))
    }
}

impl<I2C, E> PressureSensor for Smp3011<I2C>
where
    I2C: I2c<Error = E>,
{
    async fn poll(&mut self) -> Result<SensorSnapshot, PollError> {
        self.read().await.map_err(PollError::from)
    }
}

/// Status byte, then 24-bit pressure and 16-bit temperature, big-endian.
fn parse_block(raw: &[u8; 6]) -> SensorSnapshot {
    let praw = u32::from_be_bytes([0, raw[1], raw[2], raw[3]]);
    let traw = u16::from_be_bytes([raw[4], raw[5]]);
    SensorSnapshot {
        pressure_pa: pressure_from_raw(praw),
        temperature_c: temperature_from_raw(traw),
    }
}

/// Map a 24-bit code in the calibrated window onto 0..full-scale Pa,
/// clamped at the window edges.
fn pressure_from_raw(raw: u32) -> f32 {
    let clamped = raw.clamp(RAW_MIN, RAW_MAX);
    (clamped - RAW_MIN) as f32 / (RAW_MAX - RAW_MIN) as f32 * FULL_SCALE_PA
}

/// 16-bit code over -40..150 °C.
fn temperature_from_raw(raw: u16) -> f32 {
    raw as f32 / 65_536.0 * 190.0 - 40.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_window_endpoints() {
        assert_eq!(pressure_from_raw(RAW_MIN), 0.0);
        assert_eq!(pressure_from_raw(RAW_MAX), FULL_SCALE_PA);
        // Codes outside the calibrated window clamp instead of extrapolating.
        assert_eq!(pressure_from_raw(0), 0.0);
        assert_eq!(pressure_from_raw(0x00FF_FFFF), FULL_SCALE_PA);
    }

    #[test]
    fn pressure_window_midpoint() {
        let mid = RAW_MIN + (RAW_MAX - RAW_MIN) / 2;
        assert!((pressure_from_raw(mid) - FULL_SCALE_PA / 2.0).abs() < 1.0);
    }

    #[test]
    fn temperature_code_span() {
        assert_eq!(temperature_from_raw(0), -40.0);
        assert!((temperature_from_raw(u16::MAX) - 150.0).abs() < 0.01);
    }

    #[test]
    fn block_parse_assembles_big_endian_words() {
        let raw = [0x00, 0x19, 0x99, 0x9A, 0x80, 0x00];
        let snapshot = parse_block(&raw);
        // 0x19999A is the bottom of the calibrated window; 0x8000 is
        // mid-span on the temperature scale.
        assert_eq!(snapshot.pressure_pa, 0.0);
        assert!((snapshot.temperature_c - 55.0).abs() < 0.01);
    }
}
