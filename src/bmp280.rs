//! BMP280 barometric pressure/temperature sensor (secondary channel).

use embedded_hal_async::i2c::I2c;

use crate::sensor::{PollError, PressureSensor};
use crate::state::SensorSnapshot;

/// I2C address with SDO tied low.
pub const ADDR_PRIMARY: u8 = 0x76;
/// I2C address with SDO tied high.
pub const ADDR_SECONDARY: u8 = 0x77;

/// BMP280 register addresses
mod reg {
    pub const ID: u8 = 0xD0;
    pub const STATUS: u8 = 0xF3;
    pub const CTRL_MEAS: u8 = 0xF4;
    pub const CONFIG: u8 = 0xF5;
    pub const PRESS_MSB: u8 = 0xF7;
    pub const CALIB_START: u8 = 0x88;
}

const CHIP_ID: u8 = 0x58;

/// osrs_t x1, osrs_p x4, normal mode.
const CTRL_MEAS_NORMAL: u8 = 0b001_011_11;
/// 0.5 ms standby, IIR filter coefficient 4.
const CONFIG_DEFAULT: u8 = 0b000_010_00;

bitflags::bitflags! {
    /// STATUS register flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const MEASURING = 0b0000_1000;
        const IM_UPDATE = 0b0000_0001;
    }
}

/// BMP280 driver error
#[derive(Debug)]
pub enum Error<I2cE> {
    I2c(I2cE),
    BadDeviceId,
    DataFormat,
}

impl<I2cE> From<Error<I2cE>> for PollError {
    fn from(e: Error<I2cE>) -> Self {
        match e {
            Error::I2c(_) => PollError::Bus,
            Error::BadDeviceId | Error::DataFormat => PollError::InvalidData,
        }
    }
}

/// Trimming coefficients burned into the device at production.
#[derive(Debug, Clone, Copy, Default)]
struct Calibration {
    dig_t1: u16,
    dig_t2: i16,
    dig_t3: i16,
    dig_p1: u16,
    dig_p2: i16,
    dig_p3: i16,
    dig_p4: i16,
    dig_p5: i16,
    dig_p6: i16,
    dig_p7: i16,
    dig_p8: i16,
    dig_p9: i16,
}

impl Calibration {
    fn parse(raw: &[u8; 24]) -> Self {
        let unsigned = |i: usize| u16::from_le_bytes([raw[i], raw[i + 1]]);
        let signed = |i: usize| i16::from_le_bytes([raw[i], raw[i + 1]]);
        Self {
            dig_t1: unsigned(0),
            dig_t2: signed(2),
            dig_t3: signed(4),
            dig_p1: unsigned(6),
            dig_p2: signed(8),
            dig_p3: signed(10),
            dig_p4: signed(12),
            dig_p5: signed(14),
            dig_p6: signed(16),
            dig_p7: signed(18),
            dig_p8: signed(20),
            dig_p9: signed(22),
        }
    }
}

/// BMP280 driver
pub struct Bmp280<I2C> {
    i2c: I2C,
    addr: u8,
    cal: Calibration,
}

impl<I2C, E> Bmp280<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            cal: Calibration::default(),
        }
    }

    /// Verify the chip ID, read the trimming coefficients, and switch to
    /// continuous measurement.
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[reg::ID], &mut id)
            .await
            .map_err(Error::I2c)?;
        if id[0] != CHIP_ID {
            return Err(Error::BadDeviceId);
        }

        let mut raw = [0u8; 24];
        self.i2c
            .write_read(self.addr, &[reg::CALIB_START], &mut raw)
            .await
            .map_err(Error::I2c)?;
        self.cal = Calibration::parse(&raw);

        self.i2c
            .write(self.addr, &[reg::CONFIG, CONFIG_DEFAULT])
            .await
            .map_err(Error::I2c)?;
        self.i2c
            .write(self.addr, &[reg::CTRL_MEAS, CTRL_MEAS_NORMAL])
            .await
            .map_err(Error::I2c)?;
        Ok(())
    }

    /// Read the STATUS register flags.
    pub async fn read_status(&mut self) -> Result<Status, Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[reg::STATUS], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(Status::from_bits_truncate(buf[0]))
    }

    /// Burst-read the measurement block and compensate it.
    pub async fn read(&mut self) -> Result<SensorSnapshot, Error<E>> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.addr, &[reg::PRESS_MSB], &mut raw)
            .await
            .map_err(Error::I2c)?;
        let (adc_p, adc_t) = split_raw(&raw);
        let (temperature_c, t_fine) = compensate_temperature(adc_t, &self.cal);
        let pressure_pa = compensate_pressure(adc_p, t_fine, &self.cal).ok_or(Error::DataFormat)?;
        Ok(SensorSnapshot {
            pressure_pa,
            temperature_c,
        })
    }
}

impl<I2C, E> PressureSensor for Bmp280<I2C>
where
    I2C: I2c<Error = E>,
{
    async fn poll(&mut self) -> Result<SensorSnapshot, PollError> {
        self.read().await.map_err(PollError::from)
    }
}

/// Split the 6-byte 0xF7..0xFC block into the 20-bit pressure and
/// temperature words.
fn split_raw(raw: &[u8; 6]) -> (i32, i32) {
    let adc_p = ((raw[0] as i32) << 12) | ((raw[1] as i32) << 4) | ((raw[2] as i32) >> 4);
    let adc_t = ((raw[3] as i32) << 12) | ((raw[4] as i32) << 4) | ((raw[5] as i32) >> 4);
    (adc_p, adc_t)
}

/// Datasheet fixed-point temperature compensation; returns °C and t_fine.
fn compensate_temperature(adc_t: i32, cal: &Calibration) -> (f32, i32) {
    let var1 = (((adc_t >> 3) - ((cal.dig_t1 as i32) << 1)) * (cal.dig_t2 as i32)) >> 11;
    let var2 = (((((adc_t >> 4) - (cal.dig_t1 as i32)) * ((adc_t >> 4) - (cal.dig_t1 as i32)))
        >> 12)
        * (cal.dig_t3 as i32))
        >> 14;
    let t_fine = var1 + var2;
    let centi_c = (t_fine * 5 + 128) >> 8;
    (centi_c as f32 / 100.0, t_fine)
}

/// Datasheet 64-bit pressure compensation in Pa. `None` only for a zero
/// divisor, i.e. an all-zero calibration block.
fn compensate_pressure(adc_p: i32, t_fine: i32, cal: &Calibration) -> Option<f32> {
    let var1 = t_fine as i64 - 128_000;
    let mut var2 = var1 * var1 * cal.dig_p6 as i64;
    var2 += (var1 * cal.dig_p5 as i64) << 17;
    var2 += (cal.dig_p4 as i64) << 35;
    let var1 = ((var1 * var1 * cal.dig_p3 as i64) >> 8) + ((var1 * cal.dig_p2 as i64) << 12);
    let var1 = (((1i64 << 47) + var1) * cal.dig_p1 as i64) >> 33;
    if var1 == 0 {
        return None;
    }
    let p = 1_048_576 - adc_p as i64;
    let p = (((p << 31) - var2) * 3125) / var1;
    let var1 = (cal.dig_p9 as i64 * (p >> 13) * (p >> 13)) >> 25;
    let var2 = (cal.dig_p8 as i64 * p) >> 19;
    let p = ((p + var1 + var2) >> 8) + ((cal.dig_p7 as i64) << 4);
    // Q24.8 fixed point.
    Some(p as f32 / 256.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimming values and raw readings from the datasheet's worked example.
    fn datasheet_cal() -> Calibration {
        Calibration {
            dig_t1: 27504,
            dig_t2: 26435,
            dig_t3: -1000,
            dig_p1: 36477,
            dig_p2: -10685,
            dig_p3: 3024,
            dig_p4: 2855,
            dig_p5: 140,
            dig_p6: -7,
            dig_p7: 15500,
            dig_p8: -14600,
            dig_p9: 6000,
        }
    }

    #[test]
    fn temperature_matches_datasheet_example() {
        let (t, t_fine) = compensate_temperature(519_888, &datasheet_cal());
        assert_eq!(t_fine, 128_422);
        assert!((t - 25.08).abs() < 0.01);
    }

    #[test]
    fn pressure_matches_datasheet_example() {
        let (_, t_fine) = compensate_temperature(519_888, &datasheet_cal());
        let p = compensate_pressure(415_148, t_fine, &datasheet_cal()).unwrap();
        assert!((p - 100_653.27).abs() < 2.0);
    }

    #[test]
    fn zero_calibration_is_rejected() {
        assert_eq!(
            compensate_pressure(415_148, 128_422, &Calibration::default()),
            None
        );
    }

    #[test]
    fn raw_block_split() {
        let raw = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];
        let (adc_p, adc_t) = split_raw(&raw);
        assert_eq!(adc_p, 415_148);
        assert_eq!(adc_t, 519_888);
    }

    #[test]
    fn calibration_block_is_little_endian() {
        let mut raw = [0u8; 24];
        raw[0] = 0x70; // dig_t1 = 27504
        raw[1] = 0x6B;
        raw[4] = 0x18; // dig_t3 = -1000
        raw[5] = 0xFC;
        let cal = Calibration::parse(&raw);
        assert_eq!(cal.dig_t1, 27504);
        assert_eq!(cal.dig_t3, -1000);
    }
}
