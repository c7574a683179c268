//! Conversions from raw sensor units (Pa, °C) to display units.
//!
//! Pure functions, total over all finite floats.

/// 1 Pascal = 0.0001450377 PSI
const PSI_PER_PASCAL: f32 = 1.450377e-4;

/// 1 Pascal = 0.00001 Bar
const BAR_PER_PASCAL: f32 = 1e-5;

pub fn pascals_to_psi(pascals: f32) -> f32 {
    pascals * PSI_PER_PASCAL
}

pub fn pascals_to_bar(pascals: f32) -> f32 {
    pascals * BAR_PER_PASCAL
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    (celsius * 9.0 / 5.0) + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_at_one_atmosphere() {
        assert!((pascals_to_psi(100_000.0) - 14.50377).abs() < 1e-3);
    }

    #[test]
    fn bar_at_one_atmosphere() {
        assert_eq!(pascals_to_bar(100_000.0), 1.0);
    }

    #[test]
    fn fahrenheit_fixed_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }
}
