//! Unit conversion helpers
//!
//! Conversions between the three measurement systems a toolpath file can
//! express filament consumption in: linear millimeters, cubic millimeters,
//! and mass derived from a linear density factor.

/// Convert millimeters to meters.
pub fn mm_to_meters(mm: f64) -> f64 {
    mm / 1000.0
}

/// Convert cubic millimeters to cubic centimeters.
pub fn mm3_to_cm3(mm3: f64) -> f64 {
    mm3 / 1000.0
}

/// Mass of a filament length, given its linear density.
///
/// Returns 0.0 when either input is zero or negative, so callers can
/// degrade to a length-only estimate without special-casing.
pub fn grams_from_length(meters: f64, grams_per_meter: f64) -> f64 {
    if meters <= 0.0 || grams_per_meter <= 0.0 {
        return 0.0;
    }
    meters * grams_per_meter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_meters() {
        assert_eq!(mm_to_meters(1000.0), 1.0);
        assert_eq!(mm_to_meters(0.0), 0.0);
        assert_eq!(mm_to_meters(2500.0), 2.5);
    }

    #[test]
    fn test_mm3_to_cm3() {
        assert_eq!(mm3_to_cm3(1000.0), 1.0);
        assert_eq!(mm3_to_cm3(500.0), 0.5);
    }

    #[test]
    fn test_grams_from_length() {
        assert_eq!(grams_from_length(2.0, 3.0), 6.0);
        assert_eq!(grams_from_length(0.0, 3.0), 0.0);
        assert_eq!(grams_from_length(2.0, 0.0), 0.0);
        assert_eq!(grams_from_length(-1.0, 3.0), 0.0);
    }
}
