//! Filament physical properties
//!
//! The optional filament record supplied with an analysis request. The
//! estimator uses it to convert between filament length and mass; every
//! field is optional and the conversions degrade to zero when the record
//! cannot supply them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FilamentError, FilamentResult};

/// Density assumed by the volumetric fallback when the filament record
/// carries none (PLA, g/cm³).
pub const DEFAULT_PLA_DENSITY: f64 = 1.24;

/// Physical properties of a filament spool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilamentProperties {
    /// Filament diameter in millimeters (typically 1.75 or 2.85)
    pub diameter_mm: Option<f64>,
    /// Material density in g/cm³
    pub density: Option<f64>,
    /// Precomputed linear density in g/m; wins over the derived value
    pub grams_per_meter: Option<f64>,
}

impl FilamentProperties {
    /// Create a property record from diameter and density.
    pub fn from_diameter_density(diameter_mm: f64, density: f64) -> Self {
        Self {
            diameter_mm: Some(diameter_mm),
            density: Some(density),
            grams_per_meter: None,
        }
    }

    /// Linear density of the filament in grams per meter.
    ///
    /// A stored `grams_per_meter` takes precedence whenever present,
    /// including an explicit zero (which means "unknown", so callers skip
    /// the length/mass conversion). Only when the field is absent is the
    /// value derived from the rod's cross-sectional area and material
    /// density: area in cm² times 100 cm per meter times density in
    /// g/cm³. Returns 0.0 when neither route has usable inputs.
    pub fn grams_per_meter(&self) -> f64 {
        if let Some(gpm) = self.grams_per_meter {
            if gpm.is_finite() && gpm >= 0.0 {
                return gpm;
            }
            warn!(grams_per_meter = gpm, "ignoring invalid stored linear density");
        }

        match (self.diameter_mm, self.density) {
            (Some(diameter), Some(density)) if diameter > 0.0 && density > 0.0 => {
                let radius_cm = diameter / 20.0;
                let cross_section_cm2 = std::f64::consts::PI * radius_cm * radius_cm;
                cross_section_cm2 * 100.0 * density
            }
            _ => 0.0,
        }
    }

    /// Validate the record before use.
    ///
    /// Present values must be finite and non-negative; absent values are
    /// fine (the estimator degrades gracefully).
    pub fn validate(&self) -> FilamentResult<()> {
        check_value("diameter_mm", self.diameter_mm)?;
        check_value("density", self.density)?;
        check_value("grams_per_meter", self.grams_per_meter)?;
        Ok(())
    }
}

fn check_value(name: &str, value: Option<f64>) -> FilamentResult<()> {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            return Err(FilamentError::InvalidValue {
                name: name.to_string(),
                reason: format!("must be a finite non-negative number, got {}", v),
            });
        }
    }
    Ok(())
}

/// Grams remaining on a spool after deducting a print's usage.
///
/// Clamped at zero; a print can never drive the stored remainder negative.
pub fn remaining_after_use(remaining_g: f64, used_g: f64) -> f64 {
    (remaining_g - used_g).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_per_meter_derivation() {
        // 1.75mm PLA at 1.24 g/cm³ is roughly 2.98 g/m
        let filament = FilamentProperties::from_diameter_density(1.75, 1.24);
        let gpm = filament.grams_per_meter();
        assert!((gpm - 2.9825).abs() < 0.001, "got {}", gpm);
    }

    #[test]
    fn test_precomputed_grams_per_meter_wins() {
        let filament = FilamentProperties {
            diameter_mm: Some(1.75),
            density: Some(1.24),
            grams_per_meter: Some(3.5),
        };
        assert_eq!(filament.grams_per_meter(), 3.5);
    }

    #[test]
    fn test_grams_per_meter_unknown_inputs() {
        assert_eq!(FilamentProperties::default().grams_per_meter(), 0.0);

        let zero_density = FilamentProperties::from_diameter_density(1.75, 0.0);
        assert_eq!(zero_density.grams_per_meter(), 0.0);

        let no_density = FilamentProperties {
            diameter_mm: Some(1.75),
            ..Default::default()
        };
        assert_eq!(no_density.grams_per_meter(), 0.0);
    }

    #[test]
    fn test_stored_zero_gpm_wins_over_derivation() {
        // An explicit 0 means the linear density is unknown; conversions
        // are skipped even when diameter and density could derive one
        let filament = FilamentProperties {
            diameter_mm: Some(1.75),
            density: Some(1.24),
            grams_per_meter: Some(0.0),
        };
        assert_eq!(filament.grams_per_meter(), 0.0);
    }

    #[test]
    fn test_unusable_stored_gpm_falls_back_to_derivation() {
        let filament = FilamentProperties {
            diameter_mm: Some(1.75),
            density: Some(1.24),
            grams_per_meter: Some(f64::NAN),
        };
        assert!((filament.grams_per_meter() - 2.9825).abs() < 0.001);
    }

    #[test]
    fn test_validate() {
        assert!(FilamentProperties::default().validate().is_ok());
        assert!(FilamentProperties::from_diameter_density(1.75, 1.24)
            .validate()
            .is_ok());

        let negative = FilamentProperties {
            diameter_mm: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(FilamentError::InvalidValue { .. })
        ));

        let nan = FilamentProperties {
            density: Some(f64::NAN),
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_remaining_after_use_clamps_at_zero() {
        assert_eq!(remaining_after_use(100.0, 30.0), 70.0);
        assert_eq!(remaining_after_use(10.0, 30.0), 0.0);
        assert_eq!(remaining_after_use(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_serde_field_names() {
        let filament = FilamentProperties::from_diameter_density(1.75, 1.24);
        let json = serde_json::to_value(filament).unwrap();
        assert_eq!(json["diameterMm"], 1.75);
        assert_eq!(json["density"], 1.24);
        assert!(json["gramsPerMeter"].is_null());
    }
}
