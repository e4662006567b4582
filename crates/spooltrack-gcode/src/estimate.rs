//! Consumption estimation from a parse result.
//!
//! A pure, deterministic decision chain over the evidence the parser
//! collected. Slicer-declared header totals are authoritative and win
//! over geometry-derived fallbacks; the provenance of whichever branch
//! fired is returned so callers can decide how much to trust the figure
//! before deducting it from a spool.

use std::fmt;

use serde::{Deserialize, Serialize};
use spooltrack_core::filament::{FilamentProperties, DEFAULT_PLA_DENSITY};
use spooltrack_core::units::{grams_from_length, mm3_to_cm3, mm_to_meters};

use crate::parser::ParseResult;

/// Which evidence an estimate is anchored on, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Slicer-declared grams in the header comments
    HeaderG,
    /// Slicer-declared meters in the header comments
    HeaderM,
    /// Slicer-declared millimeters in the header comments
    HeaderMm,
    /// Accumulated volumetric extrusion (mm³) times material density
    FallbackVolumetric,
    /// Accumulated linear extrusion (mm) times linear density
    FallbackLength,
}

impl fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderG => write!(f, "header_g"),
            Self::HeaderM => write!(f, "header_m"),
            Self::HeaderMm => write!(f, "header_mm"),
            Self::FallbackVolumetric => write!(f, "fallback_volumetric"),
            Self::FallbackLength => write!(f, "fallback_length"),
        }
    }
}

/// Best-estimate filament consumption for one toolpath file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionEstimate {
    /// Estimated mass consumed, grams. Zero when no mass conversion was
    /// possible, never negative.
    pub grams: f64,
    /// Estimated length consumed, meters. `None` when the evidence chain
    /// anchored on grams and no linear density is known.
    pub meters: Option<f64>,
    /// Evidence the estimate is anchored on
    pub source: EstimateSource,
}

/// Estimate consumption from a parse result and filament properties.
///
/// Evaluates the branches in strict order; the first positive-valued
/// source wins:
///
/// 1. header grams
/// 2. header meters
/// 3. header millimeters
/// 4. volumetric fallback (density, or 1.24 g/cm³ PLA default)
/// 5. length fallback
///
/// Never fails; missing filament properties degrade the output (the
/// derived unit is omitted or zero) rather than erroring.
pub fn estimate(parse: &ParseResult, filament: &FilamentProperties) -> ConsumptionEstimate {
    let grams_per_meter = filament.grams_per_meter();

    if let Some(grams) = positive(parse.header.filament_used_g) {
        let meters = (grams_per_meter > 0.0).then(|| grams / grams_per_meter);
        return ConsumptionEstimate {
            grams,
            meters,
            source: EstimateSource::HeaderG,
        };
    }

    if let Some(meters) = positive(parse.header.filament_used_m) {
        return ConsumptionEstimate {
            grams: grams_from_length(meters, grams_per_meter),
            meters: Some(meters),
            source: EstimateSource::HeaderM,
        };
    }

    if let Some(millimeters) = positive(parse.header.material_used_mm) {
        let meters = mm_to_meters(millimeters);
        return ConsumptionEstimate {
            grams: grams_from_length(meters, grams_per_meter),
            meters: Some(meters),
            source: EstimateSource::HeaderMm,
        };
    }

    if parse.volumetric {
        let density = filament
            .density
            .filter(|d| *d > 0.0)
            .unwrap_or(DEFAULT_PLA_DENSITY);
        let grams = mm3_to_cm3(parse.total_extrusion) * density;
        let meters = (grams_per_meter > 0.0).then(|| grams / grams_per_meter);
        return ConsumptionEstimate {
            grams,
            meters,
            source: EstimateSource::FallbackVolumetric,
        };
    }

    let meters = mm_to_meters(parse.total_extrusion);
    ConsumptionEstimate {
        grams: grams_from_length(meters, grams_per_meter),
        meters: Some(meters),
        source: EstimateSource::FallbackLength,
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}
