//! # SpoolTrack
//!
//! Filament spool consumption tracking built around a streaming G-code
//! extrusion analysis engine.
//!
//! ## Architecture
//!
//! SpoolTrack is organized as a workspace:
//!
//! 1. **spooltrack-core** - filament properties, unit conversions
//! 2. **spooltrack-gcode** - streaming parser and consumption estimator
//! 3. **spooltrack** - CLI binary that runs one analysis and prints JSON
//!
//! The engine itself performs no persistence: it returns a
//! [`GcodeAnalysis`] and leaves spool deduction and usage logging to the
//! caller.

pub use spooltrack_core::{
    grams_from_length, mm3_to_cm3, mm_to_meters, remaining_after_use, FilamentError,
    FilamentProperties, FilamentResult, DEFAULT_PLA_DENSITY,
};

pub use spooltrack_gcode::{
    analyze_file, estimate, parse_lines, AnalysisError, AnalysisResult, ConsumptionEstimate,
    EstimateSource, ExtrusionMode, ExtrusionParser, FileReadStats, GcodeAnalysis, GcodeFileReader,
    HeaderTotals, ParseResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Structured console logging with `RUST_LOG` environment variable
/// support, defaulting to `info`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
