//! # SpoolTrack G-code
//!
//! Streaming G-code extrusion analysis: reconstructs how much filament a
//! toolpath file consumes, despite the inconsistent ways slicers encode
//! that information.
//!
//! The engine is two components in a one-directional pipeline:
//!
//! 1. [`ExtrusionParser`] - a single-pass, O(1)-state line parser that
//!    accumulates positive extrusion and scrapes slicer-declared totals
//!    from comment lines.
//! 2. [`estimate()`] - a pure function that applies an ordered evidence
//!    chain (header grams, header meters, header millimeters, volumetric
//!    fallback, length fallback) to produce one [`ConsumptionEstimate`]
//!    with a labeled provenance.
//!
//! [`analyze_file`] glues both to the streaming [`GcodeFileReader`] for
//! the common one-shot case.

pub mod analyzer;
pub mod error;
pub mod estimate;
pub mod parser;
pub mod reader;

pub use analyzer::{analyze_file, GcodeAnalysis};
pub use error::{AnalysisError, AnalysisResult};
pub use estimate::{estimate, ConsumptionEstimate, EstimateSource};
pub use parser::{parse_lines, ExtrusionMode, ExtrusionParser, HeaderTotals, ParseResult};
pub use reader::{FileReadStats, GcodeFileReader};
