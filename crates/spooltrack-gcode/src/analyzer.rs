//! One-shot analysis facade: stream a file, parse it, estimate consumption.

use std::path::Path;

use serde::{Deserialize, Serialize};
use spooltrack_core::filament::FilamentProperties;
use tracing::debug;

use crate::error::AnalysisResult;
use crate::estimate::{estimate, ConsumptionEstimate};
use crate::parser::{ExtrusionParser, ParseResult};
use crate::reader::GcodeFileReader;

/// Full analysis of one toolpath file.
///
/// Carries the consumption estimate plus the raw parse fields, so a
/// caller can surface the provenance to the user and decide whether to
/// deduct the figure from a stored spool. Persistence is the caller's
/// concern; this value is created fresh per request and immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcodeAnalysis {
    /// Best-estimate consumption with labeled provenance
    pub estimate: ConsumptionEstimate,
    /// Raw evidence the estimate was derived from
    pub parse: ParseResult,
}

/// Analyze a toolpath file on disk.
///
/// Streams the file line by line (bounded buffering, no whole-file
/// materialization), then runs the estimator over the parse result.
///
/// # Errors
/// Returns an error only for I/O failures: missing file, unreadable
/// stream. Malformed G-code never fails an analysis.
pub fn analyze_file(
    path: impl AsRef<Path>,
    filament: &FilamentProperties,
) -> AnalysisResult<GcodeAnalysis> {
    let reader = GcodeFileReader::open(path.as_ref())?;
    let mut parser = ExtrusionParser::new();

    let stats = reader.read_lines(|line| parser.process_line(line))?;
    debug!(
        path = %reader.path().display(),
        lines = stats.lines_read,
        bytes = stats.bytes_read,
        elapsed_ms = stats.read_time_ms,
        "streamed toolpath file"
    );

    let parse = parser.finish();
    let estimate = estimate(&parse, filament);
    debug!(source = %estimate.source, grams = estimate.grams, "consumption estimated");

    Ok(GcodeAnalysis { estimate, parse })
}
