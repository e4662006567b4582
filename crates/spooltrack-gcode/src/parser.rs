//! Streaming extrusion parser with modal state tracking.
//!
//! Reconstructs cumulative extrusion from a toolpath file in a single
//! forward pass with O(1) auxiliary state. Slicers encode consumption in
//! three independent ways - declared header comments, linear filament
//! length on the `E` axis, and volumetric `E` values after `M200` - and
//! the parser records all evidence it finds without deciding between
//! them; that is the estimator's job.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the `E` parameter of a move is interpreted.
///
/// Modal: set by `M82`/`M83` and persistent until the other is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrusionMode {
    /// `E` is a cumulative extruder position (M82)
    Absolute,
    /// `E` is an incremental delta (M83)
    Relative,
}

impl Default for ExtrusionMode {
    fn default() -> Self {
        Self::Absolute
    }
}

/// Totals declared by the slicer in comment lines.
///
/// For each variant the first occurrence wins; later duplicate header
/// comments are ignored. Some slicers print a summary both at the top
/// and the bottom of the file, so the top one is honored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTotals {
    /// `filament used [g] = <n>` - declared mass in grams
    pub filament_used_g: Option<f64>,
    /// `filament used = <n>` - declared length in meters
    pub filament_used_m: Option<f64>,
    /// `MATERIAL_USED_MM: <n>` - declared length in millimeters
    pub material_used_mm: Option<f64>,
}

/// Immutable outcome of one parse pass, produced at end of stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Declared totals scraped from comment lines
    pub header: HeaderTotals,
    /// Extrusion accounting mode in effect at end of stream
    pub extrusion_mode: ExtrusionMode,
    /// Whether volumetric extrusion (M200) was in effect at end of stream
    pub volumetric: bool,
    /// Accumulated positive extrusion: mm³ if volumetric, linear mm otherwise
    pub total_extrusion: f64,
    /// Whether any positive extrusion delta was observed
    pub has_extrusion: bool,
}

/// Single-pass extrusion parser.
///
/// Feed lines with [`process_line`](Self::process_line) and call
/// [`finish`](Self::finish) at end of stream. Unrecognized or malformed
/// lines are skipped silently; `total_extrusion` only ever grows, since
/// negative deltas (retractions) are discarded rather than subtracted.
///
/// Quirk carried over from the upstream tracker: a bare `M200` with no
/// `S` parameter *enables* volumetric mode, although most firmwares
/// treat a parameterless `M200` as a report of the current value.
/// `M200 S0` explicitly disables it.
#[derive(Debug, Default)]
pub struct ExtrusionParser {
    header: HeaderTotals,
    mode: ExtrusionMode,
    volumetric: bool,
    last_e: f64,
    total_extrusion: f64,
    has_extrusion: bool,
}

fn header_grams_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i);\s*filament\s+used\s*\[g\]\s*=\s*([0-9.+\-eE]+)")
            .expect("invalid regex pattern")
    })
}

fn header_meters_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i);\s*filament\s+used\s*=\s*([0-9.+\-eE]+)").expect("invalid regex pattern")
    })
}

fn header_millimeters_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i);?\s*MATERIAL_USED_MM\s*:\s*([0-9.+\-eE]+)").expect("invalid regex pattern")
    })
}

fn absolute_mode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^|\s)M82\b").expect("invalid regex pattern"))
}

fn relative_mode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^|\s)M83\b").expect("invalid regex pattern"))
}

fn volumetric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^|\s)M200\b").expect("invalid regex pattern"))
}

fn linear_move_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^|\s)G0?[01]\b").expect("invalid regex pattern"))
}

fn e_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"E(-?\d*\.?\d+(?:[eE][+-]?\d+)?)").expect("invalid regex pattern")
    })
}

fn s_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)S(-?\d*\.?\d+(?:[eE][+-]?\d+)?)").expect("invalid regex pattern")
    })
}

fn capture_f64(re: &Regex, line: &str) -> Option<f64> {
    re.captures(line).and_then(|caps| caps[1].parse().ok())
}

impl ExtrusionParser {
    /// Create a parser with fresh state (absolute mode, no extrusion).
    pub fn new() -> Self {
        Self::default()
    }

    /// Running extrusion total. Non-decreasing over the life of the parser.
    pub fn total_extrusion(&self) -> f64 {
        self.total_extrusion
    }

    /// Process one line of the stream.
    ///
    /// Never fails: lines that parse to nothing useful contribute nothing.
    pub fn process_line(&mut self, raw_line: &str) {
        let line = raw_line.trim();
        if line.is_empty() {
            return;
        }

        // Comment lines carry header metadata only; commands inside a
        // comment are not executed.
        if line.starts_with(';') {
            self.scan_header(line);
            return;
        }

        // A trailing inline comment is not part of the command either
        let code = match line.find(';') {
            Some(pos) => line[..pos].trim_end(),
            None => line,
        };

        if absolute_mode_re().is_match(code) {
            self.mode = ExtrusionMode::Absolute;
        }
        if relative_mode_re().is_match(code) {
            self.mode = ExtrusionMode::Relative;
        }
        if volumetric_re().is_match(code) {
            self.volumetric = match s_value_re().captures(code) {
                Some(caps) => caps[1].parse::<f64>().map(|v| v > 0.0).unwrap_or(false),
                // No S parameter: treated as "on" (see type-level docs)
                None => true,
            };
        }

        if linear_move_re().is_match(code) {
            if let Some(e) = capture_f64(e_value_re(), code) {
                let delta = match self.mode {
                    ExtrusionMode::Absolute => {
                        let delta = e - self.last_e;
                        // Always rebaseline, so a retraction sets up the
                        // next forward move correctly
                        self.last_e = e;
                        delta
                    }
                    ExtrusionMode::Relative => e,
                };
                if delta > 0.0 {
                    self.total_extrusion += delta;
                    self.has_extrusion = true;
                }
            }
        }
    }

    fn scan_header(&mut self, line: &str) {
        if self.header.filament_used_m.is_none() {
            if let Some(value) = capture_f64(header_meters_re(), line) {
                self.header.filament_used_m = Some(value);
            }
        }
        if self.header.filament_used_g.is_none() {
            if let Some(value) = capture_f64(header_grams_re(), line) {
                self.header.filament_used_g = Some(value);
            }
        }
        if self.header.material_used_mm.is_none() {
            if let Some(value) = capture_f64(header_millimeters_re(), line) {
                self.header.material_used_mm = Some(value);
            }
        }
    }

    /// Finalize at end of stream and return the immutable result.
    pub fn finish(self) -> ParseResult {
        ParseResult {
            header: self.header,
            extrusion_mode: self.mode,
            volumetric: self.volumetric,
            total_extrusion: self.total_extrusion,
            has_extrusion: self.has_extrusion,
        }
    }
}

/// Parse an in-memory line sequence. Convenience for callers and tests
/// that already hold the lines; file streaming goes through
/// [`crate::analyzer::analyze_file`].
pub fn parse_lines<I>(lines: I) -> ParseResult
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut parser = ExtrusionParser::new();
    for line in lines {
        parser.process_line(line.as_ref());
    }
    parser.finish()
}
