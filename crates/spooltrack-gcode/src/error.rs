//! Error types for toolpath analysis.
//!
//! Only I/O-level failures surface as errors. Malformed or unrecognized
//! G-code never fails an analysis; those lines are skipped by the parser.

use std::io;
use thiserror::Error;

/// Errors that can occur while analyzing a toolpath file.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The requested file does not exist.
    #[error("File does not exist: {0}")]
    FileNotFound(String),

    /// The path exists but is not a regular file.
    #[error("Path is not a file: {0}")]
    NotAFile(String),

    /// I/O error while reading the stream. Fatal for the request; no
    /// partial result is returned.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::FileNotFound("/tmp/missing.gcode".to_string());
        assert_eq!(err.to_string(), "File does not exist: /tmp/missing.gcode");

        let err = AnalysisError::NotAFile("/tmp".to_string());
        assert_eq!(err.to_string(), "Path is not a file: /tmp");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: AnalysisError = io_err.into();
        assert!(matches!(err, AnalysisError::Io(_)));
    }
}
