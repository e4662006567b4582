//! Error types for filament record validation.

use thiserror::Error;

/// Errors raised when a filament record carries unusable values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilamentError {
    /// A property value is invalid (negative, NaN, infinite).
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        name: String,
        reason: String,
    },
}

/// Result type alias for filament validation.
pub type FilamentResult<T> = Result<T, FilamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filament_error_display() {
        let err = FilamentError::InvalidValue {
            name: "diameter_mm".to_string(),
            reason: "must be non-negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'diameter_mm': must be non-negative"
        );
    }
}
