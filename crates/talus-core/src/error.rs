//! Error types for talus-core
//!
//! The umbrella [`TalusError`] collects the per-concern errors from the
//! companion crates so session-level operations can return one type.
//! Every variant is recoverable at the boundary of a single operation;
//! none corrupts previously computed state.

use talus_fit::FitError;
use talus_io::ParseError;
use talus_stats::StatsError;
use thiserror::Error;

/// Range violations on scalar inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Density must be a positive divisor for mass-to-volume conversion
    #[error("density must be positive, got {density} kg/m³")]
    NonPositiveDensity { density: f64 },
}

/// Main error type for talus operations
#[derive(Error, Debug)]
pub enum TalusError {
    /// Token sequence could not be parsed (wrong locale, no values)
    #[error("input format error: {0}")]
    Parse(#[from] ParseError),

    /// Empirical statistics failed (bad level, empty sample)
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// A family's maximum-likelihood fit failed
    #[error("fit error: {0}")]
    Fit(#[from] FitError),

    /// A scalar input was outside its valid range
    #[error(transparent)]
    Range(#[from] RangeError),

    /// I/O failure in the persistence side channel
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session state could not be serialized or deserialized
    #[error("session serialization error: {0}")]
    Persist(#[from] serde_json::Error),
}

/// Result type alias for talus operations
pub type TalusResult<T> = Result<T, TalusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_distinct_from_format_error() {
        let empty: TalusError = StatsError::EmptySample.into();
        let format: TalusError = ParseError::NoValues.into();
        assert!(matches!(empty, TalusError::Stats(StatsError::EmptySample)));
        assert!(matches!(format, TalusError::Parse(ParseError::NoValues)));
    }

    #[test]
    fn test_density_error_message_names_value() {
        let error = RangeError::NonPositiveDensity { density: -5.0 };
        assert!(error.to_string().contains("-5"));
    }
}
