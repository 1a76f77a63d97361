//! Configuration errors.
//!
//! Only invalid setup is reported as an error. Numeric trouble during a
//! run (non-finite objective values, exhausted budget) is absorbed by the
//! search loop and shows up in the result instead.

use thiserror::Error;

/// Result alias for fallible setup operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid bounds or optimizer configuration.
///
/// Always raised before the first objective evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No dimensions were supplied.
    #[error("bounds must contain at least one dimension")]
    EmptyBounds,

    /// A `(lower, upper)` pair is reversed or not finite.
    #[error("invalid bound in dimension {dimension}: [{lower}, {upper}]")]
    InvalidBound {
        dimension: usize,
        lower: f64,
        upper: f64,
    },

    /// A parameter that must be strictly positive is not.
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// A parameter lies outside its admissible range.
    #[error("{name} must be in {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// The evaluation budget is zero.
    #[error("evaluation budget must be at least 1")]
    ZeroBudget,

    /// A caller-supplied point does not match the bounds.
    #[error("expected a point of dimension {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Linear cooling needs a fixed number of outer iterations.
    #[error("linear cooling requires max_iterations > 0")]
    MissingIterationCap,
}
