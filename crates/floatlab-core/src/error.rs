//! Error types for polynomial evaluation and configuration.
//!
//! The numerical core has a deliberately small error surface: a polynomial
//! needs at least one coefficient, and configuration values must be usable.
//! The epsilon prober is total and never fails.

use thiserror::Error;

/// Errors that can occur while evaluating a polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The coefficient sequence was empty.
    ///
    /// A polynomial of degree `n` needs `n + 1` coefficients, so an empty
    /// sequence has no degree and no value. Evaluators report this instead of
    /// returning zero.
    #[error("Coefficient sequence is empty: a polynomial needs at least one coefficient")]
    EmptyCoefficients,

    /// Propagated configuration error.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl EvaluationError {
    /// Whether this is the empty-sequence domain error.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::EmptyCoefficients)
    }
}

/// Errors raised when a configuration value is out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A named parameter has an unusable value.
    #[error("Invalid value `{value}` for `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was rejected
        value: String,
        /// Description of the constraint that was violated
        reason: String,
    },
}

impl ConfigError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S1, S2, S3>(parameter: S1, value: S2, reason: S3) -> Self
    where
        S1: Into<String>,
        S2: std::fmt::Display,
        S3: Into<String>,
    {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, EvaluationError>;
