//! Core numerics for studying floating-point rounding.
//!
//! This crate provides two independent, stateless components:
//!
//! - an **epsilon prober** that finds machine epsilon empirically by halving
//!   a trial value until `1.0 + t` collapses to `1.0`, and
//! - a **polynomial evaluator** that computes the same polynomial by direct
//!   summation and by Horner's scheme so that their rounding behavior can be
//!   compared against an exact value.
//!
//! Everything is generic over the [`Scalar`](types::Scalar) trait, which is
//! implemented for `f32` and `f64`. Runtime selection goes through
//! [`PrecisionKind`](types::PrecisionKind).
//!
//! # Modules
//!
//! - [`comparison`]: Error measurement of both strategies against an exact value
//! - [`config`]: Probe trace sampling and comparison tolerances
//! - [`epsilon`]: Machine epsilon prober
//! - [`error`]: Error types
//! - [`layout`]: IEEE 754 bit layout of each precision
//! - [`polynomial`]: Classical and Horner evaluation
//! - [`scenario`]: Named scenarios with known exact values
//! - [`types`]: Scalar trait, precision tag and constants
//!
//! # Example
//!
//! ```
//! use floatlab_core::prelude::*;
//!
//! let probe = probe::<f32>();
//! assert_eq!(probe.iterations, 23);
//!
//! let coeffs = [-1.0f32, 3.0, -3.0, 1.0];
//! let classical = evaluate_classical(&coeffs, 1.001).unwrap();
//! let horner = evaluate_horner(&coeffs, 1.001).unwrap();
//! assert!((f64::from(horner) - 1e-9).abs() <= (f64::from(classical) - 1e-9).abs());
//! ```

pub mod comparison;
pub mod config;
pub mod epsilon;
pub mod error;
pub mod layout;
pub mod polynomial;
pub mod scenario;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{ConfigError, EvaluationError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use floatlab_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparison::{compare, Comparison, MethodOutcome};
    pub use crate::config::{ComparisonConfig, ProbeConfig, ProbeConfigBuilder};
    pub use crate::epsilon::{
        probe, probe_epsilon, probe_with_trace, EpsilonProbe, EpsilonReport, ProbeStep,
    };
    pub use crate::error::{ConfigError, EvaluationError, Result};
    pub use crate::layout::FloatLayout;
    pub use crate::polynomial::{
        evaluate_both, evaluate_classical, evaluate_horner, Classical, EvaluationPair,
        EvaluationStrategy, Horner, OperationCount, Polynomial,
    };
    pub use crate::scenario::Scenario;
    pub use crate::types::{constants, PrecisionKind, Scalar};
}
