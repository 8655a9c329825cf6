//! Accuracy comparison of the evaluation strategies against an exact value.
//!
//! The exact value is supplied by the caller (usually from a closed form such
//! as `(x - 1)^3`) and is always held in f64. Results computed at single
//! precision are widened to f64 before their errors are measured, which is
//! exact.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ComparisonConfig;
use crate::error::Result;
use crate::polynomial::{Classical, EvaluationStrategy, Horner, OperationCount};
use crate::types::{PrecisionKind, Scalar};

/// Outcome of one strategy in a comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodOutcome {
    /// Strategy name.
    pub method: String,
    /// Computed value, widened to f64.
    pub value: f64,
    /// `|value - exact|`.
    pub absolute_error: f64,
    /// `|value - exact| / |exact|`, or `None` when the exact value is zero.
    pub relative_error: Option<f64>,
    /// Whether the absolute error is within the configured tolerance.
    pub agrees: bool,
    /// Operations performed for this degree.
    pub operations: OperationCount,
}

/// Side-by-side result of the classical and Horner strategies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comparison {
    /// Working precision of the evaluation.
    pub precision: PrecisionKind,
    /// Degree of the evaluated polynomial.
    pub degree: usize,
    /// Evaluation point as represented in the working precision.
    pub point: f64,
    /// Exact reference value.
    pub exact: f64,
    /// Absolute tolerance used for the agreement checks.
    pub tolerance: f64,
    /// Classical strategy outcome.
    pub classical: MethodOutcome,
    /// Horner strategy outcome.
    pub horner: MethodOutcome,
    /// `|classical - horner|`.
    pub discrepancy: f64,
}

impl Comparison {
    /// Whether Horner's result is at least as close to the exact value.
    pub fn horner_at_least_as_accurate(&self) -> bool {
        self.horner.absolute_error <= self.classical.absolute_error
    }

    /// Ratio of the classical error to the Horner error.
    ///
    /// `None` when Horner's result is exact.
    pub fn error_ratio(&self) -> Option<f64> {
        (self.horner.absolute_error > 0.0)
            .then(|| self.classical.absolute_error / self.horner.absolute_error)
    }

    /// The more accurate outcome; Horner wins ties.
    pub fn more_accurate(&self) -> &MethodOutcome {
        if self.horner_at_least_as_accurate() {
            &self.horner
        } else {
            &self.classical
        }
    }
}

/// Evaluate `coeffs` at `x` with both strategies and measure each against
/// `exact`.
///
/// # Errors
///
/// Fails with the empty-sequence domain error, or with a configuration
/// error if `config` is invalid.
pub fn compare<T: Scalar>(
    coeffs: &[T],
    x: T,
    exact: f64,
    config: &ComparisonConfig,
) -> Result<Comparison> {
    config.validate()?;

    let tolerance = config.absolute_tolerance(Scalar::to_f64(T::EPSILON), exact);
    let classical = outcome(&Classical, coeffs, x, exact, tolerance)?;
    let horner = outcome(&Horner, coeffs, x, exact, tolerance)?;
    let discrepancy = (classical.value - horner.value).abs();

    debug!(
        "{} comparison at x = {}: classical = {:e} (err {:e}), horner = {:e} (err {:e})",
        T::KIND,
        x,
        classical.value,
        classical.absolute_error,
        horner.value,
        horner.absolute_error
    );

    Ok(Comparison {
        precision: T::KIND,
        degree: coeffs.len() - 1,
        point: Scalar::to_f64(x),
        exact,
        tolerance,
        classical,
        horner,
        discrepancy,
    })
}

fn outcome<T, S>(
    strategy: &S,
    coeffs: &[T],
    x: T,
    exact: f64,
    tolerance: f64,
) -> Result<MethodOutcome>
where
    T: Scalar,
    S: EvaluationStrategy<T>,
{
    let value = Scalar::to_f64(strategy.evaluate(coeffs, x)?);
    let absolute_error = (value - exact).abs();
    let relative_error = (exact != 0.0).then(|| absolute_error / exact.abs());

    Ok(MethodOutcome {
        method: strategy.name().to_string(),
        value,
        absolute_error,
        relative_error,
        agrees: absolute_error <= tolerance,
        operations: strategy.operation_count(coeffs.len().saturating_sub(1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationError;
    use approx::assert_relative_eq;

    #[test]
    fn test_well_conditioned_comparison() {
        // 1 + 2x + 3x^2 at x = 0.5 is 2.75
        let result = compare(&[1.0f64, 2.0, 3.0], 0.5, 2.75, &ComparisonConfig::default()).unwrap();

        assert_eq!(result.precision, PrecisionKind::Double);
        assert_eq!(result.degree, 2);
        assert_eq!(result.classical.value, 2.75);
        assert_eq!(result.horner.value, 2.75);
        assert!(result.classical.agrees && result.horner.agrees);
        assert_eq!(result.discrepancy, 0.0);
        assert_eq!(result.error_ratio(), None);
        assert_eq!(result.more_accurate().method, "horner");
    }

    #[test]
    fn test_triple_root_single_precision() {
        let result = compare(
            &[-1.0f32, 3.0, -3.0, 1.0],
            1.001,
            1.0e-9,
            &ComparisonConfig::default(),
        )
        .unwrap();

        assert_eq!(result.precision, PrecisionKind::Single);
        assert!(result.horner_at_least_as_accurate());
        assert!(result.error_ratio().unwrap() >= 1.0);
        assert!(result.discrepancy > 0.0);
        assert_eq!(result.classical.operations.multiplications, 10);
        assert_eq!(result.horner.operations.multiplications, 3);
        assert_relative_eq!(
            result.classical.relative_error.unwrap(),
            result.classical.absolute_error / 1.0e-9
        );
    }

    #[test]
    fn test_zero_exact_value_has_no_relative_error() {
        let result = compare(&[0.0f64, 1.0], 0.0, 0.0, &ComparisonConfig::default()).unwrap();
        assert_eq!(result.classical.relative_error, None);
        assert_eq!(result.horner.relative_error, None);
    }

    #[test]
    fn test_errors_propagate() {
        let empty: [f32; 0] = [];
        assert_eq!(
            compare(&empty, 1.0, 0.0, &ComparisonConfig::default()),
            Err(EvaluationError::EmptyCoefficients)
        );

        let bad = ComparisonConfig::new().with_tolerance_factor(-1.0);
        assert!(matches!(
            compare(&[1.0f64], 1.0, 1.0, &bad),
            Err(EvaluationError::Config(_))
        ));
    }
}
