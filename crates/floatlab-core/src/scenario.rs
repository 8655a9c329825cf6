//! Named evaluation scenarios with a known exact value.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::comparison::{compare, Comparison};
use crate::config::ComparisonConfig;
use crate::error::Result;
use crate::polynomial::Polynomial;
use crate::types::{PrecisionKind, Scalar};

/// A polynomial, an evaluation point, and the exact value of the polynomial
/// there.
///
/// Coefficients and point are kept in f64 and narrowed to the working
/// precision when the scenario is run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scenario {
    /// Short label.
    pub name: String,
    /// Closed form of the polynomial, for display.
    pub description: String,
    /// Ascending coefficients.
    pub coefficients: Vec<f64>,
    /// Evaluation point.
    pub point: f64,
    /// Exact value at `point`.
    pub exact: f64,
}

impl Scenario {
    /// Create a scenario.
    pub fn new<S1, S2>(
        name: S1,
        description: S2,
        coefficients: Vec<f64>,
        point: f64,
        exact: f64,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            coefficients,
            point,
            exact,
        }
    }

    /// `(x - 1)^3 = x^3 - 3x^2 + 3x - 1` at `x = 1.001`, exact value `1e-9`.
    ///
    /// The triple root next to the evaluation point makes the expanded terms
    /// (of size about 3) cancel down to a value nine orders of magnitude
    /// smaller.
    pub fn triple_root() -> Self {
        Self::new(
            "triple-root",
            "(x-1)^3",
            vec![-1.0, 3.0, -3.0, 1.0],
            1.001,
            1.0e-9,
        )
    }

    /// The coefficients narrowed to precision `T`.
    pub fn polynomial<T: Scalar>(&self) -> Result<Polynomial<T>> {
        Polynomial::<f64>::from_slice(&self.coefficients).map(|p| p.convert())
    }

    /// Run the comparison at precision `T`.
    pub fn compare<T: Scalar>(&self, config: &ComparisonConfig) -> Result<Comparison> {
        let polynomial = self.polynomial::<T>()?;
        compare(
            polynomial.coefficients(),
            <T as Scalar>::from_f64(self.point),
            self.exact,
            config,
        )
    }

    /// Run the comparison at a precision chosen at runtime.
    pub fn compare_at(&self, kind: PrecisionKind, config: &ComparisonConfig) -> Result<Comparison> {
        match kind {
            PrecisionKind::Single => self.compare::<f32>(config),
            PrecisionKind::Double => self.compare::<f64>(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationError;

    #[test]
    fn test_triple_root_definition() {
        let scenario = Scenario::triple_root();
        assert_eq!(scenario.coefficients, vec![-1.0, 3.0, -3.0, 1.0]);
        assert_eq!(scenario.point, 1.001);
        assert_eq!(scenario.exact, 1.0e-9);

        let poly = scenario.polynomial::<f32>().unwrap();
        assert_eq!(poly.degree(), 3);
    }

    #[test]
    fn test_triple_root_comparisons() {
        let config = ComparisonConfig::default();
        for kind in PrecisionKind::ALL {
            let result = Scenario::triple_root().compare_at(kind, &config).unwrap();
            assert_eq!(result.precision, kind);
            assert!(result.horner_at_least_as_accurate());
        }
    }

    #[test]
    fn test_single_precision_misses_exact_value() {
        let result = Scenario::triple_root()
            .compare::<f32>(&ComparisonConfig::default())
            .unwrap();
        assert!(result.classical.absolute_error > 1.0e-9);
        assert!(result.horner.absolute_error > 0.0);
        assert!(result.classical.relative_error.unwrap() > 1.0);
    }

    #[test]
    fn test_empty_scenario_fails() {
        let scenario = Scenario::new("empty", "", Vec::new(), 1.0, 0.0);
        assert_eq!(
            scenario.compare_at(PrecisionKind::Double, &ComparisonConfig::default()),
            Err(EvaluationError::EmptyCoefficients)
        );
    }
}
