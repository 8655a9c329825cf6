//! Polynomial evaluation by direct summation and by Horner's scheme.
//!
//! Coefficients are stored in ascending order: index `i` holds the
//! coefficient of `x^i`, so a slice of length `n + 1` describes a polynomial
//! of degree `n`.
//!
//! # Strategies
//!
//! - **Classical**: `p(x) = Σ a_i · x^i`, where every power `x^i` is rebuilt
//!   from scratch with `i` multiplications. This costs `O(n²)` multiplications
//!   and sums terms of mixed sign and magnitude directly, which is what makes
//!   it lose digits near a multiple root.
//! - **Horner**: `p(x) = a_0 + x(a_1 + x(a_2 + ... + x·a_n))`, evaluated from
//!   the leading coefficient down. `O(n)` multiplications and smaller
//!   intermediate values.
//!
//! Both strategies reject an empty coefficient sequence with
//! [`EvaluationError::EmptyCoefficients`].

use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, Result};
use crate::types::Scalar;

/// Evaluate `p(x)` by summing `a_i · x^i`, recomputing each power.
///
/// # Errors
///
/// Returns [`EvaluationError::EmptyCoefficients`] if `coeffs` is empty.
pub fn evaluate_classical<T: Scalar>(coeffs: &[T], x: T) -> Result<T> {
    if coeffs.is_empty() {
        return Err(EvaluationError::EmptyCoefficients);
    }
    Ok(classical_sum(coeffs, x))
}

/// Evaluate `p(x)` with Horner's nested multiplication.
///
/// # Errors
///
/// Returns [`EvaluationError::EmptyCoefficients`] if `coeffs` is empty.
pub fn evaluate_horner<T: Scalar>(coeffs: &[T], x: T) -> Result<T> {
    let (&leading, rest) = coeffs
        .split_last()
        .ok_or(EvaluationError::EmptyCoefficients)?;
    Ok(horner_nest(leading, rest, x))
}

fn classical_sum<T: Scalar>(coeffs: &[T], x: T) -> T {
    let mut sum = T::zero();
    for (i, &coeff) in coeffs.iter().enumerate() {
        // x^i from scratch; no power is carried over from the previous term.
        let mut power = T::one();
        for _ in 0..i {
            power = power * x;
        }
        sum = sum + coeff * power;
    }
    sum
}

fn horner_nest<T: Scalar>(leading: T, rest: &[T], x: T) -> T {
    // Separate multiply and add: a fused mul_add rounds once per step and
    // would change the error profile being measured.
    rest.iter()
        .rev()
        .fold(leading, |acc, &coeff| acc * x + coeff)
}

/// Both evaluations of the same polynomial at the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationPair<T> {
    /// Result of [`evaluate_classical`].
    pub classical: T,
    /// Result of [`evaluate_horner`].
    pub horner: T,
}

/// Run both strategies on the same inputs.
pub fn evaluate_both<T: Scalar>(coeffs: &[T], x: T) -> Result<EvaluationPair<T>> {
    Ok(EvaluationPair {
        classical: evaluate_classical(coeffs, x)?,
        horner: evaluate_horner(coeffs, x)?,
    })
}

/// Number of floating-point operations a strategy performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperationCount {
    /// Multiplications performed.
    pub multiplications: usize,
    /// Additions performed.
    pub additions: usize,
}

impl OperationCount {
    /// Total operations.
    pub fn total(&self) -> usize {
        self.multiplications + self.additions
    }
}

/// A polynomial evaluation algorithm.
pub trait EvaluationStrategy<T: Scalar>: Debug + Send + Sync {
    /// Human-readable name of the strategy.
    fn name(&self) -> &'static str;

    /// Evaluate the polynomial with ascending `coeffs` at `x`.
    fn evaluate(&self, coeffs: &[T], x: T) -> Result<T>;

    /// Exact operation count for a polynomial of the given degree.
    fn operation_count(&self, degree: usize) -> OperationCount;
}

/// Direct term-by-term summation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classical;

/// Horner's nested multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Horner;

impl<T: Scalar> EvaluationStrategy<T> for Classical {
    fn name(&self) -> &'static str {
        "classical"
    }

    fn evaluate(&self, coeffs: &[T], x: T) -> Result<T> {
        evaluate_classical(coeffs, x)
    }

    fn operation_count(&self, degree: usize) -> OperationCount {
        // i multiplications for x^i, one for a_i * x^i, one addition per term.
        OperationCount {
            multiplications: degree * (degree + 1) / 2 + (degree + 1),
            additions: degree + 1,
        }
    }
}

impl<T: Scalar> EvaluationStrategy<T> for Horner {
    fn name(&self) -> &'static str {
        "horner"
    }

    fn evaluate(&self, coeffs: &[T], x: T) -> Result<T> {
        evaluate_horner(coeffs, x)
    }

    fn operation_count(&self, degree: usize) -> OperationCount {
        OperationCount {
            multiplications: degree,
            additions: degree,
        }
    }
}

/// A polynomial with at least one coefficient, stored in ascending order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Polynomial<T> {
    coefficients: Vec<T>,
}

impl<T: Scalar> Polynomial<T> {
    /// Create a polynomial from ascending coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::EmptyCoefficients`] if `coefficients` is empty.
    pub fn new(coefficients: Vec<T>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(EvaluationError::EmptyCoefficients);
        }
        Ok(Self { coefficients })
    }

    /// Create a polynomial by copying ascending coefficients.
    pub fn from_slice(coefficients: &[T]) -> Result<Self> {
        Self::new(coefficients.to_vec())
    }

    /// Degree of the polynomial (number of coefficients minus one).
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Ascending coefficients.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Leading (highest-degree) coefficient.
    pub fn leading_coefficient(&self) -> T {
        self.coefficients[self.degree()]
    }

    /// Evaluate with the classical method.
    pub fn evaluate_classical(&self, x: T) -> T {
        classical_sum(&self.coefficients, x)
    }

    /// Evaluate with Horner's method.
    pub fn evaluate_horner(&self, x: T) -> T {
        horner_nest(
            self.leading_coefficient(),
            &self.coefficients[..self.degree()],
            x,
        )
    }

    /// Evaluate with an arbitrary strategy.
    pub fn evaluate_with<S>(&self, strategy: &S, x: T) -> Result<T>
    where
        S: EvaluationStrategy<T> + ?Sized,
    {
        strategy.evaluate(&self.coefficients, x)
    }

    /// Convert the coefficients to another precision.
    pub fn convert<U: Scalar>(&self) -> Polynomial<U> {
        Polynomial {
            coefficients: self
                .coefficients
                .iter()
                .map(|&c| <U as Scalar>::from_f64(Scalar::to_f64(c)))
                .collect(),
        }
    }
}

impl<T: Scalar> TryFrom<Vec<T>> for Polynomial<T> {
    type Error = EvaluationError;

    fn try_from(coefficients: Vec<T>) -> Result<Self> {
        Self::new(coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_polynomial() {
        for x in [-3.5f64, 0.0, 1.0, 1e10] {
            assert_eq!(evaluate_classical(&[1.0], x).unwrap(), 1.0);
            assert_eq!(evaluate_horner(&[1.0], x).unwrap(), 1.0);
            assert_eq!(evaluate_classical(&[-7.25f32], x as f32).unwrap(), -7.25);
            assert_eq!(evaluate_horner(&[-7.25f32], x as f32).unwrap(), -7.25);
        }
    }

    #[test]
    fn test_identity_polynomial() {
        assert_eq!(evaluate_classical(&[0.0, 1.0], 5.0).unwrap(), 5.0);
        assert_eq!(evaluate_horner(&[0.0, 1.0], 5.0).unwrap(), 5.0);
    }

    #[test]
    fn test_quadratic() {
        // 2 - 3x + x^2 at x = 4 is 6
        let coeffs = [2.0, -3.0, 1.0];
        assert_eq!(evaluate_classical(&coeffs, 4.0).unwrap(), 6.0);
        assert_eq!(evaluate_horner(&coeffs, 4.0).unwrap(), 6.0);
    }

    #[test]
    fn test_empty_sequence_is_domain_error() {
        let empty: [f64; 0] = [];
        assert_eq!(
            evaluate_classical(&empty, 1.0),
            Err(EvaluationError::EmptyCoefficients)
        );
        assert_eq!(
            evaluate_horner(&empty, 1.0),
            Err(EvaluationError::EmptyCoefficients)
        );
        assert!(evaluate_both(&empty, 1.0).is_err());
        assert!(Polynomial::<f32>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_triple_root_in_single_precision() {
        let coeffs = [-1.0f32, 3.0, -3.0, 1.0];
        let x = 1.001f32;
        let exact = 1.0e-9f64;

        let pair = evaluate_both(&coeffs, x).unwrap();
        let classical_error = (f64::from(pair.classical) - exact).abs();
        let horner_error = (f64::from(pair.horner) - exact).abs();

        assert!(horner_error <= classical_error);
        assert_ne!(pair.classical, pair.horner);
    }

    #[test]
    fn test_strategy_trait() {
        let poly = Polynomial::new(vec![1.0, 2.0, 3.0]).unwrap();
        let strategies: [&dyn EvaluationStrategy<f64>; 2] = [&Classical, &Horner];
        for strategy in strategies {
            assert_relative_eq!(poly.evaluate_with(strategy, 2.0).unwrap(), 17.0);
        }
        assert_eq!(EvaluationStrategy::<f64>::name(&Classical), "classical");
        assert_eq!(EvaluationStrategy::<f64>::name(&Horner), "horner");
    }

    #[test]
    fn test_operation_counts() {
        let classical = EvaluationStrategy::<f64>::operation_count(&Classical, 3);
        assert_eq!(classical.multiplications, 10);
        assert_eq!(classical.additions, 4);

        let horner = EvaluationStrategy::<f64>::operation_count(&Horner, 3);
        assert_eq!(horner, OperationCount { multiplications: 3, additions: 3 });
        assert_eq!(horner.total(), 6);

        for degree in 0..64 {
            let c = EvaluationStrategy::<f32>::operation_count(&Classical, degree);
            let h = EvaluationStrategy::<f32>::operation_count(&Horner, degree);
            assert!(h.multiplications <= c.multiplications);
        }
    }

    #[test]
    fn test_polynomial_accessors() {
        let poly = Polynomial::try_from(vec![-1.0f32, 3.0, -3.0, 1.0]).unwrap();
        assert_eq!(poly.degree(), 3);
        assert_eq!(poly.leading_coefficient(), 1.0);
        assert_eq!(poly.coefficients(), &[-1.0, 3.0, -3.0, 1.0]);

        let wide: Polynomial<f64> = poly.convert();
        assert_eq!(wide.coefficients(), &[-1.0, 3.0, -3.0, 1.0]);
        assert_eq!(wide.evaluate_horner(2.0), 1.0);
        assert_eq!(wide.evaluate_classical(2.0), 1.0);
    }
}
