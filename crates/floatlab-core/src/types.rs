//! Type definitions for the floating-point precisions under study.
//!
//! This module provides the [`Scalar`] trait that ties together the numeric
//! traits every algorithm in the crate relies on, the runtime
//! [`PrecisionKind`] tag, and per-precision constants.

use num_traits::{Float, FromPrimitive};
use std::fmt::{self, Debug, Display, LowerExp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trait for scalar types whose rounding behavior is studied (f32 or f64).
///
/// This trait combines the numeric traits required by the epsilon prober and
/// the polynomial evaluators with the layout constants of the IEEE 754 binary
/// format backing the type.
pub trait Scalar:
    Float + FromPrimitive + Display + LowerExp + Debug + Default + Copy + Send + Sync + 'static
{
    /// Runtime tag for this precision.
    const KIND: PrecisionKind;

    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Total storage width in bits.
    const TOTAL_BITS: u32;

    /// Explicitly stored mantissa bits (the leading bit is implicit).
    const MANTISSA_BITS: u32;

    /// Exponent field width in bits.
    const EXPONENT_BITS: u32;

    /// Decimal digits that survive a decimal -> binary -> decimal round trip.
    const DECIMAL_DIGITS: u32;

    /// Smallest positive normal value.
    const MIN_POSITIVE: Self;

    /// Largest finite value.
    const MAX: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    ///
    /// Returns None if the conversion fails.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for reporting and comparison against exact values).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    ///
    /// Returns None if the conversion fails.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }
}

impl Scalar for f32 {
    const KIND: PrecisionKind = PrecisionKind::Single;
    const EPSILON: Self = f32::EPSILON;
    const TOTAL_BITS: u32 = 32;
    const MANTISSA_BITS: u32 = f32::MANTISSA_DIGITS - 1;
    const EXPONENT_BITS: u32 = 8;
    const DECIMAL_DIGITS: u32 = f32::DIGITS;
    const MIN_POSITIVE: Self = f32::MIN_POSITIVE;
    const MAX: Self = f32::MAX;
}

impl Scalar for f64 {
    const KIND: PrecisionKind = PrecisionKind::Double;
    const EPSILON: Self = f64::EPSILON;
    const TOTAL_BITS: u32 = 64;
    const MANTISSA_BITS: u32 = f64::MANTISSA_DIGITS - 1;
    const EXPONENT_BITS: u32 = 11;
    const DECIMAL_DIGITS: u32 = f64::DIGITS;
    const MIN_POSITIVE: Self = f64::MIN_POSITIVE;
    const MAX: Self = f64::MAX;
}

/// Floating-point precision selected at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PrecisionKind {
    /// IEEE 754 binary32 (`f32`).
    Single,
    /// IEEE 754 binary64 (`f64`).
    Double,
}

impl PrecisionKind {
    /// Both supported precisions, narrowest first.
    pub const ALL: [Self; 2] = [Self::Single, Self::Double];

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }

    /// Name of the Rust primitive backing this precision.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Single => "f32",
            Self::Double => "f64",
        }
    }

    /// Explicitly stored mantissa bits.
    pub fn mantissa_bits(self) -> u32 {
        match self {
            Self::Single => f32::MANTISSA_BITS,
            Self::Double => f64::MANTISSA_BITS,
        }
    }

    /// Library machine epsilon, widened to f64.
    pub fn epsilon(self) -> f64 {
        match self {
            Self::Single => f64::from(f32::EPSILON),
            Self::Double => f64::EPSILON,
        }
    }
}

impl Display for PrecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Unit round-off, half of machine epsilon.
    pub fn unit_roundoff<T: Scalar>() -> T {
        T::EPSILON / <T as Scalar>::from_f64(2.0)
    }

    /// Exponent `k` such that `epsilon == 2^k`.
    pub fn epsilon_exponent<T: Scalar>() -> i32 {
        -(T::MANTISSA_BITS as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_trait_f32() {
        assert_eq!(<f32 as Scalar>::EPSILON, f32::EPSILON);
        assert_eq!(f32::MANTISSA_BITS, 23);
        assert_eq!(f32::EXPONENT_BITS, 8);
        assert_eq!(
            1 + f32::MANTISSA_BITS + f32::EXPONENT_BITS,
            <f32 as Scalar>::TOTAL_BITS
        );
        assert_eq!(f32::KIND, PrecisionKind::Single);
    }

    #[test]
    fn test_scalar_trait_f64() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert_eq!(f64::MANTISSA_BITS, 52);
        assert_eq!(f64::EXPONENT_BITS, 11);
        assert_eq!(
            1 + f64::MANTISSA_BITS + f64::EXPONENT_BITS,
            <f64 as Scalar>::TOTAL_BITS
        );
        assert_eq!(f64::KIND, PrecisionKind::Double);
    }

    #[test]
    fn test_scalar_conversions() {
        let val_f64 = 3.14159;
        let val_f32 = <f32 as Scalar>::from_f64(val_f64);
        assert_relative_eq!(f64::from(val_f32), val_f64, epsilon = 1e-6);

        let back_f64 = Scalar::to_f64(val_f32);
        assert_relative_eq!(back_f64, f64::from(val_f32));
    }

    #[test]
    fn test_precision_kind_display() {
        assert_eq!(PrecisionKind::Single.to_string(), "single");
        assert_eq!(PrecisionKind::Double.to_string(), "double");
    }

    #[test]
    fn test_constants() {
        assert_eq!(constants::epsilon_exponent::<f32>(), -23);
        assert_eq!(constants::epsilon_exponent::<f64>(), -52);
        assert_eq!(constants::epsilon::<f64>(), 2f64.powi(-52));
        assert_eq!(constants::unit_roundoff::<f32>(), 2f32.powi(-24));
        assert_eq!(PrecisionKind::Single.epsilon(), 2f64.powi(-23));
    }
}
