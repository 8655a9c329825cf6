//! IEEE 754 layout of the supported precisions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{constants, PrecisionKind, Scalar};

/// Bit layout and range of a binary floating-point format.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloatLayout {
    /// Precision described by this layout.
    pub precision: PrecisionKind,
    /// Total storage width.
    pub total_bits: u32,
    /// Stored mantissa bits; the significand has one more implicit bit.
    pub mantissa_bits: u32,
    /// Exponent field width.
    pub exponent_bits: u32,
    /// Sign field width.
    pub sign_bits: u32,
    /// Smallest positive normal value.
    pub min_positive: f64,
    /// Largest finite value.
    pub max: f64,
    /// Decimal digits guaranteed to survive a decimal round trip.
    pub decimal_digits: u32,
    /// Machine epsilon.
    pub epsilon: f64,
    /// `k` such that `epsilon == 2^k`.
    pub epsilon_exponent: i32,
}

impl FloatLayout {
    /// Layout of the format backing `T`.
    pub fn for_scalar<T: Scalar>() -> Self {
        Self {
            precision: T::KIND,
            total_bits: T::TOTAL_BITS,
            mantissa_bits: T::MANTISSA_BITS,
            exponent_bits: T::EXPONENT_BITS,
            sign_bits: 1,
            min_positive: Scalar::to_f64(T::MIN_POSITIVE),
            max: Scalar::to_f64(T::MAX),
            decimal_digits: T::DECIMAL_DIGITS,
            epsilon: Scalar::to_f64(T::EPSILON),
            epsilon_exponent: constants::epsilon_exponent::<T>(),
        }
    }

    /// Layout of a precision chosen at runtime.
    pub fn of(kind: PrecisionKind) -> Self {
        match kind {
            PrecisionKind::Single => Self::for_scalar::<f32>(),
            PrecisionKind::Double => Self::for_scalar::<f64>(),
        }
    }

    /// Significand bits including the implicit leading bit.
    pub fn significand_bits(&self) -> u32 {
        self.mantissa_bits + 1
    }
}
