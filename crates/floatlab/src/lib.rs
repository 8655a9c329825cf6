//! Floating-point rounding experiments.
//!
//! This crate re-exports [`floatlab_core`], which measures machine epsilon
//! empirically and compares classical polynomial evaluation with Horner's
//! scheme.
//!
//! ```
//! use floatlab::prelude::*;
//!
//! let comparison = Scenario::triple_root()
//!     .compare_at(PrecisionKind::Single, &ComparisonConfig::default())
//!     .unwrap();
//! assert!(comparison.horner_at_least_as_accurate());
//! ```

pub use floatlab_core::*;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reexports() {
        assert_eq!(probe_epsilon(PrecisionKind::Single).mantissa_bits, 23);
        assert_eq!(evaluate_horner(&[0.0, 1.0], 5.0), Ok(5.0));
    }
}
