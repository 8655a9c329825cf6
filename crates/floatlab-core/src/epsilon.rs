//! Empirical machine epsilon.
//!
//! The prober starts from `t = 0.5` and halves `t` while `1.0 + t` is still
//! distinguishable from `1.0` in the working precision. The final halving is
//! undone once, so the reported value is the last `t` for which
//! `1.0 + t > 1.0` held. The number of halvings equals the stored mantissa
//! width of the format.

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;
use crate::types::{PrecisionKind, Scalar};

/// Result of probing a statically chosen precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonProbe<T> {
    /// Smallest power of two `t` with `1.0 + t > 1.0`.
    pub epsilon: T,
    /// Number of halvings performed before `1.0 + t` collapsed to `1.0`.
    pub iterations: usize,
}

impl<T: Scalar> EpsilonProbe<T> {
    /// Widen to a precision-independent report.
    pub fn report(&self) -> EpsilonReport {
        EpsilonReport {
            precision: T::KIND,
            epsilon: Scalar::to_f64(self.epsilon),
            mantissa_bits: self.iterations,
        }
    }
}

/// Result of probing a precision chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpsilonReport {
    /// Precision that was probed.
    pub precision: PrecisionKind,
    /// Measured machine epsilon, widened to f64 (exact for both formats).
    pub epsilon: f64,
    /// Mantissa bits, equal to the number of probe iterations.
    pub mantissa_bits: usize,
}

impl EpsilonReport {
    /// Whether the measurement matches the library constant for the precision.
    pub fn matches_library_epsilon(&self) -> bool {
        self.epsilon == self.precision.epsilon()
            && self.mantissa_bits == self.precision.mantissa_bits() as usize
    }
}

/// One recorded step of the probe loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeStep<T> {
    /// Iteration index, starting at 0 for the initial trial value.
    pub iteration: usize,
    /// Trial value at this iteration.
    pub trial: T,
    /// `1.0 + trial` in the working precision.
    pub sum: T,
}

/// Probe machine epsilon for the precision `T`.
pub fn probe<T: Scalar>() -> EpsilonProbe<T> {
    run_probe(|_| {})
}

/// Probe machine epsilon for `T`, recording the steps selected by `config`.
pub fn probe_with_trace<T: Scalar>(config: &ProbeConfig) -> (EpsilonProbe<T>, Vec<ProbeStep<T>>) {
    let mut steps = Vec::new();
    let result = run_probe(|step: &ProbeStep<T>| {
        if config.records(step.iteration) {
            steps.push(*step);
        }
    });
    (result, steps)
}

/// Probe machine epsilon for a precision chosen at runtime.
pub fn probe_epsilon(kind: PrecisionKind) -> EpsilonReport {
    match kind {
        PrecisionKind::Single => probe::<f32>().report(),
        PrecisionKind::Double => probe::<f64>().report(),
    }
}

fn run_probe<T, F>(mut observe: F) -> EpsilonProbe<T>
where
    T: Scalar,
    F: FnMut(&ProbeStep<T>),
{
    let one = T::one();
    let two = <T as Scalar>::from_f64(2.0);

    let mut iterations = 0;
    let mut trial = <T as Scalar>::from_f64(0.5);
    let mut sum = one + trial;

    while sum > one {
        let step = ProbeStep {
            iteration: iterations,
            trial,
            sum,
        };
        trace!(
            "{} probe step {}: t = {:e}, 1 + t = {}",
            T::KIND,
            iterations,
            trial,
            sum
        );
        observe(&step);

        trial = trial / two;
        sum = one + trial;
        iterations += 1;
    }

    trial = trial * two;

    debug!(
        "{} precision: epsilon = {:e} after {} halvings",
        T::KIND,
        trial,
        iterations
    );

    EpsilonProbe {
        epsilon: trial,
        iterations,
    }
}
