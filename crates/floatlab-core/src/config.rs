//! Configuration for the epsilon prober trace and the accuracy comparison.

use crate::error::ConfigError;

/// Controls which probe iterations are recorded in a trace.
///
/// An iteration is recorded when it is below `head`, or when it is a multiple
/// of `stride`. A `stride` of zero records the head only. The defaults keep
/// the first ten iterations and every fifth one after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Every iteration below this index is recorded.
    pub head: usize,
    /// After the head, every `stride`-th iteration is recorded; zero disables
    /// sampling past the head.
    pub stride: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            head: 10,
            stride: 5,
        }
    }
}

impl ProbeConfig {
    /// Record every iteration.
    pub fn every_iteration() -> Self {
        Self { head: 0, stride: 1 }
    }

    /// Whether the given iteration belongs in the trace.
    pub fn records(&self, iteration: usize) -> bool {
        iteration < self.head || (self.stride != 0 && iteration % self.stride == 0)
    }
}

/// Builder for a custom [`ProbeConfig`].
pub struct ProbeConfigBuilder {
    config: ProbeConfig,
}

impl ProbeConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ProbeConfig::default(),
        }
    }

    /// Set how many leading iterations are always recorded.
    pub fn head(mut self, head: usize) -> Self {
        self.config.head = head;
        self
    }

    /// Set the sampling stride after the head.
    pub fn stride(mut self, stride: usize) -> Self {
        self.config.stride = stride;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ProbeConfig, ConfigError> {
        if self.config.stride == 0 {
            return Err(ConfigError::invalid_parameter(
                "stride",
                self.config.stride,
                "must be at least 1",
            ));
        }
        Ok(self.config)
    }
}

impl Default for ProbeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for comparing evaluation results against an exact value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonConfig {
    /// A result agrees with the exact value when its absolute error is at
    /// most `tolerance_factor * epsilon * max(1, |exact|)`, with `epsilon`
    /// taken from the working precision.
    pub tolerance_factor: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            tolerance_factor: 64.0,
        }
    }
}

impl ComparisonConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance factor.
    #[must_use]
    pub fn with_tolerance_factor(mut self, factor: f64) -> Self {
        self.tolerance_factor = factor;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_factor.is_finite() || self.tolerance_factor <= 0.0 {
            return Err(ConfigError::invalid_parameter(
                "tolerance_factor",
                self.tolerance_factor,
                "must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Absolute tolerance for an exact value at the given epsilon.
    pub fn absolute_tolerance(&self, epsilon: f64, exact: f64) -> f64 {
        self.tolerance_factor * epsilon * exact.abs().max(1.0)
    }
}
