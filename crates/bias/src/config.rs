//! Configuration for bias correction.

use crate::cdf::Extrapolation;
use crate::error::BiasError;

/// Configuration for fitting and applying the monthly correction models.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use caudal_bias::{CorrectionConfig, Extrapolation};
///
/// let config = CorrectionConfig::new()
///     .with_extrapolation(Extrapolation::Linear)
///     .with_min_reference_samples(30);
/// ```
#[derive(Clone, Debug)]
pub struct CorrectionConfig {
    extrapolation: Extrapolation,
    min_reference_samples: usize,
}

impl CorrectionConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `extrapolation = Fail` (the multi-year batch path maps
    /// values drawn from its own reference and must not leave the table),
    /// `min_reference_samples = 1`.
    pub fn new() -> Self {
        Self {
            extrapolation: Extrapolation::Fail,
            min_reference_samples: 1,
        }
    }

    /// Sets the out-of-domain behaviour for value mapping.
    pub fn with_extrapolation(mut self, e: Extrapolation) -> Self {
        self.extrapolation = e;
        self
    }

    /// Sets the minimum sample count a reference month must provide.
    pub fn with_min_reference_samples(mut self, n: usize) -> Self {
        self.min_reference_samples = n;
        self
    }

    /// Returns the out-of-domain behaviour.
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Returns the minimum sample count a reference month must provide.
    pub fn min_reference_samples(&self) -> usize {
        self.min_reference_samples
    }

    /// Validates this configuration.
    ///
    /// `min_reference_samples` must be at least 1: Sturges' rule is
    /// undefined for an empty sample.
    pub fn validate(&self) -> Result<(), BiasError> {
        if self.min_reference_samples < 1 {
            return Err(BiasError::InvalidConfig {
                reason: format!(
                    "min_reference_samples must be >= 1, got {}",
                    self.min_reference_samples
                ),
            });
        }
        Ok(())
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self::new()
    }
}
