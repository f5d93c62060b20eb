//! Factor model configuration.

use linfactor_math::PinvTolerance;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Configuration for [`FactorModel`](crate::FactorModel).
///
/// Both cutoffs default to `None`, which discards singular values below
/// `max(n_steps, n_factors) * f64::EPSILON` times the largest one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorModelConfig {
    /// Absolute singular value cutoff for the pseudo-inverse.
    pub pinv_atol: Option<f64>,
    /// Relative singular value cutoff for the pseudo-inverse.
    pub pinv_rtol: Option<f64>,
}

impl FactorModelConfig {
    /// Pseudo-inverse cutoff policy described by this configuration.
    #[must_use]
    pub const fn tolerance(&self) -> PinvTolerance {
        PinvTolerance { atol: self.pinv_atol, rtol: self.pinv_rtol }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a cutoff is negative, NaN or infinite.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.tolerance().validate().map_err(|e| ModelError::InvalidConfig(e.to_string()))
    }
}

impl From<FactorModelConfig> for PinvTolerance {
    fn from(config: FactorModelConfig) -> Self {
        config.tolerance()
    }
}
