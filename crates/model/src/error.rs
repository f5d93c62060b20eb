//! Error types for factor model estimation.

use linfactor_math::MathError;

/// Errors that can occur while fitting or applying a factor model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Asset and factor returns cover different numbers of time steps.
    #[error("numbers of time steps do not match: {asset_steps} asset steps, {factor_steps} factor steps")]
    ShapeMismatch {
        /// Time steps in the asset returns.
        asset_steps: usize,
        /// Time steps in the factor returns.
        factor_steps: usize,
    },

    /// Input is not a 2-D matrix.
    #[error("unsupported rank for {input}: expected 2 dimensions, got {ndim}")]
    UnsupportedRank {
        /// Which input was rejected.
        input: &'static str,
        /// Number of dimensions of the input.
        ndim: usize,
    },

    /// Model applied before any fit.
    #[error("factor model has not been fitted")]
    NotFitted,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

impl ModelError {
    /// Returns whether this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFitted)
    }
}
