//! Error types for linear algebra operations.

/// Errors that can occur during linear algebra operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Dimension mismatch between operands.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Numerical instability (NaN or Inf).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Invalid singular value tolerance.
    #[error("invalid tolerance: {0} (must be finite and non-negative)")]
    InvalidTolerance(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MathError::InvalidTolerance(-0.5);
        assert!(err.to_string().contains("-0.5"));

        let err = MathError::DimensionMismatch { expected: 10, actual: 5 };
        assert_eq!(err.to_string(), "dimension mismatch: expected 10, got 5");
    }
}
