//! Linear algebra operations for factor model estimation.

use nalgebra::{DMatrix, Dyn, linalg::SVD};
use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::MathError;

/// Singular value cutoff policy for [`pinv`] and [`rank`].
///
/// Singular values `s_i <= max(atol, rtol * s_max)` are treated as zero.
/// When neither tolerance is set, `rtol` defaults to `max(m, n) * f64::EPSILON`.
/// When only `atol` is set, `rtol` is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinvTolerance {
    /// Absolute cutoff on singular values.
    pub atol: Option<f64>,
    /// Cutoff relative to the largest singular value.
    pub rtol: Option<f64>,
}

impl PinvTolerance {
    /// Tolerance using the default relative cutoff.
    #[must_use]
    pub const fn new() -> Self {
        Self { atol: None, rtol: None }
    }

    /// Set the absolute cutoff.
    #[must_use]
    pub const fn with_atol(mut self, atol: f64) -> Self {
        self.atol = Some(atol);
        self
    }

    /// Set the relative cutoff.
    #[must_use]
    pub const fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = Some(rtol);
        self
    }

    /// Check that every configured cutoff is finite and non-negative.
    ///
    /// # Errors
    /// Returns `InvalidTolerance` with the offending value.
    pub fn validate(&self) -> Result<(), MathError> {
        for tol in [self.atol, self.rtol].into_iter().flatten() {
            if !tol.is_finite() || tol < 0.0 {
                return Err(MathError::InvalidTolerance(tol));
            }
        }
        Ok(())
    }

    /// Singular value cutoff for a matrix of the given shape.
    #[must_use]
    pub fn threshold(&self, shape: (usize, usize), max_singular_value: f64) -> f64 {
        let rtol = match (self.atol, self.rtol) {
            (_, Some(rtol)) => rtol,
            (Some(_), None) => 0.0,
            (None, None) => shape.0.max(shape.1) as f64 * f64::EPSILON,
        };
        self.atol.unwrap_or(0.0).max(rtol * max_singular_value)
    }
}

/// Compute the Moore-Penrose pseudo-inverse of a matrix.
///
/// Uses an SVD, so rank-deficient and non-square inputs are handled:
/// `pinv(a).dot(b)` is the minimum-norm least squares solution of `a x = b`.
///
/// # Arguments
/// * `matrix` - Matrix to invert (m x n)
/// * `tolerance` - Cutoff policy for small singular values
///
/// # Returns
/// The pseudo-inverse (n x m).
///
/// # Errors
/// Returns error if the matrix is empty, contains NaN or Inf, the tolerance
/// is invalid, or the decomposition fails.
pub fn pinv<S>(
    matrix: &ArrayBase<S, Ix2>,
    tolerance: PinvTolerance,
) -> Result<Array2<f64>, MathError>
where
    S: Data<Elem = f64>,
{
    let svd = decompose(matrix, &tolerance)?;
    let threshold = tolerance.threshold(matrix.dim(), max_singular_value(&svd));
    log::trace!("pinv of {:?} matrix with singular value cutoff {threshold:e}", matrix.dim());

    let inverse =
        svd.pseudo_inverse(threshold).map_err(|e| MathError::LinearAlgebra(e.to_string()))?;
    Ok(from_dmatrix(&inverse))
}

/// Numerical rank of a matrix under the given cutoff policy.
///
/// # Errors
/// Returns error under the same conditions as [`pinv`].
pub fn rank<S>(matrix: &ArrayBase<S, Ix2>, tolerance: PinvTolerance) -> Result<usize, MathError>
where
    S: Data<Elem = f64>,
{
    let svd = decompose(matrix, &tolerance)?;
    let threshold = tolerance.threshold(matrix.dim(), max_singular_value(&svd));
    Ok(svd.singular_values.iter().filter(|&&s| s > threshold).count())
}

/// Matrix product `a @ b`, returning an error instead of panicking on
/// incompatible shapes.
///
/// # Errors
/// Returns `DimensionMismatch` if `a.ncols() != b.nrows()`.
pub fn checked_matmul<S1, S2>(
    a: &ArrayBase<S1, Ix2>,
    b: &ArrayBase<S2, Ix2>,
) -> Result<Array2<f64>, MathError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if a.ncols() != b.nrows() {
        return Err(MathError::DimensionMismatch { expected: a.ncols(), actual: b.nrows() });
    }
    Ok(a.dot(b))
}

/// Elementwise difference `a - b` of two matrices of equal shape.
///
/// # Errors
/// Returns `DimensionMismatch` on the first axis whose lengths differ.
pub fn checked_sub<S1, S2>(
    a: &ArrayBase<S1, Ix2>,
    b: &ArrayBase<S2, Ix2>,
) -> Result<Array2<f64>, MathError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    for (expected, actual) in [(a.nrows(), b.nrows()), (a.ncols(), b.ncols())] {
        if expected != actual {
            return Err(MathError::DimensionMismatch { expected, actual });
        }
    }
    Ok(a - b)
}

/// Ensure every entry of the array is finite.
///
/// # Errors
/// Returns `NumericalInstability` on the first NaN or infinite value.
pub fn ensure_finite<S, D>(data: &ArrayBase<S, D>) -> Result<(), MathError>
where
    S: Data<Elem = f64>,
    D: ndarray::Dimension,
{
    data.iter().find(|v| !v.is_finite()).map_or(Ok(()), |v| {
        Err(MathError::NumericalInstability(format!("non-finite value {v} in input")))
    })
}

fn decompose<S>(
    matrix: &ArrayBase<S, Ix2>,
    tolerance: &PinvTolerance,
) -> Result<SVD<f64, Dyn, Dyn>, MathError>
where
    S: Data<Elem = f64>,
{
    tolerance.validate()?;

    let (rows, cols) = matrix.dim();
    if rows == 0 || cols == 0 {
        return Err(MathError::EmptyData);
    }
    // A NaN never converges in the QR sweeps
    ensure_finite(matrix)?;

    to_dmatrix(matrix)
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or_else(|| MathError::LinearAlgebra("SVD did not converge".to_string()))
}

fn max_singular_value(svd: &SVD<f64, Dyn, Dyn>) -> f64 {
    svd.singular_values.iter().copied().fold(0.0, f64::max)
}

fn to_dmatrix<S>(matrix: &ArrayBase<S, Ix2>) -> DMatrix<f64>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = matrix.dim();
    DMatrix::from_fn(rows, cols, |i, j| matrix[[i, j]])
}

fn from_dmatrix(matrix: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn(matrix.shape(), |(i, j)| matrix[(i, j)])
}
