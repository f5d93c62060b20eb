//! Least squares linear factor model.

use linfactor_math::{MathError, checked_matmul, checked_sub, ensure_finite, pinv, rank};
use linfactor_traits::{FitState, ResidualModel};
use ndarray::{Array2, ArrayBase, ArrayView2, Data, Dimension, Ix2};

use crate::{FactorModelConfig, ModelError};

/// Linear factor model of asset returns.
///
/// Fitting regresses each asset's returns on the factor returns through the
/// origin, solving `factor_returns.T @ beta ≈ asset_returns.T` in the least
/// squares sense with a pseudo-inverse. The fitted loadings `beta` have shape
/// (n_factors x n_assets). Applying the model subtracts the factor-implied
/// returns `beta.T @ factor_returns` and leaves the residual (idiosyncratic)
/// returns.
///
/// Rank-deficient factor returns (collinear factors, or fewer time steps than
/// factors) yield the minimum-norm least squares loadings.
///
/// # Example
///
/// ```
/// use linfactor_model::FactorModel;
/// use ndarray::array;
///
/// let assets = array![[0.01, -0.02, 0.03]];
/// let factors = array![[0.02, -0.01, 0.015]];
///
/// let residual = FactorModel::new().fit(&assets, &factors)?.forward(&assets, &factors)?;
/// assert_eq!(residual.dim(), (1, 3));
/// # Ok::<(), linfactor_model::ModelError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FactorModel {
    config: FactorModelConfig,
    beta: Option<Array2<f64>>,
}

impl FactorModel {
    /// Create an unfitted model with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FactorModelConfig::default())
    }

    /// Create an unfitted model with custom configuration.
    #[must_use]
    pub const fn with_config(config: FactorModelConfig) -> Self {
        Self { config, beta: None }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &FactorModelConfig {
        &self.config
    }

    /// Fitted factor loadings (n_factors x n_assets), if any.
    #[must_use]
    pub const fn beta(&self) -> Option<&Array2<f64>> {
        self.beta.as_ref()
    }

    /// Whether the model has been fitted.
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.beta.is_some()
    }

    /// Number of factors in the fitted model.
    #[must_use]
    pub fn n_factors(&self) -> Option<usize> {
        self.beta.as_ref().map(Array2::nrows)
    }

    /// Number of assets in the fitted model.
    #[must_use]
    pub fn n_assets(&self) -> Option<usize> {
        self.beta.as_ref().map(Array2::ncols)
    }

    /// Estimate factor loadings, replacing any previous fit.
    ///
    /// # Arguments
    /// * `asset_returns` - Asset returns (n_assets x n_steps)
    /// * `factor_returns` - Factor returns (n_factors x n_steps)
    ///
    /// # Returns
    /// The model itself, to chain into [`FactorModel::forward`].
    ///
    /// # Errors
    /// Returns `UnsupportedRank` if either input is not 2-D, `ShapeMismatch`
    /// if the numbers of time steps differ, `InvalidConfig` for a bad
    /// tolerance, and `Math` for empty or non-finite inputs. On error the
    /// previous fit is kept.
    pub fn fit<S1, S2, D1, D2>(
        &mut self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<&mut Self, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        self.config.validate()?;

        let assets = as_matrix(asset_returns, "asset_returns")?;
        let factors = as_matrix(factor_returns, "factor_returns")?;

        let (n_assets, asset_steps) = assets.dim();
        let (n_factors, factor_steps) = factors.dim();
        if asset_steps != factor_steps {
            return Err(ModelError::ShapeMismatch { asset_steps, factor_steps });
        }
        if n_assets == 0 {
            return Err(MathError::EmptyData.into());
        }
        ensure_finite(&assets)?;

        // (n_steps x n_factors) design, (n_steps x n_assets) response
        let x = factors.t();
        let y = assets.t();

        let tolerance = self.config.tolerance();
        let beta = checked_matmul(&pinv(&x, tolerance)?, &y)?;

        if log::log_enabled!(log::Level::Debug) {
            let design_rank = rank(&x, tolerance)?;
            if design_rank < n_factors {
                log::debug!(
                    "factor returns have rank {design_rank} < {n_factors} factors, \
                     using minimum-norm loadings"
                );
            }
        }
        log::debug!(
            "fitted factor model: {n_factors} factors, {n_assets} assets, {asset_steps} steps"
        );

        self.beta = Some(beta);
        Ok(self)
    }

    /// Compute residual returns under the fitted loadings.
    ///
    /// The time-step contract is not re-validated here: incompatible shapes
    /// are reported by the underlying matrix operations.
    ///
    /// # Arguments
    /// * `asset_returns` - Asset returns (n_assets x n_steps)
    /// * `factor_returns` - Factor returns (n_factors x n_steps)
    ///
    /// # Returns
    /// Residual returns (n_assets x n_steps).
    ///
    /// # Errors
    /// Returns `NotFitted` before the first fit, `UnsupportedRank` for inputs
    /// that are not 2-D, and `Math(DimensionMismatch)` if the shapes do not
    /// match the fitted loadings.
    pub fn forward<S1, S2, D1, D2>(
        &self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<Array2<f64>, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        let component = self.factor_component(factor_returns)?;
        let assets = as_matrix(asset_returns, "asset_returns")?;
        Ok(checked_sub(&assets, &component)?)
    }

    /// Fit on the inputs and return their in-sample residuals.
    ///
    /// # Errors
    /// Returns any error of [`FactorModel::fit`] or [`FactorModel::forward`].
    pub fn fit_forward<S1, S2, D1, D2>(
        &mut self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<Array2<f64>, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        self.fit(asset_returns, factor_returns)?.forward(asset_returns, factor_returns)
    }

    /// Factor-implied asset returns `beta.T @ factor_returns`
    /// (n_assets x n_steps).
    ///
    /// # Errors
    /// Returns `NotFitted` before the first fit, `UnsupportedRank` if the
    /// input is not 2-D, and `Math(DimensionMismatch)` if the number of
    /// factors differs from the fitted loadings.
    pub fn factor_component<S, D>(
        &self,
        factor_returns: &ArrayBase<S, D>,
    ) -> Result<Array2<f64>, ModelError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let beta = self.beta.as_ref().ok_or(ModelError::NotFitted)?;
        let factors = as_matrix(factor_returns, "factor_returns")?;
        Ok(checked_matmul(&beta.t(), &factors)?)
    }
}

impl ResidualModel for FactorModel {
    type Config = FactorModelConfig;
    type Error = ModelError;

    fn with_config(config: Self::Config) -> Self {
        Self::with_config(config)
    }

    fn state(&self) -> FitState {
        if self.is_fitted() { FitState::Fitted } else { FitState::Unfitted }
    }

    fn fit<S1, S2, D1, D2>(
        &mut self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<&mut Self, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        Self::fit(self, asset_returns, factor_returns)
    }

    fn forward<S1, S2, D1, D2>(
        &self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<Array2<f64>, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        Self::forward(self, asset_returns, factor_returns)
    }
}

fn as_matrix<'a, S, D>(
    input: &'a ArrayBase<S, D>,
    name: &'static str,
) -> Result<ArrayView2<'a, f64>, ModelError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    input
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| ModelError::UnsupportedRank { input: name, ndim: input.ndim() })
}
