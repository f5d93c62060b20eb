//! Residual model trait definitions.

use ndarray::{Array2, ArrayBase, Data, Dimension};

/// Whether a model holds fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitState {
    /// No parameters estimated yet.
    Unfitted,
    /// Parameters estimated by the most recent fit.
    Fitted,
}

impl std::fmt::Display for FitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unfitted => write!(f, "unfitted"),
            Self::Fitted => write!(f, "fitted"),
        }
    }
}

/// A model that explains asset returns with factor returns.
///
/// Inputs are asset returns of shape (n_assets x n_steps) and factor returns
/// of shape (n_factors x n_steps). Any ndarray container and dimension type is
/// accepted so that implementations can reject inputs of the wrong rank.
pub trait ResidualModel: Send + Sync {
    /// Configuration type for this model.
    type Config: Default + Clone + Send + Sync;

    /// Error type returned by fit and forward.
    type Error: std::error::Error;

    /// Create a new unfitted model with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Returns the current fit state.
    fn state(&self) -> FitState;

    /// Estimate the model parameters, replacing any previous fit.
    ///
    /// # Returns
    /// The model itself, to chain into [`ResidualModel::forward`].
    ///
    /// # Errors
    /// Returns `Self::Error` if the inputs are invalid or estimation fails.
    fn fit<S1, S2, D1, D2>(
        &mut self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<&mut Self, Self::Error>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension;

    /// Compute residual returns (n_assets x n_steps) under the fitted model.
    ///
    /// # Errors
    /// Returns `Self::Error` if the model is unfitted or shapes are incompatible.
    fn forward<S1, S2, D1, D2>(
        &self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<Array2<f64>, Self::Error>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension;

    /// Fit on the inputs and return their in-sample residuals.
    ///
    /// # Errors
    /// Returns `Self::Error` if either step fails.
    fn fit_forward<S1, S2, D1, D2>(
        &mut self,
        asset_returns: &ArrayBase<S1, D1>,
        factor_returns: &ArrayBase<S2, D2>,
    ) -> Result<Array2<f64>, Self::Error>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        self.fit(asset_returns, factor_returns)?.forward(asset_returns, factor_returns)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use ndarray::{Axis, Ix2, array};

    use super::*;

    /// Removes each asset's mean return; ignores the factors.
    #[derive(Debug, Default)]
    struct Demean {
        means: Option<Vec<f64>>,
    }

    impl ResidualModel for Demean {
        type Config = ();
        type Error = Infallible;

        fn with_config((): ()) -> Self {
            Self::default()
        }

        fn state(&self) -> FitState {
            if self.means.is_some() { FitState::Fitted } else { FitState::Unfitted }
        }

        fn fit<S1, S2, D1, D2>(
            &mut self,
            asset_returns: &ArrayBase<S1, D1>,
            _factor_returns: &ArrayBase<S2, D2>,
        ) -> Result<&mut Self, Infallible>
        where
            S1: Data<Elem = f64>,
            S2: Data<Elem = f64>,
            D1: Dimension,
            D2: Dimension,
        {
            let assets = asset_returns.view().into_dimensionality::<Ix2>().unwrap();
            self.means = Some(assets.mean_axis(Axis(1)).unwrap().to_vec());
            Ok(self)
        }

        fn forward<S1, S2, D1, D2>(
            &self,
            asset_returns: &ArrayBase<S1, D1>,
            _factor_returns: &ArrayBase<S2, D2>,
        ) -> Result<Array2<f64>, Infallible>
        where
            S1: Data<Elem = f64>,
            S2: Data<Elem = f64>,
            D1: Dimension,
            D2: Dimension,
        {
            let assets = asset_returns.view().into_dimensionality::<Ix2>().unwrap();
            let means = self.means.as_ref().unwrap();
            Ok(Array2::from_shape_fn(assets.dim(), |(i, j)| assets[[i, j]] - means[i]))
        }
    }

    #[test]
    fn fit_forward_composes_fit_then_forward() {
        let assets = array![[1.0, 2.0, 3.0], [0.0, 0.0, 3.0]];
        let factors = array![[0.0, 0.0, 0.0]];

        let mut model = Demean::with_config(());
        assert_eq!(model.state(), FitState::Unfitted);

        let residual = model.fit_forward(&assets, &factors).unwrap();
        assert_eq!(model.state(), FitState::Fitted);
        assert_eq!(residual, array![[-1.0, 0.0, 1.0], [-1.0, -1.0, 2.0]]);

        let separate = Demean::default().fit(&assets, &factors).unwrap().forward(&assets, &factors);
        assert_eq!(separate.unwrap(), residual);
    }

    #[test]
    fn fit_state_display() {
        assert_eq!(FitState::Unfitted.to_string(), "unfitted");
        assert_eq!(FitState::Fitted.to_string(), "fitted");
    }
}
