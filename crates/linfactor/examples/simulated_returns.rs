//! Example: Fitting a Factor Model to Simulated Returns
//!
//! This example walks through the factor model on synthetic data:
//! 1. Simulate factor returns and asset returns with known loadings
//! 2. Fit the model on the first part of the sample
//! 3. Compare estimated loadings with the true ones
//! 4. Compute in-sample and out-of-sample residual returns

use linfactor::{math::PinvTolerance, model::FactorModel, traits::ResidualModel};
use ndarray::{Array2, Axis, s};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

const N_ASSETS: usize = 8;
const N_FACTORS: usize = 3;
const N_STEPS: usize = 504;
const TRAIN_STEPS: usize = 378;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Factor Model on Simulated Returns ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let factor_dist = Normal::new(0.0, 0.01)?;
    let beta_dist = Normal::new(0.8, 0.4)?;
    let noise_dist = Normal::new(0.0, 0.005)?;

    // =========================================================================
    // SIMULATE DATA
    // =========================================================================

    let factors = Array2::from_shape_fn((N_FACTORS, N_STEPS), |_| factor_dist.sample(&mut rng));
    let true_beta = Array2::from_shape_fn((N_FACTORS, N_ASSETS), |_| beta_dist.sample(&mut rng));
    let noise = Array2::from_shape_fn((N_ASSETS, N_STEPS), |_| noise_dist.sample(&mut rng));
    let assets = true_beta.t().dot(&factors) + &noise;

    println!("Assets: {N_ASSETS}, factors: {N_FACTORS}, steps: {N_STEPS}");
    println!("Training on the first {TRAIN_STEPS} steps\n");

    let train_assets = assets.slice(s![.., ..TRAIN_STEPS]);
    let train_factors = factors.slice(s![.., ..TRAIN_STEPS]);
    let test_assets = assets.slice(s![.., TRAIN_STEPS..]);
    let test_factors = factors.slice(s![.., TRAIN_STEPS..]);

    // =========================================================================
    // FIT
    // =========================================================================

    let mut model = FactorModel::new();
    let in_sample = model.fit_forward(&train_assets, &train_factors)?;
    let beta = model.beta().ok_or("model not fitted")?;

    println!("Estimated vs true loadings (factor 0):");
    for asset in 0..N_ASSETS {
        println!(
            "  asset {asset}: {:>7.4} (true {:>7.4})",
            beta[[0, asset]],
            true_beta[[0, asset]]
        );
    }

    let max_error = (beta - &true_beta).iter().fold(0.0_f64, |acc, e| acc.max(e.abs()));
    println!("\nMax loading error: {max_error:.4}");

    // =========================================================================
    // RESIDUALS
    // =========================================================================

    let out_of_sample = model.forward(&test_assets, &test_factors)?;

    println!("\nResidual volatility per asset (in-sample / out-of-sample):");
    let in_vol = in_sample.std_axis(Axis(1), 0.0);
    let out_vol = out_of_sample.std_axis(Axis(1), 0.0);
    for asset in 0..N_ASSETS {
        println!("  asset {asset}: {:.5} / {:.5}", in_vol[asset], out_vol[asset]);
    }

    // In-sample residuals are orthogonal to the factors
    let cross = in_sample.dot(&train_factors.t());
    let max_cross = cross.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    println!("\nMax |residual . factor| in-sample: {max_cross:.2e}");

    // =========================================================================
    // COLLINEAR FACTORS
    // =========================================================================

    // Duplicate the first factor: the design is rank deficient
    let mut collinear = Array2::<f64>::zeros((N_FACTORS + 1, TRAIN_STEPS));
    collinear.slice_mut(s![..N_FACTORS, ..]).assign(&train_factors);
    collinear.row_mut(N_FACTORS).assign(&train_factors.row(0));

    let rank = linfactor::math::rank(&collinear.t(), PinvTolerance::new())?;
    println!("\nCollinear design: {} factors, rank {rank}", N_FACTORS + 1);

    let mut collinear_model = <FactorModel as ResidualModel>::with_config(Default::default());
    collinear_model.fit(&train_assets, &collinear)?;
    let collinear_beta = collinear_model.beta().ok_or("model not fitted")?;
    println!(
        "Asset 0 loading split across duplicated factor: {:.4} + {:.4} (single fit {:.4})",
        collinear_beta[[0, 0]],
        collinear_beta[[N_FACTORS, 0]],
        beta[[0, 0]]
    );

    Ok(())
}
