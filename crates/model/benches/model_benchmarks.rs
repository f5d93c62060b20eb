//! Benchmarks for linfactor-model fitting and residual computation.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use linfactor_model::FactorModel;
use ndarray::Array2;
use rand::Rng;

fn random_returns(rows: usize, cols: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((rows, cols), |_| rng.r#gen::<f64>() * 0.1 - 0.05)
}

// (n_assets, n_factors, n_steps, name)
const SCENARIOS: [(usize, usize, usize, &str); 4] = [
    (100, 3, 252, "small_universe"),
    (500, 5, 252, "medium_universe"),
    (1000, 10, 504, "large_universe"),
    (3000, 20, 1260, "full_universe"),
];

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_model_fit");
    group.sample_size(20);

    for (n_assets, n_factors, n_steps, name) in SCENARIOS {
        group.throughput(Throughput::Elements((n_assets * n_steps) as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", name),
            &(n_assets, n_factors, n_steps),
            |b, &(n_assets, n_factors, n_steps)| {
                let assets = random_returns(n_assets, n_steps);
                let factors = random_returns(n_factors, n_steps);
                let mut model = FactorModel::new();

                b.iter(|| {
                    model.fit(black_box(&assets), black_box(&factors)).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_model_forward");

    for (n_assets, n_factors, n_steps, name) in SCENARIOS {
        group.throughput(Throughput::Elements((n_assets * n_steps) as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", name),
            &(n_assets, n_factors, n_steps),
            |b, &(n_assets, n_factors, n_steps)| {
                let assets = random_returns(n_assets, n_steps);
                let factors = random_returns(n_factors, n_steps);
                let mut model = FactorModel::new();
                model.fit(&assets, &factors).unwrap();

                b.iter(|| model.forward(black_box(&assets), black_box(&factors)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_forward);

criterion_main!(benches);
