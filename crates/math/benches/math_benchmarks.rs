//! Benchmarks for linfactor-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use linfactor_math::{PinvTolerance, checked_matmul, pinv, rank};
use ndarray::Array2;
use rand::Rng;

fn random_matrix(rows: usize, cols: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((rows, cols), |_| rng.r#gen::<f64>() * 0.1 - 0.05)
}

fn bench_pinv(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinv");
    group.sample_size(30);

    // Tall design matrices: time steps x factors
    for (n_steps, n_factors) in [(63, 3), (252, 5), (252, 20), (1260, 50)] {
        group.throughput(Throughput::Elements((n_steps * n_factors) as u64));
        group.bench_with_input(
            BenchmarkId::new("steps_factors", format!("{n_steps}x{n_factors}")),
            &(n_steps, n_factors),
            |b, &(n_steps, n_factors)| {
                let x = random_matrix(n_steps, n_factors);
                b.iter(|| pinv(black_box(&x), PinvTolerance::new()).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let x = random_matrix(size, size);
            b.iter(|| rank(black_box(&x), PinvTolerance::new()).unwrap());
        });
    }

    group.finish();
}

fn bench_checked_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("checked_matmul");

    for (n_assets, n_factors, n_steps) in [(100, 5, 252), (1000, 10, 252), (3000, 20, 252)] {
        group.throughput(Throughput::Elements((n_assets * n_steps) as u64));
        group.bench_with_input(
            BenchmarkId::new("assets_factors_steps", format!("{n_assets}_{n_factors}_{n_steps}")),
            &(n_assets, n_factors, n_steps),
            |b, &(n_assets, n_factors, n_steps)| {
                let beta_t = random_matrix(n_assets, n_factors);
                let factors = random_matrix(n_factors, n_steps);
                b.iter(|| checked_matmul(black_box(&beta_t), black_box(&factors)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pinv, bench_rank, bench_checked_matmul);

criterion_main!(benches);
