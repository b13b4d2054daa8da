//! Criterion benchmarks for the simulators.
//!
//! Measures AR(1)/ISV path generation against path length and the factor
//! models against the number of observed series.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ssm_core::linalg::{IdiosyncraticVariance, LoadingMatrix};
use ssm_core::rng::SimRng;
use ssm_models::{
    generate_ar1, generate_factor_model, generate_factor_sv, simulate_factor_paths, simulate_isv,
    Ar1Params, FsvNoise,
};

fn bench_ar1(c: &mut Criterion) {
    let mut group = c.benchmark_group("ar1");
    let params = Ar1Params::new(0.1, 0.2, 0.0).unwrap();

    for n in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("generate", n), &n, |b, &n| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| generate_ar1(black_box(n), &params, &mut rng).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("isv", n), &n, |b, &n| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| simulate_isv(black_box(n), &params, &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_factor_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_models");
    let n = 1_000;
    let k = 3;
    let params = Ar1Params::new(0.05, 0.2, -0.5).unwrap();

    for p in [5, 20, 100] {
        let mut setup_rng = SimRng::from_seed(7);
        let beta = LoadingMatrix::random(p, k, &mut setup_rng).unwrap();
        let sigma = IdiosyncraticVariance::uniform(p, 0.1).unwrap();
        let ft = simulate_factor_paths(n, k, &params, &mut setup_rng).unwrap();

        group.bench_with_input(BenchmarkId::new("factor_analysis", p), &p, |b, &p| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| generate_factor_model(n, p, k, &beta, &sigma, &mut rng).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("fsv_shared", p), &p, |b, _| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| {
                generate_factor_sv(n, 0.01, &beta, black_box(&ft), FsvNoise::Shared, &mut rng)
                    .unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("fsv_independent", p), &p, |b, _| {
            let mut rng = SimRng::from_seed(42);
            b.iter(|| {
                generate_factor_sv(
                    n,
                    0.01,
                    &beta,
                    black_box(&ft),
                    FsvNoise::Independent,
                    &mut rng,
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ar1, bench_factor_models);
criterion_main!(benches);
