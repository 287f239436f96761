//! Criterion benchmarks for dcf_pricing.
//!
//! Benchmarks cover:
//! - Single deterministic valuation across projection horizons
//! - Sensitivity grid construction
//! - Monte Carlo runs, sequential against rayon fan-out

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dcf_core::{AssumptionSet, FinancialSnapshot};
use dcf_pricing::dcf::{sensitivity_grid, DcfEngine, SensitivityAxes};
use dcf_pricing::mc::{MonteCarloConfig, MonteCarloSimulator, ParallelConfig};

fn snapshot() -> FinancialSnapshot {
    FinancialSnapshot {
        ticker: "BNCH".to_string(),
        revenue: 2_500.0,
        ebit: Some(400.0),
        shares_outstanding: 120.0,
        net_debt: 300.0,
        cash: 150.0,
        current_price: Some(30.0),
        ..Default::default()
    }
}

fn assumptions(years: usize) -> AssumptionSet {
    AssumptionSet::builder(vec![0.06; years], 0.025)
        .discount_rate(0.09)
        .build()
        .expect("valid benchmark assumptions")
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let engine = DcfEngine::default();
    let s = snapshot();

    for years in [5, 7, 10] {
        let a = assumptions(years);
        group.bench_with_input(BenchmarkId::new("years", years), &a, |b, a| {
            b.iter(|| engine.evaluate(black_box(a), black_box(&s)));
        });
    }

    group.finish();
}

fn bench_sensitivity(c: &mut Criterion) {
    let engine = DcfEngine::default();
    let a = assumptions(5);
    let s = snapshot();
    let axes = SensitivityAxes::centred(0.09, 0.025, 0.005, 0.0025, 4);

    c.bench_function("sensitivity_9x9", |b| {
        b.iter(|| sensitivity_grid(&engine, black_box(&a), black_box(&s), &axes));
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(10);
    let a = assumptions(5);
    let s = snapshot();

    for n in [1_000usize, 10_000] {
        for (label, parallel) in [
            ("sequential", ParallelConfig::sequential()),
            ("rayon", ParallelConfig::default()),
        ] {
            let config = MonteCarloConfig::builder()
                .n_simulations(n)
                .seed(42)
                .parallel(parallel)
                .build()
                .expect("valid benchmark config");
            let simulator = MonteCarloSimulator::new(DcfEngine::default(), config);
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| simulator.run(black_box(&a), black_box(&s)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_sensitivity, bench_monte_carlo);
criterion_main!(benches);
