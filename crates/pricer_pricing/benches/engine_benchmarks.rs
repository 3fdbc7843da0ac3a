//! Criterion benchmarks for the Monte Carlo engine.
//!
//! Measures sampling, payoff evaluation and the full pricing call across
//! path counts to characterise scaling behaviour.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::PricingInput;
use pricer_models::payoff::PayoffExpr;
use pricer_pricing::mc::{price_option, sample_terminal_prices, GbmParams};
use pricer_pricing::rng::PricerRng;

const PATH_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];

/// Benchmark terminal price sampling.
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_terminal_prices");
    let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);

    for n in PATH_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = PricerRng::from_seed(42);
            b.iter(|| sample_terminal_prices(black_box(&params), n, &mut rng));
        });
    }

    group.finish();
}

/// Benchmark payoff evaluation on a fixed price vector.
fn bench_payoff_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("payoff_evaluate");
    let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);
    let prices = sample_terminal_prices(&params, 10_000, &mut PricerRng::from_seed(42));

    for (name, source) in [
        ("call", "maximum(ST - 100, 0)"),
        ("digital", "(ST > 100) * 10"),
        ("where", "where(ST > 110, ST - 110, where(ST < 90, 90 - ST, 0))"),
    ] {
        let payoff = PayoffExpr::parse(source).unwrap();
        group.bench_with_input(BenchmarkId::new(name, prices.len()), &payoff, |b, payoff| {
            b.iter(|| payoff.evaluate(black_box(&prices)));
        });
    }

    group.finish();
}

/// Benchmark the full pricing call, parse included.
fn bench_price_option(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_option");

    for n in PATH_COUNTS {
        let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, n, "maximum(ST - 100, 0)").unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| price_option(black_box(input), Some(42)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sampling,
    bench_payoff_evaluation,
    bench_price_option
);
criterion_main!(benches);
