//! Criterion benchmarks for PriceLens hot paths.
//!
//! Benchmarks:
//! 1. Individual indicators (SMA, EMA, RSI, MACD, rolling volatility)
//! 2. Full analysis pipeline (indicators + summary, with benchmark)
//! 3. Parallel analysis of several symbols against one benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pricelens_core::data::{DataProvider, SyntheticProvider};
use pricelens_core::indicators::{Ema, Indicator, Macd, RollingVolatility, Rsi, Sma};
use pricelens_core::{analyze, analyze_many, AnalysisConfig, PriceSeries};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(symbol: &str, n: usize) -> PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let closes: Vec<f64> = (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect();
    PriceSeries::from_closes(symbol, base_date, &closes).unwrap()
}

// ── 1. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &bar_count in &[252, 1260, 2520] {
        let series = make_series("BENCH", bar_count);

        let stack: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(20)),
            Box::new(Sma::new(200)),
            Box::new(Ema::new(26)),
            Box::new(Rsi::new(14)),
            Box::new(RollingVolatility::new(20, 252)),
        ];
        for indicator in &stack {
            group.bench_with_input(
                BenchmarkId::new(indicator.name(), bar_count),
                &bar_count,
                |b, _| b.iter(|| indicator.compute(black_box(&series))),
            );
        }

        let macd = Macd::default();
        group.bench_with_input(BenchmarkId::new("macd", bar_count), &bar_count, |b, _| {
            b.iter(|| macd.compute(black_box(&series)))
        });
    }

    group.finish();
}

// ── 2. Full pipeline ─────────────────────────────────────────────────

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let config = AnalysisConfig::default();

    for &bar_count in &[252, 504, 2520] {
        let series = make_series("DKNG", bar_count);
        let bench = make_series("SPY", bar_count);
        group.bench_with_input(
            BenchmarkId::new("with_benchmark", bar_count),
            &bar_count,
            |b, _| b.iter(|| analyze(black_box(&series), Some(&bench), &config)),
        );
    }

    group.finish();
}

// ── 3. Parallel fan-out ──────────────────────────────────────────────

fn bench_analyze_many(c: &mut Criterion) {
    let provider = SyntheticProvider::new();
    let start = chrono::NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let config = AnalysisConfig::default();

    let bench = provider.load_series("SPY", start, end).unwrap();
    let series: Vec<PriceSeries> = (0..16)
        .map(|i| provider.load_series(&format!("SYM{i}"), start, end).unwrap())
        .collect();

    c.bench_function("analyze_many_16x10y", |b| {
        b.iter(|| analyze_many(black_box(&series), Some(&bench), &config))
    });
}

criterion_group!(benches, bench_indicators, bench_analyze, bench_analyze_many);
criterion_main!(benches);
