//! Property tests for indicator and risk invariants.
//!
//! Uses proptest to verify:
//! 1. Flat prices: zero returns, zero volatility, undefined RSI, zero MACD
//! 2. EMA seeding: ema[0] == close[0] and no undefined entries
//! 3. SMA warm-up: exactly w-1 leading undefined entries
//! 4. Cumulative round-trip: product of (1 + r) equals close[i] / close[0]
//! 5. Drawdown: running max non-decreasing, drawdown never positive
//! 6. Alignment and no look-ahead: every series matches input length and
//!    a prefix of the input reproduces the prefix of every series

use chrono::NaiveDate;
use pricelens_core::indicators::{
    cumulative_returns, daily_returns, ema_of_series, rsi_of_series, sma_of_series,
};
use pricelens_core::risk::{drawdown_series, running_max};
use pricelens_core::{analyze, compute_indicators, AnalysisConfig, PriceSeries};
use proptest::prelude::*;

fn series_from(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    PriceSeries::from_closes("PROP", start, closes).unwrap()
}

fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), 2..max_len)
}

// ── 1. Flat prices ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn flat_prices_have_no_movement(c in arb_price(), n in 2usize..300) {
        let closes = vec![c; n];
        let set = compute_indicators(&series_from(&closes), &AnalysisConfig::default());

        let returns = &set.get("daily_return").unwrap().values;
        prop_assert!(returns[1..].iter().all(|&r| r == 0.0));

        let vol = &set.get("volatility_20").unwrap().values;
        prop_assert!(vol.iter().filter(|v| !v.is_nan()).all(|&v| v == 0.0));

        let rsi = &set.get("rsi_14").unwrap().values;
        prop_assert!(rsi.iter().all(|v| v.is_nan()));

        for name in ["macd", "signal_line", "macd_histogram"] {
            let values = &set.get(name).unwrap().values;
            prop_assert!(values.iter().all(|&v| v == 0.0), "{} not zero", name);
        }
    }

    #[test]
    fn flat_prices_have_no_sharpe(c in arb_price(), n in 2usize..300) {
        let report = analyze(&series_from(&vec![c; n]), None, &AnalysisConfig::default()).unwrap();
        prop_assert_eq!(report.summary.sharpe_ratio, None);
        prop_assert_eq!(report.summary.max_drawdown_pct, 0.0);
    }
}

// ── 2. EMA seeding ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn ema_starts_at_first_close(closes in arb_closes(200), span in 1usize..60) {
        let ema = ema_of_series(&closes, span);
        prop_assert_eq!(ema.len(), closes.len());
        prop_assert_eq!(ema[0], closes[0]);
        prop_assert!(ema.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn ema_stays_within_price_range(closes in arb_closes(200), span in 1usize..60) {
        let lo = closes.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in ema_of_series(&closes, span) {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }
}

// ── 3. SMA warm-up ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_warmup_is_window_minus_one(closes in arb_closes(200), w in 1usize..60) {
        let sma = sma_of_series(&closes, w);
        let n = closes.len();
        let leading = sma.iter().take_while(|v| v.is_nan()).count();
        let defined = sma.iter().filter(|v| !v.is_nan()).count();

        prop_assert_eq!(sma.len(), n);
        if n >= w {
            prop_assert_eq!(leading, w - 1);
            prop_assert_eq!(defined, n - w + 1);
        } else {
            prop_assert_eq!(defined, 0);
        }
    }
}

// ── 4. Cumulative round-trip ─────────────────────────────────────────

proptest! {
    #[test]
    fn cumulative_matches_price_ratio(closes in arb_closes(300)) {
        let cumulative = cumulative_returns(&daily_returns(&closes));
        prop_assert_eq!(cumulative[0], 1.0);
        for (i, &c) in cumulative.iter().enumerate() {
            let direct = closes[i] / closes[0];
            prop_assert!(
                (c - direct).abs() <= 1e-9 * direct.max(1.0),
                "index {}: {} vs {}", i, c, direct
            );
        }
    }
}

// ── 5. Drawdown ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn drawdown_is_never_positive(closes in arb_closes(300)) {
        let cumulative = cumulative_returns(&daily_returns(&closes));

        let peaks = running_max(&cumulative);
        for pair in peaks.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }

        let drawdown = drawdown_series(&cumulative);
        prop_assert!(drawdown.iter().all(|&d| d <= 0.0));
    }

    #[test]
    fn rsi_is_bounded(closes in arb_closes(200), period in 1usize..30) {
        for v in rsi_of_series(&closes, period).into_iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(&v));
        }
    }
}

// ── 6. Alignment and no look-ahead ───────────────────────────────────

proptest! {
    #[test]
    fn every_series_is_aligned(closes in arb_closes(300)) {
        let set = compute_indicators(&series_from(&closes), &AnalysisConfig::default());
        prop_assert_eq!(set.dates().len(), closes.len());
        for s in set.iter() {
            prop_assert_eq!(s.len(), closes.len());
        }
    }

    #[test]
    fn prefix_reproduces_prefix(closes in arb_closes(120), cut in 1usize..120) {
        let cut = cut.min(closes.len());
        let config = AnalysisConfig {
            sma_windows: vec![5, 20],
            ..AnalysisConfig::default()
        };
        let full = compute_indicators(&series_from(&closes), &config);
        let prefix = compute_indicators(&series_from(&closes[..cut]), &config);

        for s in prefix.iter() {
            let full_values = &full.get(&s.name).unwrap().values;
            for (i, &v) in s.values.iter().enumerate() {
                prop_assert!(
                    same_value(v, full_values[i]),
                    "{} differs at {}: {} vs {}", s.name, i, v, full_values[i]
                );
            }
        }
    }
}
