//! Integration tests for the provider → validation → analysis pipeline, offline.

use chrono::NaiveDate;
use pricelens_core::data::{
    synthetic_walk, CsvProvider, DataError, DataProvider, DataSource, SyntheticProvider,
};
use pricelens_core::{analyze, analyze_many, AnalysisConfig, AnalysisError};
use std::fmt::Write as _;
use std::path::Path;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Write a synthetic walk for `symbol` as `<dir>/<symbol>.csv`.
fn write_csv_fixture(dir: &Path, symbol: &str, start: NaiveDate, end: NaiveDate) -> usize {
    let bars = synthetic_walk(symbol, start, end, 100.0);
    let mut content = String::from("Date,Open,Close,Volume\n");
    for bar in &bars {
        let close = bar.close.unwrap();
        writeln!(content, "{},{close},{close},1000", bar.date).unwrap();
    }
    std::fs::write(dir.join(format!("{symbol}.csv")), content).unwrap();
    bars.len()
}

#[test]
fn csv_round_trip_into_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let n = write_csv_fixture(dir.path(), "DKNG", d(2023, 1, 2), d(2024, 12, 31));
    write_csv_fixture(dir.path(), "SPY", d(2023, 1, 2), d(2024, 12, 31));

    let provider = CsvProvider::new(dir.path());
    let dkng = provider.load_series("DKNG", d(2023, 1, 1), d(2024, 12, 31)).unwrap();
    let spy = provider.load_series("SPY", d(2023, 1, 1), d(2024, 12, 31)).unwrap();
    assert_eq!(dkng.len(), n);

    let report = analyze(&dkng, Some(&spy), &AnalysisConfig::default()).unwrap();
    assert_eq!(report.bar_count, n);
    assert!(report.summary.relative_performance.is_some());
    assert!(report.summary.sharpe_ratio.is_some());
    // Over 500 bars: every default window has defined values.
    assert!(report.summary.close_vs_sma.iter().all(|g| g.pct.is_some()));
    assert!(report.summary.rsi.is_some());
}

#[test]
fn csv_and_synthetic_agree_on_the_same_walk() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_fixture(dir.path(), "QQQ", d(2024, 1, 1), d(2024, 6, 30));

    let from_csv = CsvProvider::new(dir.path())
        .load_series("QQQ", d(2024, 1, 1), d(2024, 6, 30))
        .unwrap();
    let from_walk = SyntheticProvider::new()
        .load_series("QQQ", d(2024, 1, 1), d(2024, 6, 30))
        .unwrap();

    assert_eq!(from_csv.dates(), from_walk.dates());
    for (a, b) in from_csv.closes().iter().zip(from_walk.closes()) {
        // f64 Display round-trips exactly
        assert_eq!(*a, b);
    }
}

#[test]
fn csv_with_missing_close_fails_at_the_boundary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("BAD.csv"),
        "date,close\n2024-01-02,10.0\n2024-01-03,\n2024-01-04,11.0\n",
    )
    .unwrap();

    let err = CsvProvider::new(dir.path())
        .load_series("BAD", d(2024, 1, 1), d(2024, 12, 31))
        .unwrap_err();
    match err {
        DataError::Invalid(AnalysisError::InvalidPrice { index, date, value, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(date, d(2024, 1, 3));
            assert_eq!(value, None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn csv_with_negative_close_fails_at_the_boundary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("NEG.csv"),
        "date,close\n2024-01-02,10.0\n2024-01-03,-1.0\n",
    )
    .unwrap();

    let err = CsvProvider::new(dir.path())
        .load_series("NEG", d(2024, 1, 1), d(2024, 12, 31))
        .unwrap_err();
    assert!(matches!(
        err,
        DataError::Invalid(AnalysisError::InvalidPrice { index: 1, value: Some(v), .. }) if v == -1.0
    ));
}

#[test]
fn csv_out_of_order_dates_fail_at_the_boundary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ORD.csv"),
        "date,close\n2024-01-03,10.0\n2024-01-02,11.0\n",
    )
    .unwrap();

    let err = CsvProvider::new(dir.path())
        .load_series("ORD", d(2024, 1, 1), d(2024, 12, 31))
        .unwrap_err();
    assert!(matches!(
        err,
        DataError::Invalid(AnalysisError::UnorderedDates { index: 1, .. })
    ));
}

#[test]
fn range_with_no_rows_is_empty_series() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_fixture(dir.path(), "OLD", d(2020, 1, 1), d(2020, 3, 31));

    let err = CsvProvider::new(dir.path())
        .load_series("OLD", d(2024, 1, 1), d(2024, 12, 31))
        .unwrap_err();
    assert!(matches!(
        err,
        DataError::Invalid(AnalysisError::EmptySeries { .. })
    ));
}

#[test]
fn synthetic_fetch_is_tagged() {
    let result = SyntheticProvider::new()
        .fetch("SPY", d(2024, 1, 1), d(2024, 1, 31))
        .unwrap();
    assert_eq!(result.source, DataSource::Synthetic);
    assert_eq!(result.symbol, "SPY");
    assert!(result.bars.iter().all(|b| b.close.is_some()));
}

#[test]
fn many_symbols_against_one_benchmark() {
    let provider = SyntheticProvider::new();
    let (start, end) = (d(2023, 1, 1), d(2024, 12, 31));
    let bench = provider.load_series("SPY", start, end).unwrap();
    let symbols = ["DKNG", "AAPL", "MSFT", "NVDA"];
    let series: Vec<_> = symbols
        .iter()
        .map(|s| provider.load_series(s, start, end).unwrap())
        .collect();

    let results = analyze_many(&series, Some(&bench), &AnalysisConfig::default());
    assert_eq!(results.len(), symbols.len());
    for (symbol, result) in symbols.iter().zip(&results) {
        let report = result.as_ref().unwrap();
        assert_eq!(report.symbol, *symbol);
        assert_eq!(report.benchmark.as_deref(), Some("SPY"));
        let rel = report.summary.relative_performance.unwrap();
        let expected = (report.summary.total_return_pct
            - report.summary.benchmark_total_return_pct.unwrap())
            / 100.0;
        assert!((rel - expected).abs() < 1e-9);
    }
}
