//! Report rendering and file export.
//!
//! Text report for the terminal, JSON report, and a per-date CSV of every
//! derived series. Undefined values are `null` in JSON and empty cells in CSV.

use anyhow::{Context, Result};
use pricelens_core::AnalysisReport;
use std::fmt;
use std::path::{Path, PathBuf};

/// Serialize a report to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

/// Export every derived series as CSV: one row per date, one column per series.
pub fn export_series_csv(report: &AnalysisReport) -> Result<String> {
    let indicators = &report.indicators;
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date".to_string(), "close".to_string()];
    header.extend(indicators.names().map(str::to_string));
    wtr.write_record(&header)?;

    for (i, date) in indicators.dates().iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        row.push(date.to_string());
        row.push(
            report
                .closes
                .get(i)
                .map(|c| c.to_string())
                .unwrap_or_default(),
        );
        for series in indicators.iter() {
            row.push(series.get(i).map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write `<SYMBOL>_report.json` and `<SYMBOL>_series.csv` under `output_dir`.
///
/// Returns the paths written.
pub fn save_report(report: &AnalysisReport, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let json_path = output_dir.join(format!("{}_report.json", report.symbol));
    std::fs::write(&json_path, export_json(report)?)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    let csv_path = output_dir.join(format!("{}_series.csv", report.symbol));
    std::fs::write(&csv_path, export_series_csv(report)?)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    Ok(vec![json_path, csv_path])
}

fn opt(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}{suffix}"),
        None => "n/a".to_string(),
    }
}

/// Render the plain-text summary printed by `pricelens analyze`.
pub fn render_report(report: &AnalysisReport, rsi_period: usize) -> String {
    TextReport { report, rsi_period }.to_string()
}

/// Console layout of one report.
struct TextReport<'a> {
    report: &'a AnalysisReport,
    rsi_period: usize,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let s = &report.summary;
        let bench = report.benchmark.as_deref().unwrap_or("benchmark");

        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "STOCK ANALYSIS - {}", report.symbol)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(
            out,
            "Period:            {} to {} ({} bars)",
            report.start_date, report.end_date, report.bar_count
        )?;
        writeln!(out)?;
        writeln!(out, "Current Price:     ${:.2}", s.current_price)?;
        writeln!(out, "52-Week High:      ${:.2}", s.week52_high)?;
        writeln!(out, "52-Week Low:       ${:.2}", s.week52_low)?;
        writeln!(out)?;
        writeln!(out, "--- Performance ---")?;
        writeln!(out, "{:<19}{:.2}%", format!("{} Return:", report.symbol), s.total_return_pct)?;
        if report.benchmark.is_some() {
            writeln!(
                out,
                "{:<19}{}",
                format!("{bench} Return:"),
                opt(s.benchmark_total_return_pct, 2, "%")
            )?;
            writeln!(
                out,
                "Outperformance:    {}",
                opt(s.relative_performance.map(|r| r * 100.0), 2, "%")
            )?;
        }
        writeln!(out)?;
        writeln!(out, "--- Risk ---")?;
        writeln!(out, "Annual Volatility: {}", opt(s.annual_volatility_pct, 2, "%"))?;
        writeln!(out, "Sharpe Ratio:      {}", opt(s.sharpe_ratio, 2, ""))?;
        writeln!(out, "Max Drawdown:      {:.2}%", s.max_drawdown_pct)?;
        writeln!(out)?;
        writeln!(out, "--- Technical Indicators (Latest) ---")?;
        writeln!(out, "{:<19}{}", format!("RSI ({}):", self.rsi_period), opt(s.rsi, 2, ""))?;
        writeln!(out, "MACD:              {}", opt(s.macd, 4, ""))?;
        writeln!(out, "Signal Line:       {}", opt(s.signal_line, 4, ""))?;
        for gap in &s.close_vs_sma {
            writeln!(
                out,
                "{:<19}{}",
                format!("Close vs MA{}:", gap.window),
                opt(gap.pct, 2, "%")
            )?;
        }

        if let Some(f) = &report.fundamentals {
            writeln!(out)?;
            writeln!(out, "--- Fundamentals ---")?;
            if let Some(cap) = f.market_cap {
                writeln!(out, "Market Cap:        ${:.2}B", cap / 1e9)?;
            }
            if let Some(pe) = f.trailing_pe {
                writeln!(out, "Trailing P/E:      {pe:.2}")?;
            }
            if let Some(eps) = f.trailing_eps {
                writeln!(out, "Trailing EPS:      {eps:.2}")?;
            }
            if let Some(sector) = &f.sector {
                writeln!(out, "Sector:            {sector}")?;
            }
        }
        Ok(())
    }
}
