//! PriceLens CLI: load daily closes, run the indicator engine, print and export reports.
//!
//! Commands:
//! - `analyze`: analyze one or more symbols against a benchmark
//! - `config`: print the default analysis configuration as TOML

mod export;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use pricelens_core::data::{CsvProvider, DataProvider, SyntheticProvider, YahooProvider};
use pricelens_core::{analyze_many, AnalysisConfig, PriceSeries};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricelens",
    about = "PriceLens CLI: daily price indicators and risk summary"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    Yahoo,
    Csv,
    Synthetic,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze symbols against a benchmark and print a report per symbol.
    Analyze {
        /// Symbols to analyze (e.g., DKNG AAPL).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Benchmark symbol.
        #[arg(long, default_value = "SPY")]
        benchmark: String,

        /// Skip the benchmark comparison.
        #[arg(long, default_value_t = false)]
        no_benchmark: bool,

        /// Start date (YYYY-MM-DD). Defaults to two years before the end date.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Where prices come from.
        #[arg(long, value_enum, default_value_t = Source::Yahoo)]
        source: Source,

        /// Directory of `<SYMBOL>.csv` files (with --source csv).
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Path to a TOML analysis config. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write `<SYMBOL>_report.json` and `<SYMBOL>_series.csv` here.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the JSON report instead of the text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default analysis configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbols,
            benchmark,
            no_benchmark,
            start,
            end,
            source,
            data_dir,
            config,
            output,
            json,
        } => {
            let benchmark = (!no_benchmark).then_some(benchmark);
            let failures = run_analyze(AnalyzeArgs {
                symbols,
                benchmark,
                start,
                end,
                source,
                data_dir,
                config,
                output,
                json,
            })?;
            if failures > 0 {
                eprintln!("{failures} symbol(s) failed");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", AnalysisConfig::default().to_toml()?);
            Ok(())
        }
    }
}

struct AnalyzeArgs {
    symbols: Vec<String>,
    benchmark: Option<String>,
    start: Option<String>,
    end: Option<String>,
    source: Source,
    data_dir: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

fn build_provider(source: Source, data_dir: &Path) -> Result<Box<dyn DataProvider>> {
    let provider: Box<dyn DataProvider> = match source {
        Source::Yahoo => Box::new(YahooProvider::new()?),
        Source::Csv => Box::new(CsvProvider::new(data_dir)),
        Source::Synthetic => Box::new(SyntheticProvider::new()),
    };
    Ok(provider)
}

/// Run the analysis and return the number of symbols that failed.
fn run_analyze(args: AnalyzeArgs) -> Result<usize> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    config.validate()?;

    let end = args
        .end
        .as_deref()
        .map(parse_date)
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let start = args
        .start
        .as_deref()
        .map(parse_date)
        .transpose()?
        .unwrap_or_else(|| end - chrono::Duration::days(730));
    if start > end {
        anyhow::bail!("--start {start} is after --end {end}");
    }

    let provider = build_provider(args.source, &args.data_dir)?;
    info!(provider = provider.name(), %start, %end, "loading prices");

    let benchmark = args
        .benchmark
        .as_deref()
        .map(|symbol| {
            provider
                .load_series(symbol, start, end)
                .with_context(|| format!("failed to load benchmark {symbol}"))
        })
        .transpose()?;

    let mut failures = 0;
    let mut loaded: Vec<PriceSeries> = Vec::with_capacity(args.symbols.len());
    for symbol in &args.symbols {
        match provider.load_series(symbol, start, end) {
            Ok(series) => loaded.push(series),
            Err(e) => {
                error!(symbol = symbol.as_str(), error = %e, "failed to load prices");
                failures += 1;
            }
        }
    }

    let results = analyze_many(&loaded, benchmark.as_ref(), &config);

    for (series, result) in loaded.iter().zip(results) {
        let report = match result {
            Ok(report) => report.with_fundamentals(provider.fundamentals(series.symbol())),
            Err(e) => {
                error!(symbol = series.symbol(), error = %e, "analysis failed");
                failures += 1;
                continue;
            }
        };

        if args.json {
            println!("{}", export::export_json(&report)?);
        } else {
            print!("{}", export::render_report(&report, config.rsi_period));
            println!();
        }

        if let Some(dir) = &args.output {
            for path in export::save_report(&report, dir)? {
                info!(path = %path.display(), "wrote");
            }
        }
    }

    Ok(failures)
}
