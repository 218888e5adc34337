//! CLI definition and dispatch.

use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_export::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store_adapter::JsonStoreAdapter;
use crate::adapters::polygon_adapter::PolygonAdapter;
use crate::adapters::text_report;
use crate::adapters::web_dashboard::WebDashboardAdapter;
use crate::domain::error::DivvyError;
use crate::domain::report::{ReportData, SymbolReport};
use crate::domain::series::TimeSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;
use crate::ports::store_port::StorePort;

const DEFAULT_LOOKBACK_MONTHS: i64 = 24;

#[derive(Parser, Debug)]
#[command(name = "divvy", about = "Dividend income and total-return tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch dividend and price history from Polygon into the local store
    Fetch {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        /// Months of history to request (default from config, else 24)
        #[arg(long)]
        lookback_months: Option<i64>,
    },
    /// Print the metrics table for all configured symbols
    Report {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Build the static web dashboard
    Dashboard {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the metrics table as CSV
    Export {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show stored data ranges for symbol(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Fetch {
            config,
            symbol,
            lookback_months,
        } => run_fetch(&config, symbol.as_deref(), lookback_months),
        Command::Report { config, symbol } => run_report(&config, symbol.as_deref()),
        Command::Dashboard { config, output } => run_dashboard(&config, output.as_deref()),
        Command::Export { config, output } => run_export(&config, output.as_deref()),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DivvyError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Symbols from `--symbol` or the `[report] symbols` list, uppercased.
pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(s) = symbol_override {
        return vec![s.to_uppercase()];
    }

    if let Some(symbols) = config.get_string("report", "symbols") {
        return symbols
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    vec![]
}

/// Output path precedence: `--output` flag, then the `[report]` config key,
/// then the built-in default.
pub fn resolve_output(
    flag: Option<&Path>,
    config: &dyn ConfigPort,
    key: &str,
    default: &str,
) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| config.get_string("report", key).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

fn open_store(config: &dyn ConfigPort) -> Result<JsonStoreAdapter, DivvyError> {
    let data_dir = config
        .get_string("data", "directory")
        .unwrap_or_else(|| "data".to_string());
    JsonStoreAdapter::new(data_dir)
}

/// Load every symbol's stored history and assemble per-symbol reports.
/// Symbols with no stored prices are recorded as skipped, not failed.
pub fn collect_reports(
    store: &dyn StorePort,
    symbols: &[String],
    as_of: NaiveDate,
) -> Result<ReportData, DivvyError> {
    let mut report = ReportData::new(Local::now().naive_local(), symbols.len());

    for symbol in symbols {
        eprintln!("Processing {symbol}...");
        let prices = store.load_prices(symbol)?;
        if prices.is_empty() {
            eprintln!("  No price data for {symbol}, skipping...");
            report.skip(symbol);
            continue;
        }
        let dividends = store.load_dividends(symbol)?;

        let series = TimeSeries::from_records(&prices, &dividends);
        report.push(SymbolReport::build(symbol, &series, as_of));
    }

    report.sort();
    Ok(report)
}

fn build_report(config_path: &PathBuf, symbol_override: Option<&str>) -> Result<ReportData, ExitCode> {
    let config = load_config(config_path)?;
    build_report_from(&config, symbol_override)
}

fn build_report_from(
    config: &FileConfigAdapter,
    symbol_override: Option<&str>,
) -> Result<ReportData, ExitCode> {
    let symbols = resolve_symbols(symbol_override, config);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured (set [report] symbols or pass --symbol)");
        return Err(ExitCode::from(2));
    }

    let store = open_store(config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;

    let as_of = Local::now().date_naive();
    collect_reports(&store, &symbols, as_of).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_fetch(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    lookback_override: Option<i64>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let symbols = resolve_symbols(symbol_override, &config);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured (set [report] symbols or pass --symbol)");
        return ExitCode::from(2);
    }

    let client = match PolygonAdapter::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let lookback_months = lookback_override
        .unwrap_or_else(|| config.get_int("report", "lookback_months", DEFAULT_LOOKBACK_MONTHS));
    let end_date = Local::now().date_naive();
    let start_date = end_date - Duration::days(lookback_months * 30);

    eprintln!(
        "Fetching {} symbols, {} to {}",
        symbols.len(),
        start_date,
        end_date
    );

    let mut failures = 0usize;
    for symbol in &symbols {
        if let Err(e) = fetch_symbol(&client, &store, symbol, start_date, end_date) {
            eprintln!("warning: failed to fetch {symbol} ({e})");
            failures += 1;
        }
    }

    if failures == symbols.len() {
        eprintln!("error: all {failures} symbols failed");
        return ExitCode::from(4);
    }
    eprintln!(
        "\nFetch complete: {} symbols updated, {} failed",
        symbols.len() - failures,
        failures
    );
    ExitCode::SUCCESS
}

fn fetch_symbol(
    client: &dyn MarketDataPort,
    store: &dyn StorePort,
    symbol: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), DivvyError> {
    eprintln!("\nProcessing {symbol}");

    match store.price_date_range(symbol)? {
        Some((min, max)) => eprintln!("  Existing price data: {min} to {max}"),
        None => eprintln!("  No existing price data"),
    }
    match store.dividend_date_range(symbol)? {
        Some((min, max)) => eprintln!("  Existing dividend data: {min} to {max}"),
        None => eprintln!("  No existing dividend data"),
    }

    let dividends = client.fetch_dividends(symbol, start_date, end_date)?;
    if dividends.is_empty() {
        eprintln!("  No dividends found for {symbol}");
    } else {
        let total = store.save_dividends(symbol, &dividends)?;
        eprintln!("  Saved dividends: {} fetched, {total} stored", dividends.len());
    }

    let bars = client.fetch_daily_bars(symbol, start_date, end_date)?;
    if bars.is_empty() {
        eprintln!("  No price data found for {symbol}");
    } else {
        let total = store.save_prices(symbol, &bars)?;
        eprintln!("  Saved prices: {} fetched, {total} stored", bars.len());
    }

    Ok(())
}

fn run_report(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let report = match build_report(config_path, symbol_override) {
        Ok(r) => r,
        Err(code) => return code,
    };

    if report.symbols.is_empty() {
        eprintln!("error: no symbols with price data");
        return ExitCode::from(5);
    }

    println!("{}", text_report::render_table(&report));
    println!("Legend:");
    println!("  Price Δ: price change percentage over the window");
    println!("  Div: total dividends received (and yield on start price)");
    println!("  Total: total return (price change + dividends)");
    println!("  ✓/✗: profitable / not profitable");
    ExitCode::SUCCESS
}

fn run_dashboard(config_path: &PathBuf, output: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let report = match build_report_from(&config, None) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let output = resolve_output(output, &config, "dashboard_output", "build/web_dashboard");

    match WebDashboardAdapter::new().write(&report, &output) {
        Ok(()) => {
            eprintln!("Dashboard written to: {}", output.display());
            if !report.skipped_symbols.is_empty() {
                eprintln!(
                    "Skipped symbols (no price data): {}",
                    report.skipped_symbols.join(", ")
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write dashboard: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_export(config_path: &PathBuf, output: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let report = match build_report_from(&config, None) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let output = resolve_output(output, &config, "export_output", "metrics.csv");

    match CsvExportAdapter::new().write(&report, &output) {
        Ok(()) => {
            eprintln!("Metrics exported to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write CSV: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_info(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let symbols = resolve_symbols(symbol_override, &config);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured (set [report] symbols or pass --symbol)");
        return ExitCode::from(2);
    }

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    for symbol in &symbols {
        match store.price_date_range(symbol) {
            Ok(Some((min, max))) => println!("{symbol}: prices {min} to {max}"),
            Ok(None) => println!("{symbol}: no price data"),
            Err(e) => {
                eprintln!("error querying {symbol}: {e}");
                continue;
            }
        }
        match store.dividend_date_range(symbol) {
            Ok(Some((min, max))) => println!("{symbol}: dividends {min} to {max}"),
            Ok(None) => println!("{symbol}: no dividend data"),
            Err(e) => eprintln!("error querying {symbol}: {e}"),
        }
    }
    ExitCode::SUCCESS
}
