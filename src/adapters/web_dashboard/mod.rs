//! Static web dashboard build.
//!
//! Produces a self-contained site: `index.html` from the built-in page
//! template, plus `assets/data.json` (for tooling) and `assets/data.js`
//! (the same payload assigned to `window.__DIVIDEND_DASHBOARD__`, so the
//! page works from `file://` without a fetch).

pub mod default_page;

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::domain::error::DivvyError;
use crate::domain::metrics::{WindowMetrics, WindowOutcome};
use crate::domain::report::{ReportData, SymbolReport, REPORT_PERIODS};
use crate::ports::report_port::ReportPort;

const GLOBAL_DATA_VAR: &str = "__DIVIDEND_DASHBOARD__";

/// Flatten a window outcome into the nullable JSON shape the page script
/// expects: absent financial fields become explicit nulls.
fn metrics_json(metrics: &WindowMetrics) -> Value {
    let mut obj = json!({
        "period_months": metrics.period_months,
        "start_date": Value::Null,
        "end_date": Value::Null,
        "start_price": Value::Null,
        "end_price": Value::Null,
        "price_change": Value::Null,
        "price_change_pct": Value::Null,
        "total_dividends": Value::Null,
        "dividend_yield_pct": Value::Null,
        "total_return": Value::Null,
        "total_return_pct": Value::Null,
        "profitable_price": Value::Null,
        "profitable_total": Value::Null,
    });

    match &metrics.outcome {
        WindowOutcome::NoData => {}
        WindowOutcome::MissingPrice {
            start_date,
            end_date,
        } => {
            obj["start_date"] = json!(start_date.to_string());
            obj["end_date"] = json!(end_date.to_string());
        }
        WindowOutcome::Complete(r) => {
            obj["start_date"] = json!(r.start_date.to_string());
            obj["end_date"] = json!(r.end_date.to_string());
            obj["start_price"] = json!(r.start_price);
            obj["end_price"] = json!(r.end_price);
            obj["price_change"] = json!(r.price_change);
            obj["price_change_pct"] = json!(r.price_change_pct);
            obj["total_dividends"] = json!(r.total_dividends);
            obj["dividend_yield_pct"] = json!(r.dividend_yield_pct);
            obj["total_return"] = json!(r.total_return);
            obj["total_return_pct"] = json!(r.total_return_pct);
            obj["profitable_price"] = json!(r.profitable_price);
            obj["profitable_total"] = json!(r.profitable_total);
        }
    }

    obj
}

fn symbol_json(report: &SymbolReport) -> Value {
    let history: Vec<Value> = report
        .price_history
        .iter()
        .map(|(date, price)| json!([date.to_string(), price]))
        .collect();

    let frequency = match report.frequency.label() {
        "" => Value::Null,
        label => json!(label),
    };

    let mut metrics = serde_json::Map::new();
    for months in REPORT_PERIODS {
        if let Some(m) = report.metrics_for(months) {
            metrics.insert(format!("{months}m"), metrics_json(m));
        }
    }

    json!({
        "symbol": report.symbol,
        "dividendFrequency": frequency,
        "priceHistory": history,
        "metrics": metrics,
    })
}

pub fn build_payload(report: &ReportData) -> Value {
    let periods: Vec<String> = REPORT_PERIODS.iter().map(|m| format!("{m}m")).collect();
    json!({
        "metadata": {
            "analysisDate": report.generated_at.format("%B %d, %Y").to_string(),
            "generatedAt": report.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "symbolCount": report.symbols.len(),
            "requestedSymbolCount": report.requested_symbols,
            "skippedSymbols": report.skipped_symbols,
            "periods": periods,
        },
        "symbols": report.symbols.iter().map(symbol_json).collect::<Vec<_>>(),
    })
}

pub struct WebDashboardAdapter;

impl WebDashboardAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebDashboardAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for WebDashboardAdapter {
    /// Build the dashboard under `output_path`. An existing build is
    /// replaced wholesale.
    fn write(&self, report: &ReportData, output_path: &Path) -> Result<(), DivvyError> {
        let payload = build_payload(report);

        if output_path.exists() {
            fs::remove_dir_all(output_path)?;
        }
        let assets_dir = output_path.join("assets");
        fs::create_dir_all(&assets_dir)?;

        fs::write(output_path.join("index.html"), default_page::page())?;

        let pretty = serde_json::to_string_pretty(&payload).map_err(|e| DivvyError::Store {
            reason: format!("failed to serialize dashboard payload: {e}"),
        })?;
        fs::write(assets_dir.join("data.json"), format!("{pretty}\n"))?;
        fs::write(
            assets_dir.join("data.js"),
            format!("window.{GLOBAL_DATA_VAR} = {pretty};\n"),
        )?;

        Ok(())
    }
}
