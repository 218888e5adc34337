//! Per-symbol report assembly.
//!
//! A [`SymbolReport`] bundles everything the reporting surfaces (console
//! table, dashboard, CSV export) need for one symbol: the payout cadence,
//! a year of price history for charting, and metrics over the three
//! standard trailing windows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::frequency::PayoutFrequency;
use super::metrics::{self, WindowMetrics};
use super::series::TimeSeries;

pub const REPORT_PERIODS: [u32; 3] = [3, 6, 12];
const HISTORY_MONTHS: u32 = 12;

#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub frequency: PayoutFrequency,
    pub price_history: Vec<(NaiveDate, f64)>,
    pub metrics_3m: WindowMetrics,
    pub metrics_6m: WindowMetrics,
    pub metrics_12m: WindowMetrics,
}

impl SymbolReport {
    /// Assemble the report for one symbol.
    ///
    /// `as_of` is the analysis date (wall clock at the call site). It feeds
    /// only the frequency classifier; window metrics stay anchored to the
    /// series' own end date.
    pub fn build(symbol: &str, series: &TimeSeries, as_of: NaiveDate) -> Self {
        Self {
            symbol: symbol.to_string(),
            frequency: PayoutFrequency::classify(series.dividends(), as_of),
            price_history: metrics::price_history(series, HISTORY_MONTHS),
            metrics_3m: WindowMetrics::compute(series, 3),
            metrics_6m: WindowMetrics::compute(series, 6),
            metrics_12m: WindowMetrics::compute(series, 12),
        }
    }

    pub fn metrics_for(&self, months: u32) -> Option<&WindowMetrics> {
        match months {
            3 => Some(&self.metrics_3m),
            6 => Some(&self.metrics_6m),
            12 => Some(&self.metrics_12m),
            _ => None,
        }
    }
}

/// A full report run: per-symbol reports sorted by symbol, plus metadata
/// about what was requested and skipped.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub generated_at: NaiveDateTime,
    pub requested_symbols: usize,
    pub skipped_symbols: Vec<String>,
    pub symbols: Vec<SymbolReport>,
}

impl ReportData {
    pub fn new(generated_at: NaiveDateTime, requested_symbols: usize) -> Self {
        Self {
            generated_at,
            requested_symbols,
            skipped_symbols: Vec::new(),
            symbols: Vec::new(),
        }
    }

    pub fn push(&mut self, report: SymbolReport) {
        self.symbols.push(report);
    }

    pub fn skip(&mut self, symbol: &str) {
        self.skipped_symbols.push(symbol.to_string());
    }

    /// Finalize ordering: reports sorted by symbol name.
    pub fn sort(&mut self) {
        self.symbols.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    }
}
