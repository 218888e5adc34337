//! Per-symbol time series: ordered price bars plus ordered dividend events.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::record::{DividendEvent, PriceBar, RawDividend, RawPriceBar};

/// Immutable snapshot of one symbol's price and dividend history.
///
/// Both sequences are strictly sorted ascending by date with no duplicate
/// dates. An empty series is valid and means "no data".
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    prices: Vec<PriceBar>,
    dividends: Vec<DividendEvent>,
}

impl TimeSeries {
    /// Build a series from unordered raw records.
    ///
    /// Records are indexed by calendar date in a map before sorting, so a
    /// duplicate date overwrites the earlier record: "last occurrence wins"
    /// is an explicit contract here, not a sort artifact. Records whose date
    /// cannot be normalized are dropped.
    pub fn from_records(prices: &[RawPriceBar], dividends: &[RawDividend]) -> Self {
        let mut dropped = 0usize;

        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for bar in prices {
            match bar.date() {
                Some(date) => {
                    by_date.insert(date, bar.c);
                }
                None => dropped += 1,
            }
        }
        let prices = by_date
            .into_iter()
            .map(|(date, close)| PriceBar { date, close })
            .collect();

        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for div in dividends {
            match div.ex_date() {
                Some(date) => {
                    by_date.insert(date, div.cash_amount);
                }
                None => dropped += 1,
            }
        }
        let dividends = by_date
            .into_iter()
            .map(|(ex_date, cash_amount)| DividendEvent {
                ex_date,
                cash_amount,
            })
            .collect();

        if dropped > 0 {
            log::debug!("dropped {dropped} records with unparseable dates");
        }

        Self { prices, dividends }
    }

    pub fn prices(&self) -> &[PriceBar] {
        &self.prices
    }

    pub fn dividends(&self) -> &[DividendEvent] {
        &self.dividends
    }

    /// Earliest and latest price bar dates, or `None` for an empty series.
    pub fn price_date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.prices.first(), self.prices.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// Close of the latest bar dated at or before `date` (as-of lookup).
    ///
    /// Never looks forward: a past date must not be represented by a future
    /// price. `None` when the series is empty or every bar is later.
    pub fn price_at_or_before(&self, date: NaiveDate) -> Option<f64> {
        let idx = self.prices.partition_point(|bar| bar.date <= date);
        idx.checked_sub(1).map(|i| self.prices[i].close)
    }

    /// Total cash dividends with ex-date in `[start, end]`, inclusive both
    /// ends. An empty dividend history sums to 0.0, which is financially
    /// equivalent to no dividends paid.
    pub fn dividends_in_range(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        self.dividends
            .iter()
            .filter(|d| d.ex_date >= start && d.ex_date <= end)
            .map(|d| d.cash_amount)
            .sum()
    }
}
