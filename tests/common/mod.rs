#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use divvy::domain::error::DivvyError;
use divvy::domain::record::{RawDividend, RawPriceBar};
use divvy::ports::store_port::StorePort;
use std::collections::HashMap;

pub struct MockStorePort {
    pub prices: HashMap<String, Vec<RawPriceBar>>,
    pub dividends: HashMap<String, Vec<RawDividend>>,
    pub errors: HashMap<String, String>,
}

impl MockStorePort {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            dividends: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, symbol: &str, bars: Vec<RawPriceBar>) -> Self {
        self.prices.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_dividends(mut self, symbol: &str, dividends: Vec<RawDividend>) -> Self {
        self.dividends.insert(symbol.to_string(), dividends);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn check(&self, symbol: &str) -> Result<(), DivvyError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DivvyError::Store {
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}

impl StorePort for MockStorePort {
    fn load_prices(&self, symbol: &str) -> Result<Vec<RawPriceBar>, DivvyError> {
        self.check(symbol)?;
        Ok(self.prices.get(symbol).cloned().unwrap_or_default())
    }

    fn load_dividends(&self, symbol: &str) -> Result<Vec<RawDividend>, DivvyError> {
        self.check(symbol)?;
        Ok(self.dividends.get(symbol).cloned().unwrap_or_default())
    }

    fn save_prices(&self, _symbol: &str, bars: &[RawPriceBar]) -> Result<usize, DivvyError> {
        Ok(bars.len())
    }

    fn save_dividends(&self, _symbol: &str, dividends: &[RawDividend]) -> Result<usize, DivvyError> {
        Ok(dividends.len())
    }

    fn price_date_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, DivvyError> {
        self.check(symbol)?;
        let dates: Vec<NaiveDate> = self
            .prices
            .get(symbol)
            .map(|bars| bars.iter().filter_map(|b| b.date()).collect())
            .unwrap_or_default();
        Ok(dates
            .iter()
            .min()
            .copied()
            .zip(dates.iter().max().copied()))
    }

    fn dividend_date_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, DivvyError> {
        self.check(symbol)?;
        let dates: Vec<NaiveDate> = self
            .dividends
            .get(symbol)
            .map(|divs| divs.iter().filter_map(|d| d.ex_date()).collect())
            .unwrap_or_default();
        Ok(dates
            .iter()
            .min()
            .copied()
            .zip(dates.iter().max().copied()))
    }
}

pub fn make_bar(date: NaiveDate, close: f64) -> RawPriceBar {
    RawPriceBar {
        t: date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis(),
        c: close,
    }
}

pub fn make_dividend(date: NaiveDate, amount: f64) -> RawDividend {
    RawDividend {
        ex_dividend_date: date.format("%Y-%m-%d").to_string(),
        cash_amount: amount,
    }
}

/// A year of daily bars drifting gently upward, ending at `end`.
pub fn daily_bars(end: NaiveDate, days: i64, start_close: f64) -> Vec<RawPriceBar> {
    (0..days)
        .map(|i| make_bar(end - Duration::days(i), start_close + (days - i) as f64 * 0.02))
        .collect()
}

/// Monthly dividends of `amount`, most recent 15 days before `end`.
pub fn monthly_dividends(end: NaiveDate, count: i64, amount: f64) -> Vec<RawDividend> {
    (0..count)
        .map(|i| make_dividend(end - Duration::days(15 + i * 30), amount))
        .collect()
}
