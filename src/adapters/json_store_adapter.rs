//! JSON file store adapter.
//!
//! One file per symbol per record kind:
//! `<dir>/prices/<SYMBOL>_prices.json` and
//! `<dir>/dividends/<SYMBOL>_dividends.json`. Saves merge incoming records
//! into the existing file, keyed by bar timestamp or ex-dividend date, with
//! the later-ingested record winning. Files stay sorted by key.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::error::DivvyError;
use crate::domain::record::{RawDividend, RawPriceBar};
use crate::ports::store_port::StorePort;

pub struct JsonStoreAdapter {
    prices_dir: PathBuf,
    dividends_dir: PathBuf,
}

impl JsonStoreAdapter {
    /// Open (and create if needed) the store layout under `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, DivvyError> {
        let prices_dir = data_dir.as_ref().join("prices");
        let dividends_dir = data_dir.as_ref().join("dividends");
        fs::create_dir_all(&prices_dir)?;
        fs::create_dir_all(&dividends_dir)?;
        Ok(Self {
            prices_dir,
            dividends_dir,
        })
    }

    fn price_file(&self, symbol: &str) -> PathBuf {
        self.prices_dir.join(format!("{symbol}_prices.json"))
    }

    fn dividend_file(&self, symbol: &str) -> PathBuf {
        self.dividends_dir.join(format!("{symbol}_dividends.json"))
    }

    fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, DivvyError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| DivvyError::Store {
            reason: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    fn write_records<T: serde::Serialize>(path: &Path, records: &[T]) -> Result<(), DivvyError> {
        let content = serde_json::to_string_pretty(records).map_err(|e| DivvyError::Store {
            reason: format!("failed to serialize {}: {}", path.display(), e),
        })?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl StorePort for JsonStoreAdapter {
    fn load_prices(&self, symbol: &str) -> Result<Vec<RawPriceBar>, DivvyError> {
        Self::read_records(&self.price_file(symbol))
    }

    fn load_dividends(&self, symbol: &str) -> Result<Vec<RawDividend>, DivvyError> {
        Self::read_records(&self.dividend_file(symbol))
    }

    fn save_prices(&self, symbol: &str, bars: &[RawPriceBar]) -> Result<usize, DivvyError> {
        let path = self.price_file(symbol);
        let existing: Vec<RawPriceBar> = Self::read_records(&path)?;

        let mut by_key: BTreeMap<i64, RawPriceBar> = existing
            .into_iter()
            .map(|bar| (bar.t, bar))
            .collect();
        for bar in bars {
            by_key.insert(bar.t, bar.clone());
        }

        let merged: Vec<RawPriceBar> = by_key.into_values().collect();
        Self::write_records(&path, &merged)?;
        log::info!("saved {} price records for {symbol}", merged.len());
        Ok(merged.len())
    }

    fn save_dividends(&self, symbol: &str, dividends: &[RawDividend]) -> Result<usize, DivvyError> {
        let path = self.dividend_file(symbol);
        let existing: Vec<RawDividend> = Self::read_records(&path)?;

        let mut by_key: BTreeMap<String, RawDividend> = existing
            .into_iter()
            .map(|div| (div.ex_dividend_date.clone(), div))
            .collect();
        for div in dividends {
            by_key.insert(div.ex_dividend_date.clone(), div.clone());
        }

        let merged: Vec<RawDividend> = by_key.into_values().collect();
        Self::write_records(&path, &merged)?;
        log::info!("saved {} dividend records for {symbol}", merged.len());
        Ok(merged.len())
    }

    fn price_date_range(&self, symbol: &str) -> Result<Option<(NaiveDate, NaiveDate)>, DivvyError> {
        let bars = self.load_prices(symbol)?;
        let mut dates = bars.iter().filter_map(|b| b.date());
        let Some(first) = dates.next() else {
            return Ok(None);
        };
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Ok(Some((min, max)))
    }

    fn dividend_date_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, DivvyError> {
        let dividends = self.load_dividends(symbol)?;
        let mut dates = dividends.iter().filter_map(|d| d.ex_date());
        let Some(first) = dates.next() else {
            return Ok(None);
        };
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Ok(Some((min, max)))
    }
}
