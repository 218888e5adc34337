//! Local record store port trait.

use crate::domain::error::DivvyError;
use crate::domain::record::{RawDividend, RawPriceBar};
use chrono::NaiveDate;

/// Per-symbol persistence of raw price and dividend records.
///
/// `save_*` merges with existing records keyed by timestamp / ex-dividend
/// date (later-ingested value wins) and returns the merged record count.
pub trait StorePort {
    fn load_prices(&self, symbol: &str) -> Result<Vec<RawPriceBar>, DivvyError>;

    fn load_dividends(&self, symbol: &str) -> Result<Vec<RawDividend>, DivvyError>;

    fn save_prices(&self, symbol: &str, bars: &[RawPriceBar]) -> Result<usize, DivvyError>;

    fn save_dividends(&self, symbol: &str, dividends: &[RawDividend]) -> Result<usize, DivvyError>;

    /// Date range of stored price records, or `None` when nothing is stored.
    fn price_date_range(&self, symbol: &str) -> Result<Option<(NaiveDate, NaiveDate)>, DivvyError>;

    /// Date range of stored dividend records.
    fn dividend_date_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, DivvyError>;
}
