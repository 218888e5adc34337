//! Market data retrieval port trait.

use crate::domain::error::DivvyError;
use crate::domain::record::{RawDividend, RawPriceBar};
use chrono::NaiveDate;

pub trait MarketDataPort {
    fn fetch_dividends(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawDividend>, DivvyError>;

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawPriceBar>, DivvyError>;
}
