//! Price bar and dividend record representations.
//!
//! Two layers: raw wire records as they arrive from the Polygon API and the
//! JSON store (`RawPriceBar`, `RawDividend`), and normalized domain values
//! keyed by calendar date (`PriceBar`, `DividendEvent`).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily aggregate bar as returned by Polygon (`t` epoch milliseconds, `c` close).
/// Unknown upstream fields (open, high, low, volume) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPriceBar {
    pub t: i64,
    pub c: f64,
}

impl RawPriceBar {
    /// Normalize the epoch-millisecond timestamp to a UTC calendar date.
    /// Returns `None` for timestamps outside chrono's representable range.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.t).map(|dt| dt.date_naive())
    }
}

/// Dividend record as returned by Polygon, keyed by ex-dividend date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDividend {
    pub ex_dividend_date: String,
    pub cash_amount: f64,
}

impl RawDividend {
    /// Parse the ISO `YYYY-MM-DD` ex-dividend date. Returns `None` when the
    /// upstream record is malformed.
    pub fn ex_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.ex_dividend_date, "%Y-%m-%d").ok()
    }
}

/// One closing price per trading day. Immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// One cash dividend per ex-dividend date. Immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividendEvent {
    pub ex_date: NaiveDate,
    pub cash_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn raw_bar_date_from_epoch_millis() {
        // 2024-01-15T00:00:00Z
        let bar = RawPriceBar {
            t: 1_705_276_800_000,
            c: 105.0,
        };
        assert_eq!(bar.date(), NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn raw_bar_date_ignores_intraday_offset() {
        // 2024-01-15T21:00:00Z (Polygon stamps bars at market close)
        let bar = RawPriceBar {
            t: 1_705_352_400_000,
            c: 105.0,
        };
        assert_eq!(bar.date(), NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn raw_dividend_parses_iso_date() {
        let div = RawDividend {
            ex_dividend_date: "2024-03-08".to_string(),
            cash_amount: 0.24,
        };
        assert_eq!(div.ex_date(), NaiveDate::from_ymd_opt(2024, 3, 8));
    }

    #[test]
    fn raw_dividend_rejects_malformed_date() {
        let div = RawDividend {
            ex_dividend_date: "08/03/2024".to_string(),
            cash_amount: 0.24,
        };
        assert_eq!(div.ex_date(), None);
    }

    #[test]
    fn raw_bar_deserializes_ignoring_extra_fields() {
        let json = r#"{"v":4110500,"o":102.1,"c":104.25,"h":104.9,"l":101.6,"t":1705276800000}"#;
        let bar: RawPriceBar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.t, 1_705_276_800_000);
        assert_relative_eq!(bar.c, 104.25);
    }
}
