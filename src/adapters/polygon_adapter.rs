//! Polygon.io API adapter with request rate limiting.
//!
//! Free-tier Polygon keys allow a handful of requests per minute, so the
//! adapter enforces a minimum interval between requests by sleeping.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::error::DivvyError;
use crate::domain::record::{RawDividend, RawPriceBar};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;

const BASE_URL: &str = "https://api.polygon.io";
const DEFAULT_REQUESTS_PER_MINUTE: i64 = 5;

#[derive(Debug, Deserialize)]
struct DividendsResponse {
    #[serde(default)]
    results: Vec<RawDividend>,
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    results: Vec<RawPriceBar>,
}

#[derive(Debug)]
pub struct PolygonAdapter {
    client: reqwest::blocking::Client,
    api_key: String,
    min_request_interval: Duration,
    last_request: Cell<Option<Instant>>,
}

impl PolygonAdapter {
    pub fn new(api_key: String, requests_per_minute: i64) -> Self {
        let rpm = requests_per_minute.max(1) as f64;
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            min_request_interval: Duration::from_secs_f64(60.0 / rpm),
            last_request: Cell::new(None),
        }
    }

    /// Build from the `[polygon]` config section. `api_key` is required.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DivvyError> {
        let api_key =
            config
                .get_string("polygon", "api_key")
                .ok_or_else(|| DivvyError::ConfigMissing {
                    section: "polygon".into(),
                    key: "api_key".into(),
                })?;
        let rpm = config.get_int(
            "polygon",
            "requests_per_minute",
            DEFAULT_REQUESTS_PER_MINUTE,
        );
        Ok(Self::new(api_key, rpm))
    }

    fn rate_limit(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.min_request_interval {
                let wait = self.min_request_interval - elapsed;
                log::debug!("rate limiting: sleeping for {:.2}s", wait.as_secs_f64());
                thread::sleep(wait);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }

    fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DivvyError> {
        self.rate_limit();
        log::info!("requesting {path}");

        let url = format!("{BASE_URL}{path}");
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DivvyError::Api {
                reason: format!("{path} returned status {status}"),
            });
        }

        Ok(response.json()?)
    }
}

impl MarketDataPort for PolygonAdapter {
    fn fetch_dividends(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawDividend>, DivvyError> {
        let from = start_date.format("%Y-%m-%d").to_string();
        let to = end_date.format("%Y-%m-%d").to_string();
        let response: DividendsResponse = self.get(
            "/v3/reference/dividends",
            &[
                ("ticker", symbol),
                ("limit", "1000"),
                ("ex_dividend_date.gte", &from),
                ("ex_dividend_date.lte", &to),
            ],
        )?;
        Ok(response.results)
    }

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawPriceBar>, DivvyError> {
        let path = format!(
            "/v2/aggs/ticker/{symbol}/range/1/day/{}/{}",
            start_date.format("%Y-%m-%d"),
            end_date.format("%Y-%m-%d"),
        );
        let response: AggregatesResponse = self.get(
            &path,
            &[("adjusted", "true"), ("sort", "asc"), ("limit", "50000")],
        )?;
        Ok(response.results)
    }
}
