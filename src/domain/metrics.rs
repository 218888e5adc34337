//! Trailing-window performance metrics.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::series::TimeSeries;

/// Fixed 30-day month approximation for window arithmetic. Intentional
/// simplification; not calendar-month arithmetic.
const DAYS_PER_MONTH: i64 = 30;

/// Fully computed financial fields for one trailing window.
///
/// Currency and percentage fields are rounded to 2 decimal places; the
/// computation itself runs at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReturns {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    pub price_change: f64,
    pub price_change_pct: f64,
    pub total_dividends: f64,
    pub dividend_yield_pct: f64,
    pub total_return: f64,
    pub total_return_pct: f64,
    pub profitable_price: bool,
    pub profitable_total: bool,
}

/// Outcome of a window computation. Financial fields are either all present
/// (`Complete`) or all absent; partial records cannot be expressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WindowOutcome {
    /// Empty price series: nothing to anchor the window to.
    NoData,
    /// Window resolved but a price lookup failed inside it. Only reachable
    /// through pathological gaps, since both endpoints derive from series
    /// bounds.
    MissingPrice {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    Complete(WindowReturns),
}

/// Point-in-time performance record for one requested trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowMetrics {
    pub period_months: u32,
    pub outcome: WindowOutcome,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl WindowMetrics {
    /// Compute metrics for the trailing `months` window.
    ///
    /// The window ends at the latest bar date in the series, never at the
    /// wall clock, so stale data yields a stable result instead of drifting
    /// as time advances. The start is `end − months × 30 days`, clamped to
    /// the earliest available bar: a window longer than the history shrinks
    /// silently, and the resolved `start_date` is reported so callers can
    /// detect the truncation.
    pub fn compute(series: &TimeSeries, months: u32) -> Self {
        let Some((earliest, end_date)) = series.price_date_bounds() else {
            return Self {
                period_months: months,
                outcome: WindowOutcome::NoData,
            };
        };

        let target_start = end_date - Duration::days(months as i64 * DAYS_PER_MONTH);
        let start_date = target_start.max(earliest);

        let (Some(start_price), Some(end_price)) = (
            series.price_at_or_before(start_date),
            series.price_at_or_before(end_date),
        ) else {
            return Self {
                period_months: months,
                outcome: WindowOutcome::MissingPrice {
                    start_date,
                    end_date,
                },
            };
        };

        let price_change = end_price - start_price;
        let price_change_pct = price_change / start_price * 100.0;

        let total_dividends = series.dividends_in_range(start_date, end_date);
        let dividend_yield_pct = total_dividends / start_price * 100.0;

        let total_return = price_change + total_dividends;
        let total_return_pct = total_return / start_price * 100.0;

        Self {
            period_months: months,
            outcome: WindowOutcome::Complete(WindowReturns {
                start_date,
                end_date,
                start_price: round2(start_price),
                end_price: round2(end_price),
                price_change: round2(price_change),
                price_change_pct: round2(price_change_pct),
                total_dividends: round2(total_dividends),
                dividend_yield_pct: round2(dividend_yield_pct),
                total_return: round2(total_return),
                total_return_pct: round2(total_return_pct),
                // Strictly positive: a flat window is not profitable.
                profitable_price: price_change > 0.0,
                profitable_total: total_return > 0.0,
            }),
        }
    }

    pub fn returns(&self) -> Option<&WindowReturns> {
        match &self.outcome {
            WindowOutcome::Complete(r) => Some(r),
            _ => None,
        }
    }
}

/// Price history projection for charting: bars dated at or after
/// `end − months × 30 days`.
///
/// Unlike [`WindowMetrics::compute`] this uses the unclamped target start.
/// A chart should show exactly the requested window when it exists and
/// truncate naturally when it does not, whereas metrics must report the
/// window they actually used.
pub fn price_history(series: &TimeSeries, months: u32) -> Vec<(NaiveDate, f64)> {
    let Some((_, end_date)) = series.price_date_bounds() else {
        return Vec::new();
    };
    let target_start = end_date - Duration::days(months as i64 * DAYS_PER_MONTH);

    series
        .prices()
        .iter()
        .filter(|bar| bar.date >= target_start)
        .map(|bar| (bar.date, bar.close))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{RawDividend, RawPriceBar};
    use approx::assert_relative_eq;

    fn millis(date: NaiveDate) -> i64 {
        date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
    }

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn series(bars: &[(NaiveDate, f64)], divs: &[(NaiveDate, f64)]) -> TimeSeries {
        let raw_bars: Vec<RawPriceBar> = bars
            .iter()
            .map(|&(date, c)| RawPriceBar { t: millis(date), c })
            .collect();
        let raw_divs: Vec<RawDividend> = divs
            .iter()
            .map(|&(date, cash_amount)| RawDividend {
                ex_dividend_date: date.format("%Y-%m-%d").to_string(),
                cash_amount,
            })
            .collect();
        TimeSeries::from_records(&raw_bars, &raw_divs)
    }

    #[test]
    fn six_month_window_with_dividends() {
        // 100 → 110 over exactly 180 days, 5.00 of dividends in between.
        let end = d(2024, 6, 29);
        let start = end - Duration::days(180);
        let s = series(
            &[(start, 100.0), (end, 110.0)],
            &[(start + Duration::days(60), 2.5), (start + Duration::days(150), 2.5)],
        );

        let m = WindowMetrics::compute(&s, 6);
        assert_eq!(m.period_months, 6);
        let r = m.returns().expect("complete window");
        assert_eq!(r.start_date, start);
        assert_eq!(r.end_date, end);
        assert_relative_eq!(r.price_change, 10.0);
        assert_relative_eq!(r.price_change_pct, 10.0);
        assert_relative_eq!(r.total_dividends, 5.0);
        assert_relative_eq!(r.dividend_yield_pct, 5.0);
        assert_relative_eq!(r.total_return, 15.0);
        assert_relative_eq!(r.total_return_pct, 15.0);
        assert!(r.profitable_price);
        assert!(r.profitable_total);
    }

    #[test]
    fn empty_dividend_history_yields_zero() {
        let end = d(2024, 6, 29);
        let start = end - Duration::days(180);
        let s = series(&[(start, 100.0), (end, 110.0)], &[]);

        let r = WindowMetrics::compute(&s, 6);
        let r = r.returns().unwrap();
        assert_eq!(r.total_dividends, 0.0);
        assert_eq!(r.dividend_yield_pct, 0.0);
        assert_relative_eq!(r.total_return, 10.0);
    }

    #[test]
    fn empty_price_series_is_no_data() {
        let s = series(&[], &[(d(2024, 3, 1), 0.5)]);
        let m = WindowMetrics::compute(&s, 12);
        assert_eq!(m.period_months, 12);
        assert_eq!(m.outcome, WindowOutcome::NoData);
        assert!(m.returns().is_none());
    }

    #[test]
    fn window_clamps_to_earliest_history() {
        // 60 days of history, 12-month window requested.
        let s = series(&[(d(2024, 4, 30), 50.0), (d(2024, 6, 29), 55.0)], &[]);
        let r = WindowMetrics::compute(&s, 12);
        let r = r.returns().unwrap();
        assert_eq!(r.start_date, d(2024, 4, 30));
        assert_relative_eq!(r.start_price, 50.0);
    }

    #[test]
    fn end_date_anchors_to_series_not_wall_clock() {
        // Data ends years in the past; the window still ends there.
        let s = series(&[(d(2019, 1, 2), 80.0), (d(2019, 6, 28), 90.0)], &[]);
        let r = WindowMetrics::compute(&s, 6);
        assert_eq!(r.returns().unwrap().end_date, d(2019, 6, 28));
    }

    #[test]
    fn compute_is_idempotent() {
        let end = d(2024, 6, 29);
        let s = series(
            &[(end - Duration::days(90), 100.0), (end, 97.5)],
            &[(end - Duration::days(30), 1.0)],
        );
        assert_eq!(WindowMetrics::compute(&s, 3), WindowMetrics::compute(&s, 3));
    }

    #[test]
    fn flat_window_is_not_profitable() {
        let end = d(2024, 6, 29);
        let s = series(&[(end - Duration::days(90), 100.0), (end, 100.0)], &[]);
        let r = WindowMetrics::compute(&s, 3);
        let r = r.returns().unwrap();
        assert_eq!(r.price_change, 0.0);
        assert!(!r.profitable_price);
        assert!(!r.profitable_total);
    }

    #[test]
    fn dividends_rescue_losing_price_window() {
        let end = d(2024, 6, 29);
        let s = series(
            &[(end - Duration::days(90), 100.0), (end, 98.0)],
            &[(end - Duration::days(45), 3.0)],
        );
        let r = WindowMetrics::compute(&s, 3);
        let r = r.returns().unwrap();
        assert!(!r.profitable_price);
        assert!(r.profitable_total);
        assert_relative_eq!(r.total_return, 1.0);
    }

    #[test]
    fn output_fields_rounded_to_two_decimals() {
        let end = d(2024, 6, 29);
        let s = series(&[(end - Duration::days(90), 3.0), (end, 4.0)], &[]);
        let r = WindowMetrics::compute(&s, 3);
        let r = r.returns().unwrap();
        // 1/3 → 33.333...% rounds to 33.33.
        assert_relative_eq!(r.price_change_pct, 33.33);
    }

    #[test]
    fn price_history_uses_unclamped_start() {
        // Only 10 days of history; a 3-month request returns all of it.
        let end = d(2024, 6, 29);
        let s = series(
            &[
                (end - Duration::days(10), 1.0),
                (end - Duration::days(5), 2.0),
                (end, 3.0),
            ],
            &[],
        );
        let history = price_history(&s, 3);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], (end - Duration::days(10), 1.0));
        assert_eq!(history[2], (end, 3.0));
    }

    #[test]
    fn price_history_filters_older_bars() {
        let end = d(2024, 6, 29);
        let s = series(
            &[
                (end - Duration::days(400), 1.0),
                (end - Duration::days(20), 2.0),
                (end, 3.0),
            ],
            &[],
        );
        let history = price_history(&s, 1);
        let dates: Vec<NaiveDate> = history.iter().map(|p| p.0).collect();
        assert_eq!(dates, vec![end - Duration::days(20), end]);
    }

    #[test]
    fn price_history_empty_series() {
        assert!(price_history(&series(&[], &[]), 12).is_empty());
    }
}
