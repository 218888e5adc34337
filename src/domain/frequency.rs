//! Dividend payout cadence classification.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::record::DividendEvent;

const LOOKBACK_DAYS: i64 = 365;

/// Inferred payment cadence, from the mean gap between recent ex-dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayoutFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Unknown,
}

impl PayoutFrequency {
    /// Classify from the mean day-gap between consecutive ex-dates within
    /// the year ending at `as_of` (the analysis date, not the series end);
    /// declared ex-dates past `as_of` are ignored. Fewer than two recent
    /// events means the cadence is unknowable.
    ///
    /// This is a heuristic: an irregular special dividend biases the mean.
    /// The thresholds and the use of the mean (not the median) are kept for
    /// compatibility with historical classifications.
    pub fn classify(events: &[DividendEvent], as_of: NaiveDate) -> Self {
        let cutoff = as_of - Duration::days(LOOKBACK_DAYS);
        let mut recent: Vec<NaiveDate> = events
            .iter()
            .map(|e| e.ex_date)
            .filter(|&d| d >= cutoff && d <= as_of)
            .collect();
        recent.sort();

        if recent.len() < 2 {
            return Self::Unknown;
        }

        let gaps: Vec<i64> = recent.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
        let mean_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;

        // Inclusive upper thresholds, checked in order.
        if mean_gap <= 10.0 {
            Self::Weekly
        } else if mean_gap <= 35.0 {
            Self::Monthly
        } else if mean_gap <= 110.0 {
            Self::Quarterly
        } else {
            Self::Unknown
        }
    }

    /// Single-letter report label; empty for unknown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "W",
            Self::Monthly => "M",
            Self::Quarterly => "Q",
            Self::Unknown => "",
        }
    }
}
