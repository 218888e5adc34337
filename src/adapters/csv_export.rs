//! CSV export of the metrics table.

use std::path::Path;

use crate::domain::error::DivvyError;
use crate::domain::metrics::WindowMetrics;
use crate::domain::report::{ReportData, REPORT_PERIODS};
use crate::ports::report_port::ReportPort;

pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn window_fields(metrics: &WindowMetrics) -> [String; 6] {
    match metrics.returns() {
        Some(r) => [
            r.start_date.to_string(),
            r.end_date.to_string(),
            format!("{:.2}", r.price_change_pct),
            format!("{:.2}", r.total_dividends),
            format!("{:.2}", r.dividend_yield_pct),
            format!("{:.2}", r.total_return_pct),
        ],
        // Absent financial fields export as empty cells.
        None => Default::default(),
    }
}

impl ReportPort for CsvExportAdapter {
    fn write(&self, report: &ReportData, output_path: &Path) -> Result<(), DivvyError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(|e| DivvyError::Store {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        let mut header = vec!["symbol".to_string(), "frequency".to_string()];
        for months in REPORT_PERIODS {
            for field in [
                "start_date",
                "end_date",
                "price_change_pct",
                "total_dividends",
                "dividend_yield_pct",
                "total_return_pct",
            ] {
                header.push(format!("{field}_{months}m"));
            }
        }
        writer.write_record(&header).map_err(|e| DivvyError::Store {
            reason: format!("CSV write error: {e}"),
        })?;

        for symbol in &report.symbols {
            let mut row = vec![symbol.symbol.clone(), symbol.frequency.label().to_string()];
            for months in REPORT_PERIODS {
                if let Some(metrics) = symbol.metrics_for(months) {
                    row.extend(window_fields(metrics));
                }
            }
            writer.write_record(&row).map_err(|e| DivvyError::Store {
                reason: format!("CSV write error: {e}"),
            })?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RawPriceBar;
    use crate::domain::report::SymbolReport;
    use crate::domain::series::TimeSeries;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn sample_report() -> ReportData {
        let end = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let bars: Vec<RawPriceBar> = (0..400)
            .map(|i| RawPriceBar {
                t: (end - Duration::days(i))
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
                    .timestamp_millis(),
                c: 100.0 + i as f64 * 0.01,
            })
            .collect();
        let series = TimeSeries::from_records(&bars, &[]);

        let mut report = ReportData::new(end.and_hms_opt(0, 0, 0).unwrap(), 1);
        report.push(SymbolReport::build("VYM", &series, end));
        report
    }

    #[test]
    fn export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");

        CsvExportAdapter::new().write(&sample_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("symbol,frequency,start_date_3m"));
        assert!(header.contains("total_return_pct_12m"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("VYM,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_series_exports_empty_cells() {
        let mut report = ReportData::new(
            NaiveDate::from_ymd_opt(2024, 6, 28)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            1,
        );
        let series = TimeSeries::from_records(&[], &[]);
        report.push(SymbolReport::build(
            "EMPTY",
            &series,
            NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
        ));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");
        CsvExportAdapter::new().write(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        // symbol, empty frequency, then 18 empty window cells.
        assert_eq!(row, format!("EMPTY,{}", ",".repeat(18)));
    }
}
