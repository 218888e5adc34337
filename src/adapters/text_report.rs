//! Console report: fixed-width metrics table with unicode sparklines.

use chrono::NaiveDate;

use crate::domain::metrics::WindowMetrics;
use crate::domain::report::ReportData;

pub const SPARKLINE_WIDTH: usize = 20;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a price history as a fixed-width unicode sparkline.
///
/// Longer histories are downsampled to `width` points; a flat series renders
/// as a horizontal line; fewer than two points render as blank padding.
pub fn sparkline(prices: &[(NaiveDate, f64)], width: usize) -> String {
    if prices.len() < 2 {
        return " ".repeat(width);
    }

    let values: Vec<f64> = prices.iter().map(|p| p.1).collect();
    let sampled: Vec<f64> = if values.len() > width {
        let step = values.len() as f64 / width as f64;
        (0..width).map(|i| values[(i as f64 * step) as usize]).collect()
    } else {
        values
    };

    let min = sampled.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return "─".repeat(sampled.len());
    }

    sampled
        .iter()
        .map(|&v| {
            let level = ((v - min) / (max - min) * (BLOCKS.len() - 1) as f64) as usize;
            BLOCKS[level]
        })
        .collect()
}

/// `+4.20%` / `-1.10%`, or `N/A` when absent.
fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{v:.2}%"),
        Some(v) => format!("{v:.2}%"),
        None => "N/A".to_string(),
    }
}

/// `$1.64 (3.1%)`, or `N/A` when absent.
fn format_dividend(metrics: &WindowMetrics) -> String {
    match metrics.returns() {
        Some(r) => format!("${:.2} ({:.1}%)", r.total_dividends, r.dividend_yield_pct),
        None => "N/A".to_string(),
    }
}

fn format_flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "✓".to_string(),
        Some(false) => "✗".to_string(),
        None => "N/A".to_string(),
    }
}

fn window_columns(metrics: &WindowMetrics) -> [String; 5] {
    let r = metrics.returns();
    [
        format_pct(r.map(|r| r.price_change_pct)),
        format_dividend(metrics),
        format_pct(r.map(|r| r.total_return_pct)),
        format_flag(r.map(|r| r.profitable_price)),
        format_flag(r.map(|r| r.profitable_total)),
    ]
}

/// Render the full report table. Data rows cover the 6m and 12m windows;
/// the chart column is a 12-month sparkline.
pub fn render_table(report: &ReportData) -> String {
    let headers = [
        "Symbol",
        "Freq",
        "Chart (12m)",
        "Price Δ 6m",
        "Div 6m ($+%)",
        "Total 6m",
        "✓ Price",
        "✓ Total",
        "Price Δ 12m",
        "Div 12m ($+%)",
        "Total 12m",
        "✓ Price",
        "✓ Total",
    ];

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    widths[2] = SPARKLINE_WIDTH;
    widths[4] = 15;
    widths[9] = 15;

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(report.symbols.len());
    for symbol in &report.symbols {
        let mut row = vec![
            symbol.symbol.clone(),
            symbol.frequency.label().to_string(),
            sparkline(&symbol.price_history, SPARKLINE_WIDTH),
        ];
        row.extend(window_columns(&symbol.metrics_6m));
        row.extend(window_columns(&symbol.metrics_12m));
        rows.push(row);
    }

    for row in &rows {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule_len = widths.iter().sum::<usize>() + widths.len() * 3 - 1;
    let pad = |cell: &str, width: usize| {
        let fill = width.saturating_sub(cell.chars().count());
        format!("{cell}{}", " ".repeat(fill))
    };

    let mut out = String::new();
    out.push_str(&"=".repeat(rule_len));
    out.push('\n');
    let header_row: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| pad(h, w))
        .collect();
    out.push_str(&header_row.join(" │ "));
    out.push('\n');
    out.push_str(&"=".repeat(rule_len));
    out.push('\n');

    for row in &rows {
        let cells: Vec<String> = row.iter().zip(&widths).map(|(c, &w)| pad(c, w)).collect();
        out.push_str(&cells.join(" │ "));
        out.push('\n');
    }

    out.push_str(&"=".repeat(rule_len));
    out.push('\n');
    out
}
