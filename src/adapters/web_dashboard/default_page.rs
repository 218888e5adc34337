//! Built-in dashboard page.
//!
//! Self-contained HTML that reads `window.__DIVIDEND_DASHBOARD__` from
//! `assets/data.js` and renders the metrics table with inline SVG
//! sparklines. No external assets, so the build works from `file://`.

pub fn page() -> &'static str {
    r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Dividend Dashboard</title>
<style>
  body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #1c2733; background: #f7f9fb; }
  h1 { font-size: 1.4rem; }
  .meta { color: #5a6b7b; font-size: 0.85rem; margin-bottom: 1.2rem; }
  table { border-collapse: collapse; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
  th, td { padding: 0.45rem 0.7rem; border-bottom: 1px solid #e3e9ef; font-size: 0.85rem; text-align: right; white-space: nowrap; }
  th { background: #eef2f6; position: sticky; top: 0; }
  td.sym, th.sym { text-align: left; font-weight: 600; }
  .up { color: #1a7f37; }
  .down { color: #c42b1c; }
  .na { color: #9aa7b2; }
  .skipped { margin-top: 1rem; color: #8a6d3b; font-size: 0.85rem; }
</style>
</head>
<body>
<h1>Dividend Dashboard</h1>
<div class="meta" id="meta"></div>
<div id="root"></div>
<script src="assets/data.js"></script>
<script>
(function () {
  var data = window.__DIVIDEND_DASHBOARD__;
  if (!data) {
    document.getElementById("root").textContent = "No data payload found.";
    return;
  }

  var meta = data.metadata || {};
  document.getElementById("meta").textContent =
    "Analysis date: " + meta.analysisDate + " · " +
    meta.symbolCount + " of " + meta.requestedSymbolCount + " symbols";

  function pct(v) {
    if (v === null || v === undefined) return '<span class="na">N/A</span>';
    var cls = v > 0 ? "up" : (v < 0 ? "down" : "");
    var sign = v > 0 ? "+" : "";
    return '<span class="' + cls + '">' + sign + v.toFixed(2) + "%</span>";
  }

  function dividend(m) {
    if (m.total_dividends === null) return '<span class="na">N/A</span>';
    return "$" + m.total_dividends.toFixed(2) + " (" + m.dividend_yield_pct.toFixed(1) + "%)";
  }

  function spark(history) {
    if (!history || history.length < 2) return "";
    var w = 120, h = 28;
    var values = history.map(function (p) { return p[1]; });
    var min = Math.min.apply(null, values);
    var max = Math.max.apply(null, values);
    var span = max - min || 1;
    var points = values.map(function (v, i) {
      var x = (i / (values.length - 1)) * w;
      var y = h - ((v - min) / span) * (h - 2) - 1;
      return x.toFixed(1) + "," + y.toFixed(1);
    }).join(" ");
    var color = values[values.length - 1] >= values[0] ? "#1a7f37" : "#c42b1c";
    return '<svg width="' + w + '" height="' + h + '"><polyline fill="none" stroke="' +
      color + '" stroke-width="1.5" points="' + points + '"/></svg>';
  }

  var periods = meta.periods || ["3m", "6m", "12m"];
  var html = '<table><thead><tr><th class="sym">Symbol</th><th>Freq</th><th>Chart (12m)</th>';
  periods.forEach(function (p) {
    html += "<th>Price Δ " + p + "</th><th>Div " + p + "</th><th>Total " + p + "</th>";
  });
  html += "</tr></thead><tbody>";

  (data.symbols || []).forEach(function (s) {
    html += '<tr><td class="sym">' + s.symbol + "</td><td>" +
      (s.dividendFrequency || "—") + "</td><td>" + spark(s.priceHistory) + "</td>";
    periods.forEach(function (p) {
      var m = (s.metrics || {})[p] || {};
      html += "<td>" + pct(m.price_change_pct) + "</td><td>" + dividend(m) +
        "</td><td>" + pct(m.total_return_pct) + "</td>";
    });
    html += "</tr>";
  });
  html += "</tbody></table>";

  if ((meta.skippedSymbols || []).length) {
    html += '<div class="skipped">Skipped (no price data): ' +
      meta.skippedSymbols.join(", ") + "</div>";
  }

  document.getElementById("root").innerHTML = html;
})();
</script>
</body>
</html>
"##
}
