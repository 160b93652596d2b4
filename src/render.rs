//! Pure page rendering: `Snapshot` in, HTML out.
//!
//! Nothing here touches the network or shared state. The page carries the
//! settings form, the read-only metrics, and a filled time-series chart of
//! water levels with the alarm-level (red, dashed) and pit-depth (green,
//! dashed) reference lines. Chart drawing is delegated to Plotly from CDN
//! with the data arrays inlined as JSON; every render replaces the chart
//! wholesale. A meta-refresh tag keeps the browser pulling the latest
//! snapshot without any page-side script of our own.

use crate::models::{round2, Snapshot};

// ---

const STYLE: &str = r#"
    :root { --bg: #10151c; --surface: #1a212b; --border: #2b3442; --text: #e2e8f0; --muted: #8b98a9; }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }
    .container { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
    header { display: flex; justify-content: space-between; align-items: baseline; flex-wrap: wrap; margin-bottom: 1rem; }
    h1 { font-size: 1.25rem; font-weight: 600; }
    .updated { color: var(--muted); font-size: 0.875rem; }
    .metrics { display: flex; gap: 1rem; flex-wrap: wrap; margin-bottom: 1rem; }
    .metric { background: var(--surface); border: 1px solid var(--border); border-radius: 0.5rem; padding: 0.75rem 1rem; }
    .metric .value { font-size: 1.1rem; font-weight: 600; }
    .metric .label { color: var(--muted); font-size: 0.8rem; }
    #time-series-plot { background: var(--surface); border: 1px solid var(--border); border-radius: 0.5rem; min-height: 360px; margin-bottom: 1rem; }
    form.settings { background: var(--surface); border: 1px solid var(--border); border-radius: 0.5rem; padding: 1rem; display: flex; gap: 1rem; flex-wrap: wrap; align-items: flex-end; margin-bottom: 1rem; }
    label { display: flex; flex-direction: column; gap: 0.25rem; font-size: 0.8rem; color: var(--muted); }
    input { background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 0.375rem; padding: 0.4rem 0.6rem; width: 9rem; }
    button { background: #2563eb; color: white; border: none; border-radius: 0.375rem; padding: 0.5rem 1rem; cursor: pointer; }
    form.reset button { background: #7f1d1d; }
"#;

/// Render the dashboard page.
///
/// `None` means no refresh has succeeded yet; the placeholder page still
/// meta-refreshes so the browser picks up the first snapshot on its own.
pub fn page(snapshot: Option<&Snapshot>, meta_refresh_secs: u64) -> String {
    // ---
    let body = match snapshot {
        Some(snap) => snapshot_body(snap),
        None => "<p class=\"updated\">Waiting for the first refresh from the backend...</p>"
            .to_string(),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <meta http-equiv=\"refresh\" content=\"{meta_refresh_secs}\">\n\
         <title>Sump Monitor</title>\n\
         <script src=\"https://cdn.plot.ly/plotly-2.32.0.min.js\"></script>\n\
         <style>{STYLE}</style>\n\
         </head>\n<body>\n<div class=\"container\">\n{body}\n</div>\n</body>\n</html>\n"
    )
}

// ---

fn snapshot_body(snap: &Snapshot) -> String {
    // ---
    let s = &snap.settings;
    let mut out = String::new();

    out.push_str(&format!(
        "<header><h1>Sump Monitor: {}</h1>\
         <p class=\"updated\">Last updated {} UTC</p></header>\n",
        escape_html(&s.sump_id),
        snap.fetched_at.format("%Y-%m-%d %H:%M:%S"),
    ));

    out.push_str("<section class=\"metrics\">\n");
    out.push_str(&metric("Max distance (cm)", "maxDistance", fmt2(snap.max_distance)));
    out.push_str(&metric("Min distance (cm)", "minDistance", fmt2(snap.min_distance)));
    out.push_str(&metric(
        "Latest water level (cm)",
        "latestWaterLevel",
        fmt2(snap.latest_water_level),
    ));
    out.push_str(&metric(
        "Latest reading",
        "latestTimestamp",
        snap.latest_timestamp
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "n/a".to_string()),
    ));
    out.push_str("</section>\n");

    out.push_str("<div id=\"time-series-plot\"></div>\n");

    // Settings form: field names match the backend's POST /settings contract
    out.push_str(&format!(
        "<form class=\"settings\" method=\"post\" action=\"/settings\">\n\
         <label>Sump ID <input name=\"sump_id\" value=\"{}\"></label>\n\
         <label>Pit depth (cm) <input name=\"pit_depth\" type=\"number\" step=\"any\" value=\"{}\"></label>\n\
         <label>Alarm level (cm) <input name=\"alarm_level\" type=\"number\" step=\"any\" value=\"{}\"></label>\n\
         <label>Log rate (s) <input name=\"log_rate\" type=\"number\" value=\"{}\"></label>\n\
         <label>Reading rate (s) <input name=\"heartbeat\" type=\"number\" value=\"{}\"></label>\n\
         <label>Threshold (cm) <input name=\"threshold\" type=\"number\" step=\"any\" value=\"{}\"></label>\n\
         <button type=\"submit\">Save settings</button>\n\
         </form>\n",
        escape_html(&s.sump_id),
        s.pit_depth,
        s.alarm_level,
        s.log_rate,
        s.heartbeat,
        s.threshold,
    ));
    out.push_str(
        "<form class=\"reset\" method=\"post\" action=\"/reset\">\
         <button type=\"submit\">Reset readings</button></form>\n",
    );

    out.push_str(&chart_script(snap));
    out
}

fn metric(label: &str, id: &str, value: String) -> String {
    format!(
        "<div class=\"metric\"><div class=\"value\" id=\"{id}\">{value}</div>\
         <div class=\"label\">{label}</div></div>\n"
    )
}

/// Inline Plotly setup for the water-level chart.
fn chart_script(snap: &Snapshot) -> String {
    // ---
    let timestamps: Vec<&str> = snap.readings.iter().map(|r| r.timestamp.as_str()).collect();
    let ts_json = serde_json::to_string(&timestamps).unwrap_or_else(|_| "[]".to_string());
    let wl_json = serde_json::to_string(&snap.water_levels).unwrap_or_else(|_| "[]".to_string());

    // The reference lines span the full timestamp range, so they only exist
    // when there is at least one reading.
    let shapes = match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) => format!(
            "[{},{}]",
            hline(first, last, snap.settings.alarm_level, "red"),
            hline(first, last, snap.settings.pit_depth, "green"),
        ),
        _ => "[]".to_string(),
    };

    format!(
        "<script>\n\
         var trace = {{\n\
           x: {ts_json},\n\
           y: {wl_json},\n\
           type: 'scatter',\n\
           mode: 'lines',\n\
           fill: 'tozeroy',\n\
           line: {{ color: 'rgb(0, 100, 255)' }},\n\
           name: 'Sump Water Levels'\n\
         }};\n\
         var layout = {{\n\
           paper_bgcolor: 'rgba(0,0,0,0)',\n\
           plot_bgcolor: 'rgba(0,0,0,0)',\n\
           font: {{ color: 'white' }},\n\
           xaxis: {{ showgrid: true, gridcolor: 'gray' }},\n\
           yaxis: {{ title: {{ text: 'Water level (cm)' }}, showgrid: true, gridcolor: 'gray' }},\n\
           shapes: {shapes}\n\
         }};\n\
         Plotly.newPlot('time-series-plot', [trace], layout, {{ responsive: true }});\n\
         </script>\n"
    )
}

/// One dashed horizontal reference line as a Plotly layout shape.
fn hline(x0: &str, x1: &str, y: f64, color: &str) -> String {
    // ---
    let x0 = serde_json::to_string(x0).unwrap_or_else(|_| "\"\"".to_string());
    let x1 = serde_json::to_string(x1).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "{{ type: 'line', x0: {x0}, x1: {x1}, y0: {y}, y1: {y}, \
         line: {{ color: '{color}', width: 2, dash: 'dash' }} }}"
    )
}

fn fmt2(value: Option<f64>) -> String {
    // ---
    match value {
        Some(v) => format!("{:.2}", round2(v)),
        None => "n/a".to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    // ---
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::{Reading, Settings, Snapshot};
    use chrono::Utc;

    fn sample_snapshot() -> Snapshot {
        // ---
        let settings: Settings = serde_json::from_str(
            r#"{"sump_id": "basement", "pit_depth": 100.0, "alarm_level": 80.0}"#,
        )
        .unwrap();
        let readings = vec![
            Reading {
                timestamp: "2024-01-01T10:00:00".to_string(),
                distance: 42.5,
            },
            Reading {
                timestamp: "2024-01-01T10:05:00".to_string(),
                distance: 40.0,
            },
        ];
        Snapshot::derive(settings, readings, Utc::now())
    }

    #[test]
    fn test_page_shows_rounded_metrics() {
        // ---
        let html = page(Some(&sample_snapshot()), 300);

        assert!(html.contains("42.50"));
        assert!(html.contains("40.00"));
        assert!(html.contains("60.00"));
        assert!(html.contains("2024-01-01T10:05:00"));
    }

    #[test]
    fn test_page_populates_form_fields() {
        // ---
        let html = page(Some(&sample_snapshot()), 300);

        assert!(html.contains("name=\"sump_id\" value=\"basement\""));
        assert!(html.contains("name=\"pit_depth\" type=\"number\" step=\"any\" value=\"100\""));
        assert!(html.contains("name=\"alarm_level\" type=\"number\" step=\"any\" value=\"80\""));
    }

    #[test]
    fn test_chart_data_and_reference_lines() {
        // ---
        let html = page(Some(&sample_snapshot()), 300);

        assert!(html.contains(r#"x: ["2024-01-01T10:00:00","2024-01-01T10:05:00"]"#));
        assert!(html.contains("y: [57.5,60.0]"));
        assert!(html.contains("color: 'red'"));
        assert!(html.contains("color: 'green'"));
        assert!(html.contains("dash: 'dash'"));
    }

    #[test]
    fn test_empty_readings_render_without_reference_lines() {
        // ---
        let settings: Settings = serde_json::from_str("{}").unwrap();
        let snap = Snapshot::derive(settings, vec![], Utc::now());
        let html = page(Some(&snap), 300);

        assert!(html.contains("shapes: []"));
        assert!(html.contains("n/a"));
    }

    #[test]
    fn test_placeholder_page_still_meta_refreshes() {
        // ---
        let html = page(None, 120);

        assert!(html.contains("http-equiv=\"refresh\" content=\"120\""));
        assert!(html.contains("Waiting for the first refresh"));
    }

    #[test]
    fn test_sump_id_is_escaped() {
        // ---
        let mut snap = sample_snapshot();
        snap.settings.sump_id = "<script>alert(1)</script>".to_string();
        let html = page(Some(&snap), 300);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("value=\"<script>"));
    }
}
