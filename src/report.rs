//! Result reporting: console summary, CSV/JSON export, SVG charts.
//!
//! The charts are self-contained SVG documents built by hand — no plotting
//! dependency. They consume nothing beyond the per-sample [`MetricSet`]
//! values keyed by sample id, so any other charting layer can replace them
//! by reading the same [`SampleResult`] slice.

use crate::harness::SampleResult;
use crate::metrics::MetricSet;
use crate::{Error, Result};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Metric display names, in column order.
const METRIC_LABELS: [&str; 3] = ["ROUGE-like", "Length Ratio", "MAUVE-like"];
/// One color per metric (bar chart) in `METRIC_LABELS` order.
const METRIC_COLORS: [&str; 3] = ["#4c72b0", "#dd8452", "#55a868"];
/// Per-sample colors (radar chart), cycled.
const SAMPLE_COLORS: [&str; 6] = [
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860",
];

/// The three metric values of one sample, in `METRIC_LABELS` order.
fn metric_values(metrics: &MetricSet) -> [f64; 3] {
    [metrics.rouge_like, metrics.length_ratio, metrics.mauve_like]
}

/// Metric values keyed by sample id, the shape any charting layer needs.
#[must_use]
pub fn metric_series(results: &[SampleResult]) -> Vec<(&str, [f64; 3])> {
    results
        .iter()
        .map(|r| (r.sample_id.as_str(), metric_values(&r.metrics)))
        .collect()
}

// =============================================================================
// Console summary
// =============================================================================

/// Render the per-sample results as a human-readable report.
#[must_use]
pub fn render_summary(results: &[SampleResult]) -> String {
    let mut out = String::new();
    out.push_str("===== ADVERSARIAL TESTING RESULTS =====\n\n");
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("SAMPLE {} (ID: {})\n", i + 1, result.sample_id));
        out.push_str(&format!("Original Text: {}\n", result.original_text));
        out.push_str(&format!("Adversarial Text: {}\n", result.adversarial_text));
        out.push_str(&format!("Original Response: {}\n", result.original_response));
        out.push_str(&format!(
            "Adversarial Response: {}\n",
            result.adversarial_response
        ));
        out.push_str("Metrics:\n");
        for (label, value) in METRIC_LABELS.iter().zip(metric_values(&result.metrics)) {
            out.push_str(&format!("  - {}: {:.4}\n", label, value));
        }
        out.push_str(&format!("\n{}\n\n", "-".repeat(50)));
    }
    out
}

// =============================================================================
// CSV / JSON export
// =============================================================================

/// Header of the CSV export.
pub const CSV_HEADER: &str =
    "sample_id,original_text,adversarial_text,rouge_like,length_ratio,mauve_like";

/// Render results as CSV, one row per sample.
#[must_use]
pub fn to_csv(results: &[SampleResult]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for result in results {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(&result.sample_id),
            csv_field(&result.original_text),
            csv_field(&result.adversarial_text),
            result.metrics.rouge_like,
            result.metrics.length_ratio,
            result.metrics.mauve_like
        ));
    }
    out
}

/// Write the CSV export to `path`.
pub fn write_csv(results: &[SampleResult], path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_csv(results))?;
    Ok(())
}

/// Render results as pretty-printed JSON.
pub fn to_json(results: &[SampleResult]) -> Result<String> {
    serde_json::to_string_pretty(results)
        .map_err(|e| Error::invalid_input(format!("JSON serialization failed: {}", e)))
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// SVG charts
// =============================================================================

/// Grouped bar chart: three bars per sample, one group per sample.
#[must_use]
pub fn bar_chart_svg(results: &[SampleResult]) -> String {
    const WIDTH: f64 = 800.0;
    const HEIGHT: f64 = 420.0;
    const LEFT: f64 = 60.0;
    const RIGHT: f64 = 170.0;
    const TOP: f64 = 50.0;
    const BOTTOM: f64 = 50.0;
    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = HEIGHT - TOP - BOTTOM;

    let max_value = chart_max(results);
    let mut svg = svg_open(WIDTH, HEIGHT);
    svg.push_str(&svg_title(
        WIDTH / 2.0,
        24.0,
        "Adversarial Testing Metrics by Sample",
    ));

    // Horizontal gridlines with value labels.
    for tick in 0..=4 {
        let value = max_value * f64::from(tick) / 4.0;
        let y = TOP + plot_h * (1.0 - value / max_value);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#ddd\"/>\n",
            LEFT,
            y,
            LEFT + plot_w,
            y
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\" fill=\"#555\">{:.2}</text>\n",
            LEFT - 6.0,
            y + 4.0,
            value
        ));
    }

    let group_count = results.len().max(1) as f64;
    let group_w = plot_w / group_count;
    let bar_w = group_w / 4.0;
    for (i, result) in results.iter().enumerate() {
        let group_x = LEFT + group_w * i as f64;
        for (m, value) in metric_values(&result.metrics).into_iter().enumerate() {
            let x = group_x + bar_w * (0.5 + m as f64);
            let h = plot_h * (value / max_value);
            svg.push_str(&format!(
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
                x,
                TOP + plot_h - h,
                bar_w,
                h,
                METRIC_COLORS[m]
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" fill=\"#333\">{}</text>\n",
            group_x + group_w / 2.0,
            TOP + plot_h + 18.0,
            xml_escape(&result.sample_id)
        ));
    }

    // Axes.
    svg.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
        LEFT,
        TOP,
        LEFT,
        TOP + plot_h
    ));
    svg.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
        LEFT,
        TOP + plot_h,
        LEFT + plot_w,
        TOP + plot_h
    ));

    // Legend.
    for (m, label) in METRIC_LABELS.iter().enumerate() {
        let y = TOP + 20.0 * m as f64;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n",
            LEFT + plot_w + 16.0,
            y,
            METRIC_COLORS[m]
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#333\">{}</text>\n",
            LEFT + plot_w + 34.0,
            y + 10.0,
            label
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Radar chart: one polygon per sample over the three metric axes.
#[must_use]
pub fn radar_chart_svg(results: &[SampleResult]) -> String {
    const WIDTH: f64 = 560.0;
    const HEIGHT: f64 = 520.0;
    const CX: f64 = 240.0;
    const CY: f64 = 270.0;
    const RADIUS: f64 = 170.0;

    let max_value = chart_max(results);
    let mut svg = svg_open(WIDTH, HEIGHT);
    svg.push_str(&svg_title(
        WIDTH / 2.0,
        24.0,
        "Adversarial Testing Metrics Comparison",
    ));

    // Concentric reference rings.
    for ring in 1..=4 {
        let r = RADIUS * f64::from(ring) / 4.0;
        let points: Vec<String> = (0..3)
            .map(|axis| {
                let (x, y) = polar(CX, CY, r, axis_angle(axis));
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"none\" stroke=\"#ddd\"/>\n",
            points.join(" ")
        ));
    }

    // Axes and axis labels.
    for (axis, label) in METRIC_LABELS.iter().enumerate() {
        let angle = axis_angle(axis);
        let (x, y) = polar(CX, CY, RADIUS, angle);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#aaa\"/>\n",
            CX, CY, x, y
        ));
        let (lx, ly) = polar(CX, CY, RADIUS + 24.0, angle);
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" fill=\"#333\">{}</text>\n",
            lx,
            ly + 4.0,
            label
        ));
    }

    // One closed polygon per sample.
    for (i, result) in results.iter().enumerate() {
        let color = SAMPLE_COLORS[i % SAMPLE_COLORS.len()];
        let points: Vec<String> = metric_values(&result.metrics)
            .into_iter()
            .enumerate()
            .map(|(axis, value)| {
                let r = RADIUS * (value / max_value);
                let (x, y) = polar(CX, CY, r, axis_angle(axis));
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"0.25\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
            points.join(" "),
            color,
            color
        ));
    }

    // Legend.
    for (i, result) in results.iter().enumerate() {
        let color = SAMPLE_COLORS[i % SAMPLE_COLORS.len()];
        let y = 60.0 + 20.0 * i as f64;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n",
            WIDTH - 130.0,
            y,
            color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#333\">Sample {}</text>\n",
            WIDTH - 112.0,
            y + 10.0,
            xml_escape(&result.sample_id)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the bar chart to `path`.
pub fn write_bar_chart(results: &[SampleResult], path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, bar_chart_svg(results))?;
    Ok(())
}

/// Write the radar chart to `path`.
pub fn write_radar_chart(results: &[SampleResult], path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, radar_chart_svg(results))?;
    Ok(())
}

/// Chart scale ceiling: the largest metric value, floored at 1.0 so that
/// the usual [0, 1] scores fill a stable frame.
fn chart_max(results: &[SampleResult]) -> f64 {
    results
        .iter()
        .flat_map(|r| metric_values(&r.metrics))
        .fold(1.0_f64, f64::max)
}

/// Axis angle for the three-axis layout, first axis pointing up.
fn axis_angle(axis: usize) -> f64 {
    -PI / 2.0 + 2.0 * PI * axis as f64 / 3.0
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\" font-family=\"sans-serif\">\n<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n",
        width, height, width, height
    )
}

fn svg_title(x: f64, y: f64, text: &str) -> String {
    format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"16\" text-anchor=\"middle\" fill=\"#111\">{}</text>\n",
        x,
        y,
        xml_escape(text)
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
