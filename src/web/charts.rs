//! Inline SVG charts for the report page

use super::templates::html_escape;
use crate::{heuristics::format_thousands, report::SentimentSlice};
use std::f64::consts::PI;
use std::fmt::Write;

const BAR_WIDTH: f64 = 640.0;
const BAR_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const BAR_COLOR: &str = "skyblue";
const Y_TICKS: u64 = 4;

/// Vertical bar chart of `(label, value)` pairs; empty input renders nothing
pub fn render_bar_chart(bars: &[(&str, u64)], y_label: &str, title: &str) -> String {
    if bars.is_empty() {
        return String::new();
    }

    let plot_w = BAR_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = BAR_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    let baseline = MARGIN_TOP + plot_h;
    let slot = plot_w / bars.len() as f64;

    let mut svg = format!(
        r#"<svg class="chart bar-chart" viewBox="0 0 {BAR_WIDTH} {BAR_HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img">
<text x="{cx}" y="22" text-anchor="middle" font-size="15" font-weight="600">{title}</text>
"#,
        cx = BAR_WIDTH / 2.0,
        title = html_escape(title),
    );

    for i in 0..=Y_TICKS {
        let value = max * i / Y_TICKS;
        let y = baseline - plot_h * (value as f64 / max as f64);
        let _ = writeln!(
            svg,
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#e0e0e0"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="11">{label}</text>"##,
            x2 = BAR_WIDTH - MARGIN_RIGHT,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            label = format_thousands(value),
        );
    }

    for (i, (label, value)) in bars.iter().enumerate() {
        let h = plot_h * (*value as f64 / max as f64);
        let x = MARGIN_LEFT + slot * i as f64 + slot * 0.2;
        let w = slot * 0.6;
        let _ = writeln!(
            svg,
            r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{BAR_COLOR}"><title>{name}: {amount}</title></rect><text x="{lx:.1}" y="{ly:.1}" text-anchor="middle" font-size="12">{name}</text>"#,
            y = baseline - h,
            name = html_escape(label),
            amount = format_thousands(*value),
            lx = x + w / 2.0,
            ly = baseline + 18.0,
        );
    }

    let _ = write!(
        svg,
        r##"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{x2}" y2="{baseline}" stroke="#333"/>
<text transform="translate(18 {my}) rotate(-90)" text-anchor="middle" font-size="12">{y_label}</text>
</svg>"##,
        x2 = BAR_WIDTH - MARGIN_RIGHT,
        my = MARGIN_TOP + plot_h / 2.0,
        y_label = html_escape(y_label),
    );

    svg
}

/// Pie chart with one wedge per slice, labelled with its percentage
pub fn render_pie_chart(slices: &[SentimentSlice], title: &str) -> String {
    let total: u32 = slices.iter().map(|s| s.percent).sum();
    if total == 0 {
        return String::new();
    }

    let (cx, cy, r) = (200.0_f64, 190.0_f64, 130.0_f64);
    let mut svg = format!(
        r#"<svg class="chart pie-chart" viewBox="0 0 400 360" xmlns="http://www.w3.org/2000/svg" role="img">
<text x="{cx}" y="24" text-anchor="middle" font-size="15" font-weight="600">{title}</text>
"#,
        title = html_escape(title),
    );

    // Wedges start at twelve o'clock and run clockwise
    let mut start = -PI / 2.0;
    for slice in slices.iter().filter(|s| s.percent > 0) {
        let share = f64::from(slice.percent) / f64::from(total);
        let sweep = share * 2.0 * PI;
        let end = start + sweep;

        if slice.percent == total {
            let _ = writeln!(
                svg,
                r#"<circle class="wedge" cx="{cx}" cy="{cy}" r="{r}" fill="{color}"/>"#,
                color = slice.color,
            );
        } else {
            let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large_arc = u8::from(sweep > PI);
            let _ = writeln!(
                svg,
                r#"<path class="wedge" d="M {cx} {cy} L {x1:.2} {y1:.2} A {r} {r} 0 {large_arc} 1 {x2:.2} {y2:.2} Z" fill="{color}"/>"#,
                color = slice.color,
            );
        }

        let mid = start + sweep / 2.0;
        let _ = writeln!(
            svg,
            r#"<text x="{px:.1}" y="{py:.1}" text-anchor="middle" font-size="13" fill="black">{pct:.1}%</text><text x="{lx:.1}" y="{ly:.1}" text-anchor="middle" font-size="13" fill="black">{label}</text>"#,
            px = cx + r * 0.6 * mid.cos(),
            py = cy + r * 0.6 * mid.sin() + 4.0,
            pct = share * 100.0,
            lx = cx + r * 1.15 * mid.cos(),
            ly = cy + r * 1.15 * mid.sin() + 4.0,
            label = html_escape(slice.label),
        );

        start = end;
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::EXAMPLE_SENTIMENT;

    #[test]
    fn test_bar_chart_one_bar_per_entry() {
        let svg = render_bar_chart(
            &[("Apple Watch", 120000), ("Pixel <Watch>", 90000)],
            "Price (PKR)",
            "Average Price Comparison of Competitors",
        );

        assert_eq!(svg.matches(r#"<rect class="bar""#).count(), 2);
        assert!(svg.contains("Apple Watch: 120,000"));
        assert!(svg.contains("Pixel &lt;Watch&gt;"));
        assert!(svg.contains("Price (PKR)"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_bar_chart_tallest_bar_fills_plot() {
        let svg = render_bar_chart(&[("A", 50), ("B", 100)], "y", "t");
        let plot_h = BAR_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        assert!(svg.contains(&format!(r#"height="{plot_h:.1}""#)));
    }

    #[test]
    fn test_bar_chart_empty() {
        assert!(render_bar_chart(&[], "y", "t").is_empty());
    }

    #[test]
    fn test_pie_chart_wedges() {
        let svg = render_pie_chart(&EXAMPLE_SENTIMENT, "Customer Sentiment Distribution");

        assert_eq!(svg.matches(r#"class="wedge""#).count(), 3);
        assert!(svg.contains("60.0%"));
        assert!(svg.contains("25.0%"));
        assert!(svg.contains("15.0%"));
        assert!(svg.contains("#4CAF50"));
        // Only the 60% wedge spans more than half the circle
        assert_eq!(svg.matches(" 0 1 1 ").count(), 1);
    }

    #[test]
    fn test_pie_chart_single_slice() {
        let slices = [SentimentSlice {
            label: "Positive",
            percent: 100,
            color: "#4CAF50",
        }];
        let svg = render_pie_chart(&slices, "t");
        assert!(svg.contains("<circle"));
        assert!(svg.contains("100.0%"));
    }
}
