//! HTML rendering for the research page

use super::charts::{render_bar_chart, render_pie_chart};
use crate::{
    heuristics::format_thousands,
    report::{CompetitorReport, MarketReport, EXAMPLE_SENTIMENT},
};

/// Product name pre-filled in the search box
pub const DEFAULT_PRODUCT: &str = "Nexus Smartwatch Pro 2";

/// Banner shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
}

/// Everything the page needs to render
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub product: &'a str,
    pub report: Option<&'a MarketReport>,
    pub uploaded_pdf: Option<&'a str>,
    pub notice: Option<&'a Notice>,
}

/// Render the research page.
pub fn render_index(view: &PageView<'_>) -> String {
    let notice = match view.notice {
        Some(Notice::Success(msg)) => {
            format!(r#"<div class="notice success">✅ {}</div>"#, html_escape(msg))
        }
        Some(Notice::Warning(msg)) => {
            format!(r#"<div class="notice warning">⚠️ {}</div>"#, html_escape(msg))
        }
        None => String::new(),
    };

    let uploaded = view
        .uploaded_pdf
        .map(|name| {
            format!(
                r#"<div class="notice success">✅ Uploaded: {}</div>"#,
                html_escape(name)
            )
        })
        .unwrap_or_default();

    let results = view.report.map(render_report).unwrap_or_default();

    let content = format!(
        r#"<div class="layout">
<aside class="sidebar">
    <h2>⚙️ Controls</h2>
    <form action="/upload" method="post" enctype="multipart/form-data">
        <label for="pdf">📑 Upload your report (PDF)</label>
        <input type="file" id="pdf" name="pdf" accept=".pdf,application/pdf">
        <button type="submit">Upload</button>
    </form>
    {uploaded}
    <form action="/clear" method="post"><button type="submit" class="secondary">🧹 Clear All</button></form>
</aside>
<main class="container">
    <p class="lead">This app researches smartwatch competitors using the Tavily API and generates a structured market analysis report with <em>charts &amp; graphs</em>.</p>
    {notice}
    <form id="research-form" action="/research" method="post" class="research-form">
        <div class="field">
            <label for="product">✍️ Enter Product Name:</label>
            <input type="text" id="product" name="product" value="{product}">
        </div>
        <div class="field voice">
            <span>🎙️ Speak instead:</span>
            <button type="button" id="voice-btn" class="secondary">Start recording</button>
            <div id="voice-said" class="notice success" hidden></div>
        </div>
        <button type="submit" id="run-btn">Run Research</button>
        <div id="spinner" class="spinner" hidden>Researching live market data... 🔎</div>
    </form>
    {results}
</main>
</div>
{script}"#,
        product = html_escape(view.product),
        script = VOICE_AND_SPINNER_SCRIPT,
    );

    build_page("Market Research Agent", &content)
}

fn render_report(report: &MarketReport) -> String {
    let sections: String = report
        .competitors
        .iter()
        .map(|c| render_competitor(c, &report.currency))
        .collect();

    let chart = report.price_chart();
    let price_chart = if chart.is_empty() {
        String::new()
    } else {
        format!(
            r#"<h3>📊 Price Comparison Chart</h3>{}"#,
            render_bar_chart(
                &chart,
                &format!("Price ({})", report.currency),
                "Average Price Comparison of Competitors",
            )
        )
    };

    format!(
        r#"<section class="results">
    {sections}
    {price_chart}
    <h3>🧭 Customer Sentiment Overview (Example Data)</h3>
    {pie}
    <p class="downloads">
        <a class="action-btn" href="/report.txt" download>📥 Download Research Report (Text)</a>
        <a class="action-btn secondary" href="/report.json" download>JSON</a>
    </p>
</section>"#,
        pie = render_pie_chart(&EXAMPLE_SENTIMENT, "Customer Sentiment Distribution"),
    )
}

fn render_competitor(competitor: &CompetitorReport, currency: &str) -> String {
    let caption = competitor
        .avg_price
        .map(|avg| {
            format!(
                r#"<p class="caption">💰 Estimated Avg Price: {} {}</p>"#,
                html_escape(currency),
                format_thousands(avg)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<details class="competitor">
    <summary>📌 {name}</summary>
    {caption}
    <h4>Key Features</h4>{features}
    <h4>Price in {currency}</h4>{price}
    <h4>Customer Sentiment</h4>{reviews}
</details>"#,
        name = html_escape(&competitor.name),
        currency = html_escape(currency),
        features = render_list(&competitor.features),
        price = render_list(&competitor.price),
        reviews = render_list(&competitor.reviews),
    )
}

fn render_list(items: &[String]) -> String {
    let rows: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", html_escape(item)))
        .collect();
    format!("<ul>{rows}</ul>")
}

const VOICE_AND_SPINNER_SCRIPT: &str = r#"<script>
(function () {
    const form = document.getElementById('research-form');
    form.addEventListener('submit', function () {
        document.getElementById('spinner').hidden = false;
        document.getElementById('run-btn').disabled = true;
    });

    const btn = document.getElementById('voice-btn');
    const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
    if (!Recognition) {
        btn.disabled = true;
        btn.textContent = 'Voice input unavailable';
        return;
    }
    btn.addEventListener('click', function () {
        const rec = new Recognition();
        rec.lang = 'en';
        rec.interimResults = false;
        rec.maxAlternatives = 1;
        btn.textContent = 'Listening...';
        rec.onresult = function (event) {
            const said = event.results[0][0].transcript;
            document.getElementById('product').value = said;
            const box = document.getElementById('voice-said');
            box.textContent = '✅ You said: ' + said;
            box.hidden = false;
        };
        rec.onend = function () { btn.textContent = 'Start recording'; };
        rec.start();
    });
})();
</script>"#;

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;}}
.header h1{{font-size:20px;font-weight:600;}}
.layout{{display:flex;min-height:calc(100vh - 50px);}}
.sidebar{{width:280px;background:#f0f2f6;padding:24px 16px;display:flex;flex-direction:column;gap:16px;}}
.sidebar h2{{font-size:16px;}}
.sidebar label{{display:block;font-size:13px;margin-bottom:6px;}}
.sidebar input[type=file]{{font-size:12px;margin-bottom:8px;width:100%;}}
.container{{flex:1;max-width:960px;margin:0 auto;padding:24px;}}
.lead{{color:#555;margin-bottom:16px;}}
.research-form{{display:grid;grid-template-columns:3fr 1fr;gap:12px 24px;align-items:end;margin-bottom:24px;}}
.research-form label{{display:block;font-size:14px;margin-bottom:6px;}}
.research-form input[type=text]{{width:100%;padding:8px;border:1px solid #ccc;border-radius:4px;font-size:14px;}}
.voice span{{display:block;font-size:14px;margin-bottom:6px;}}
button,.action-btn{{display:inline-block;padding:8px 16px;background:#ff4b4b;color:#fff;border:none;border-radius:4px;text-decoration:none;font-size:14px;cursor:pointer;}}
button.secondary,.action-btn.secondary{{background:#fff;color:#1a1a1a;border:1px solid #ccc;}}
button:disabled{{opacity:0.6;cursor:default;}}
.spinner{{grid-column:1 / -1;color:#555;font-size:14px;}}
.notice{{padding:8px 12px;border-radius:4px;font-size:14px;margin-bottom:12px;}}
.notice.success{{background:#e8f5e9;color:#2e7d32;}}
.notice.warning{{background:#fff8e1;color:#795548;}}
.competitor{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:12px 16px;margin-bottom:12px;}}
.competitor summary{{font-weight:600;cursor:pointer;}}
.competitor h4{{margin:12px 0 4px;font-size:15px;}}
.competitor ul{{padding-left:20px;font-size:14px;color:#333;}}
.caption{{font-size:13px;color:#666;margin-top:8px;}}
.results h3{{margin:24px 0 8px;}}
.chart{{max-width:640px;width:100%;background:#fff;border:1px solid #e0e0e0;border-radius:8px;}}
.downloads{{margin-top:24px;display:flex;gap:8px;}}
</style>
</head>
<body>
<div class="header"><h1>🏪 Market Research Agent</h1></div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(report: Option<&'a MarketReport>, notice: Option<&'a Notice>) -> PageView<'a> {
        PageView {
            product: DEFAULT_PRODUCT,
            report,
            uploaded_pdf: None,
            notice,
        }
    }

    #[test]
    fn test_idle_page() {
        let html = render_index(&view(None, None));

        assert!(html.contains(r#"value="Nexus Smartwatch Pro 2""#));
        assert!(html.contains(r#"action="/research""#));
        assert!(html.contains("webkitSpeechRecognition"));
        assert!(!html.contains("Price Comparison Chart"));
        assert!(!html.contains("<details"));
    }

    #[test]
    fn test_report_sections() {
        let mut report = MarketReport::new("Nexus Pro", "PKR");
        let mut apple = CompetitorReport::new("Apple Watch");
        apple.features = vec!["Apple Watch: ECG & <GPS>".to_string()];
        apple.avg_price = Some(45000);
        report.competitors = vec![apple, CompetitorReport::new("Pixel Watch")];
        let notice = Notice::Success("Market Research Completed for Nexus Pro".to_string());

        let html = render_index(&view(Some(&report), Some(&notice)));

        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.contains("Estimated Avg Price: PKR 45,000"));
        assert_eq!(html.matches("Estimated Avg Price").count(), 1);
        assert!(html.contains("ECG &amp; &lt;GPS&gt;"));
        assert!(html.contains("Price in PKR"));
        assert!(html.contains("Price Comparison Chart"));
        assert!(html.contains("Customer Sentiment Overview (Example Data)"));
        assert!(html.contains("Market Research Completed for Nexus Pro"));
        assert!(html.contains(r#"href="/report.txt""#));
    }

    #[test]
    fn test_no_chart_without_prices() {
        let mut report = MarketReport::new("Nexus Pro", "PKR");
        report.competitors = vec![CompetitorReport::new("Pixel Watch")];

        let html = render_index(&view(Some(&report), None));

        assert!(!html.contains("Price Comparison Chart"));
        assert!(html.contains("pie-chart"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
