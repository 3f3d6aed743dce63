//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, mirroring
//! the three result cards and recommendation list shown at the end of
//! an assessment.

use anyhow::Result;
use std::path::Path;

use smartstart_core::report::AssessmentReport;
use smartstart_core::scoring::Level;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Good => "good",
        Level::Fair => "fair",
        Level::NeedsAttention => "needs-attention",
    }
}

/// Generate an HTML report from an assessment report.
pub fn generate_html(report: &AssessmentReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n",
        html_escape(&report.assessment)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.assessment)));
    html.push_str(&format!(
        "<p class=\"meta\">Report <strong>{}</strong> | {}</p>\n",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Result cards
    html.push_str("<section class=\"results-grid\">\n");

    let attention = &report.results.attention;
    html.push_str("<div class=\"result-card\">\n");
    html.push_str("<h3 class=\"attention\">🎯 Focus &amp; Attention</h3>\n");
    html.push_str(&format!(
        "<div class=\"result-score {}\">{}%</div>\n",
        level_class(attention.level),
        attention.score
    ));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&attention.details)));
    html.push_str(&format!(
        "<small>Average response: {}s</small>\n",
        attention.avg_response_secs
    ));
    html.push_str("</div>\n");

    let reading = &report.results.reading;
    html.push_str("<div class=\"result-card\">\n");
    html.push_str("<h3 class=\"reading\">📝 Reading Skills</h3>\n");
    html.push_str(&format!(
        "<div class=\"result-score {}\">{}%</div>\n",
        level_class(reading.level),
        reading.score
    ));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&reading.details)));
    html.push_str(&format!(
        "<small>Audio repetitions: {}%</small>\n",
        reading.repetition_rate
    ));
    html.push_str("</div>\n");

    let cognition = &report.results.cognition;
    html.push_str("<div class=\"result-card\">\n");
    html.push_str("<h3 class=\"cognition\">🧠 Memory &amp; Logic</h3>\n");
    html.push_str(&format!(
        "<div class=\"result-score {}\">{}%</div>\n",
        level_class(cognition.level),
        cognition.score
    ));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&cognition.details)));
    html.push_str(&format!(
        "<small>Total attempts: {}</small>\n",
        cognition.attempts
    ));
    html.push_str("</div>\n");

    html.push_str("</section>\n");

    // Recommendations
    html.push_str("<section class=\"recommendations\">\n");
    html.push_str("<h2>💡 Recommendations</h2>\n");
    html.push_str("<ul>\n");
    for rec in &report.recommendations {
        html.push_str(&format!("<li>{}</li>\n", html_escape(rec)));
    }
    html.push_str("</ul>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --good: #dcfce7; --fair: #fef9c3; --attn: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --good: #064e3b; --fair: #713f12; --attn: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.results-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1rem; }
.result-card { border: 1px solid var(--border); border-radius: 12px; padding: 1rem 1.5rem; }
.result-card h3.attention { color: #4CAF50; }
.result-card h3.reading { color: #2196F3; }
.result-card h3.cognition { color: #FF9800; }
.result-score { font-size: 2.5rem; font-weight: bold; border-radius: 8px; padding: 0.25rem 0.75rem; display: inline-block; }
.result-score.good { background: var(--good); }
.result-score.fair { background: var(--fair); }
.result-score.needs-attention { background: var(--attn); }
.recommendations ul { line-height: 1.8; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use smartstart_core::catalog::Catalog;
    use smartstart_core::scoring::{self};
    use smartstart_core::session::{FocusSession, LetterSession, MemorySession};

    fn make_test_report() -> AssessmentReport {
        let catalog = Catalog::builtin();
        let mut focus = FocusSession::new(catalog.focus.len());
        focus.correct_answers = 3;
        focus.current_round = 5;
        focus.finalized = true;
        let mut letter = LetterSession::new(catalog.letter.len());
        letter.correct_answers = 4;
        letter.current_round = 8;
        letter.needs_repetition = 2;
        letter.finalized = true;
        let mut memory = MemorySession::default();
        memory.cards = catalog
            .memory_deck()
            .into_iter()
            .map(|value| smartstart_core::session::CardState {
                value,
                phase: smartstart_core::session::CardPhase::Matched,
            })
            .collect();
        memory.matched_pairs = 4;
        memory.attempts = 7;
        memory.mistakes = 3;
        memory.finalized = true;

        let results = scoring::evaluate(&focus, &letter, &memory);
        let recommendations = scoring::recommendations(&results);
        AssessmentReport::new(results, recommendations)
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Focus &amp; Attention"));
        assert!(html.contains("Reading Skills"));
        assert!(html.contains("Memory &amp; Logic"));
        assert!(html.contains("Recommendations"));
        assert!(html.contains(&report.id.to_string()));
    }

    #[test]
    fn html_report_reflects_levels() {
        let report = make_test_report();
        let html = generate_html(&report);

        // 3/5 focus = 60% fair, 4/8 letters = 50% fair.
        assert!(html.contains("result-score fair"));
        assert!(html.contains(">60%<"));
        assert!(html.contains(">50%<"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
