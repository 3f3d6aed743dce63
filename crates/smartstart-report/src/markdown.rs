//! Markdown report generator, for pasting into notes or issues.

use anyhow::Result;
use std::path::Path;

use smartstart_core::report::AssessmentReport;

/// Render an assessment report as markdown.
pub fn generate_markdown(report: &AssessmentReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.assessment));
    md.push_str(&format!(
        "*Report {} — {}*\n\n",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("| Domain | Score | Level | Notes |\n");
    md.push_str("|--------|-------|-------|-------|\n");

    let attention = &report.results.attention;
    md.push_str(&format!(
        "| 🎯 Focus & Attention | {}% | {} | avg response {}s |\n",
        attention.score, attention.level, attention.avg_response_secs
    ));
    let reading = &report.results.reading;
    md.push_str(&format!(
        "| 📝 Reading Skills | {}% | {} | audio repetitions {}% |\n",
        reading.score, reading.level, reading.repetition_rate
    ));
    let cognition = &report.results.cognition;
    md.push_str(&format!(
        "| 🧠 Memory & Logic | {}% | {} | {} attempts, {} mistakes |\n",
        cognition.score, cognition.level, cognition.attempts, cognition.mistakes
    ));

    md.push_str("\n## Domain details\n\n");
    for details in [
        &report.results.attention.details,
        &report.results.reading.details,
        &report.results.cognition.details,
    ] {
        md.push_str(&format!("- {details}\n"));
    }

    if !report.recommendations.is_empty() {
        md.push_str("\n## Recommendations\n\n");
        for rec in &report.recommendations {
            md.push_str(&format!("- {rec}\n"));
        }
    }

    md
}

/// Write a markdown report to a file.
pub fn write_markdown_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartstart_core::scoring::{
        AssessmentResults, AttentionResult, CognitionResult, Level, ReadingResult,
    };

    fn make_test_report() -> AssessmentReport {
        let results = AssessmentResults {
            attention: AttentionResult {
                score: 80,
                level: Level::Good,
                avg_response_secs: 3,
                details: "Great job staying focused!".into(),
            },
            reading: ReadingResult {
                score: 50,
                level: Level::Fair,
                repetition_rate: 25,
                details: "Good letter recognition!".into(),
            },
            cognition: CognitionResult {
                score: 100,
                level: Level::Good,
                attempts: 5,
                mistakes: 1,
                details: "Outstanding memory skills!".into(),
            },
        };
        AssessmentReport::new(
            results,
            vec!["📖 Continue phonics practice with visual supports".into()],
        )
    }

    #[test]
    fn markdown_contains_all_domains() {
        let md = generate_markdown(&make_test_report());

        assert!(md.contains("Focus & Attention | 80% | good"));
        assert!(md.contains("Reading Skills | 50% | fair"));
        assert!(md.contains("Memory & Logic | 100% | good"));
        assert!(md.contains("## Recommendations"));
        assert!(md.contains("phonics practice"));
    }

    #[test]
    fn markdown_omits_empty_recommendations() {
        let mut report = make_test_report();
        report.recommendations.clear();
        let md = generate_markdown(&report);
        assert!(!md.contains("## Recommendations"));
    }

    #[test]
    fn markdown_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_markdown_report(&make_test_report(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Smart Start Assessment"));
    }
}
