use std::path::{Path, PathBuf};

use anyhow::Result;

use smartstart_core::catalog::Catalog;
use smartstart_core::report::AssessmentReport;

pub mod compare;
pub mod init;
pub mod play;
pub mod simulate;
pub mod validate;

/// Load a catalog from a path, or the built-in one when none is given.
fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => smartstart_core::parser::parse_catalog(&path),
        None => Ok(Catalog::builtin()),
    }
}

/// Write the report in the requested format(s) under `output`.
fn export_report(report: &AssessmentReport, output: &Path, format: &str) -> Result<()> {
    std::fs::create_dir_all(output)?;
    let stem = format!("report-{}", report.created_at.format("%Y%m%d-%H%M%S"));

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in formats {
        match fmt {
            "json" => {
                let path = output.join(format!("{stem}.json"));
                report.save_json(&path)?;
                println!("Wrote {}", path.display());
            }
            "html" => {
                let path = output.join(format!("{stem}.html"));
                smartstart_report::html::write_html_report(report, &path)?;
                println!("Wrote {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("{stem}.md"));
                smartstart_report::markdown::write_markdown_report(report, &path)?;
                println!("Wrote {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

/// Print the three-domain summary table.
fn print_summary(report: &AssessmentReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Domain", "Score", "Level", "Notes"]);

    let attention = &report.results.attention;
    table.add_row(vec![
        Cell::new("🎯 Focus & Attention"),
        Cell::new(format!("{}%", attention.score)),
        Cell::new(attention.level),
        Cell::new(format!("avg response {}s", attention.avg_response_secs)),
    ]);
    let reading = &report.results.reading;
    table.add_row(vec![
        Cell::new("📝 Reading Skills"),
        Cell::new(format!("{}%", reading.score)),
        Cell::new(reading.level),
        Cell::new(format!("audio repetitions {}%", reading.repetition_rate)),
    ]);
    let cognition = &report.results.cognition;
    table.add_row(vec![
        Cell::new("🧠 Memory & Logic"),
        Cell::new(format!("{}%", cognition.score)),
        Cell::new(cognition.level),
        Cell::new(format!(
            "{} attempts, {} mistakes",
            cognition.attempts, cognition.mistakes
        )),
    ]);

    println!("\n{table}");

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &report.recommendations {
            println!("  {rec}");
        }
    }
}
