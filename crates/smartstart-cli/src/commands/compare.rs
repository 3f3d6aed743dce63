//! The `smartstart compare` command.

use std::path::PathBuf;

use anyhow::Result;

use smartstart_core::report::AssessmentReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let baseline = AssessmentReport::load_json(&baseline_path)?;
    let current = AssessmentReport::load_json(&current_path)?;

    let progress = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", progress.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        _ => {
            // text format
            println!(
                "Progress: {} -> {}",
                progress.baseline_date.format("%Y-%m-%d"),
                progress.current_date.format("%Y-%m-%d")
            );
            for d in &progress.domains {
                let level = if d.level_changed() {
                    format!("{} -> {}", d.baseline_level, d.current_level)
                } else {
                    d.current_level.to_string()
                };
                println!(
                    "  {}: {}% -> {}% ({:+}%), {level}",
                    d.domain, d.baseline_score, d.current_score, d.delta
                );
            }
        }
    }

    if fail_on_decline && progress.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
