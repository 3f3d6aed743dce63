//! Assessment report types with JSON persistence and progress comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{AssessmentResults, Level};

/// Human-readable title carried inside every exported report.
pub const REPORT_TITLE: &str = "Smart Start Assessment";

/// A complete assessment report, as exported for parents and teachers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Assessment title, for readers of the raw JSON.
    pub assessment: String,
    /// Per-domain scores and levels.
    pub results: AssessmentResults,
    /// Recommendation lines, in domain order.
    pub recommendations: Vec<String>,
}

impl AssessmentReport {
    pub fn new(results: AssessmentResults, recommendations: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            assessment: REPORT_TITLE.to_string(),
            results,
            recommendations,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier one from the same child.
    pub fn compare(&self, baseline: &AssessmentReport) -> ProgressReport {
        let domain = |name: &str, before: (u32, Level), after: (u32, Level)| DomainDelta {
            domain: name.to_string(),
            baseline_score: before.0,
            current_score: after.0,
            delta: after.0 as i64 - before.0 as i64,
            baseline_level: before.1,
            current_level: after.1,
        };

        ProgressReport {
            baseline_date: baseline.created_at,
            current_date: self.created_at,
            domains: vec![
                domain(
                    "Attention & Focus",
                    (
                        baseline.results.attention.score,
                        baseline.results.attention.level,
                    ),
                    (self.results.attention.score, self.results.attention.level),
                ),
                domain(
                    "Letter Recognition",
                    (
                        baseline.results.reading.score,
                        baseline.results.reading.level,
                    ),
                    (self.results.reading.score, self.results.reading.level),
                ),
                domain(
                    "Memory & Cognition",
                    (
                        baseline.results.cognition.score,
                        baseline.results.cognition.level,
                    ),
                    (
                        self.results.cognition.score,
                        self.results.cognition.level,
                    ),
                ),
            ],
        }
    }
}

/// Result of comparing two reports from the same child over time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_date: DateTime<Utc>,
    pub current_date: DateTime<Utc>,
    pub domains: Vec<DomainDelta>,
}

/// Score movement within one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainDelta {
    pub domain: String,
    pub baseline_score: u32,
    pub current_score: u32,
    pub delta: i64,
    pub baseline_level: Level,
    pub current_level: Level,
}

impl DomainDelta {
    /// The level moved in either direction between the two runs.
    pub fn level_changed(&self) -> bool {
        self.baseline_level != self.current_level
    }
}

impl ProgressReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Progress:** {} → {}\n\n",
            self.baseline_date.format("%Y-%m-%d"),
            self.current_date.format("%Y-%m-%d"),
        ));

        md.push_str("| Domain | Baseline | Current | Delta | Level |\n");
        md.push_str("|--------|----------|---------|-------|-------|\n");
        for d in &self.domains {
            let level = if d.level_changed() {
                format!("{} → {}", d.baseline_level, d.current_level)
            } else {
                d.current_level.to_string()
            };
            md.push_str(&format!(
                "| {} | {}% | {}% | {:+}% | {} |\n",
                d.domain, d.baseline_score, d.current_score, d.delta, level
            ));
        }

        md
    }

    /// Returns true if any domain scored lower than the baseline.
    pub fn has_declines(&self) -> bool {
        self.domains.iter().any(|d| d.delta < 0)
    }
}
