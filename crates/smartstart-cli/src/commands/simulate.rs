//! The `smartstart simulate` command: a scripted, headless run.
//!
//! Drives the assessment from a TOML answer script instead of a
//! player. Useful for demoing, for regression-checking the scoring,
//! and for generating baseline reports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use smartstart_core::assessment::{Assessment, Phase};
use smartstart_core::games::{MISMATCH_RESOLVE_DELAY_MS, ROUND_ADVANCE_DELAY_MS};
use smartstart_core::session::CardPhase;

/// Answer script, as parsed from TOML.
#[derive(Debug, Deserialize)]
struct Script {
    script: ScriptHeader,
    #[serde(default)]
    answers: Answers,
    #[serde(default)]
    memory: MemoryScript,
}

#[derive(Debug, Deserialize)]
struct ScriptHeader {
    /// Shuffle seed; scripted runs are always seeded.
    seed: u64,
    /// Virtual thinking time before each answer, in seconds.
    #[serde(default)]
    think_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
struct Answers {
    /// Focus picks by value, one per round. Missing rounds answer
    /// correctly.
    #[serde(default)]
    focus: Vec<String>,
    /// Letter picks by value, one per round.
    #[serde(default)]
    letter: Vec<String>,
    /// Rounds (zero-based) whose audio is replayed before answering.
    #[serde(default)]
    letter_repeats: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct MemoryScript {
    /// Explicit flips as one-based card index pairs, applied in order.
    /// Whatever is still unmatched afterwards is solved perfectly.
    #[serde(default)]
    flips: Vec<[usize; 2]>,
}

pub fn execute(
    script_path: PathBuf,
    catalog_path: Option<PathBuf>,
    output: PathBuf,
    format: String,
) -> Result<()> {
    let content = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read script: {}", script_path.display()))?;
    let script: Script = toml::from_str(&content)
        .with_context(|| format!("failed to parse script: {}", script_path.display()))?;

    let catalog = super::load_catalog(catalog_path)?;
    let targets_focus: Vec<String> = catalog.focus.iter().map(|t| t.target.clone()).collect();
    let targets_letter: Vec<String> = catalog.letter.iter().map(|t| t.target.clone()).collect();

    let mut assessment = Assessment::new(catalog).with_seed(script.script.seed);
    let think_ms = script.script.think_secs * 1000;

    assessment.advance_phase();
    assessment.advance_phase();

    tracing::info!(seed = script.script.seed, "running scripted assessment");

    // Focus rounds.
    for (round, target) in targets_focus.iter().enumerate() {
        assessment.advance_time(think_ms);
        let pick = script.answers.focus.get(round).unwrap_or(target);
        assessment.submit_selection(pick);
        assessment.advance_time(ROUND_ADVANCE_DELAY_MS);
    }
    anyhow::ensure!(
        assessment.focus_session().finalized,
        "focus game did not finish; check the script's focus answers"
    );
    assessment.advance_phase();

    // Letter rounds.
    for (round, target) in targets_letter.iter().enumerate() {
        assessment.advance_time(think_ms);
        if script.answers.letter_repeats.contains(&round) {
            assessment.repeat_audio();
        }
        let pick = script.answers.letter.get(round).unwrap_or(target);
        assessment.submit_selection(pick);
        assessment.advance_time(ROUND_ADVANCE_DELAY_MS);
    }
    anyhow::ensure!(
        assessment.letter_session().finalized,
        "letter game did not finish; check the script's letter answers"
    );
    assessment.advance_phase();

    // Scripted memory flips, then solve the rest.
    for [a, b] in &script.memory.flips {
        let card_count = assessment.memory_cards().len();
        anyhow::ensure!(
            *a != *b && (1..=card_count).contains(a) && (1..=card_count).contains(b),
            "bad memory flip [{a}, {b}]: card numbers are 1..={card_count} and must differ"
        );
        assessment.advance_time(think_ms);
        assessment.submit_card_flip(a - 1);
        assessment.submit_card_flip(b - 1);
        assessment.advance_time(MISMATCH_RESOLVE_DELAY_MS);
    }
    while !assessment.memory_session().finalized {
        let (a, b) = next_unmatched_pair(&assessment)
            .ok_or_else(|| anyhow::anyhow!("memory board has no remaining pair"))?;
        assessment.advance_time(think_ms);
        assessment.submit_card_flip(a);
        assessment.submit_card_flip(b);
        assessment.advance_time(MISMATCH_RESOLVE_DELAY_MS);
    }
    assessment.advance_phase();
    debug_assert_eq!(assessment.phase(), Phase::Results);

    let report = assessment
        .report()
        .ok_or_else(|| anyhow::anyhow!("assessment finished without results"))?;
    super::print_summary(&report);
    super::export_report(&report, &output, &format)?;

    Ok(())
}

/// First still-hidden pair on the board, zero-based.
fn next_unmatched_pair(assessment: &Assessment) -> Option<(usize, usize)> {
    let cards = assessment.memory_cards();
    for (i, card) in cards.iter().enumerate() {
        if card.phase != CardPhase::Hidden {
            continue;
        }
        for (j, other) in cards.iter().enumerate().skip(i + 1) {
            if other.phase == CardPhase::Hidden && other.value == card.value {
                return Some((i, j));
            }
        }
    }
    None
}
