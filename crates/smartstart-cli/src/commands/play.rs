//! The `smartstart play` command: the full assessment in a terminal.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use smartstart_core::assessment::{Assessment, Phase};
use smartstart_core::catalog::{GameKind, Trial};
use smartstart_core::games::{AUDIO_CUE_DELAY_MS, MISMATCH_RESOLVE_DELAY_MS, ROUND_ADVANCE_DELAY_MS};
use smartstart_core::session::CardPhase;
use smartstart_core::traits::{AssessmentObserver, FeedbackKind, Narrator};

/// Prints game events as they happen.
struct TerminalObserver;

impl AssessmentObserver for TerminalObserver {
    fn on_round_ready(
        &mut self,
        _game: GameKind,
        round: usize,
        total: usize,
        _trial: &Trial,
        options: &[String],
    ) {
        println!("\nRound {} of {total}", round + 1);
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
    }

    fn on_feedback(&mut self, _game: GameKind, message: &str, _kind: FeedbackKind) {
        println!("{message}");
    }

    fn on_memory_board(&mut self, card_count: usize) {
        println!("\nMemory board: {card_count} face-down cards. Find the pairs!");
    }

    fn on_card_revealed(&mut self, index: usize, value: &str) {
        println!("  Card {} shows {value}", index + 1);
    }

    fn on_cards_matched(&mut self, _first: usize, _second: usize) {}

    fn on_cards_hidden(&mut self, _first: usize, _second: usize) {
        println!("  The cards turn back over.");
    }

    fn on_game_finalized(&mut self, game: GameKind, total_secs: u64) {
        println!("\nDone with the {game} game in {total_secs}s!");
    }
}

/// Speaks by printing; a terminal has no speech synthesis.
struct TerminalNarrator;

impl Narrator for TerminalNarrator {
    fn speak(&mut self, text: &str) {
        println!("🔊 {text}");
    }
}

pub fn execute(
    catalog_path: Option<PathBuf>,
    seed: Option<u64>,
    output: PathBuf,
    format: String,
) -> Result<()> {
    let catalog = super::load_catalog(catalog_path)?;
    let mut assessment = Assessment::with_collaborators(
        catalog,
        Box::new(TerminalObserver),
        Box::new(TerminalNarrator),
    );
    if let Some(seed) = seed {
        assessment = assessment.with_seed(seed);
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    println!("🌟 Welcome to Smart Start! 🌟");
    println!("Three short games: matching, letters, and memory pairs.");
    prompt_enter(&mut lines, "Press Enter to begin")?;
    assessment.advance_phase();

    println!("\nHow it works:");
    println!("  - Answer by typing the option number.");
    println!("  - Type r to hear the instruction again.");
    println!("  - In the memory game, flip two cards with: <card> <card>");
    prompt_enter(&mut lines, "Press Enter when ready")?;
    assessment.advance_phase();

    run_choice_game(&mut assessment, &mut lines)?;
    assessment.advance_phase();
    run_choice_game(&mut assessment, &mut lines)?;
    assessment.advance_phase();
    run_memory_game(&mut assessment, &mut lines)?;
    assessment.advance_phase();
    debug_assert_eq!(assessment.phase(), Phase::Results);

    let report = assessment
        .report()
        .ok_or_else(|| anyhow::anyhow!("assessment finished without results"))?;
    super::print_summary(&report);
    super::export_report(&report, &output, &format)?;

    Ok(())
}

/// Focus and letter games share the pick-an-option loop.
fn run_choice_game(
    assessment: &mut Assessment,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<()> {
    let game = match assessment.phase() {
        Phase::Focus => GameKind::Focus,
        Phase::Letter => GameKind::Letter,
        phase => anyhow::bail!("not a choice game phase: {phase}"),
    };

    loop {
        // Let the narration cue fire before asking for input.
        assessment.advance_time(AUDIO_CUE_DELAY_MS);

        let finalized = match game {
            GameKind::Focus => assessment.focus_session().finalized,
            _ => assessment.letter_session().finalized,
        };
        if finalized {
            return Ok(());
        }

        let started = Instant::now();
        let input = prompt_line(lines, "Your pick")?;
        assessment.advance_time(started.elapsed().as_millis() as u64);

        if input.eq_ignore_ascii_case("r") {
            assessment.repeat_audio();
            continue;
        }

        let options = match assessment.current_options() {
            Some(options) => options,
            None => continue,
        };
        match input.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => {
                let value = options[n - 1].clone();
                assessment.submit_selection(&value);
                assessment.advance_time(ROUND_ADVANCE_DELAY_MS);
            }
            _ => println!("Please type a number between 1 and {}.", options.len()),
        }
    }
}

fn run_memory_game(
    assessment: &mut Assessment,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<()> {
    while !assessment.memory_session().finalized {
        print_board(assessment);

        let started = Instant::now();
        let input = prompt_line(lines, "Flip two cards (e.g. 1 4)")?;
        assessment.advance_time(started.elapsed().as_millis() as u64);

        let picks: Vec<usize> = input
            .split_whitespace()
            .filter_map(|part| part.parse::<usize>().ok())
            .collect();
        let card_count = assessment.memory_cards().len();
        match picks.as_slice() {
            [a, b] if *a != *b && (1..=card_count).contains(a) && (1..=card_count).contains(b) => {
                assessment.submit_card_flip(a - 1);
                assessment.submit_card_flip(b - 1);
                // Long enough for either outcome to resolve.
                assessment.advance_time(MISMATCH_RESOLVE_DELAY_MS);
            }
            _ => println!("Please type two different card numbers between 1 and {card_count}."),
        }
    }
    Ok(())
}

fn print_board(assessment: &Assessment) {
    print!("\nBoard: ");
    for (i, card) in assessment.memory_cards().iter().enumerate() {
        match card.phase {
            CardPhase::Hidden => print!("[{}:❓] ", i + 1),
            CardPhase::Flipped | CardPhase::Matched => print!("[{}:{}] ", i + 1, card.value),
        }
    }
    println!();
}

fn prompt_line(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    prompt: &str,
) -> Result<String> {
    print!("{prompt}: ");
    std::io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => anyhow::bail!("stdin closed mid-assessment"),
    }
}

fn prompt_enter(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    prompt: &str,
) -> Result<()> {
    prompt_line(lines, prompt).map(|_| ())
}
