//! Collaborator seams: presentation and narration.
//!
//! The core never touches a screen or a speaker. Adapters implement
//! these traits and the orchestrator calls them as state changes.

use crate::catalog::{GameKind, Trial};
use crate::scoring::AssessmentResults;

/// Visual tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Receives presentation events from the orchestrator.
///
/// All methods default to no-ops so adapters implement only what they
/// render. Callbacks arrive on the caller's thread, in order.
pub trait AssessmentObserver {
    /// A focus/letter round is on screen with its shuffled options.
    fn on_round_ready(
        &mut self,
        game: GameKind,
        round: usize,
        total: usize,
        trial: &Trial,
        options: &[String],
    ) {
        let _ = (game, round, total, trial, options);
    }

    /// The memory board was dealt, all cards face down.
    fn on_memory_board(&mut self, card_count: usize) {
        let _ = card_count;
    }

    /// A memory card turned face up.
    fn on_card_revealed(&mut self, index: usize, value: &str) {
        let _ = (index, value);
    }

    /// A mismatched pair turned back face down.
    fn on_cards_hidden(&mut self, first: usize, second: usize) {
        let _ = (first, second);
    }

    /// A matched pair locked in.
    fn on_cards_matched(&mut self, first: usize, second: usize) {
        let _ = (first, second);
    }

    /// Feedback to show the player.
    fn on_feedback(&mut self, game: GameKind, message: &str, kind: FeedbackKind) {
        let _ = (game, message, kind);
    }

    /// Completion fraction for a game's progress bar, in `0.0..=1.0`.
    fn on_progress(&mut self, game: GameKind, fraction: f64) {
        let _ = (game, fraction);
    }

    /// A game finished and its clock stopped.
    fn on_game_finalized(&mut self, game: GameKind, total_time_seconds: u64) {
        let _ = (game, total_time_seconds);
    }

    /// All three games are done; scores are in.
    fn on_results_ready(&mut self, results: &AssessmentResults, recommendations: &[String]) {
        let _ = (results, recommendations);
    }
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl AssessmentObserver for NoopObserver {}

/// Text-to-speech collaborator.
///
/// Fire-and-forget: implementations cancel any prior pending utterance
/// before starting a new one, and must never block. A host without
/// speech support uses [`SilentNarrator`]; rounds progress the same
/// either way.
pub trait Narrator {
    fn speak(&mut self, text: &str);
}

/// Narrator that says nothing.
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str) {}
}
