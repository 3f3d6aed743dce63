//! Per-game mutable session state.
//!
//! One session per mini-game, created when the game starts, mutated
//! only by its engine, and frozen once the game finalizes.

use serde::{Deserialize, Serialize};

/// One answered trial: what was shown, what was picked, how fast.
///
/// Append-only within a session. Latency runs from round presentation
/// to selection, on the orchestrator's clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Round index this attempt belongs to.
    pub round: usize,
    /// The option the player picked.
    pub selected: String,
    /// The correct option.
    pub target: String,
    /// Whether selected equals target.
    pub correct: bool,
    /// Milliseconds from round presentation to selection.
    pub latency_ms: u64,
}

/// Session state for the focus (attention) game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusSession {
    pub current_round: usize,
    pub total_rounds: usize,
    pub correct_answers: u32,
    pub attempts: Vec<AttemptRecord>,
    /// Whole seconds counted by the game ticker.
    pub elapsed_seconds: u64,
    /// Frozen copy of `elapsed_seconds` at finalization.
    pub total_time: u64,
    pub finalized: bool,
}

impl FocusSession {
    pub fn new(total_rounds: usize) -> Self {
        Self {
            total_rounds,
            ..Self::default()
        }
    }

    /// Mean attempt latency in milliseconds, 0 with no attempts.
    pub fn avg_latency_ms(&self) -> u64 {
        if self.attempts.is_empty() {
            return 0;
        }
        let sum: u64 = self.attempts.iter().map(|a| a.latency_ms).sum();
        sum / self.attempts.len() as u64
    }
}

/// Session state for the letter (reading) game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LetterSession {
    pub current_round: usize,
    pub total_rounds: usize,
    pub correct_answers: u32,
    pub attempts: Vec<AttemptRecord>,
    /// Count of audio cues played. Every presented round plays one, so
    /// this equals rounds presented; a repeat request adds another.
    pub needs_repetition: u32,
    pub elapsed_seconds: u64,
    pub total_time: u64,
    pub finalized: bool,
}

impl LetterSession {
    pub fn new(total_rounds: usize) -> Self {
        Self {
            total_rounds,
            ..Self::default()
        }
    }
}

/// Face-up/face-down lifecycle of one memory card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPhase {
    Hidden,
    Flipped,
    Matched,
}

/// One card on the memory board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardState {
    pub value: String,
    pub phase: CardPhase,
}

/// Session state for the memory (cognition) game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySession {
    /// Shuffled board; positions are stable for the whole game.
    pub cards: Vec<CardState>,
    /// Indices of currently face-up, unmatched cards. Never holds
    /// more than two entries.
    pub flipped: Vec<usize>,
    pub matched_pairs: u32,
    /// Two-card comparisons made.
    pub attempts: u32,
    /// Comparisons that did not match.
    pub mistakes: u32,
    pub elapsed_seconds: u64,
    pub total_time: u64,
    pub finalized: bool,
}

impl MemorySession {
    /// Pairs on the board.
    pub fn pair_count(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }
}
