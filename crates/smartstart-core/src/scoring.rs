//! Scoring, classification, and recommendations.
//!
//! Pure functions from finalized sessions to per-domain results.
//! Thresholds are the screening heuristics of the original assessment,
//! not validated clinical cutoffs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::session::{FocusSession, LetterSession, MemorySession};

/// Qualitative classification of a domain score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Good,
    Fair,
    NeedsAttention,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Good => write!(f, "good"),
            Level::Fair => write!(f, "fair"),
            Level::NeedsAttention => write!(f, "needs-attention"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Level::Good),
            "fair" => Ok(Level::Fair),
            "needs-attention" => Ok(Level::NeedsAttention),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// Focus & attention domain result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionResult {
    /// Percentage of rounds answered correctly, rounded.
    pub score: u32,
    pub level: Level,
    /// Mean response latency in whole seconds.
    pub avg_response_secs: u64,
    pub details: String,
}

/// Reading skills domain result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingResult {
    pub score: u32,
    pub level: Level,
    /// Audio repetitions as a whole percentage of rounds.
    pub repetition_rate: u32,
    pub details: String,
}

/// Memory & logic domain result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitionResult {
    pub score: u32,
    pub level: Level,
    /// Two-card comparisons made.
    pub attempts: u32,
    /// Comparisons that missed.
    pub mistakes: u32,
    pub details: String,
}

/// Derived, immutable outcome of a full assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub attention: AttentionResult,
    pub reading: ReadingResult,
    pub cognition: CognitionResult,
}

/// Map the three finalized sessions to scores and levels.
///
/// Levels are classified on the exact (unrounded) percentages; the
/// stored scores are rounded for presentation.
pub fn evaluate(
    focus: &FocusSession,
    letter: &LetterSession,
    memory: &MemorySession,
) -> AssessmentResults {
    let focus_score = ratio(focus.correct_answers, focus.total_rounds as u32) * 100.0;
    let attention_level = if focus_score >= 80.0 {
        Level::Good
    } else if focus_score >= 60.0 {
        Level::Fair
    } else {
        Level::NeedsAttention
    };

    let letter_score = ratio(letter.correct_answers, letter.total_rounds as u32) * 100.0;
    let repetition_rate = ratio(letter.needs_repetition, letter.total_rounds as u32);
    let reading_level = if letter_score >= 75.0 {
        Level::Good
    } else if letter_score >= 50.0 {
        Level::Fair
    } else {
        Level::NeedsAttention
    };

    let pair_count = memory.pair_count();
    let memory_score = ratio(memory.matched_pairs, pair_count) * 100.0;
    let efficiency = if memory.attempts > 0 {
        (memory.matched_pairs * 2) as f64 / memory.attempts as f64 * 100.0
    } else {
        0.0
    };
    let cognition_level = if memory_score == 100.0 && efficiency >= 60.0 {
        Level::Good
    } else if memory_score >= 75.0 {
        Level::Fair
    } else {
        Level::NeedsAttention
    };

    AssessmentResults {
        attention: AttentionResult {
            score: focus_score.round() as u32,
            level: attention_level,
            avg_response_secs: (focus.avg_latency_ms() as f64 / 1000.0).round() as u64,
            details: "Attention and processing speed assessment".into(),
        },
        reading: ReadingResult {
            score: letter_score.round() as u32,
            level: reading_level,
            repetition_rate: (repetition_rate * 100.0).round() as u32,
            details: "Letter recognition and sound matching".into(),
        },
        cognition: CognitionResult {
            score: memory_score.round() as u32,
            level: cognition_level,
            attempts: memory.attempts,
            mistakes: memory.mistakes,
            details: "Memory and problem-solving skills".into(),
        },
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

const FOCUS_NEEDS_ATTENTION: &[&str] = &[
    "🎯 Practice short, focused activities daily",
    "⏰ Use timers to build attention span gradually",
    "🎮 Try attention-building games and exercises",
];
const FOCUS_FAIR: &[&str] = &[
    "🎯 Continue building focus with engaging activities",
    "📅 Maintain consistent learning routines",
];
const READING_NEEDS_ATTENTION: &[&str] = &[
    "📚 Use dyslexia-friendly fonts and materials",
    "🔊 Incorporate audio learning and text-to-speech",
    "✏️ Practice letter sounds with multisensory methods",
];
const READING_FAIR: &[&str] = &[
    "📖 Continue phonics practice with visual supports",
    "🎵 Use songs and rhymes for letter learning",
];
const COGNITION_NEEDS_ATTENTION: &[&str] = &[
    "🧩 Start with simpler memory games and puzzles",
    "🔄 Practice patterns and sequence recognition",
    "🎨 Use visual aids and hands-on learning",
];
const COGNITION_FAIR: &[&str] = &[
    "🧠 Challenge with gradually complex problems",
    "🏆 Celebrate small wins to build confidence",
];
const GENERAL: &[&str] = &[
    "👨‍👩‍👧‍👦 Involve family in learning activities",
    "🏫 Share results with teachers for personalized support",
    "📈 Regular practice with our learning games",
];

/// Fixed (domain, level) → suggestions mapping; domain order is
/// attention, reading, cognition, then the general set. A `Good`
/// level adds nothing of its own.
pub fn recommendations(results: &AssessmentResults) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();
    let mut extend = |list: &[&str]| recs.extend(list.iter().map(|s| s.to_string()));

    match results.attention.level {
        Level::NeedsAttention => extend(FOCUS_NEEDS_ATTENTION),
        Level::Fair => extend(FOCUS_FAIR),
        Level::Good => {}
    }
    match results.reading.level {
        Level::NeedsAttention => extend(READING_NEEDS_ATTENTION),
        Level::Fair => extend(READING_FAIR),
        Level::Good => {}
    }
    match results.cognition.level {
        Level::NeedsAttention => extend(COGNITION_NEEDS_ATTENTION),
        Level::Fair => extend(COGNITION_FAIR),
        Level::Good => {}
    }
    extend(GENERAL);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CardPhase, CardState};

    fn focus_session(correct: u32, total: usize) -> FocusSession {
        FocusSession {
            correct_answers: correct,
            current_round: total,
            finalized: true,
            ..FocusSession::new(total)
        }
    }

    fn letter_session(correct: u32, total: usize, repetitions: u32) -> LetterSession {
        LetterSession {
            correct_answers: correct,
            current_round: total,
            needs_repetition: repetitions,
            finalized: true,
            ..LetterSession::new(total)
        }
    }

    fn memory_session(matched: u32, attempts: u32, mistakes: u32) -> MemorySession {
        MemorySession {
            cards: (0..8)
                .map(|i| CardState {
                    value: format!("{}", i / 2),
                    phase: CardPhase::Matched,
                })
                .collect(),
            matched_pairs: matched,
            attempts,
            mistakes,
            finalized: true,
            ..MemorySession::default()
        }
    }

    #[test]
    fn focus_four_of_five_is_good() {
        let results = evaluate(
            &focus_session(4, 5),
            &letter_session(8, 8, 8),
            &memory_session(4, 4, 0),
        );
        assert_eq!(results.attention.score, 80);
        assert_eq!(results.attention.level, Level::Good);
    }

    #[test]
    fn letter_half_with_full_repetitions_is_fair() {
        let results = evaluate(
            &focus_session(5, 5),
            &letter_session(4, 8, 8),
            &memory_session(4, 4, 0),
        );
        assert_eq!(results.reading.score, 50);
        assert_eq!(results.reading.level, Level::Fair);
        assert_eq!(results.reading.repetition_rate, 100);
    }

    #[test]
    fn memory_complete_in_six_attempts_is_good() {
        // efficiency = 4*2/6*100 ≈ 133.33, well over the 60 bar
        let results = evaluate(
            &focus_session(5, 5),
            &letter_session(8, 8, 8),
            &memory_session(4, 6, 2),
        );
        assert_eq!(results.cognition.score, 100);
        assert_eq!(results.cognition.level, Level::Good);
        assert_eq!(results.cognition.attempts, 6);
        assert_eq!(results.cognition.mistakes, 2);
    }

    #[test]
    fn memory_incomplete_is_fair_or_worse() {
        let results = evaluate(
            &focus_session(5, 5),
            &letter_session(8, 8, 8),
            &memory_session(3, 9, 6),
        );
        assert_eq!(results.cognition.score, 75);
        assert_eq!(results.cognition.level, Level::Fair);

        let results = evaluate(
            &focus_session(5, 5),
            &letter_session(8, 8, 8),
            &memory_session(2, 10, 8),
        );
        assert_eq!(results.cognition.level, Level::NeedsAttention);
    }

    #[test]
    fn memory_complete_but_inefficient_is_fair() {
        // efficiency = 8/14*100 ≈ 57.1 < 60 while score is 100
        let results = evaluate(
            &focus_session(5, 5),
            &letter_session(8, 8, 8),
            &memory_session(4, 14, 10),
        );
        assert_eq!(results.cognition.score, 100);
        assert_eq!(results.cognition.level, Level::Fair);
    }

    #[test]
    fn level_boundaries_are_inclusive() {
        let results = evaluate(
            &focus_session(3, 5), // exactly 60
            &letter_session(6, 8, 8), // exactly 75
            &memory_session(0, 0, 0),
        );
        assert_eq!(results.attention.level, Level::Fair);
        assert_eq!(results.reading.level, Level::Good);
        assert_eq!(results.cognition.level, Level::NeedsAttention);
    }

    #[test]
    fn zero_attempts_memory_has_zero_efficiency() {
        let results = evaluate(
            &focus_session(0, 5),
            &letter_session(0, 8, 8),
            &memory_session(0, 0, 0),
        );
        assert_eq!(results.cognition.score, 0);
        assert_eq!(results.cognition.level, Level::NeedsAttention);
    }

    #[test]
    fn all_good_yields_only_general_recommendations() {
        let results = evaluate(
            &focus_session(5, 5),
            &letter_session(8, 8, 8),
            &memory_session(4, 4, 0),
        );
        let recs = recommendations(&results);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("family"));
    }

    #[test]
    fn needs_attention_lists_outweigh_fair_lists() {
        let weak = evaluate(
            &focus_session(1, 5),
            &letter_session(2, 8, 8),
            &memory_session(1, 8, 7),
        );
        let middling = evaluate(
            &focus_session(3, 5),
            &letter_session(4, 8, 8),
            &memory_session(3, 9, 6),
        );
        let weak_recs = recommendations(&weak);
        let mid_recs = recommendations(&middling);
        assert_eq!(weak_recs.len(), 3 + 3 + 3 + 3);
        assert_eq!(mid_recs.len(), 2 + 2 + 2 + 3);
        // Domain order: attention first, general set last.
        assert!(weak_recs[0].contains("focused activities"));
        assert!(weak_recs.last().unwrap().contains("learning games"));
    }

    #[test]
    fn level_display_and_parse() {
        assert_eq!(Level::Good.to_string(), "good");
        assert_eq!(Level::NeedsAttention.to_string(), "needs-attention");
        assert_eq!("fair".parse::<Level>().unwrap(), Level::Fair);
        assert!("great".parse::<Level>().is_err());
    }

    #[test]
    fn level_serializes_kebab_case() {
        let json = serde_json::to_string(&Level::NeedsAttention).unwrap();
        assert_eq!(json, "\"needs-attention\"");
    }
}
