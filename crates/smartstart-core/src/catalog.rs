//! Core data model types for smartstart.
//!
//! These are the fundamental types the whole system uses to represent
//! mini-games, trials, and the stimulus catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// The three screening mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Visual focus/matching (attention proxy).
    Focus,
    /// Letter/sound recognition (reading proxy).
    Letter,
    /// Pair-matching memory game (cognition proxy).
    Memory,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Focus => write!(f, "focus"),
            GameKind::Letter => write!(f, "letter"),
            GameKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "focus" => Ok(GameKind::Focus),
            "letter" => Ok(GameKind::Letter),
            "memory" => Ok(GameKind::Memory),
            other => Err(format!("unknown game: {other}")),
        }
    }
}

/// One stimulus-and-options unit within a mini-game round.
///
/// Immutable after load: a target value, the candidate options
/// (including the target exactly once), and an optional spoken prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trial {
    /// The correct answer.
    pub target: String,
    /// Candidate options presented to the player, target included.
    pub options: Vec<String>,
    /// Narration played shortly after the round is presented.
    /// Letter trials leave this empty and get a "Letter {X}" cue.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl Trial {
    pub fn new(target: &str, options: &[&str], prompt: Option<&str>) -> Self {
        Self {
            target: target.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            prompt: prompt.map(|s| s.to_string()),
        }
    }
}

/// The full stimulus catalog for one assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the catalog contents.
    #[serde(default)]
    pub description: String,
    /// Focus trials, presented in order.
    pub focus: Vec<Trial>,
    /// Letter trials, presented in order.
    pub letter: Vec<Trial>,
    /// Distinct memory card values; each appears twice on the board.
    pub memory_values: Vec<String>,
}

impl Catalog {
    /// The built-in Smart Start catalog: 5 focus trials with 6 options
    /// each, 8 letter trials with 3 options each, and 4 memory pairs.
    pub fn builtin() -> Self {
        Self {
            id: "smart-start".into(),
            name: "Smart Start Assessment".into(),
            description: "Built-in screening catalog".into(),
            focus: vec![
                Trial::new(
                    "🍎",
                    &["🍎", "🐱", "🚗", "🎈", "⭐", "🏠"],
                    Some("Find the red apple!"),
                ),
                Trial::new(
                    "🐶",
                    &["🐶", "🌸", "⚽", "🎯", "🔥", "🎪"],
                    Some("Click on the dog!"),
                ),
                Trial::new(
                    "⭐",
                    &["⭐", "🍌", "🎵", "🌙", "🎨", "🎭"],
                    Some("Where is the star?"),
                ),
                Trial::new(
                    "🚗",
                    &["🚗", "🦋", "🎁", "🌈", "🎸", "🏆"],
                    Some("Find the car!"),
                ),
                Trial::new(
                    "🏠",
                    &["🏠", "🎲", "🎪", "🌺", "🎯", "🎊"],
                    Some("Click the house!"),
                ),
            ],
            letter: vec![
                Trial::new("A", &["A", "B", "C"], None),
                Trial::new("B", &["A", "B", "D"], None),
                Trial::new("C", &["C", "G", "O"], None),
                Trial::new("D", &["D", "B", "P"], None),
                Trial::new("E", &["E", "F", "L"], None),
                Trial::new("F", &["F", "E", "T"], None),
                Trial::new("G", &["G", "C", "Q"], None),
                Trial::new("H", &["H", "N", "M"], None),
            ],
            memory_values: vec!["🐶".into(), "🐱".into(), "🐸".into(), "🦋".into()],
        }
    }

    /// Number of pairs on the memory board.
    pub fn pair_count(&self) -> usize {
        self.memory_values.len()
    }

    /// The unshuffled memory deck: every value twice.
    pub fn memory_deck(&self) -> Vec<String> {
        let mut deck = Vec::with_capacity(self.memory_values.len() * 2);
        for value in &self.memory_values {
            deck.push(value.clone());
            deck.push(value.clone());
        }
        deck
    }

    /// Check the structural invariants the engines rely on.
    ///
    /// Soft issues (style, suspicious-but-playable content) are handled
    /// by [`crate::parser::validate_catalog`]; this rejects catalogs
    /// the engines cannot run at all.
    pub fn check(&self) -> Result<(), CatalogError> {
        if self.focus.is_empty() {
            return Err(CatalogError::EmptySection(GameKind::Focus));
        }
        if self.letter.is_empty() {
            return Err(CatalogError::EmptySection(GameKind::Letter));
        }
        for (game, trials) in [(GameKind::Focus, &self.focus), (GameKind::Letter, &self.letter)] {
            for (index, trial) in trials.iter().enumerate() {
                let hits = trial.options.iter().filter(|o| **o == trial.target).count();
                if hits != 1 {
                    return Err(CatalogError::BadTarget {
                        game,
                        index,
                        target: trial.target.clone(),
                        occurrences: hits,
                    });
                }
            }
        }
        if self.memory_values.len() < 2 {
            return Err(CatalogError::DeckTooSmall(self.memory_values.len()));
        }
        let mut seen = std::collections::HashSet::new();
        for value in &self.memory_values {
            if !seen.insert(value) {
                return Err(CatalogError::DuplicateDeckValue(value.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_kind_display_and_parse() {
        assert_eq!(GameKind::Focus.to_string(), "focus");
        assert_eq!(GameKind::Memory.to_string(), "memory");
        assert_eq!("letter".parse::<GameKind>().unwrap(), GameKind::Letter);
        assert_eq!("Focus".parse::<GameKind>().unwrap(), GameKind::Focus);
        assert!("chess".parse::<GameKind>().is_err());
    }

    #[test]
    fn builtin_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.focus.len(), 5);
        assert_eq!(catalog.letter.len(), 8);
        assert_eq!(catalog.memory_values.len(), 4);
        assert!(catalog.focus.iter().all(|t| t.options.len() == 6));
        assert!(catalog.letter.iter().all(|t| t.options.len() == 3));
        catalog.check().unwrap();
    }

    #[test]
    fn builtin_targets_appear_exactly_once() {
        let catalog = Catalog::builtin();
        for trial in catalog.focus.iter().chain(&catalog.letter) {
            let hits = trial.options.iter().filter(|o| **o == trial.target).count();
            assert_eq!(hits, 1, "target {} occurs {hits} times", trial.target);
        }
    }

    #[test]
    fn memory_deck_doubles_values() {
        let catalog = Catalog::builtin();
        let deck = catalog.memory_deck();
        assert_eq!(deck.len(), 8);
        for value in &catalog.memory_values {
            assert_eq!(deck.iter().filter(|c| *c == value).count(), 2);
        }
    }

    #[test]
    fn check_rejects_missing_target() {
        let mut catalog = Catalog::builtin();
        catalog.focus[0].target = "🛸".into();
        assert!(matches!(
            catalog.check(),
            Err(CatalogError::BadTarget { occurrences: 0, .. })
        ));
    }

    #[test]
    fn check_rejects_duplicate_memory_value() {
        let mut catalog = Catalog::builtin();
        catalog.memory_values[1] = catalog.memory_values[0].clone();
        assert!(matches!(
            catalog.check(),
            Err(CatalogError::DuplicateDeckValue(_))
        ));
    }

    #[test]
    fn trial_serde_roundtrip() {
        let trial = Trial::new("A", &["A", "B", "C"], Some("Letter A"));
        let json = serde_json::to_string(&trial).unwrap();
        let back: Trial = serde_json::from_str(&json).unwrap();
        assert_eq!(back.target, "A");
        assert_eq!(back.options.len(), 3);
        assert_eq!(back.prompt.as_deref(), Some("Letter A"));
    }
}
