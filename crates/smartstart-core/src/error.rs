//! Catalog error types.
//!
//! Structural problems that make a catalog unrunnable. Defined here so
//! callers can classify failures without string matching; soft
//! validation warnings live in [`crate::parser`].

use thiserror::Error;

use crate::catalog::GameKind;

/// Errors raised by [`crate::catalog::Catalog::check`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A mini-game has no trials at all.
    #[error("catalog has no {0} trials")]
    EmptySection(GameKind),

    /// A trial's target does not appear exactly once among its options.
    #[error("{game} trial {index}: target '{target}' appears {occurrences} times in options (expected once)")]
    BadTarget {
        game: GameKind,
        index: usize,
        target: String,
        occurrences: usize,
    },

    /// The memory deck has too few distinct values to play.
    #[error("memory deck has {0} values; at least 2 are required")]
    DeckTooSmall(usize),

    /// The same value was listed twice in the memory deck.
    #[error("memory deck value '{0}' is listed more than once")]
    DuplicateDeckValue(String),
}

impl CatalogError {
    /// Returns `true` if the error concerns the memory deck.
    pub fn is_deck_error(&self) -> bool {
        matches!(
            self,
            CatalogError::DeckTooSmall(_) | CatalogError::DuplicateDeckValue(_)
        )
    }
}
