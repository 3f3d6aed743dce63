//! The three mini-game engines.
//!
//! Each engine owns its session, its round/trial progression, and its
//! termination detection. Delays are queued on the orchestrator's
//! scheduler rather than slept.

pub mod focus;
pub mod letter;
pub mod memory;

/// Audio cue plays this long after a round is presented.
pub const AUDIO_CUE_DELAY_MS: u64 = 1000;
/// Feedback hold between answering and the next round.
pub const ROUND_ADVANCE_DELAY_MS: u64 = 2500;
/// Matched memory cards lock in after this long.
pub const MATCH_RESOLVE_DELAY_MS: u64 = 1000;
/// Mismatched memory cards flip back after this long.
pub const MISMATCH_RESOLVE_DELAY_MS: u64 = 1500;
/// Elapsed-time ticker period.
pub const TICK_MS: u64 = 1000;
