//! Memory pair-matching engine (cognition proxy).
//!
//! Card lifecycle: hidden → flipped → matched, or back to hidden on a
//! mismatch. At most two cards are face up at once; that same guard
//! rejects input while a resolution delay is pending.

use rand::Rng;

use crate::catalog::GameKind;
use crate::schedule::{Scheduler, TaskKind};
use crate::session::{CardPhase, CardState, MemorySession};
use crate::shuffle::shuffled_with;
use crate::traits::{AssessmentObserver, FeedbackKind, Narrator};

use super::{MATCH_RESOLVE_DELAY_MS, MISMATCH_RESOLVE_DELAY_MS, TICK_MS};

pub struct MemoryEngine {
    pub session: MemorySession,
    active: bool,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            session: MemorySession::default(),
            active: false,
        }
    }

    pub fn reset(&mut self) {
        self.session = MemorySession::default();
        self.active = false;
    }

    /// Deal a shuffled board and start the ticker.
    pub fn start(
        &mut self,
        deck: &[String],
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        rng: &mut impl Rng,
    ) {
        self.reset();
        self.session.cards = shuffled_with(deck, rng)
            .into_iter()
            .map(|value| CardState {
                value,
                phase: CardPhase::Hidden,
            })
            .collect();
        self.active = true;

        obs.on_memory_board(self.session.cards.len());
        obs.on_progress(GameKind::Memory, 0.0);
        sched.schedule(TICK_MS, TaskKind::Tick(GameKind::Memory));
    }

    /// Flip request. No-op on a face-up or matched card, with two
    /// cards already up, or outside a running game.
    pub fn flip(
        &mut self,
        index: usize,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
    ) {
        if !self.active || self.session.finalized {
            tracing::warn!(index, "ignoring card flip outside a running memory game");
            return;
        }
        let Some(card) = self.session.cards.get(index) else {
            tracing::warn!(index, "ignoring flip of nonexistent card");
            return;
        };
        if card.phase != CardPhase::Hidden || self.session.flipped.len() >= 2 {
            return;
        }

        self.session.cards[index].phase = CardPhase::Flipped;
        self.session.flipped.push(index);
        obs.on_card_revealed(index, &self.session.cards[index].value);

        if self.session.flipped.len() == 2 {
            self.session.attempts += 1;
            let (a, b) = (self.session.flipped[0], self.session.flipped[1]);
            if self.session.cards[a].value == self.session.cards[b].value {
                sched.schedule(MATCH_RESOLVE_DELAY_MS, TaskKind::ResolveMatch);
            } else {
                self.session.mistakes += 1;
                sched.schedule(MISMATCH_RESOLVE_DELAY_MS, TaskKind::ResolveMismatch);
            }
        }
    }

    /// Match delay expired: lock the pair in, maybe finish the game.
    pub fn resolve_match(
        &mut self,
        obs: &mut dyn AssessmentObserver,
        narrator: &mut dyn Narrator,
    ) {
        if !self.active || self.session.flipped.len() != 2 {
            return;
        }
        let (a, b) = (self.session.flipped[0], self.session.flipped[1]);
        self.session.cards[a].phase = CardPhase::Matched;
        self.session.cards[b].phase = CardPhase::Matched;
        self.session.flipped.clear();
        self.session.matched_pairs += 1;

        obs.on_cards_matched(a, b);
        obs.on_feedback(GameKind::Memory, "🎉 Great match! 🎉", FeedbackKind::Success);
        narrator.speak("Great match!");
        obs.on_progress(
            GameKind::Memory,
            self.session.matched_pairs as f64 / self.session.pair_count() as f64,
        );

        if self.session.matched_pairs == self.session.pair_count() {
            self.finalize(obs);
        }
    }

    /// Mismatch delay expired: hide both cards again.
    pub fn resolve_mismatch(
        &mut self,
        obs: &mut dyn AssessmentObserver,
        narrator: &mut dyn Narrator,
    ) {
        if !self.active || self.session.flipped.len() != 2 {
            return;
        }
        let (a, b) = (self.session.flipped[0], self.session.flipped[1]);
        self.session.cards[a].phase = CardPhase::Hidden;
        self.session.cards[b].phase = CardPhase::Hidden;
        self.session.flipped.clear();

        obs.on_cards_hidden(a, b);
        obs.on_feedback(
            GameKind::Memory,
            "❌ Try again! Keep looking! ❌",
            FeedbackKind::Error,
        );
        narrator.speak("Try again! Remember where the pictures are!");
    }

    fn finalize(&mut self, obs: &mut dyn AssessmentObserver) {
        self.session.finalized = true;
        self.session.total_time = self.session.elapsed_seconds;
        self.active = false;
        tracing::info!(
            attempts = self.session.attempts,
            mistakes = self.session.mistakes,
            total_time = self.session.total_time,
            "memory game finalized"
        );
        obs.on_progress(GameKind::Memory, 1.0);
        obs.on_game_finalized(GameKind::Memory, self.session.total_time);
    }

    pub fn tick(&mut self, sched: &mut Scheduler) {
        if !self.active || self.session.finalized {
            return;
        }
        self.session.elapsed_seconds += 1;
        sched.schedule(TICK_MS, TaskKind::Tick(GameKind::Memory));
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}
