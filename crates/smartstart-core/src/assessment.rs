//! Assessment orchestrator.
//!
//! Sequences the three engines through a linear phase flow, routes
//! adapter input to whichever game is current, and drives every delay
//! through the epoch-stamped scheduler. The adapter advances the
//! clock; nothing here blocks or spawns.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{Catalog, GameKind};
use crate::games::focus::FocusEngine;
use crate::games::letter::LetterEngine;
use crate::games::memory::MemoryEngine;
use crate::report::AssessmentReport;
use crate::schedule::{Scheduler, TaskKind};
use crate::scoring::{self, AssessmentResults};
use crate::session::{CardState, FocusSession, LetterSession, MemorySession};
use crate::traits::{AssessmentObserver, Narrator, NoopObserver, SilentNarrator};

/// Where the assessment currently is. Strictly linear; the adapter
/// triggers each transition once the prior game finalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Instructions,
    Focus,
    Letter,
    Memory,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Welcome => "welcome",
            Phase::Instructions => "instructions",
            Phase::Focus => "focus",
            Phase::Letter => "letter",
            Phase::Memory => "memory",
            Phase::Results => "results",
        };
        write!(f, "{name}")
    }
}

/// The whole assessment: catalog, phase, engines, scheduler, and the
/// presentation/narration collaborators.
pub struct Assessment {
    catalog: Catalog,
    phase: Phase,
    sched: Scheduler,
    rng: StdRng,
    focus: FocusEngine,
    letter: LetterEngine,
    memory: MemoryEngine,
    observer: Box<dyn AssessmentObserver>,
    narrator: Box<dyn Narrator>,
    results: Option<AssessmentResults>,
    recommendations: Vec<String>,
}

impl Assessment {
    /// Assessment with no presentation attached (headless scoring,
    /// tests).
    pub fn new(catalog: Catalog) -> Self {
        Self::with_collaborators(catalog, Box::new(NoopObserver), Box::new(SilentNarrator))
    }

    pub fn with_collaborators(
        catalog: Catalog,
        observer: Box<dyn AssessmentObserver>,
        narrator: Box<dyn Narrator>,
    ) -> Self {
        let focus = FocusEngine::new(catalog.focus.clone());
        let letter = LetterEngine::new(catalog.letter.clone());
        Self {
            catalog,
            phase: Phase::Welcome,
            sched: Scheduler::new(),
            rng: StdRng::from_entropy(),
            focus,
            letter,
            memory: MemoryEngine::new(),
            observer,
            narrator,
            results: None,
            recommendations: Vec::new(),
        }
    }

    /// Fix the shuffle seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to the next phase. Refused (returning `false`) while the
    /// current game is still running.
    pub fn advance_phase(&mut self) -> bool {
        let next = match self.phase {
            Phase::Welcome => Phase::Instructions,
            Phase::Instructions => Phase::Focus,
            Phase::Focus if self.focus.session.finalized => Phase::Letter,
            Phase::Letter if self.letter.session.finalized => Phase::Memory,
            Phase::Memory if self.memory.session.finalized => Phase::Results,
            current => {
                tracing::warn!(phase = %current, "refusing phase advance");
                return false;
            }
        };
        tracing::info!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        match next {
            Phase::Focus => {
                self.focus
                    .start(&mut self.sched, self.observer.as_mut(), &mut self.rng)
            }
            Phase::Letter => {
                self.letter
                    .start(&mut self.sched, self.observer.as_mut(), &mut self.rng)
            }
            Phase::Memory => {
                let deck = self.catalog.memory_deck();
                self.memory
                    .start(&deck, &mut self.sched, self.observer.as_mut(), &mut self.rng)
            }
            Phase::Results => self.publish_results(),
            Phase::Welcome | Phase::Instructions => {}
        }
        true
    }

    fn publish_results(&mut self) {
        let results = scoring::evaluate(
            &self.focus.session,
            &self.letter.session,
            &self.memory.session,
        );
        let recs = scoring::recommendations(&results);
        self.observer.on_results_ready(&results, &recs);
        self.results = Some(results);
        self.recommendations = recs;
    }

    /// Option pick for the focus or letter game. A no-op in any other
    /// phase.
    pub fn submit_selection(&mut self, value: &str) {
        match self.phase {
            Phase::Focus => self.focus.submit(
                value,
                &mut self.sched,
                self.observer.as_mut(),
                self.narrator.as_mut(),
            ),
            Phase::Letter => self.letter.submit(
                value,
                &mut self.sched,
                self.observer.as_mut(),
                self.narrator.as_mut(),
            ),
            phase => tracing::warn!(%phase, value, "ignoring selection outside a choice game"),
        }
    }

    /// Card flip for the memory game. A no-op in any other phase.
    pub fn submit_card_flip(&mut self, index: usize) {
        match self.phase {
            Phase::Memory => self
                .memory
                .flip(index, &mut self.sched, self.observer.as_mut()),
            phase => tracing::warn!(%phase, index, "ignoring card flip outside the memory game"),
        }
    }

    /// Replay the current round's audio cue on request.
    pub fn repeat_audio(&mut self) {
        match self.phase {
            Phase::Focus => {
                let round = self.focus.session.current_round;
                self.focus.play_audio(round, self.narrator.as_mut());
            }
            Phase::Letter => {
                let round = self.letter.session.current_round;
                self.letter.play_audio(round, self.narrator.as_mut());
            }
            phase => tracing::warn!(%phase, "no audio to repeat"),
        }
    }

    /// Advance the virtual clock by `ms`, firing every due task in
    /// order. Tasks scheduled by firing tasks run too if they come due
    /// within the same window.
    pub fn advance_time(&mut self, ms: u64) {
        let until = self.sched.now_ms() + ms;
        while let Some(task) = self.sched.pop_due(until) {
            self.dispatch(task.kind);
        }
        self.sched.settle(until);
    }

    fn dispatch(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::AudioCue { game, round } => match game {
                GameKind::Focus => self.focus.play_audio(round, self.narrator.as_mut()),
                GameKind::Letter => self.letter.play_audio(round, self.narrator.as_mut()),
                GameKind::Memory => {}
            },
            TaskKind::AdvanceRound(GameKind::Focus) => {
                self.focus
                    .advance(&mut self.sched, self.observer.as_mut(), &mut self.rng)
            }
            TaskKind::AdvanceRound(GameKind::Letter) => {
                self.letter
                    .advance(&mut self.sched, self.observer.as_mut(), &mut self.rng)
            }
            TaskKind::AdvanceRound(GameKind::Memory) => {}
            TaskKind::ResolveMatch => self
                .memory
                .resolve_match(self.observer.as_mut(), self.narrator.as_mut()),
            TaskKind::ResolveMismatch => self
                .memory
                .resolve_mismatch(self.observer.as_mut(), self.narrator.as_mut()),
            TaskKind::Tick(GameKind::Focus) => self.focus.tick(&mut self.sched),
            TaskKind::Tick(GameKind::Letter) => self.letter.tick(&mut self.sched),
            TaskKind::Tick(GameKind::Memory) => self.memory.tick(&mut self.sched),
        }
    }

    /// Back to `Welcome` with fresh sessions. Pending timers are
    /// invalidated by the epoch bump, so nothing scheduled before the
    /// restart can touch the new state.
    pub fn restart(&mut self) {
        tracing::info!("assessment restart");
        self.sched.bump_epoch();
        self.focus.reset();
        self.letter.reset();
        self.memory.reset();
        self.results = None;
        self.recommendations.clear();
        self.phase = Phase::Welcome;
    }

    /// Final results, present once the `Results` phase is reached.
    pub fn results(&self) -> Option<&AssessmentResults> {
        self.results.as_ref()
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// Build the exportable report. `None` before the results phase.
    pub fn report(&self) -> Option<AssessmentReport> {
        self.results
            .as_ref()
            .map(|r| AssessmentReport::new(r.clone(), self.recommendations.clone()))
    }

    // Read-only session views for adapters.

    pub fn focus_session(&self) -> &FocusSession {
        &self.focus.session
    }

    pub fn letter_session(&self) -> &LetterSession {
        &self.letter.session
    }

    pub fn memory_session(&self) -> &MemorySession {
        &self.memory.session
    }

    /// The current round's shuffled options, if a choice game is up.
    pub fn current_options(&self) -> Option<&[String]> {
        match self.phase {
            Phase::Focus if self.focus.is_active() => Some(self.focus.options()),
            Phase::Letter if self.letter.is_active() => Some(self.letter.options()),
            _ => None,
        }
    }

    /// The memory board as dealt. Adapters render phases only; the
    /// values are face-down until revealed through the observer.
    pub fn memory_cards(&self) -> &[CardState] {
        &self.memory.session.cards
    }
}
