//! Letter & sound engine (reading proxy).
//!
//! The player hears "Letter {X}" and picks the glyph among three
//! lookalikes. Every audio playback bumps `needs_repetition`; with one
//! automatic cue per round that counter equals rounds presented,
//! which is the intended baseline for the repetition rate.

use rand::Rng;

use crate::catalog::{GameKind, Trial};
use crate::schedule::{Scheduler, TaskKind};
use crate::session::{AttemptRecord, LetterSession};
use crate::shuffle::shuffled_with;
use crate::traits::{AssessmentObserver, FeedbackKind, Narrator};

use super::{AUDIO_CUE_DELAY_MS, ROUND_ADVANCE_DELAY_MS, TICK_MS};

pub struct LetterEngine {
    pub session: LetterSession,
    trials: Vec<Trial>,
    shuffled_options: Vec<String>,
    presented_at_ms: u64,
    awaiting_advance: bool,
    active: bool,
}

impl LetterEngine {
    pub fn new(trials: Vec<Trial>) -> Self {
        let total = trials.len();
        Self {
            session: LetterSession::new(total),
            trials,
            shuffled_options: Vec::new(),
            presented_at_ms: 0,
            awaiting_advance: false,
            active: false,
        }
    }

    pub fn reset(&mut self) {
        self.session = LetterSession::new(self.trials.len());
        self.shuffled_options.clear();
        self.presented_at_ms = 0;
        self.awaiting_advance = false;
        self.active = false;
    }

    pub fn start(
        &mut self,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        rng: &mut impl Rng,
    ) {
        self.reset();
        self.active = true;
        sched.schedule(TICK_MS, TaskKind::Tick(GameKind::Letter));
        self.present_round(sched, obs, rng);
    }

    fn present_round(
        &mut self,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        rng: &mut impl Rng,
    ) {
        let round = self.session.current_round;
        let trial = &self.trials[round];
        self.shuffled_options = shuffled_with(&trial.options, rng);
        self.presented_at_ms = sched.now_ms();
        self.awaiting_advance = false;

        obs.on_round_ready(
            GameKind::Letter,
            round,
            self.session.total_rounds,
            trial,
            &self.shuffled_options,
        );
        obs.on_progress(
            GameKind::Letter,
            round as f64 / self.session.total_rounds as f64,
        );
        sched.schedule(
            AUDIO_CUE_DELAY_MS,
            TaskKind::AudioCue {
                game: GameKind::Letter,
                round,
            },
        );
    }

    pub fn submit(
        &mut self,
        selection: &str,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        narrator: &mut dyn Narrator,
    ) {
        if !self.active || self.session.finalized || self.awaiting_advance {
            tracing::warn!(selection, "ignoring letter selection outside an open round");
            return;
        }

        let round = self.session.current_round;
        let target = self.trials[round].target.clone();
        let correct = selection == target;

        self.session.attempts.push(AttemptRecord {
            round,
            selected: selection.to_string(),
            target: target.clone(),
            correct,
            latency_ms: sched.now_ms() - self.presented_at_ms,
        });

        if correct {
            self.session.correct_answers += 1;
            obs.on_feedback(
                GameKind::Letter,
                "🎉 Perfect! That's correct! 🎉",
                FeedbackKind::Success,
            );
            narrator.speak("Perfect! That's the right letter!");
        } else {
            obs.on_feedback(
                GameKind::Letter,
                &format!("❌ Not quite! It was \"{target}\""),
                FeedbackKind::Error,
            );
            narrator.speak(&format!("Not quite! It was {target}"));
        }

        self.session.current_round += 1;
        self.awaiting_advance = true;
        sched.schedule(
            ROUND_ADVANCE_DELAY_MS,
            TaskKind::AdvanceRound(GameKind::Letter),
        );
    }

    pub fn advance(
        &mut self,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        rng: &mut impl Rng,
    ) {
        if !self.active {
            return;
        }
        self.awaiting_advance = false;
        if self.session.current_round < self.session.total_rounds {
            self.present_round(sched, obs, rng);
        } else {
            self.finalize(obs);
        }
    }

    fn finalize(&mut self, obs: &mut dyn AssessmentObserver) {
        self.session.finalized = true;
        self.session.total_time = self.session.elapsed_seconds;
        self.active = false;
        tracing::info!(
            correct = self.session.correct_answers,
            repetitions = self.session.needs_repetition,
            total_time = self.session.total_time,
            "letter game finalized"
        );
        obs.on_progress(GameKind::Letter, 1.0);
        obs.on_game_finalized(GameKind::Letter, self.session.total_time);
    }

    /// Speak "Letter {X}" for `round` and count the playback.
    pub fn play_audio(&mut self, round: usize, narrator: &mut dyn Narrator) {
        if !self.active {
            return;
        }
        if let Some(trial) = self.trials.get(round) {
            self.session.needs_repetition += 1;
            narrator.speak(&format!("Letter {}", trial.target));
        }
    }

    pub fn tick(&mut self, sched: &mut Scheduler) {
        if !self.active || self.session.finalized {
            return;
        }
        self.session.elapsed_seconds += 1;
        sched.schedule(TICK_MS, TaskKind::Tick(GameKind::Letter));
    }

    pub fn options(&self) -> &[String] {
        &self.shuffled_options
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::games::testutil::{RecordingNarrator, RecordingObserver};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> (LetterEngine, Scheduler, RecordingObserver, RecordingNarrator, StdRng) {
        let engine = LetterEngine::new(Catalog::builtin().letter);
        (
            engine,
            Scheduler::new(),
            RecordingObserver::default(),
            RecordingNarrator::default(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn presents_three_options_per_round() {
        let (mut engine, mut sched, mut obs, _narr, mut rng) = fixture();
        engine.start(&mut sched, &mut obs, &mut rng);
        let (_, _, options) = &obs.rounds[0];
        assert_eq!(options.len(), 3);
        assert!(options.contains(&"A".to_string()));
    }

    #[test]
    fn audio_cue_counts_a_repetition() {
        let (mut engine, mut sched, mut obs, mut narr, mut rng) = fixture();
        engine.start(&mut sched, &mut obs, &mut rng);
        engine.play_audio(0, &mut narr);
        assert_eq!(engine.session.needs_repetition, 1);
        assert_eq!(narr.spoken, vec!["Letter A"]);

        // An explicit repeat request is the same playback path.
        engine.play_audio(0, &mut narr);
        assert_eq!(engine.session.needs_repetition, 2);
    }

    #[test]
    fn every_round_counts_once_over_a_full_game() {
        let (mut engine, mut sched, mut obs, mut narr, mut rng) = fixture();
        engine.start(&mut sched, &mut obs, &mut rng);
        for round in 0..8 {
            engine.play_audio(round, &mut narr);
            engine.submit("A", &mut sched, &mut obs, &mut narr);
            engine.advance(&mut sched, &mut obs, &mut rng);
        }
        assert!(engine.session.finalized);
        assert_eq!(engine.session.needs_repetition, 8);
        // "A" is only the target of round 0.
        assert_eq!(engine.session.correct_answers, 1);
    }

    #[test]
    fn wrong_selection_reveals_the_letter() {
        let (mut engine, mut sched, mut obs, mut narr, mut rng) = fixture();
        engine.start(&mut sched, &mut obs, &mut rng);
        engine.submit("C", &mut sched, &mut obs, &mut narr);
        let (_, message, kind) = &obs.feedback[0];
        assert_eq!(*kind, FeedbackKind::Error);
        assert!(message.contains("\"A\""));
        assert_eq!(narr.spoken.last().unwrap(), "Not quite! It was A");
    }

    #[test]
    fn correct_answers_never_exceed_total_rounds() {
        let (mut engine, mut sched, mut obs, mut narr, mut rng) = fixture();
        engine.start(&mut sched, &mut obs, &mut rng);
        loop {
            let target = engine.trials[engine.session.current_round].target.clone();
            engine.submit(&target, &mut sched, &mut obs, &mut narr);
            engine.advance(&mut sched, &mut obs, &mut rng);
            if engine.session.finalized {
                break;
            }
        }
        assert_eq!(engine.session.correct_answers, 8);
        assert_eq!(engine.session.attempts.len(), 8);
    }

    #[test]
    fn audio_after_finalize_is_silent() {
        let (mut engine, mut sched, mut obs, mut narr, mut rng) = fixture();
        engine.start(&mut sched, &mut obs, &mut rng);
        for _ in 0..8 {
            engine.submit("H", &mut sched, &mut obs, &mut narr);
            engine.advance(&mut sched, &mut obs, &mut rng);
        }
        let reps = engine.session.needs_repetition;
        let spoken = narr.spoken.len();
        engine.play_audio(7, &mut narr);
        assert_eq!(engine.session.needs_repetition, reps);
        assert_eq!(narr.spoken.len(), spoken);
    }
}
