//! Focus & match engine (attention proxy).
//!
//! Each round shows one target among shuffled distractors, cues the
//! narration after a short delay, and holds feedback on screen before
//! the next round. Timing per attempt runs from presentation to
//! selection.

use rand::Rng;

use crate::catalog::{GameKind, Trial};
use crate::schedule::{Scheduler, TaskKind};
use crate::session::{AttemptRecord, FocusSession};
use crate::shuffle::shuffled_with;
use crate::traits::{AssessmentObserver, FeedbackKind, Narrator};

use super::{AUDIO_CUE_DELAY_MS, ROUND_ADVANCE_DELAY_MS, TICK_MS};

pub struct FocusEngine {
    pub session: FocusSession,
    trials: Vec<Trial>,
    shuffled_options: Vec<String>,
    presented_at_ms: u64,
    awaiting_advance: bool,
    active: bool,
}

impl FocusEngine {
    pub fn new(trials: Vec<Trial>) -> Self {
        let total = trials.len();
        Self {
            session: FocusSession::new(total),
            trials,
            shuffled_options: Vec::new(),
            presented_at_ms: 0,
            awaiting_advance: false,
            active: false,
        }
    }

    /// Back to a fresh, not-yet-started session.
    pub fn reset(&mut self) {
        self.session = FocusSession::new(self.trials.len());
        self.shuffled_options.clear();
        self.presented_at_ms = 0;
        self.awaiting_advance = false;
        self.active = false;
    }

    /// Start round 0 and the elapsed-time ticker.
    pub fn start(
        &mut self,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        rng: &mut impl Rng,
    ) {
        self.reset();
        self.active = true;
        sched.schedule(TICK_MS, TaskKind::Tick(GameKind::Focus));
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
            GameKind::Focus,
            round,
            self.session.total_rounds,
            trial,
            &self.shuffled_options,
        );
        obs.on_progress(
            GameKind::Focus,
            round as f64 / self.session.total_rounds as f64,
        );
        sched.schedule(
            AUDIO_CUE_DELAY_MS,
            TaskKind::AudioCue {
                game: GameKind::Focus,
                round,
            },
        );
    }

    /// Player picked an option. Anything outside an open round is a
    /// silent no-op.
    pub fn submit(
        &mut self,
        selection: &str,
        sched: &mut Scheduler,
        obs: &mut dyn AssessmentObserver,
        narrator: &mut dyn Narrator,
    ) {
        if !self.active || self.session.finalized || self.awaiting_advance {
            tracing::warn!(selection, "ignoring focus selection outside an open round");
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
                GameKind::Focus,
                "🎉 Great job! Well done! 🎉",
                FeedbackKind::Success,
            );
            narrator.speak("Excellent! Well done!");
        } else {
            obs.on_feedback(
                GameKind::Focus,
                &format!("❌ Not quite! It was the {target}"),
                FeedbackKind::Error,
            );
            narrator.speak("Try to focus more carefully next time!");
        }

        self.session.current_round += 1;
        self.awaiting_advance = true;
        sched.schedule(ROUND_ADVANCE_DELAY_MS, TaskKind::AdvanceRound(GameKind::Focus));
    }

    /// Feedback hold expired; next round or finalization.
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
            total_time = self.session.total_time,
            "focus game finalized"
        );
        obs.on_progress(GameKind::Focus, 1.0);
        obs.on_game_finalized(GameKind::Focus, self.session.total_time);
    }

    /// Audio cue came due for `round`.
    pub fn play_audio(&mut self, round: usize, narrator: &mut dyn Narrator) {
        if !self.active {
            return;
        }
        if let Some(prompt) = self.trials.get(round).and_then(|t| t.prompt.as_deref()) {
            narrator.speak(prompt);
        }
    }

    /// Elapsed-time tick: count a second and re-arm while running.
    pub fn tick(&mut self, sched: &mut Scheduler) {
        if !self.active || self.session.finalized {
            return;
        }
        self.session.elapsed_seconds += 1;
        sched.schedule(TICK_MS, TaskKind::Tick(GameKind::Focus));
    }

    /// Options as currently presented, shuffled.
    pub fn options(&self) -> &[String] {
        &self.shuffled_options
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
