//! Epoch-stamped task queue.
//!
//! Every delay in the assessment (audio cues, feedback holds, card
//! resolution, second tickers) is a queued task on a virtual clock,
//! driven by the adapter through the orchestrator. A `restart` bumps
//! the epoch; tasks stamped with an older epoch are discarded when
//! they come due instead of mutating reset state.

use crate::catalog::GameKind;

/// What a due task does. Data, not closures, so stale work can be
/// dropped by inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Speak the narration for a presented round.
    AudioCue { game: GameKind, round: usize },
    /// Feedback hold is over; move to the next round or finalize.
    AdvanceRound(GameKind),
    /// Two flipped memory cards matched; lock them in.
    ResolveMatch,
    /// Two flipped memory cards differed; hide them again.
    ResolveMismatch,
    /// One-second elapsed-time tick for a running game.
    Tick(GameKind),
}

/// A task waiting on the virtual clock.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    /// Absolute virtual time the task fires at.
    pub at_ms: u64,
    /// Tie-breaker preserving scheduling order at equal times.
    pub seq: u64,
    /// Epoch the task was scheduled under.
    pub epoch: u64,
    pub kind: TaskKind,
}

/// The orchestrator's virtual clock and pending-task queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    epoch: u64,
    next_seq: u64,
    queue: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Queue `kind` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, kind: TaskKind) {
        let task = ScheduledTask {
            at_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
            epoch: self.epoch,
            kind,
        };
        self.next_seq += 1;
        self.queue.push(task);
    }

    /// Invalidate all pending work; anything already queued becomes
    /// stale and will be dropped when due.
    pub fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Pop the earliest current-epoch task due at or before `until_ms`,
    /// advancing the clock to its fire time. Stale-epoch tasks
    /// encountered on the way are removed and logged, never fired.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        loop {
            let best = self
                .queue
                .iter()
                .enumerate()
                .filter(|(_, t)| t.at_ms <= until_ms)
                .min_by_key(|(_, t)| (t.at_ms, t.seq))
                .map(|(i, _)| i)?;
            let task = self.queue.swap_remove(best);
            if task.epoch != self.epoch {
                tracing::debug!(?task.kind, task.epoch, "dropping stale task");
                continue;
            }
            self.now_ms = self.now_ms.max(task.at_ms);
            return Some(task);
        }
    }

    /// Move the clock forward with no dispatch. Called after all due
    /// tasks have fired.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Number of queued tasks, stale ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
