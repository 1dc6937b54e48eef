//! Timer scheduling for opponent runs.

use alloc::vec::Vec;
use core::time::Duration;

use tracing::trace;

use crate::game::RoundToken;

use super::SimStep;

/// A scheduled opponent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Clock time at which the step is due.
    pub due: Duration,
    /// Match state the step was scheduled against.
    pub token: RoundToken,
    /// The step to run.
    pub step: SimStep,
    seq: u64,
}

/// Schedules opponent steps against a clock.
///
/// Every timer is keyed by the [`RoundToken`] it was scheduled against, so
/// all pending work for a round can be dropped in one call.
pub trait Scheduler {
    /// Returns the current clock time.
    fn now(&self) -> Duration;

    /// Schedules `step` to run `delay` after [`Self::now`].
    fn schedule(&mut self, token: RoundToken, delay: Duration, step: SimStep);

    /// Cancels every pending timer scheduled against `token`.
    ///
    /// Returns the number of timers cancelled.
    fn cancel(&mut self, token: RoundToken) -> usize;

    /// Cancels every pending timer.
    ///
    /// Returns the number of timers cancelled.
    fn cancel_all(&mut self) -> usize;

    /// Returns the number of pending timers.
    fn pending(&self) -> usize;

    /// Removes the earliest timer due at or before `deadline` and moves the
    /// clock to its due time.
    fn pop_due(&mut self, deadline: Duration) -> Option<Timer>;

    /// Moves the clock forward to `deadline` without running anything.
    fn settle(&mut self, deadline: Duration);
}

/// A scheduler driven by an explicit clock.
///
/// The host advances time; nothing runs on its own. Timers due at the same
/// time run in the order they were scheduled.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    /// Returns the due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Returns the pending timers, in scheduling order.
    #[must_use]
    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, token: RoundToken, delay: Duration, step: SimStep) {
        let due = self.now.saturating_add(delay);
        trace!(%token, ?step, ?due, "timer scheduled");
        self.timers.push(Timer {
            due,
            token,
            step,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    fn cancel(&mut self, token: RoundToken) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.token != token);
        let cancelled = before - self.timers.len();
        if cancelled > 0 {
            trace!(%token, cancelled, "timers cancelled");
        }
        cancelled
    }

    fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        if cancelled > 0 {
            trace!(cancelled, "all timers cancelled");
        }
        cancelled
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;

        let timer = self.timers.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer)
    }

    fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
