//! Opponent simulation.
//!
//! A run is a chain of timed steps. Each step is scheduled when the one
//! before it finishes:
//!
//! - setting: [`SimStep::Announce`] → [`SimStep::Reveal`] →
//!   [`SimStep::Resolve`] → [`SimStep::Handoff`]
//! - defending: [`SimStep::Announce`] → [`SimStep::Resolve`] →
//!   [`SimStep::Handoff`]
//!
//! [`crate::Session`] owns the chain and the clock; this module only makes
//! the opponent's random choices.

use core::time::Duration;

use rand::Rng;

use crate::game::Outcome;
use crate::options::{Difficulty, MatchOptions};
use crate::trick::{TrickAttempt, TrickPool};

pub mod scheduler;

pub use scheduler::{Scheduler, Timer, TimerQueue};

/// What the opponent is doing in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    /// Setting its own trick.
    Set,
    /// Copying the player's trick.
    Defend,
}

/// One step of an opponent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimStep {
    /// Narrate what the opponent is about to do.
    Announce(RunKind),
    /// Pick and commit to a trick and stance.
    Reveal,
    /// Make or bail.
    Resolve(RunKind),
    /// Pause before the turn passes on.
    Handoff,
}

/// Makes the opponent's random choices.
#[derive(Debug, Clone)]
pub struct OpponentSimulator<R> {
    rng: R,
    difficulty: Difficulty,
    pool: TrickPool,
    reveal_delay: Duration,
    resolve_delay: Duration,
    defend_delay: Duration,
    handoff_delay: Duration,
}

impl<R: Rng> OpponentSimulator<R> {
    /// Creates a simulator drawing from `rng`.
    #[must_use]
    pub fn new(options: &MatchOptions, rng: R) -> Self {
        Self {
            rng,
            difficulty: options.difficulty,
            pool: options.trick_pool(),
            reveal_delay: options.reveal_delay,
            resolve_delay: options.resolve_delay,
            defend_delay: options.defend_delay,
            handoff_delay: options.handoff_delay,
        }
    }

    /// Returns the difficulty the simulator plays at.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the pool tricks are picked from.
    #[must_use]
    pub const fn pool(&self) -> &TrickPool {
        &self.pool
    }

    /// Returns the pause before `step` runs, measured from the end of the
    /// previous step.
    #[must_use]
    pub const fn delay(&self, step: SimStep) -> Duration {
        match step {
            SimStep::Announce(_) => Duration::ZERO,
            SimStep::Reveal => self.reveal_delay,
            SimStep::Resolve(RunKind::Set) => self.resolve_delay,
            SimStep::Resolve(RunKind::Defend) => self.defend_delay,
            SimStep::Handoff => self.handoff_delay,
        }
    }

    /// Picks a trick and stance to set.
    pub fn pick_trick(&mut self) -> TrickAttempt {
        self.pool.pick(&mut self.rng)
    }

    /// Decides whether the current attempt is landed.
    pub fn roll_outcome(&mut self) -> Outcome {
        Outcome::from_landed(self.rng.random_bool(self.difficulty.land_probability()))
    }
}
