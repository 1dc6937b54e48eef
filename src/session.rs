//! A match against the simulated opponent, driven by a clock.

use alloc::string::ToString;
use core::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::error::IntentError;
use crate::game::narration;
use crate::game::{Match, Outcome, Phase};
use crate::options::MatchOptions;
use crate::participant::Participant;
use crate::sim::{OpponentSimulator, RunKind, Scheduler, SimStep, Timer, TimerQueue};
use crate::view::MatchView;

/// A match between the player and the simulated opponent.
///
/// Player intents go through [`Self::choose_stance`], [`Self::choose_trick`]
/// and [`Self::respond`]. The opponent acts on its own whenever the match
/// waits on it, one timed step at a time, as the host calls
/// [`Self::advance`].
///
/// Pending opponent steps are dropped whenever the player changes the match,
/// a new opponent run starts, the match restarts, or the session is dropped.
/// A step that still fires against an outdated state does nothing.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use sk8rs::{MatchOptions, Outcome, Participant, Phase, Session};
///
/// let mut session = Session::new(&MatchOptions::default(), Participant::Player, 7);
/// session.choose_trick("Kickflip").unwrap();
/// let view = session.respond(Outcome::Bailed).unwrap();
/// assert_eq!(view.active_setter, Participant::Opponent);
///
/// // Opponent announces right away; give it time to reveal and resolve.
/// let view = session.advance(Duration::from_secs(5));
/// assert_eq!(view.actor, Some(Participant::Player));
/// assert_ne!(view.phase, Phase::AwaitingLandBail);
/// ```
#[derive(Debug)]
pub struct Session<S: Scheduler = TimerQueue, R: Rng = ChaCha8Rng> {
    game: Match,
    simulator: OpponentSimulator<R>,
    scheduler: S,
}

impl Session {
    /// Creates a session with a seeded generator and a manual clock.
    #[must_use]
    pub fn new(options: &MatchOptions, starter: Participant, seed: u64) -> Self {
        Self::with_parts(
            options,
            starter,
            TimerQueue::new(),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<S: Scheduler, R: Rng> Session<S, R> {
    /// Creates a session from an explicit scheduler and random source.
    ///
    /// If the opponent starts, its first run begins immediately.
    pub fn with_parts(options: &MatchOptions, starter: Participant, scheduler: S, rng: R) -> Self {
        let mut session = Self {
            game: Match::new(starter, options.opponent.clone()),
            simulator: OpponentSimulator::new(options, rng),
            scheduler,
        };
        session.start_run_if_needed();
        session
    }

    /// Returns the match.
    #[must_use]
    pub const fn game(&self) -> &Match {
        &self.game
    }

    /// Returns the opponent simulator.
    #[must_use]
    pub const fn simulator(&self) -> &OpponentSimulator<R> {
        &self.simulator
    }

    /// Returns the scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the observable projection of the match.
    #[must_use]
    pub fn view(&self) -> MatchView {
        self.game.view()
    }

    /// Returns whether an opponent step is still pending.
    ///
    /// A UI should hold back the player's controls while this is true.
    #[must_use]
    pub fn is_opponent_busy(&self) -> bool {
        self.scheduler.pending() > 0
    }

    /// Player picks the stance for the trick they are about to set.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not setting.
    pub fn choose_stance(&mut self, stance: &str) -> Result<MatchView, IntentError> {
        self.game.choose_stance(Participant::Player, stance)?;
        Ok(self.after_player_intent())
    }

    /// Player sets a trick.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not setting or the name is blank.
    pub fn choose_trick(&mut self, name: &str) -> Result<MatchView, IntentError> {
        self.game.choose_trick(Participant::Player, name)?;
        Ok(self.after_player_intent())
    }

    /// Player reports a make or bail.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no trick for the player to make or bail.
    pub fn respond(&mut self, outcome: Outcome) -> Result<MatchView, IntentError> {
        self.game.respond(Participant::Player, outcome)?;
        Ok(self.after_player_intent())
    }

    /// Moves the clock forward, running every opponent step that comes due.
    ///
    /// Steps run one at a time in due order. A step scheduled by another
    /// step is timed from when that step ran, so a long `elapsed` can run a
    /// whole opponent run.
    pub fn advance(&mut self, elapsed: Duration) -> MatchView {
        let deadline = self.scheduler.now().saturating_add(elapsed);
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            self.fire(timer);
        }
        self.scheduler.settle(deadline);
        self.view()
    }

    /// Starts a new match with the same opponent and options.
    pub fn restart(&mut self, starter: Participant) -> MatchView {
        self.scheduler.cancel_all();
        self.game.restart(starter);
        self.start_run_if_needed();
        self.view()
    }

    /// Drops every pending opponent step.
    pub fn shutdown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        debug!(cancelled, "session shut down");
    }

    fn after_player_intent(&mut self) -> MatchView {
        self.scheduler.cancel_all();
        self.start_run_if_needed();
        self.view()
    }

    /// Starts an opponent run if the match is waiting on the opponent to set
    /// or to defend.
    fn start_run_if_needed(&mut self) {
        let state = self.game.state();
        let kind = match (state.actor(), state.phase()) {
            (Some(Participant::Opponent), Phase::Setting) => RunKind::Set,
            (Some(Participant::Opponent), Phase::Defending) => RunKind::Defend,
            _ => return,
        };

        // Only one run may be pending at a time.
        self.scheduler.cancel_all();
        debug!(?kind, round = %self.game.round(), "opponent run started");
        self.run_step(SimStep::Announce(kind));
    }

    fn fire(&mut self, timer: Timer) {
        let current = self.game.round();
        if timer.token != current {
            debug!(token = %timer.token, %current, step = ?timer.step, "stale opponent step suppressed");
            return;
        }
        self.run_step(timer.step);
    }

    fn run_step(&mut self, step: SimStep) {
        if let Err(err) = self.try_step(step) {
            warn!(?step, %err, "opponent step rejected, run dropped");
            self.scheduler.cancel_all();
        }
    }

    fn try_step(&mut self, step: SimStep) -> Result<(), IntentError> {
        match step {
            SimStep::Announce(RunKind::Set) => {
                let line = narration::setting_up(self.game.opponent().display_name());
                self.game.narrate(line);
                self.schedule(SimStep::Reveal);
            }
            SimStep::Announce(RunKind::Defend) => {
                let trick = self
                    .game
                    .state()
                    .current_trick()
                    .map_or_else(|| "trick".to_string(), ToString::to_string);
                let line = narration::trying(self.game.opponent().display_name(), &trick);
                self.game.narrate(line);
                self.schedule(SimStep::Resolve(RunKind::Defend));
            }
            SimStep::Reveal => {
                let trick = self.simulator.pick_trick();
                self.game.choose_stance(Participant::Opponent, &trick.stance)?;
                self.game.choose_trick(Participant::Opponent, &trick.name)?;
                self.schedule(SimStep::Resolve(RunKind::Set));
            }
            SimStep::Resolve(_) => {
                let outcome = self.simulator.roll_outcome();
                self.game.respond(Participant::Opponent, outcome)?;
                self.schedule(SimStep::Handoff);
            }
            SimStep::Handoff => self.start_run_if_needed(),
        }
        Ok(())
    }

    fn schedule(&mut self, step: SimStep) {
        let delay = self.simulator.delay(step);
        self.scheduler.schedule(self.game.round(), delay, step);
    }
}

impl<S: Scheduler, R: Rng> Drop for Session<S, R> {
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}
