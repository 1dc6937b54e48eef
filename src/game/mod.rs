//! Match state machine.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, info};

use crate::error::{IntentError, StateError};
use crate::options::OpponentProfile;
use crate::participant::Participant;
use crate::view::MatchView;

pub(crate) mod narration;
pub mod state;
mod transitions;

pub use state::{Intent, MatchEvent, MatchState, Outcome, Phase, RoundToken, Transition};

/// A Game of S.K.A.T.E. between the player and the opponent.
///
/// The match owns the [`MatchState`] and changes it only through intents.
/// Every intent is checked against the current phase and the participant
/// expected to act; a rejected intent leaves the match untouched.
#[derive(Debug, Clone)]
pub struct Match {
    state: MatchState,
    opponent: OpponentProfile,
    /// Narration of the last thing that happened.
    result_message: String,
    /// Events of the last committed transition.
    last_events: Vec<MatchEvent>,
}

impl Match {
    /// Creates a match with `starter` setting first.
    ///
    /// # Example
    ///
    /// ```
    /// use sk8rs::{Match, OpponentProfile, Participant, Phase};
    ///
    /// let game = Match::new(Participant::Player, OpponentProfile::default());
    /// assert_eq!(game.state().phase(), Phase::Setting);
    /// ```
    #[must_use]
    pub fn new(starter: Participant, opponent: OpponentProfile) -> Self {
        let result_message = narration::opening(starter, opponent.display_name());
        Self {
            state: MatchState::new(starter),
            opponent,
            result_message,
            last_events: Vec::new(),
        }
    }

    /// Resumes a match from a saved state.
    ///
    /// The narration is rebuilt from the phase and whoever acts next.
    ///
    /// # Errors
    ///
    /// Returns an error if the state breaks the match rules, see
    /// [`MatchState::validate`].
    pub fn from_state(state: MatchState, opponent: OpponentProfile) -> Result<Self, StateError> {
        state.validate()?;
        let result_message = narration::resume(&state, opponent.display_name());
        Ok(Self {
            state,
            opponent,
            result_message,
            last_events: Vec::new(),
        })
    }

    /// Starts over with empty letters, keeping the opponent.
    ///
    /// The new state gets a token past every earlier one.
    pub fn restart(&mut self, starter: Participant) {
        let round = self.state.round.next();
        self.state = MatchState::new(starter);
        self.state.round = round;
        self.result_message = narration::opening(starter, self.opponent.display_name());
        self.last_events.clear();
        info!(%starter, %round, "match restarted");
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Returns the opponent profile.
    #[must_use]
    pub const fn opponent(&self) -> &OpponentProfile {
        &self.opponent
    }

    /// Returns the token of the current state.
    #[must_use]
    pub const fn round(&self) -> RoundToken {
        self.state.round
    }

    /// Returns the current narration.
    #[must_use]
    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    /// Returns the events of the last committed intent.
    #[must_use]
    pub fn last_events(&self) -> &[MatchEvent] {
        &self.last_events
    }

    /// Applies an intent from `actor` and commits the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the intent is not legal right now. The match is
    /// left unchanged in that case.
    pub fn dispatch(&mut self, actor: Participant, intent: &Intent) -> Result<MatchView, IntentError> {
        let transition = match self.state.apply(actor, intent) {
            Ok(transition) => transition,
            Err(err) => {
                debug!(%actor, ?intent, %err, "intent rejected");
                return Err(err);
            }
        };

        let Transition { state, events } = transition;
        self.state = state;

        let opponent = self.opponent.display_name();
        if let Some(line) = events
            .iter()
            .rev()
            .find_map(|event| narration::describe(event, opponent))
        {
            self.result_message = line;
        }

        debug!(%actor, ?intent, round = %self.state.round, phase = %self.state.phase, "intent applied");
        if let Some(loser) = self.state.loser {
            info!(%loser, "match over");
        }

        self.last_events = events;
        Ok(self.view())
    }

    /// Picks the stance for the trick about to be set.
    ///
    /// # Errors
    ///
    /// Returns an error if `actor` is not setting.
    pub fn choose_stance(&mut self, actor: Participant, stance: &str) -> Result<MatchView, IntentError> {
        self.dispatch(actor, &Intent::ChooseStance(stance.to_owned()))
    }

    /// Sets a trick in the previously chosen stance.
    ///
    /// # Errors
    ///
    /// Returns an error if `actor` is not setting or the name is blank.
    pub fn choose_trick(&mut self, actor: Participant, name: &str) -> Result<MatchView, IntentError> {
        self.dispatch(actor, &Intent::ChooseTrick(name.to_owned()))
    }

    /// Reports a make or bail on the current trick.
    ///
    /// # Errors
    ///
    /// Returns an error if no trick is in play or `actor` is not the one
    /// attempting it.
    pub fn respond(&mut self, actor: Participant, outcome: Outcome) -> Result<MatchView, IntentError> {
        self.dispatch(actor, &Intent::Respond(outcome))
    }

    /// Replaces the narration without changing state.
    pub(crate) fn narrate(&mut self, line: String) {
        self.result_message = line;
    }

    /// Returns the observable projection of the match.
    #[must_use]
    pub fn view(&self) -> MatchView {
        MatchView::capture(&self.state, &self.result_message)
    }
}
