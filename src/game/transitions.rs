use alloc::vec::Vec;

use crate::error::IntentError;
use crate::participant::Participant;
use crate::trick::{DEFAULT_STANCE, TrickAttempt, normalize_stance};

use super::state::{Intent, MatchEvent, MatchState, Outcome, Phase, Transition};

impl MatchState {
    /// Applies an intent from `actor` without touching `self`.
    ///
    /// Returns the next state and the events that led to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the match is over, `actor` is not the participant
    /// expected to act, or the intent does not fit the current phase.
    pub fn apply(&self, actor: Participant, intent: &Intent) -> Result<Transition, IntentError> {
        if self.is_over() {
            return Err(IntentError::MatchOver);
        }
        if self.actor() != Some(actor) {
            return Err(IntentError::NotYourTurn);
        }

        let mut next = self.clone();
        let mut events = Vec::new();

        match intent {
            Intent::ChooseStance(stance) => next.choose_stance(actor, stance, &mut events)?,
            Intent::ChooseTrick(name) => next.choose_trick(actor, name, &mut events)?,
            Intent::Respond(outcome) => next.respond(*outcome, &mut events)?,
        }

        next.round = self.round.next();
        Ok(Transition {
            state: next,
            events,
        })
    }

    fn choose_stance(
        &mut self,
        who: Participant,
        stance: &str,
        events: &mut Vec<MatchEvent>,
    ) -> Result<(), IntentError> {
        if self.phase != Phase::Setting {
            return Err(IntentError::InvalidPhase);
        }

        let stance = normalize_stance(stance);
        self.pending_stance = Some(stance.clone());
        events.push(MatchEvent::StanceChosen { who, stance });
        Ok(())
    }

    fn choose_trick(
        &mut self,
        who: Participant,
        name: &str,
        events: &mut Vec<MatchEvent>,
    ) -> Result<(), IntentError> {
        if self.phase != Phase::Setting {
            return Err(IntentError::InvalidPhase);
        }
        if name.trim().is_empty() {
            return Err(IntentError::EmptyTrick);
        }

        let stance = self.pending_stance.take();
        let trick = TrickAttempt::new(name, stance.as_deref().unwrap_or(DEFAULT_STANCE));
        self.current_trick = Some(trick.clone());
        self.phase = Phase::AwaitingLandBail;
        events.push(MatchEvent::TrickSet { who, trick });
        Ok(())
    }

    fn respond(&mut self, outcome: Outcome, events: &mut Vec<MatchEvent>) -> Result<(), IntentError> {
        if self.current_trick.is_none() {
            return Err(IntentError::NoTrick);
        }

        match self.phase {
            Phase::AwaitingLandBail => {
                self.resolve_set(outcome, events);
                Ok(())
            }
            Phase::Defending => {
                self.resolve_defense(outcome, events);
                Ok(())
            }
            Phase::Setting | Phase::Finished => Err(IntentError::InvalidPhase),
        }
    }

    /// The setter reports on their own trick.
    fn resolve_set(&mut self, outcome: Outcome, events: &mut Vec<MatchEvent>) {
        let setter = self.active_setter;
        self.last_outcome = Some(outcome);

        match outcome {
            Outcome::Landed => {
                self.phase = Phase::Defending;
                events.push(MatchEvent::SetLanded { who: setter });
            }
            // Nothing to copy, so nobody earns a letter.
            Outcome::Bailed => {
                self.start_set(setter.other());
                events.push(MatchEvent::SetBailed { who: setter });
            }
        }
    }

    /// The defender reports on copying the setter's trick.
    fn resolve_defense(&mut self, outcome: Outcome, events: &mut Vec<MatchEvent>) {
        let defender = self.active_setter.other();
        let index = defender.index();

        if outcome == Outcome::Landed {
            self.last_chance[index] = false;
            self.start_set(defender);
            events.push(MatchEvent::Copied { who: defender });
            return;
        }

        let letters = self.letters[index];
        if letters.is_on_last_letter() && !self.last_chance[index] {
            // Same trick, one more try.
            self.last_chance[index] = true;
            events.push(MatchEvent::LastChance { who: defender });
            return;
        }

        self.last_chance[index] = false;
        if let Some(letter) = self.letters[index].award() {
            events.push(MatchEvent::LetterAwarded {
                who: defender,
                letter,
            });
        }

        if self.letters[index].is_complete() {
            self.phase = Phase::Finished;
            self.current_trick = None;
            self.last_outcome = None;
            self.loser = Some(defender);
            events.push(MatchEvent::MatchOver { loser: defender });
        } else {
            self.start_set(defender);
        }
    }

    fn start_set(&mut self, setter: Participant) {
        self.active_setter = setter;
        self.phase = Phase::Setting;
        self.pending_stance = None;
        self.current_trick = None;
        self.last_outcome = None;
    }
}
