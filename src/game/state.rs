//! Match state types.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::{ParseError, StateError};
use crate::letters::Letters;
use crate::participant::Participant;
use crate::trick::TrickAttempt;

/// Match phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    /// The setter is choosing a stance and trick.
    Setting,
    /// The setter must report whether they landed their own trick.
    AwaitingLandBail,
    /// The defender must copy the trick the setter landed.
    Defending,
    /// A participant has spelled S.K.A.T.E.
    Finished,
}

impl Phase {
    /// Returns the snake case name of the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setting => "setting",
            Self::AwaitingLandBail => "awaiting_land_bail",
            Self::Defending => "defending",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    /// The attempt was landed ("Make").
    Landed,
    /// The attempt was bailed.
    Bailed,
}

impl Outcome {
    /// Returns `Landed` when `landed` is true, `Bailed` otherwise.
    #[must_use]
    pub const fn from_landed(landed: bool) -> Self {
        if landed { Self::Landed } else { Self::Bailed }
    }
}

impl FromStr for Outcome {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ["land", "landed", "make"]
            .iter()
            .any(|word| s.eq_ignore_ascii_case(word))
        {
            Ok(Self::Landed)
        } else if ["bail", "bailed"]
            .iter()
            .any(|word| s.eq_ignore_ascii_case(word))
        {
            Ok(Self::Bailed)
        } else {
            Err(ParseError::UnknownOutcome)
        }
    }
}

/// Something a participant asks the match to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Pick the stance for the trick about to be set.
    ChooseStance(String),
    /// Set a trick by name.
    ChooseTrick(String),
    /// Report a make or bail on the current trick.
    Respond(Outcome),
}

/// Something that happened during a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// The setter picked a stance.
    StanceChosen {
        /// Setter.
        who: Participant,
        /// Normalized stance.
        stance: String,
    },
    /// The setter committed to a trick.
    TrickSet {
        /// Setter.
        who: Participant,
        /// The trick to be attempted.
        trick: TrickAttempt,
    },
    /// The setter landed their trick; the other participant must copy it.
    SetLanded {
        /// Setter.
        who: Participant,
    },
    /// The setter bailed their trick; the set passes over.
    SetBailed {
        /// Setter.
        who: Participant,
    },
    /// The defender copied the trick.
    Copied {
        /// Defender.
        who: Participant,
    },
    /// The defender earned a letter.
    LetterAwarded {
        /// Defender.
        who: Participant,
        /// The letter earned.
        letter: char,
    },
    /// The defender bailed on their last letter and gets one more try.
    LastChance {
        /// Defender.
        who: Participant,
    },
    /// The defender spelled S.K.A.T.E.
    MatchOver {
        /// The participant who lost.
        loser: Participant,
    },
}

/// Monotonic token identifying one committed match state.
///
/// Every committed transition yields a larger token, so work scheduled
/// against an older token is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoundToken(pub u64);

impl RoundToken {
    /// Returns the following token.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RoundToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The complete state of a match.
///
/// Deserializing checks the state with [`MatchState::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatchState"))]
pub struct MatchState {
    pub(crate) active_setter: Participant,
    pub(crate) phase: Phase,
    pub(crate) pending_stance: Option<String>,
    pub(crate) current_trick: Option<TrickAttempt>,
    pub(crate) last_outcome: Option<Outcome>,
    pub(crate) letters: [Letters; 2],
    pub(crate) last_chance: [bool; 2],
    pub(crate) loser: Option<Participant>,
    pub(crate) round: RoundToken,
}

/// Unchecked mirror of [`MatchState`], read before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatchState {
    active_setter: Participant,
    phase: Phase,
    pending_stance: Option<String>,
    current_trick: Option<TrickAttempt>,
    last_outcome: Option<Outcome>,
    letters: [Letters; 2],
    last_chance: [bool; 2],
    loser: Option<Participant>,
    round: RoundToken,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatchState> for MatchState {
    type Error = StateError;

    fn try_from(raw: RawMatchState) -> Result<Self, Self::Error> {
        let state = Self {
            active_setter: raw.active_setter,
            phase: raw.phase,
            pending_stance: raw.pending_stance,
            current_trick: raw.current_trick,
            last_outcome: raw.last_outcome,
            letters: raw.letters,
            last_chance: raw.last_chance,
            loser: raw.loser,
            round: raw.round,
        };
        state.validate()?;
        Ok(state)
    }
}

/// A committed-to-be state together with what happened on the way there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state after the intent.
    pub state: MatchState,
    /// What happened, in order.
    pub events: alloc::vec::Vec<MatchEvent>,
}

impl MatchState {
    /// Creates the initial state with `starter` setting first.
    #[must_use]
    pub const fn new(starter: Participant) -> Self {
        Self {
            active_setter: starter,
            phase: Phase::Setting,
            pending_stance: None,
            current_trick: None,
            last_outcome: None,
            letters: [Letters::new(), Letters::new()],
            last_chance: [false, false],
            loser: None,
            round: RoundToken(0),
        }
    }

    /// Returns the participant currently setting.
    #[must_use]
    pub const fn active_setter(&self) -> Participant {
        self.active_setter
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the participant expected to send the next intent.
    ///
    /// Returns `None` once the match is over.
    #[must_use]
    pub const fn actor(&self) -> Option<Participant> {
        match self.phase {
            Phase::Setting | Phase::AwaitingLandBail => Some(self.active_setter),
            Phase::Defending => Some(self.active_setter.other()),
            Phase::Finished => None,
        }
    }

    /// Returns the stance chosen for the trick about to be set.
    #[must_use]
    pub fn pending_stance(&self) -> Option<&str> {
        self.pending_stance.as_deref()
    }

    /// Returns the trick in play.
    #[must_use]
    pub const fn current_trick(&self) -> Option<&TrickAttempt> {
        self.current_trick.as_ref()
    }

    /// Returns the setter's own outcome on the trick in play.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Returns the letters earned by a participant.
    #[must_use]
    pub const fn letters(&self, who: Participant) -> Letters {
        self.letters[who.index()]
    }

    /// Returns whether a participant is on their one-time reprieve.
    #[must_use]
    pub const fn last_chance(&self, who: Participant) -> bool {
        self.last_chance[who.index()]
    }

    /// Returns the participant who lost, once the match is over.
    #[must_use]
    pub const fn loser(&self) -> Option<Participant> {
        self.loser
    }

    /// Returns whether the match is over.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.loser.is_some()
    }

    /// Returns the token of this state.
    #[must_use]
    pub const fn round(&self) -> RoundToken {
        self.round
    }

    /// Checks that the state could have been reached by playing.
    ///
    /// # Errors
    ///
    /// Returns the first rule the state breaks.
    pub fn validate(&self) -> Result<(), StateError> {
        let defending = self.phase == Phase::Defending;
        let defender = self.active_setter.other();

        for who in Participant::ALL {
            if self.last_chance(who)
                && !(defending && who == defender && self.letters(who).is_on_last_letter())
            {
                return Err(StateError::MisplacedLastChance);
            }
        }

        let trick_phase = matches!(self.phase, Phase::AwaitingLandBail | Phase::Defending);
        if self.current_trick.is_some() != trick_phase {
            return Err(StateError::TrickOutOfPhase);
        }

        let expected_outcome = if defending { Some(Outcome::Landed) } else { None };
        if self.last_outcome != expected_outcome {
            return Err(StateError::OutcomeOutOfPhase);
        }

        if self.pending_stance.is_some() && self.phase != Phase::Setting {
            return Err(StateError::StanceOutOfPhase);
        }

        let complete = Participant::ALL
            .into_iter()
            .filter(|who| self.letters(*who).is_complete());
        let loser_ok = match (self.phase, self.loser) {
            (Phase::Finished, Some(loser)) => complete.eq([loser]),
            (Phase::Finished, None) | (_, Some(_)) => false,
            (_, None) => complete.count() == 0,
        };
        if !loser_ok {
            return Err(StateError::LoserMismatch);
        }

        Ok(())
    }
}
