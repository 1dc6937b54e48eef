//! Observable projection of a match, for rendering.

use alloc::string::String;

use crate::game::{MatchState, Phase};
use crate::letters::Letters;
use crate::participant::Participant;

/// What a UI needs to render a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchView {
    /// The participant currently setting.
    pub active_setter: Participant,
    /// The current phase.
    pub phase: Phase,
    /// The participant expected to act, `None` once the match is over.
    pub actor: Option<Participant>,
    /// Label of the trick in play, e.g. `nollie Heelflip`.
    pub current_trick_label: Option<String>,
    /// Narration of the last thing that happened.
    pub result_message: String,
    /// Letters earned by the player.
    pub player_letters: Letters,
    /// Letters earned by the opponent.
    pub opponent_letters: Letters,
    /// Whether the player is on their one-time reprieve.
    pub player_last_chance: bool,
    /// Whether the opponent is on its one-time reprieve.
    pub opponent_last_chance: bool,
    /// Whether a participant has spelled S.K.A.T.E.
    pub is_match_over: bool,
    /// The participant who lost.
    pub loser: Option<Participant>,
}

impl MatchView {
    pub(crate) fn capture(state: &MatchState, result_message: &str) -> Self {
        Self {
            active_setter: state.active_setter(),
            phase: state.phase(),
            actor: state.actor(),
            current_trick_label: state.current_trick().map(crate::trick::TrickAttempt::label),
            result_message: result_message.into(),
            player_letters: state.letters(Participant::Player),
            opponent_letters: state.letters(Participant::Opponent),
            player_last_chance: state.last_chance(Participant::Player),
            opponent_last_chance: state.last_chance(Participant::Opponent),
            is_match_over: state.is_over(),
            loser: state.loser(),
        }
    }

    /// Returns whether the player should be offered Make and Bail.
    #[must_use]
    pub fn player_can_respond(&self) -> bool {
        self.actor == Some(Participant::Player)
            && matches!(self.phase, Phase::AwaitingLandBail | Phase::Defending)
    }

    /// Returns whether the player should be offered stances and tricks.
    #[must_use]
    pub fn player_can_set(&self) -> bool {
        self.actor == Some(Participant::Player) && self.phase == Phase::Setting
    }
}
