//! Error types for match operations.

use thiserror::Error;

/// Errors returned when an intent does not fit the current match state.
///
/// A rejected intent never changes the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntentError {
    /// A participant has already spelled S.K.A.T.E.
    #[error("the match is over")]
    MatchOver,
    /// The intent came from the participant who is not expected to act.
    #[error("not this participant's turn")]
    NotYourTurn,
    /// Invalid match phase for this intent.
    #[error("invalid match phase for this intent")]
    InvalidPhase,
    /// No trick has been set, so there is nothing to make or bail.
    #[error("no trick has been set")]
    NoTrick,
    /// Trick name is blank.
    #[error("trick name is empty")]
    EmptyTrick,
}

/// Errors that can occur when parsing match parameters from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not `player` or `opponent`.
    #[error("unknown participant")]
    UnknownParticipant,
    /// Not `easy`, `medium` or `hard`.
    #[error("unknown difficulty")]
    UnknownDifficulty,
    /// Not `beginner`, `medium` or `pro`.
    #[error("unknown trick level")]
    UnknownLevel,
    /// Not `land`, `make` or `bail`.
    #[error("unknown outcome")]
    UnknownOutcome,
}

/// Errors returned when a restored match state breaks the match rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// A last chance is held by someone who is not defending on their last letter.
    #[error("last chance held outside a defense on the last letter")]
    MisplacedLastChance,
    /// A trick is in play outside `AwaitingLandBail`/`Defending`, or missing inside them.
    #[error("trick in play does not match the phase")]
    TrickOutOfPhase,
    /// The setter's outcome is present outside `Defending`, or is not a make.
    #[error("setter outcome does not match the phase")]
    OutcomeOutOfPhase,
    /// A stance is pending outside `Setting`.
    #[error("stance pending outside the setting phase")]
    StanceOutOfPhase,
    /// The loser does not match the phase and the letters earned.
    #[error("loser does not match the phase or the letters")]
    LoserMismatch,
}
