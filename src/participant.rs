//! Match participants.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseError;

/// One of the two competitors in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Participant {
    /// The human player.
    Player,
    /// The simulated opponent.
    Opponent,
}

impl Participant {
    /// Both participants, player first.
    pub const ALL: [Self; 2] = [Self::Player, Self::Opponent];

    /// Returns the other participant.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }

    /// Returns the lowercase name of the participant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Opponent => "opponent",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Player => 0,
            Self::Opponent => 1,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Participant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("player") {
            Ok(Self::Player)
        } else if s.eq_ignore_ascii_case("opponent") {
            Ok(Self::Opponent)
        } else {
            Err(ParseError::UnknownParticipant)
        }
    }
}
