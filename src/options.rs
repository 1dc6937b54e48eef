//! Match configuration options.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use crate::error::ParseError;
use crate::trick::{Level, TrickPool};

/// Opponent difficulty.
///
/// Only affects how often the simulated opponent lands its attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Opponent lands 80% of attempts.
    Easy,
    /// Opponent lands 60% of attempts.
    #[default]
    Medium,
    /// Opponent lands 40% of attempts.
    Hard,
}

impl Difficulty {
    /// Returns the probability that the opponent lands an attempt.
    #[must_use]
    pub const fn land_probability(self) -> f64 {
        match self {
            Self::Easy => 0.8,
            Self::Medium => 0.6,
            Self::Hard => 0.4,
        }
    }

    /// Returns the lowercase name of the difficulty.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Easy, Self::Medium, Self::Hard]
            .into_iter()
            .find(|difficulty| s.eq_ignore_ascii_case(difficulty.as_str()))
            .ok_or(ParseError::UnknownDifficulty)
    }
}

/// Who the player is up against. Used for narration only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentProfile {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar reference understood by the UI.
    pub avatar: String,
}

impl OpponentProfile {
    /// Creates a profile with no avatar.
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            avatar: String::new(),
        }
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: &str) -> Self {
        avatar.clone_into(&mut self.avatar);
        self
    }

    /// Returns the display name, or `Opponent` when the name is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { "Opponent" } else { name }
    }
}

impl Default for OpponentProfile {
    fn default() -> Self {
        Self::new("default", "Opponent")
    }
}

/// Configuration options for a match.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use sk8rs::{Difficulty, Level, MatchOptions};
///
/// let options = MatchOptions::default()
///     .with_difficulty(Difficulty::Hard)
///     .with_level(Level::Pro);
/// assert_eq!(options.difficulty, Difficulty::Hard);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOptions {
    /// Opponent difficulty.
    pub difficulty: Difficulty,
    /// Trick list level.
    pub level: Level,
    /// Opponent identity.
    pub opponent: OpponentProfile,
    /// Pause between the opponent's announcement and its trick reveal.
    pub reveal_delay: Duration,
    /// Pause between the opponent's trick reveal and its make or bail.
    pub resolve_delay: Duration,
    /// Pause before the opponent's make or bail when it defends.
    pub defend_delay: Duration,
    /// Pause after the opponent resolves, before the turn is handed back.
    pub handoff_delay: Duration,
    /// Replaces the built-in trick list for [`Self::level`].
    pub trick_pool: Option<TrickPool>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            level: Level::Beginner,
            opponent: OpponentProfile::default(),
            reveal_delay: Duration::from_secs(2),
            resolve_delay: Duration::from_secs(3),
            defend_delay: Duration::from_millis(2500),
            handoff_delay: Duration::from_secs(1),
            trick_pool: None,
        }
    }
}

impl MatchOptions {
    /// Sets the opponent difficulty.
    ///
    /// # Example
    ///
    /// ```
    /// use sk8rs::{Difficulty, MatchOptions};
    ///
    /// let options = MatchOptions::default().with_difficulty(Difficulty::Easy);
    /// assert_eq!(options.difficulty.land_probability(), 0.8);
    /// ```
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the trick list level.
    ///
    /// # Example
    ///
    /// ```
    /// use sk8rs::{Level, MatchOptions};
    ///
    /// let options = MatchOptions::default().with_level(Level::Medium);
    /// assert_eq!(options.level, Level::Medium);
    /// ```
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the opponent profile.
    ///
    /// # Example
    ///
    /// ```
    /// use sk8rs::{MatchOptions, OpponentProfile};
    ///
    /// let options = MatchOptions::default().with_opponent(OpponentProfile::new("rd", "Rodney"));
    /// assert_eq!(options.opponent.display_name(), "Rodney");
    /// ```
    #[must_use]
    pub fn with_opponent(mut self, opponent: OpponentProfile) -> Self {
        self.opponent = opponent;
        self
    }

    /// Sets the pause before the opponent reveals its trick.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use sk8rs::MatchOptions;
    ///
    /// let options = MatchOptions::default().with_reveal_delay(Duration::from_millis(500));
    /// assert_eq!(options.reveal_delay, Duration::from_millis(500));
    /// ```
    #[must_use]
    pub const fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Sets the pause before the opponent makes or bails its own trick.
    #[must_use]
    pub const fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    /// Sets the pause before the opponent makes or bails a trick it copies.
    #[must_use]
    pub const fn with_defend_delay(mut self, delay: Duration) -> Self {
        self.defend_delay = delay;
        self
    }

    /// Sets the pause after the opponent resolves an attempt.
    #[must_use]
    pub const fn with_handoff_delay(mut self, delay: Duration) -> Self {
        self.handoff_delay = delay;
        self
    }

    /// Replaces the built-in trick list.
    ///
    /// # Example
    ///
    /// ```
    /// use sk8rs::{MatchOptions, TrickDef, TrickPool};
    ///
    /// let pool = TrickPool::new(vec![TrickDef::new("Boneless")]);
    /// let options = MatchOptions::default().with_trick_pool(pool);
    /// assert_eq!(options.trick_pool().len(), 1);
    /// ```
    #[must_use]
    pub fn with_trick_pool(mut self, pool: TrickPool) -> Self {
        self.trick_pool = Some(pool);
        self
    }

    /// Returns the trick pool the opponent picks from.
    #[must_use]
    pub fn trick_pool(&self) -> TrickPool {
        self.trick_pool
            .clone()
            .unwrap_or_else(|| TrickPool::builtin(self.level))
    }
}
