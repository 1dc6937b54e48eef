//! Tricks, stances, and the per-level trick pools.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::ParseError;

/// Stance used when none is chosen or listed.
pub const DEFAULT_STANCE: &str = "regular";

/// Trick used when a pool has nothing to offer.
pub const FALLBACK_TRICK: &str = "Ollie";

/// Normalizes a stance label: trimmed and lowercased, blank becomes
/// [`DEFAULT_STANCE`].
#[must_use]
pub fn normalize_stance(stance: &str) -> String {
    let stance = stance.trim();
    if stance.is_empty() {
        DEFAULT_STANCE.to_owned()
    } else {
        stance.to_lowercase()
    }
}

/// Returns whether the stance renders without a prefix.
#[must_use]
pub fn is_default_stance(stance: &str) -> bool {
    let stance = stance.trim();
    stance.is_empty()
        || ["regular", "normal", "default"]
            .iter()
            .any(|plain| stance.eq_ignore_ascii_case(plain))
}

/// A trick attempted by a setter, which the defender must copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrickAttempt {
    /// Trick name, e.g. `Kickflip`.
    pub name: String,
    /// Normalized stance, e.g. `fakie`.
    pub stance: String,
}

impl TrickAttempt {
    /// Creates an attempt, normalizing the stance.
    #[must_use]
    pub fn new(name: &str, stance: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
            stance: normalize_stance(stance),
        }
    }

    /// Returns the display label, e.g. `fakie Kickflip` or `Kickflip`.
    #[must_use]
    pub fn label(&self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for TrickAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_default_stance(&self.stance) {
            f.write_str(&self.name)
        } else {
            write!(f, "{} {}", self.stance, self.name)
        }
    }
}

/// Stances a trick may be attempted in, as listed by a trick data source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Stances {
    /// No stances listed.
    #[default]
    Unspecified,
    /// A single comma-separated string, e.g. `"regular, fakie"`.
    Joined(String),
    /// An explicit list.
    List(Vec<String>),
}

impl Stances {
    /// Returns the listed stances, trimmed, with blanks dropped.
    ///
    /// Falls back to `[DEFAULT_STANCE]` when nothing usable is listed.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        let listed: Vec<String> = match self {
            Self::Unspecified => Vec::new(),
            Self::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            Self::List(list) => list
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        };

        if listed.is_empty() {
            alloc::vec![DEFAULT_STANCE.to_owned()]
        } else {
            listed
        }
    }
}

/// A trick entry in a trick pool.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrickDef {
    /// Trick name.
    pub name: String,
    /// Stances the trick may be attempted in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stances: Stances,
}

impl TrickDef {
    /// Creates a trick with no listed stances.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            stances: Stances::Unspecified,
        }
    }

    /// Sets the stances from a list.
    #[must_use]
    pub fn with_stances(mut self, stances: &[&str]) -> Self {
        self.stances = Stances::List(stances.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    /// Sets the stances from a comma-separated string.
    #[must_use]
    pub fn with_joined_stances(mut self, stances: &str) -> Self {
        self.stances = Stances::Joined(stances.to_owned());
        self
    }
}

/// Trick list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Flatground basics.
    #[default]
    Beginner,
    /// Flip tricks.
    Medium,
    /// Technical flip tricks.
    Pro,
}

impl Level {
    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Medium => "medium",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Beginner, Self::Medium, Self::Pro]
            .into_iter()
            .find(|level| s.eq_ignore_ascii_case(level.as_str()))
            .ok_or(ParseError::UnknownLevel)
    }
}

const BEGINNER: &[(&str, &[&str])] = &[
    ("Ollie", &["regular", "fakie", "nollie", "switch"]),
    ("Pop Shuvit", &["regular", "fakie", "nollie"]),
    ("Frontside 180", &["regular", "fakie"]),
    ("Backside 180", &["regular", "fakie"]),
    ("Kickflip", &["regular"]),
    ("Heelflip", &["regular"]),
    ("Manual", &[]),
];

const MEDIUM: &[(&str, &[&str])] = &[
    ("Kickflip", &["regular", "fakie", "nollie", "switch"]),
    ("Heelflip", &["regular", "fakie", "nollie", "switch"]),
    ("Varial Kickflip", &["regular", "fakie", "nollie"]),
    ("Varial Heelflip", &["regular", "fakie"]),
    ("360 Shuvit", &["regular", "fakie", "nollie"]),
    ("Frontside Flip", &["regular", "fakie"]),
    ("Backside Flip", &["regular", "fakie"]),
];

const PRO: &[(&str, &[&str])] = &[
    ("360 Flip", &["regular", "fakie", "nollie", "switch"]),
    ("Hardflip", &["regular", "fakie", "nollie", "switch"]),
    ("Inward Heelflip", &["regular", "fakie", "nollie"]),
    ("Laser Flip", &["regular", "fakie", "nollie", "switch"]),
    ("Big Spin", &["regular", "fakie", "nollie", "switch"]),
    ("Frontside 360", &["regular", "fakie"]),
    ("Double Kickflip", &["regular", "switch"]),
];

/// The tricks an opponent can set at a given level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TrickPool {
    tricks: Vec<TrickDef>,
}

impl TrickPool {
    /// Creates a pool from the given tricks.
    #[must_use]
    pub const fn new(tricks: Vec<TrickDef>) -> Self {
        Self { tricks }
    }

    /// Returns the built-in pool for a level.
    #[must_use]
    pub fn builtin(level: Level) -> Self {
        let list = match level {
            Level::Beginner => BEGINNER,
            Level::Medium => MEDIUM,
            Level::Pro => PRO,
        };

        Self::new(
            list.iter()
                .map(|(name, stances)| {
                    if stances.is_empty() {
                        TrickDef::new(name)
                    } else {
                        TrickDef::new(name).with_stances(stances)
                    }
                })
                .collect(),
        )
    }

    /// Returns the tricks in the pool.
    #[must_use]
    pub fn tricks(&self) -> &[TrickDef] {
        &self.tricks
    }

    /// Returns the number of tricks in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tricks.len()
    }

    /// Returns whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tricks.is_empty()
    }

    /// Picks a trick uniformly, then one of its stances uniformly.
    ///
    /// Tricks with a blank name are skipped. An empty pool yields
    /// [`FALLBACK_TRICK`] in the default stance.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> TrickAttempt {
        let named: Vec<&TrickDef> = self
            .tricks
            .iter()
            .filter(|trick| !trick.name.trim().is_empty())
            .collect();

        let Some(trick) = named.choose(rng) else {
            return TrickAttempt::new(FALLBACK_TRICK, DEFAULT_STANCE);
        };

        let stances = trick.stances.options();
        let stance = stances
            .choose(rng)
            .map_or(DEFAULT_STANCE, String::as_str);

        TrickAttempt::new(&trick.name, stance)
    }
}
