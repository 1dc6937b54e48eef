//! Letters earned towards S.K.A.T.E.

use core::fmt;

/// The letters spelled out by a losing participant, in order.
pub const SKATE: [char; 5] = ['S', 'K', 'A', 'T', 'E'];

/// Number of letters at which a defender is on their last letter.
pub const LAST_LETTER_AT: usize = SKATE.len() - 1;

/// Letters earned by one participant.
///
/// Only the count is stored, so the earned letters are always a prefix of
/// [`SKATE`] and can never skip ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Letters {
    count: u8,
}

impl Letters {
    /// Creates an empty set of letters.
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Returns the number of letters earned.
    #[must_use]
    pub const fn len(self) -> usize {
        self.count as usize
    }

    /// Returns whether no letter has been earned yet.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.count == 0
    }

    /// Returns whether all of S.K.A.T.E. has been spelled.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.len() == SKATE.len()
    }

    /// Returns whether the next letter is the final `E`.
    #[must_use]
    pub const fn is_on_last_letter(self) -> bool {
        self.len() == LAST_LETTER_AT
    }

    /// Returns the earned letters.
    #[must_use]
    pub fn as_slice(&self) -> &'static [char] {
        &SKATE[..self.len()]
    }

    /// Returns the letter that would be earned next.
    #[must_use]
    pub const fn next_letter(self) -> Option<char> {
        if self.is_complete() {
            None
        } else {
            Some(SKATE[self.len()])
        }
    }

    /// Earns the next letter and returns it.
    ///
    /// Returns `None` once the word is complete.
    pub const fn award(&mut self) -> Option<char> {
        let next = self.next_letter();
        if next.is_some() {
            self.count += 1;
        }
        next
    }
}

impl fmt::Display for Letters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, letter) in self.as_slice().iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl From<Letters> for u8 {
    fn from(letters: Letters) -> Self {
        letters.count
    }
}

impl TryFrom<u8> for Letters {
    type Error = &'static str;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        if usize::from(count) > SKATE.len() {
            return Err("more letters than S.K.A.T.E. has");
        }
        Ok(Self { count })
    }
}
