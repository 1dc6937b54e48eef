//! A Game of S.K.A.T.E. match engine with optional `no_std` support.
//!
//! Two participants take turns setting skateboard tricks. When the setter
//! lands a trick the other participant must copy it or earn the next letter
//! of S.K.A.T.E.; whoever spells it out loses.
//!
//! [`Match`] is the turn state machine: it takes intents (choose a stance,
//! choose a trick, make or bail) and exposes a [`MatchView`] to render.
//! [`Session`] adds the simulated opponent, which plays its turns as a chain
//! of timed, cancellable steps on a host-driven clock.
//!
//! # Example
//!
//! ```
//! use sk8rs::{Match, OpponentProfile, Outcome, Participant, Phase};
//!
//! let mut game = Match::new(Participant::Player, OpponentProfile::default());
//! game.choose_stance(Participant::Player, "fakie").unwrap();
//! game.choose_trick(Participant::Player, "Kickflip").unwrap();
//! let view = game.respond(Participant::Player, Outcome::Landed).unwrap();
//!
//! assert_eq!(view.phase, Phase::Defending);
//! assert_eq!(view.current_trick_label.as_deref(), Some("fakie Kickflip"));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod error;
pub mod game;
pub mod letters;
pub mod options;
pub mod participant;
pub mod session;
pub mod sim;
pub mod trick;
pub mod view;

// Re-export main types
pub use error::{IntentError, ParseError, StateError};
pub use game::{Intent, Match, MatchEvent, MatchState, Outcome, Phase, RoundToken, Transition};
pub use letters::{LAST_LETTER_AT, Letters, SKATE};
pub use options::{Difficulty, MatchOptions, OpponentProfile};
pub use participant::Participant;
pub use session::Session;
pub use sim::{OpponentSimulator, RunKind, Scheduler, SimStep, Timer, TimerQueue};
pub use trick::{Level, Stances, TrickAttempt, TrickDef, TrickPool};
pub use view::MatchView;
