use alloc::format;
use alloc::string::String;

use crate::participant::Participant;
use crate::trick::is_default_stance;

use super::state::{MatchEvent, MatchState, Phase};

/// Opening line before any intent.
pub fn opening(starter: Participant, opponent: &str) -> String {
    match starter {
        Participant::Player => String::from("You're up. Set a trick!"),
        Participant::Opponent => format!("{opponent} sets first."),
    }
}

/// Announcement while the opponent lines up its own trick.
pub fn setting_up(opponent: &str) -> String {
    format!("{opponent} is setting up for a...")
}

/// Announcement while the opponent lines up a copy.
pub fn trying(opponent: &str, trick: &str) -> String {
    format!("{opponent} is trying the {trick}...")
}

/// Line for a match resumed mid-play, as if the last step had just happened.
pub fn resume(state: &MatchState, opponent: &str) -> String {
    let setter = state.active_setter();
    let event = match (state.phase(), state.current_trick(), state.loser()) {
        (Phase::Finished, _, Some(loser)) => MatchEvent::MatchOver { loser },
        (Phase::AwaitingLandBail, Some(trick), _) => MatchEvent::TrickSet {
            who: setter,
            trick: trick.clone(),
        },
        (Phase::Defending, _, _) if state.last_chance(setter.other()) => MatchEvent::LastChance {
            who: setter.other(),
        },
        (Phase::Defending, _, _) => MatchEvent::SetLanded { who: setter },
        (Phase::Setting, _, _) if setter == Participant::Opponent => {
            return format!("{opponent} is up.");
        }
        _ => return opening(setter, opponent),
    };

    describe(&event, opponent).unwrap_or_else(|| opening(setter, opponent))
}

/// Returns the line for an event, or `None` when it leaves the message as is.
pub fn describe(event: &MatchEvent, opponent: &str) -> Option<String> {
    use Participant::{Opponent, Player};

    let line = match event {
        MatchEvent::StanceChosen { who: Player, stance } if is_default_stance(stance) => {
            String::from("Pick a trick!")
        }
        MatchEvent::StanceChosen { who: Player, stance } => format!("Going {stance}. Pick a trick!"),
        MatchEvent::StanceChosen { who: Opponent, .. } => return None,
        MatchEvent::TrickSet { who: Player, trick } => format!("You're going for a {trick}."),
        MatchEvent::TrickSet { who: Opponent, trick } => format!("{trick}!"),
        MatchEvent::SetLanded { who: Player } => format!("Nice! {opponent} must copy."),
        MatchEvent::SetLanded { who: Opponent } => format!("{opponent} landed. Defend!"),
        MatchEvent::SetBailed { who: Player } => format!("Dang! Back to {opponent}"),
        MatchEvent::SetBailed { who: Opponent } => format!("{opponent} bailed. Your turn to set."),
        MatchEvent::Copied { who: Player } => String::from("Nice! No letter."),
        MatchEvent::Copied { who: Opponent } => format!("{opponent} landed. No letter!"),
        MatchEvent::LetterAwarded { who: Player, letter } => format!("You got {letter}"),
        MatchEvent::LetterAwarded {
            who: Opponent,
            letter,
        } => format!("{opponent} got {letter}"),
        MatchEvent::LastChance { who: Player } => String::from("LAST CHANCE! Bail again = SKATE!"),
        MatchEvent::LastChance { who: Opponent } => {
            format!("{} - LAST CHANCE!", opponent.to_uppercase())
        }
        MatchEvent::MatchOver { loser: Player } => String::from("Fatality! You Lost."),
        MatchEvent::MatchOver { loser: Opponent } => {
            format!("{opponent} got the E. S.K.A.T.E.! You win!")
        }
    };

    Some(line)
}
