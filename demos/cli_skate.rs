//! CLI Game of S.K.A.T.E. example.

use core::time::Duration;
use std::io::{self, Write};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use sk8rs::{
    Difficulty, Level, MatchOptions, MatchView, OpponentProfile, Outcome, Participant, Phase,
    Session,
};
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(250);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .without_time()
        .init();

    println!("Game of S.K.A.T.E. CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(difficulty) = prompt_parsed::<Difficulty>("Difficulty (easy/medium/hard): ") else {
        return;
    };
    let Some(level) = prompt_parsed::<Level>("Trick level (beginner/medium/pro): ") else {
        return;
    };

    let options = MatchOptions::default()
        .with_difficulty(difficulty)
        .with_level(level)
        .with_opponent(OpponentProfile::new("bot", "Rodney"));
    let mut session = Session::new(&options, Participant::Player, seed);
    print_view(&session.view());

    loop {
        let view = wait_for_opponent(&mut session);

        if view.is_match_over {
            match prompt_line("Play again? (y/n): ").as_str() {
                "y" | "yes" => {
                    print_view(&session.restart(Participant::Player));
                    continue;
                }
                _ => break,
            }
        }

        let result = if view.player_can_set() {
            let stance = prompt_line("Stance (blank for regular): ");
            if is_quit(&stance) {
                break;
            }
            let trick = prompt_raw("Trick: ");
            if is_quit(&trick) {
                break;
            }
            session
                .choose_stance(&stance)
                .and_then(|_| session.choose_trick(&trick))
        } else if view.player_can_respond() {
            let label = view.current_trick_label.clone().unwrap_or_default();
            let input = prompt_line(&format!("{label}: [l]and or [b]ail? "));
            let outcome = match input.as_str() {
                "l" => Outcome::Landed,
                "b" => Outcome::Bailed,
                "q" | "quit" => break,
                other => match other.parse() {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        println!("Unknown answer.");
                        continue;
                    }
                },
            };
            session.respond(outcome)
        } else {
            continue;
        };

        match result {
            Ok(view) => print_view(&view),
            Err(err) => println!("Not now: {err}"),
        }
    }

    session.shutdown();
    println!("Goodbye.");
}

/// Runs the clock in real time until the opponent has nothing pending.
fn wait_for_opponent(session: &mut Session) -> MatchView {
    let mut last = session.view();
    while session.is_opponent_busy() {
        thread::sleep(TICK);
        let view = session.advance(TICK);
        if view.result_message != last.result_message {
            print_view(&view);
        }
        last = view;
    }
    last
}

fn print_view(view: &MatchView) {
    println!();
    println!("  {}", view.result_message);
    println!(
        "  You: {:<10} {}",
        format_letters(view.player_letters.len()),
        if view.player_last_chance { "(last chance)" } else { "" }
    );
    println!(
        "  Bot: {:<10} {}",
        format_letters(view.opponent_letters.len()),
        if view.opponent_last_chance { "(last chance)" } else { "" }
    );
    if let Some(trick) = &view.current_trick_label {
        let phase = match view.phase {
            Phase::AwaitingLandBail => "set",
            Phase::Defending => "to copy",
            Phase::Setting | Phase::Finished => "",
        };
        println!("  Trick {phase}: {trick}");
    }
    println!();
}

fn format_letters(count: usize) -> String {
    sk8rs::SKATE
        .iter()
        .enumerate()
        .map(|(index, letter)| {
            if index < count {
                colorize(&letter.to_string(), "31")
            } else {
                colorize("_", "90")
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn is_quit(input: &str) -> bool {
    input == "q" || input == "quit"
}

fn prompt_line(prompt: &str) -> String {
    prompt_raw(prompt).to_lowercase()
}

fn prompt_raw(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_owned()
}

fn prompt_parsed<T: core::str::FromStr>(prompt: &str) -> Option<T> {
    loop {
        let input = prompt_line(prompt);
        if is_quit(&input) {
            return None;
        }
        match input.parse::<T>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please pick one of the listed options."),
        }
    }
}
