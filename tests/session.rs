//! Opponent simulation and scheduling tests.

mod common;

use core::time::Duration;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sk8rs::{
    Difficulty, MatchOptions, OpponentProfile, OpponentSimulator, Outcome, Participant, Phase,
    RoundToken, RunKind, Scheduler, Session, SimStep, Timer, TimerQueue, TrickDef, TrickPool,
};

use Participant::{Opponent, Player};

/// A generator that always yields the same word.
///
/// `FixedRng(0)` makes every Bernoulli draw succeed and every uniform pick
/// land on the first entry; `FixedRng(u64::MAX)` makes every Bernoulli draw
/// fail.
#[derive(Debug, Clone, Copy)]
struct FixedRng(u64);

impl FixedRng {
    const ALWAYS_LAND: Self = Self(0);
    const ALWAYS_BAIL: Self = Self(u64::MAX);
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for chunk in dst.chunks_mut(bytes.len()) {
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn options() -> MatchOptions {
    MatchOptions::default()
        .with_difficulty(Difficulty::Medium)
        .with_opponent(OpponentProfile::new("rodney", "Rodney"))
        .with_trick_pool(TrickPool::new(vec![
            TrickDef::new("Kickflip").with_stances(&["fakie", "nollie"]),
            TrickDef::new("Heelflip"),
        ]))
}

fn session(starter: Participant, rng: FixedRng) -> Session<TimerQueue, FixedRng> {
    common::init_logging();
    Session::with_parts(&options(), starter, TimerQueue::new(), rng)
}

/// A scheduler that never forgets a timer, so only the round token can keep
/// stale steps from running.
#[derive(Debug, Default)]
struct LeakyQueue(TimerQueue);

impl Scheduler for LeakyQueue {
    fn now(&self) -> Duration {
        self.0.now()
    }

    fn schedule(&mut self, token: RoundToken, delay: Duration, step: SimStep) {
        self.0.schedule(token, delay, step);
    }

    fn cancel(&mut self, _token: RoundToken) -> usize {
        0
    }

    fn cancel_all(&mut self) -> usize {
        0
    }

    fn pending(&self) -> usize {
        self.0.pending()
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        self.0.pop_due(deadline)
    }

    fn settle(&mut self, deadline: Duration) {
        self.0.settle(deadline);
    }
}

#[test]
fn opponent_reveals_then_lands_and_player_defends() {
    let mut session = session(Opponent, FixedRng::ALWAYS_LAND);

    let view = session.view();
    assert_eq!(view.result_message, "Rodney is setting up for a...");
    assert_eq!(view.current_trick_label, None);
    assert!(session.is_opponent_busy());

    let view = session.advance(ms(1999));
    assert_eq!(view.phase, Phase::Setting);
    assert_eq!(view.current_trick_label, None);

    let view = session.advance(ms(1));
    assert_eq!(view.phase, Phase::AwaitingLandBail);
    assert_eq!(view.actor, Some(Opponent));
    assert_eq!(view.current_trick_label.as_deref(), Some("fakie Kickflip"));

    let view = session.advance(ms(3000));
    assert_eq!(view.phase, Phase::Defending);
    assert_eq!(view.actor, Some(Player));
    assert_eq!(view.current_trick_label.as_deref(), Some("fakie Kickflip"));
    assert_eq!(view.result_message, "Rodney landed. Defend!");
    assert!(view.player_can_respond());

    // Handoff pause, then nothing left to do.
    assert!(session.is_opponent_busy());
    session.advance(ms(1000));
    assert!(!session.is_opponent_busy());
    assert_eq!(session.view().phase, Phase::Defending);
}

#[test]
fn opponent_self_report_uses_the_sampled_outcome() {
    let mut session = session(Opponent, FixedRng::ALWAYS_LAND);
    session.advance(ms(2000));
    assert_eq!(session.view().phase, Phase::AwaitingLandBail);

    session.advance(ms(3000));

    let state = session.game().state();
    assert_eq!(state.last_outcome(), Some(Outcome::Landed));
    assert_eq!(state.phase(), Phase::Defending);
    assert_eq!(state.actor(), Some(Player));
}

#[test]
fn opponent_bail_hands_the_set_to_the_player() {
    let mut session = session(Opponent, FixedRng::ALWAYS_BAIL);

    let view = session.advance(ms(5000));

    assert_eq!(view.active_setter, Player);
    assert_eq!(view.phase, Phase::Setting);
    assert_eq!(view.current_trick_label, None);
    assert!(view.player_letters.is_empty());
    assert!(view.opponent_letters.is_empty());
    assert_eq!(view.result_message, "Rodney bailed. Your turn to set.");
    assert!(view.player_can_set());
}

#[test]
fn player_cannot_act_during_the_opponent_run() {
    let mut session = session(Opponent, FixedRng::ALWAYS_LAND);
    session.advance(ms(2000));
    let before = session.game().state().clone();

    assert!(session.choose_trick("Kickflip").is_err());
    assert!(session.respond(Outcome::Landed).is_err());
    assert_eq!(session.game().state(), &before);
    assert!(session.is_opponent_busy());
}

#[test]
fn opponent_defends_and_picks_up_a_letter() {
    let mut session = session(Player, FixedRng::ALWAYS_BAIL);
    assert!(!session.is_opponent_busy());

    session.choose_stance("Switch").unwrap();
    session.choose_trick("Kickflip").unwrap();
    let view = session.respond(Outcome::Landed).unwrap();
    assert_eq!(view.phase, Phase::Defending);
    assert_eq!(view.actor, Some(Opponent));
    assert_eq!(view.result_message, "Rodney is trying the switch Kickflip...");

    let view = session.advance(ms(2500));
    assert_eq!(view.opponent_letters.as_slice(), &['S']);
    assert_eq!(view.active_setter, Opponent);
    assert_eq!(view.phase, Phase::Setting);
    assert_eq!(view.result_message, "Rodney got S");

    // The next set starts after the handoff pause.
    let view = session.advance(ms(999));
    assert_eq!(view.result_message, "Rodney got S");
    let view = session.advance(ms(1));
    assert_eq!(view.result_message, "Rodney is setting up for a...");
}

#[test]
fn opponent_copy_hands_it_the_set() {
    let mut session = session(Player, FixedRng::ALWAYS_LAND);
    session.choose_trick("Heelflip").unwrap();
    session.respond(Outcome::Landed).unwrap();

    let view = session.advance(ms(2500));

    assert!(view.opponent_letters.is_empty());
    assert_eq!(view.active_setter, Opponent);
    assert_eq!(view.result_message, "Rodney landed. No letter!");

    let view = session.advance(ms(1000 + 2000));
    assert_eq!(view.phase, Phase::AwaitingLandBail);
    assert_eq!(view.current_trick_label.as_deref(), Some("fakie Kickflip"));
}

#[test]
fn opponent_last_chance_reruns_the_defense_then_loses() {
    let mut session = session(Player, FixedRng::ALWAYS_BAIL);

    // Each cycle: the opponent misses the player's trick, then bails its own set.
    for _ in 0..4 {
        session.choose_trick("Kickflip").unwrap();
        session.respond(Outcome::Landed).unwrap();
        let view = session.advance(Duration::from_secs(60));
        assert_eq!(view.phase, Phase::Setting);
        assert_eq!(view.active_setter, Player);
        assert!(!session.is_opponent_busy());
    }
    assert_eq!(session.view().opponent_letters.len(), 4);

    session.choose_trick("Kickflip").unwrap();
    session.respond(Outcome::Landed).unwrap();

    let view = session.advance(ms(2500));
    assert!(view.opponent_last_chance);
    assert_eq!(view.phase, Phase::Defending);
    assert_eq!(view.result_message, "RODNEY - LAST CHANCE!");

    let view = session.advance(ms(1000));
    assert_eq!(view.result_message, "Rodney is trying the Kickflip...");

    let view = session.advance(ms(2500));
    assert!(view.is_match_over);
    assert_eq!(view.loser, Some(Opponent));
    assert_eq!(view.result_message, "Rodney got the E. S.K.A.T.E.! You win!");

    session.advance(Duration::from_secs(60));
    assert!(!session.is_opponent_busy());
    assert_eq!(session.view().phase, Phase::Finished);
}

#[test]
fn player_intent_drops_the_pending_handoff() {
    let mut session = session(Opponent, FixedRng::ALWAYS_LAND);
    session.advance(ms(5000));
    assert_eq!(session.view().phase, Phase::Defending);
    assert_eq!(session.scheduler().pending(), 1);

    let view = session.respond(Outcome::Landed).unwrap();

    assert_eq!(view.active_setter, Player);
    assert_eq!(view.phase, Phase::Setting);
    assert_eq!(session.scheduler().pending(), 0);
}

#[test]
fn restart_cancels_the_run_in_flight() {
    let mut session = session(Opponent, FixedRng::ALWAYS_LAND);
    session.advance(ms(2000));
    assert_eq!(session.view().phase, Phase::AwaitingLandBail);

    let view = session.restart(Opponent);

    assert_eq!(view.phase, Phase::Setting);
    assert_eq!(view.current_trick_label, None);
    assert_eq!(view.result_message, "Rodney is setting up for a...");
    assert_eq!(session.scheduler().pending(), 1);
    assert_eq!(session.scheduler().timers()[0].step, SimStep::Reveal);
}

#[test]
fn stale_steps_never_fire_even_if_not_cancelled() {
    common::init_logging();
    let mut session = Session::with_parts(
        &options(),
        Opponent,
        LeakyQueue::default(),
        FixedRng::ALWAYS_LAND,
    );

    // Old run: trick revealed at 2s, its resolve is due at 5s.
    session.advance(ms(2000));
    assert_eq!(session.view().phase, Phase::AwaitingLandBail);

    // New run: reveal due at 4s, resolve at 7s.
    session.restart(Opponent);
    session.advance(ms(2000));
    assert_eq!(session.view().phase, Phase::AwaitingLandBail);

    // The old resolve comes due here and must do nothing.
    let view = session.advance(ms(1500));
    assert_eq!(view.phase, Phase::AwaitingLandBail);
    assert_eq!(session.game().state().last_outcome(), None);

    let view = session.advance(ms(1500));
    assert_eq!(view.phase, Phase::Defending);
    assert_eq!(session.game().state().last_outcome(), Some(Outcome::Landed));
}

#[test]
fn shutdown_drops_everything_pending() {
    let mut session = session(Opponent, FixedRng::ALWAYS_LAND);
    assert!(session.is_opponent_busy());

    session.shutdown();
    let view = session.advance(Duration::from_secs(60));

    assert!(!session.is_opponent_busy());
    assert_eq!(view.phase, Phase::Setting);
    assert_eq!(view.current_trick_label, None);
}

#[test]
fn empty_pool_reveals_the_fallback_trick() {
    common::init_logging();
    let options = options().with_trick_pool(TrickPool::default());
    let mut session = Session::with_parts(&options, Opponent, TimerQueue::new(), FixedRng(0));

    let view = session.advance(ms(2000));

    assert_eq!(view.current_trick_label.as_deref(), Some("Ollie"));
}

#[test]
fn same_seed_plays_the_same_match() {
    common::init_logging();
    let options = MatchOptions::default().with_level(sk8rs::Level::Pro);
    let mut first = Session::new(&options, Opponent, 1234);
    let mut second = Session::new(&options, Opponent, 1234);

    for _ in 0..20 {
        let a = first.advance(ms(500));
        let b = second.advance(ms(500));
        assert_eq!(a, b);
    }
}

#[test]
fn delays_follow_the_options() {
    let options = options()
        .with_reveal_delay(ms(10))
        .with_resolve_delay(ms(20))
        .with_defend_delay(ms(30))
        .with_handoff_delay(ms(40));
    let session = Session::with_parts(&options, Player, TimerQueue::new(), FixedRng(0));
    let simulator = session.simulator();

    assert_eq!(simulator.delay(SimStep::Announce(RunKind::Set)), Duration::ZERO);
    assert_eq!(simulator.delay(SimStep::Reveal), ms(10));
    assert_eq!(simulator.delay(SimStep::Resolve(RunKind::Set)), ms(20));
    assert_eq!(simulator.delay(SimStep::Resolve(RunKind::Defend)), ms(30));
    assert_eq!(simulator.delay(SimStep::Handoff), ms(40));
}

#[test]
fn timer_queue_runs_due_timers_in_order() {
    let mut queue = TimerQueue::new();
    queue.schedule(RoundToken(1), ms(30), SimStep::Handoff);
    queue.schedule(RoundToken(1), ms(10), SimStep::Reveal);
    queue.schedule(RoundToken(2), ms(10), SimStep::Resolve(RunKind::Set));
    assert_eq!(queue.next_due(), Some(ms(10)));

    let first = queue.pop_due(ms(20)).unwrap();
    assert_eq!(first.step, SimStep::Reveal);
    assert_eq!(queue.now(), ms(10));

    let second = queue.pop_due(ms(20)).unwrap();
    assert_eq!(second.step, SimStep::Resolve(RunKind::Set));
    assert!(queue.pop_due(ms(20)).is_none());

    queue.settle(ms(20));
    assert_eq!(queue.now(), ms(20));
    assert_eq!(queue.pending(), 1);
}

#[test]
fn timer_queue_cancels_by_token() {
    let mut queue = TimerQueue::new();
    queue.schedule(RoundToken(1), ms(10), SimStep::Reveal);
    queue.schedule(RoundToken(1), ms(20), SimStep::Handoff);
    queue.schedule(RoundToken(2), ms(30), SimStep::Reveal);

    assert_eq!(queue.cancel(RoundToken(1)), 2);
    assert_eq!(queue.pending(), 1);
    assert_eq!(queue.timers()[0].token, RoundToken(2));

    assert_eq!(queue.cancel_all(), 1);
    assert!(queue.pop_due(Duration::from_secs(1)).is_none());
}

#[test]
fn difficulty_sets_the_land_probability() {
    assert!((Difficulty::Easy.land_probability() - 0.8).abs() < f64::EPSILON);
    assert!((Difficulty::Medium.land_probability() - 0.6).abs() < f64::EPSILON);
    assert!((Difficulty::Hard.land_probability() - 0.4).abs() < f64::EPSILON);
    assert_eq!(MatchOptions::default().difficulty, Difficulty::Medium);
}

#[test]
fn opponent_lands_at_the_difficulty_rate() {
    const SAMPLES: u32 = 20_000;

    for (seed, difficulty) in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        .into_iter()
        .enumerate()
    {
        let options = MatchOptions::default().with_difficulty(difficulty);
        let mut simulator = OpponentSimulator::new(&options, ChaCha8Rng::seed_from_u64(seed as u64));

        let landed = (0..SAMPLES)
            .filter(|_| simulator.roll_outcome() == Outcome::Landed)
            .count();
        let rate = f64::from(u32::try_from(landed).unwrap()) / f64::from(SAMPLES);

        assert!(
            (rate - difficulty.land_probability()).abs() < 0.02,
            "{difficulty}: landed {rate:.3}"
        );
    }
}
