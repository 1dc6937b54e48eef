use core::time::Duration;

use serde::Serialize;
use sk8rs::{
    Letters, MatchOptions, MatchView, OpponentProfile, Outcome, Participant, Phase, Session,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    options: MatchOptions,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: u32,
        starter: &str,
        difficulty: &str,
        level: &str,
        opponent_name: &str,
    ) -> Result<WasmSession, JsValue> {
        let starter: Participant = starter.parse().map_err(js_err)?;
        let options = MatchOptions::default()
            .with_difficulty(difficulty.parse().map_err(js_err)?)
            .with_level(level.parse().map_err(js_err)?)
            .with_opponent(OpponentProfile::new("opponent", opponent_name));

        Ok(Self {
            session: Session::new(&options, starter, u64::from(seed)),
            options,
        })
    }

    pub fn reset(&mut self, seed: u32, starter: &str) -> Result<(), JsValue> {
        let starter: Participant = starter.parse().map_err(js_err)?;
        self.session = Session::new(&self.options, starter, u64::from(seed));
        Ok(())
    }

    pub fn restart(&mut self, starter: &str) -> Result<JsValue, JsValue> {
        let starter: Participant = starter.parse().map_err(js_err)?;
        let view = self.session.restart(starter);
        to_js_value(&JsView::from(&view))
    }

    pub fn choose_stance(&mut self, stance: &str) -> Result<(), JsValue> {
        self.session.choose_stance(stance).map(|_| ()).map_err(js_err)
    }

    pub fn choose_trick(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.choose_trick(name).map(|_| ()).map_err(js_err)
    }

    /// Accepts `land`/`landed`/`make` or `bail`/`bailed`.
    pub fn respond(&mut self, outcome: &str) -> Result<(), JsValue> {
        let outcome: Outcome = outcome.parse().map_err(js_err)?;
        self.session.respond(outcome).map(|_| ()).map_err(js_err)
    }

    /// Advances the opponent clock by `elapsed_ms`, usually from a
    /// `requestAnimationFrame` or `setInterval` callback.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session
            .advance(Duration::from_millis(u64::from(elapsed_ms)));
    }

    pub fn is_opponent_busy(&self) -> bool {
        self.session.is_opponent_busy()
    }

    pub fn difficulty(&self) -> String {
        self.options.difficulty.as_str().into()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let view = self.session.view();
        let snapshot = Snapshot {
            view: JsView::from(&view),
            opponent_name: self.session.game().opponent().display_name().into(),
            opponent_busy: self.session.is_opponent_busy(),
            can_set: view.player_can_set(),
            can_respond: view.player_can_respond(),
        };
        to_js_value(&snapshot)
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }
}

#[derive(Serialize)]
struct Snapshot {
    #[serde(flatten)]
    view: JsView,
    opponent_name: String,
    opponent_busy: bool,
    can_set: bool,
    can_respond: bool,
}

#[derive(Serialize)]
struct JsView {
    active_setter: &'static str,
    phase: &'static str,
    actor: Option<&'static str>,
    current_trick: Option<String>,
    message: String,
    player_letters: String,
    opponent_letters: String,
    player_last_chance: bool,
    opponent_last_chance: bool,
    match_over: bool,
    loser: Option<&'static str>,
}

impl From<&MatchView> for JsView {
    fn from(view: &MatchView) -> Self {
        Self {
            active_setter: view.active_setter.as_str(),
            phase: phase_to_str(view.phase),
            actor: view.actor.map(Participant::as_str),
            current_trick: view.current_trick_label.clone(),
            message: view.result_message.clone(),
            player_letters: letters_to_string(view.player_letters),
            opponent_letters: letters_to_string(view.opponent_letters),
            player_last_chance: view.player_last_chance,
            opponent_last_chance: view.opponent_last_chance,
            match_over: view.is_match_over,
            loser: view.loser.map(Participant::as_str),
        }
    }
}

fn letters_to_string(letters: Letters) -> String {
    letters.as_slice().iter().collect()
}

fn phase_to_str(phase: Phase) -> &'static str {
    match phase {
        Phase::Setting => "Setting",
        Phase::AwaitingLandBail => "AwaitingLandBail",
        Phase::Defending => "Defending",
        Phase::Finished => "Finished",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
