use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::{ApiError, Rejection};
use crate::game::{self, GameState};
use crate::select::{self, Event};
use crate::types::{GameView, Location};

/// Reply to one `select` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectReply {
    accepted: bool,
    /// Contract:
    /// - `None` when `accepted` is true.
    /// - The refusal reason with a stable `code` otherwise.
    rejection: Option<Rejection>,
    message: Option<String>,
    event: Option<Event>,
    state: GameView,
}

/// Browser-side handle owning one game. Methods mutate the held state by
/// replacing it with the result of the pure transition functions.
#[wasm_bindgen]
pub struct BackgammonGame {
    state: GameState,
}

#[wasm_bindgen]
impl BackgammonGame {
    /// `config` may be `undefined`, `null`, or a partial `{ firstPlayer }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BackgammonGame, JsValue> {
        let config = parse_config(config)?;
        Ok(Self {
            state: GameState::new(&config),
        })
    }

    #[wasm_bindgen(js_name = rollDice)]
    pub fn roll_dice(&mut self, first: u8, second: u8) -> Result<JsValue, JsValue> {
        self.state = game::roll_dice(&self.state, first, second).map_err(ApiError::from)?;
        to_js(&self.state.view())
    }

    /// `index` is `0..=23` for a point, 24 for the bar, 25 for the off area.
    pub fn select(&mut self, index: i32) -> Result<JsValue, JsValue> {
        let at = Location::from_index(index).ok_or(ApiError::Index(index))?;
        let reply = match select::select(&self.state, at) {
            Ok(transition) => {
                self.state = transition.state;
                SelectReply {
                    accepted: true,
                    rejection: None,
                    message: None,
                    event: Some(transition.event),
                    state: self.state.view(),
                }
            }
            Err(reason) => SelectReply {
                accepted: false,
                rejection: Some(reason),
                message: Some(reason.to_string()),
                event: None,
                state: self.state.view(),
            },
        };
        to_js(&reply)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.view())
    }

    #[wasm_bindgen(js_name = legalSources)]
    pub fn legal_sources(&self) -> Vec<i32> {
        self.state
            .legal_sources()
            .into_iter()
            .map(Location::to_index)
            .collect()
    }

    pub fn fingerprint(&self) -> u32 {
        self.state.fingerprint()
    }

    /// Full state for transport; feed it to `loadState` on another peer.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state)
    }

    /// Replaces the local state with an authoritative snapshot.
    #[wasm_bindgen(js_name = loadState)]
    pub fn load_state(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let state: GameState = serde_wasm_bindgen::from_value(snapshot)
            .map_err(|err| ApiError::Snapshot(err.to_string()))?;
        state
            .validate()
            .map_err(|err| ApiError::Snapshot(err.to_string()))?;
        self.state = state;
        Ok(())
    }
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn parse_config(config: JsValue) -> Result<GameConfig, ApiError> {
    if config.is_undefined() || config.is_null() {
        return Ok(GameConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|err| ApiError::Config(err.to_string()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| ApiError::Serialize(err.to_string()).into())
}
