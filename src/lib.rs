use wasm_bindgen::prelude::*;

pub mod api;
pub mod board;
pub mod candidate;
pub mod config;
pub mod error;
pub mod execute;
pub mod game;
pub mod player;
pub mod rules;
pub mod select;
pub mod turn;
pub mod types;

pub use board::Board;
pub use candidate::MoveCandidate;
pub use config::GameConfig;
pub use error::{Rejection, RollError, SnapshotError};
pub use game::{GameState, Phase, roll_dice};
pub use rules::Reach;
pub use select::{Event, MoveRecord, Transition, select};
pub use turn::{Dice, Turn, TurnOutcome};
pub use types::{Color, GameResult, Location, WinKind};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
