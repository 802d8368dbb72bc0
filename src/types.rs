use serde::{Deserialize, Serialize};

/// Number of points on the board.
pub const NUM_POINTS: usize = 24;
/// Checkers each colour starts with.
pub const CHECKERS_PER_COLOR: u8 = 15;
/// Flat encoding of the bar used at the wasm boundary.
pub const BAR_INDEX: i32 = 24;
/// Flat encoding of the off area used at the wasm boundary.
pub const OFF_INDEX: i32 = 25;

/// Checker colour. White moves towards index 0, Black towards index 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Slot used by per-colour arrays.
    pub(crate) fn slot(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

/// Where a checker can be picked up from or put down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Point(u8),
    Bar,
    Off,
}

impl Location {
    /// Decodes the flat `0..=23 | 24 | 25` index used by JavaScript callers.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0..=23 => Some(Location::Point(index as u8)),
            BAR_INDEX => Some(Location::Bar),
            OFF_INDEX => Some(Location::Off),
            _ => None,
        }
    }

    pub fn to_index(self) -> i32 {
        match self {
            Location::Point(idx) => idx as i32,
            Location::Bar => BAR_INDEX,
            Location::Off => OFF_INDEX,
        }
    }

    pub fn point_index(self) -> Option<usize> {
        match self {
            Location::Point(idx) => Some(idx as usize),
            _ => None,
        }
    }
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Color,
    pub kind: WinKind,
    /// 1 for a single game, 2 for a gammon, 3 for a backgammon.
    pub points: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinKind {
    Single,
    Gammon,
    Backgammon,
}

/// Render-facing snapshot of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub color: Color,
    pub direction: i8,
    pub bar: u8,
    pub off: u8,
    pub pips: u32,
    pub in_the_end: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Contract: one entry per point, positive = White checkers,
    /// negative = Black checkers, 0 = empty.
    pub points: Vec<i8>,
    pub white: PlayerView,
    pub black: PlayerView,
    pub active: Color,
    pub dice: Option<[u8; 2]>,
    pub remaining_dice: Vec<u8>,
    pub max_moves: u8,
    pub rolled: bool,
    pub turn_number: u32,
    /// Flat index of the chosen source, if any.
    pub selected: Option<i32>,
    /// Flat indices the chosen source can move to.
    pub targets: Vec<i32>,
    pub result: Option<GameResult>,
    pub fingerprint: u32,
}
