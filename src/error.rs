use serde::Serialize;

use crate::types::{Color, Location};

/// Why a selection was refused. The state is always left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "code")]
pub enum Rejection {
    #[error("game is not active")]
    GameNotActive,

    #[error("dice have not been rolled yet")]
    DiceNotRolled,

    #[error("there are no checkers on the bar")]
    BarEmpty,

    #[error("all checkers must be in the home quadrant before bearing off")]
    NotInHomeQuadrant,

    #[error("point {point} is out of range")]
    OutOfRange { point: u8 },

    #[error("point {point} has no checkers")]
    SourceEmpty { point: u8 },

    #[error("point {point} is blocked by the opponent")]
    PointBlocked { point: u8 },

    #[error("point {point} holds an opponent checker")]
    NotOwnChecker { point: u8 },

    #[error("checkers on the bar must be played first")]
    MustPlayFromBar,

    #[error("no legal destinations from {from:?}")]
    NoLegalDestinations { from: Location },

    #[error("{to:?} cannot be reached from {from:?}")]
    UnreachableDestination { from: Location, to: Location },
}

/// Errors from feeding a dice roll into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    #[error("game is already over")]
    GameOver,

    #[error("dice were already rolled this turn")]
    AlreadyRolled,

    #[error("die value {0} is outside 1..=6")]
    DieOutOfRange(u8),
}

/// Errors from building a board out of an explicit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("point {0} is out of range")]
    PointOutOfRange(usize),

    #[error("point {0} was given checkers of both colours")]
    MixedPoint(usize),

    #[error("{color:?} has {count} checkers, more than 15")]
    TooManyCheckers { color: Color, count: u32 },

    #[error("{color:?} has {count} checkers in total, expected 15")]
    WrongCheckerCount { color: Color, count: u32 },

    #[error("point {0} has an owner but no checkers, or checkers but no owner")]
    InconsistentPoint(usize),
}

/// Errors from checking a whole game state received from another peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("die value {0} is outside 1..=6")]
    DieOutOfRange(u8),

    #[error("{0} dice remain, at most 4 are allowed")]
    TooManyDice(usize),

    #[error("remaining die {0} was not part of the roll")]
    DieNotRolled(u8),

    #[error("rolled flag disagrees with the dice")]
    RollMismatch,

    #[error("bear-off flag disagrees with the board")]
    StaleInTheEnd,

    #[error("game phase disagrees with the board")]
    PhaseMismatch,

    #[error("selected source {0:?} is not a board location")]
    BadSelection(Location),
}

/// Errors surfaced through the WASM boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid location index {0}")]
    Index(i32),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("failed to serialize state: {0}")]
    Serialize(String),

    #[error(transparent)]
    Roll(#[from] RollError),
}
