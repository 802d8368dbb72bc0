use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::board::Board;
use crate::candidate::MoveCandidate;
use crate::config::GameConfig;
use crate::error::{RollError, SnapshotError};
use crate::rules::{has_any_legal_move, legal_sources, ready_to_end};
use crate::turn::{Dice, Turn, winner};
use crate::types::{Color, GameResult, GameView, Location, NUM_POINTS, PlayerView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Active,
    Finished(GameResult),
}

/// The `(Board, Turn, MoveCandidate)` triple every transition consumes and produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Turn,
    pub candidate: MoveCandidate,
    pub phase: Phase,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self::from_parts(Board::new(), Turn::new(config.first_player))
    }

    /// Resumes from a known board and turn, e.g. a server snapshot.
    pub fn from_parts(board: Board, mut turn: Turn) -> Self {
        turn.in_the_end = ready_to_end(&board, turn.active);
        let phase = match winner(&board) {
            Some(color) => Phase::Finished(GameResult::new(&board, color)),
            None => Phase::Active,
        };
        Self {
            board,
            turn,
            candidate: MoveCandidate::idle(),
            phase,
        }
    }

    /// Checks a state that came from outside before it replaces the local one.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.board.validate()?;

        let turn = &self.turn;
        if turn.rolled != turn.dice.is_some() || (!turn.rolled && !turn.remaining.is_empty()) {
            return Err(SnapshotError::RollMismatch);
        }
        if turn.remaining.len() > 4 {
            return Err(SnapshotError::TooManyDice(turn.remaining.len()));
        }
        let rolled: Vec<u8> = turn.dice.map(|dice| dice.values().to_vec()).unwrap_or_default();
        if let Some(&die) = rolled.iter().find(|die| !(1..=6).contains(*die)) {
            return Err(SnapshotError::DieOutOfRange(die));
        }
        for &die in &turn.remaining {
            if !(1..=6).contains(&die) {
                return Err(SnapshotError::DieOutOfRange(die));
            }
            if !rolled.contains(&die) {
                return Err(SnapshotError::DieNotRolled(die));
            }
        }
        if turn.in_the_end != ready_to_end(&self.board, turn.active) {
            return Err(SnapshotError::StaleInTheEnd);
        }

        let expected = winner(&self.board).map(|color| GameResult::new(&self.board, color));
        if self.result() != expected {
            return Err(SnapshotError::PhaseMismatch);
        }

        if let Some(Location::Point(point)) = self.candidate.from
            && point as usize >= NUM_POINTS
        {
            return Err(SnapshotError::BadSelection(Location::Point(point)));
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::Finished(result) => Some(result),
            Phase::Active => None,
        }
    }

    /// True when the dice are rolled but none of them can be played.
    pub fn must_pass(&self) -> bool {
        self.is_active() && self.turn.rolled && !has_any_legal_move(&self.board, &self.turn)
    }

    pub fn legal_sources(&self) -> Vec<Location> {
        if !self.is_active() || !self.turn.rolled {
            return Vec::new();
        }
        legal_sources(&self.board, &self.turn)
    }

    /// CRC-32 over board and turn. Peers compare it to detect divergence;
    /// the in-progress selection is local and left out.
    pub fn fingerprint(&self) -> u32 {
        let mut bytes = Vec::with_capacity(48);
        bytes.extend(self.board.points().iter().map(|p| p.signed() as u8));
        for color in [Color::White, Color::Black] {
            bytes.push(self.board.bar(color));
            bytes.push(self.board.off(color));
        }
        bytes.push(self.turn.active.slot() as u8);
        bytes.push(self.turn.rolled as u8);
        bytes.extend_from_slice(&self.turn.number.to_le_bytes());
        bytes.push(self.turn.remaining.len() as u8);
        bytes.extend_from_slice(&self.turn.remaining);
        crc32fast::hash(&bytes)
    }

    pub fn player_view(&self, color: Color) -> PlayerView {
        PlayerView {
            color,
            direction: color.direction(),
            bar: self.board.bar(color),
            off: self.board.off(color),
            pips: self.board.pip_count(color),
            in_the_end: if color == self.turn.active {
                self.turn.in_the_end
            } else {
                ready_to_end(&self.board, color)
            },
        }
    }

    pub fn view(&self) -> GameView {
        GameView {
            points: self.board.points().iter().map(|p| p.signed()).collect(),
            white: self.player_view(Color::White),
            black: self.player_view(Color::Black),
            active: self.turn.active,
            dice: self.turn.dice.map(|dice| dice.values()),
            remaining_dice: self.turn.remaining.clone(),
            max_moves: self.turn.max_moves(),
            rolled: self.turn.rolled,
            turn_number: self.turn.number,
            selected: self.candidate.from.map(Location::to_index),
            targets: self
                .candidate
                .targets()
                .into_iter()
                .map(Location::to_index)
                .collect(),
            result: self.result(),
            fingerprint: self.fingerprint(),
        }
    }
}

/// Feeds a dice roll for the active player into the state.
#[instrument(level = "debug", skip(state), fields(active = ?state.turn.active))]
pub fn roll_dice(state: &GameState, first: u8, second: u8) -> Result<GameState, RollError> {
    if !state.is_active() {
        return Err(RollError::GameOver);
    }
    if state.turn.rolled {
        return Err(RollError::AlreadyRolled);
    }

    let dice = Dice::new(first, second)?;
    let turn = state.turn.roll(&state.board, dice);
    info!(player = ?turn.active, first, second, "dice rolled");

    Ok(GameState {
        board: state.board,
        turn,
        candidate: MoveCandidate::idle(),
        phase: state.phase,
    })
}
