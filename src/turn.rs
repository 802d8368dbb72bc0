use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::Board;
use crate::error::RollError;
use crate::rules::{has_any_legal_move, ready_to_end};
use crate::types::{CHECKERS_PER_COLOR, Color, GameResult, WinKind};

/// One roll of two dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    first: u8,
    second: u8,
}

impl Dice {
    pub fn new(first: u8, second: u8) -> Result<Self, RollError> {
        for die in [first, second] {
            if !(1..=6).contains(&die) {
                return Err(RollError::DieOutOfRange(die));
            }
        }
        Ok(Self { first, second })
    }

    pub fn values(&self) -> [u8; 2] {
        [self.first, self.second]
    }

    pub fn is_double(&self) -> bool {
        self.first == self.second
    }

    /// Half-moves granted: four for doubles, two otherwise.
    pub fn budget(&self) -> Vec<u8> {
        if self.is_double() {
            vec![self.first; 4]
        } else {
            vec![self.first, self.second]
        }
    }
}

/// Whose turn it is and what is left of their roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub active: Color,
    pub dice: Option<Dice>,
    pub rolled: bool,
    /// Dice still to be played; its length is the remaining move budget.
    pub remaining: Vec<u8>,
    /// Dice already played this turn, in order.
    pub used: Vec<u8>,
    /// Whether the active player may bear off. Recomputed, never carried over.
    pub in_the_end: bool,
    pub number: u32,
}

impl Turn {
    pub fn new(active: Color) -> Self {
        Self {
            active,
            dice: None,
            rolled: false,
            remaining: Vec::new(),
            used: Vec::new(),
            in_the_end: false,
            number: 1,
        }
    }

    pub fn opponent(&self) -> Color {
        self.active.opponent()
    }

    pub fn max_moves(&self) -> u8 {
        self.remaining.len() as u8
    }

    /// Distinct dice values still playable, largest first.
    pub fn distinct_dice(&self) -> Vec<u8> {
        let mut dice = self.remaining.clone();
        dice.sort_unstable_by(|a, b| b.cmp(a));
        dice.dedup();
        dice
    }

    /// Loads a roll into the turn.
    pub fn roll(&self, board: &Board, dice: Dice) -> Turn {
        Turn {
            dice: Some(dice),
            rolled: true,
            remaining: dice.budget(),
            used: Vec::new(),
            in_the_end: ready_to_end(board, self.active),
            ..self.clone()
        }
    }
}

/// What the turn transition manager decided after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnOutcome {
    /// The same player keeps playing the remaining dice.
    Continue,
    /// The dice were used up and the opponent is now to roll.
    TurnEnded,
    /// Dice remained but none could be played.
    ForcedPass,
    GameOver(GameResult),
}

/// Consumes the dice a move used from the remaining budget.
pub fn calc_moves_made(turn: &Turn, dice: &[u8]) -> Turn {
    let mut next = turn.clone();
    for die in dice {
        if let Some(pos) = next.remaining.iter().position(|d| d == die) {
            next.remaining.remove(pos);
            next.used.push(*die);
        }
    }
    next
}

/// True when dice remain but the active player cannot play any of them.
pub fn check_cant_move(board: &Board, turn: &Turn) -> bool {
    !turn.remaining.is_empty() && !has_any_legal_move(board, turn)
}

/// Hands the turn to the opponent, awaiting their roll.
pub fn change_turn(board: &Board, turn: &Turn) -> Turn {
    let active = turn.opponent();
    info!(from = ?turn.active, to = ?active, number = turn.number + 1, "turn changed");
    Turn {
        active,
        dice: None,
        rolled: false,
        remaining: Vec::new(),
        used: Vec::new(),
        in_the_end: ready_to_end(board, active),
        number: turn.number + 1,
    }
}

/// The colour that has borne off all of its checkers, if any.
pub fn winner(board: &Board) -> Option<Color> {
    [Color::White, Color::Black]
        .into_iter()
        .find(|&color| board.off(color) == CHECKERS_PER_COLOR)
}

impl GameResult {
    /// Grades the win: gammon when the loser bore nothing off, backgammon when
    /// the loser also still has a checker on the bar or in the winner's home.
    pub fn new(board: &Board, winner: Color) -> Self {
        let loser = winner.opponent();
        let kind = if board.off(loser) > 0 {
            WinKind::Single
        } else if board.bar(loser) > 0 || board.occupied_by(loser).any(|p| winner.is_home(p)) {
            WinKind::Backgammon
        } else {
            WinKind::Gammon
        };
        let points = match kind {
            WinKind::Single => 1,
            WinKind::Gammon => 2,
            WinKind::Backgammon => 3,
        };
        Self {
            winner,
            kind,
            points,
        }
    }
}

/// Runs the end-of-move bookkeeping: win detection, budget exhaustion, forced pass.
pub fn after_move(board: &Board, turn: &Turn) -> (Turn, TurnOutcome) {
    if let Some(color) = winner(board) {
        let result = GameResult::new(board, color);
        info!(winner = ?color, kind = ?result.kind, "game over");
        let mut finished = turn.clone();
        finished.in_the_end = ready_to_end(board, turn.active);
        return (finished, TurnOutcome::GameOver(result));
    }

    if turn.remaining.is_empty() {
        return (change_turn(board, turn), TurnOutcome::TurnEnded);
    }

    if check_cant_move(board, turn) {
        info!(player = ?turn.active, remaining = ?turn.remaining, "no legal move, passing");
        return (change_turn(board, turn), TurnOutcome::ForcedPass);
    }

    let mut next = turn.clone();
    next.in_the_end = ready_to_end(board, turn.active);
    (next, TurnOutcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolled(board: &Board, active: Color, first: u8, second: u8) -> Turn {
        Turn::new(active).roll(board, Dice::new(first, second).unwrap())
    }

    #[test]
    fn dice_outside_one_to_six_are_refused() {
        assert_eq!(Dice::new(0, 3), Err(RollError::DieOutOfRange(0)));
        assert_eq!(Dice::new(3, 7), Err(RollError::DieOutOfRange(7)));
    }

    #[test]
    fn doubles_grant_four_moves() {
        let board = Board::new();

        assert_eq!(rolled(&board, Color::White, 6, 5).max_moves(), 2);
        assert_eq!(rolled(&board, Color::White, 4, 4).max_moves(), 4);
    }

    #[test]
    fn calc_moves_made_consumes_each_die_once() {
        let board = Board::new();
        let turn = rolled(&board, Color::White, 3, 3);

        let next = calc_moves_made(&turn, &[3, 3]);

        assert_eq!(next.remaining, vec![3, 3]);
        assert_eq!(next.used, vec![3, 3]);
        assert_eq!(next.max_moves(), 2);
    }

    #[test]
    fn change_turn_swaps_players_and_clears_dice() {
        let board = Board::new();
        let turn = calc_moves_made(&rolled(&board, Color::White, 6, 5), &[6]);

        let next = change_turn(&board, &turn);

        assert_eq!(next.active, Color::Black);
        assert!(!next.rolled);
        assert!(next.dice.is_none());
        assert!(next.remaining.is_empty());
        assert!(next.used.is_empty());
        assert_eq!(next.number, 2);
    }

    #[test]
    fn after_move_passes_when_remaining_die_is_blocked() {
        // White's last checker on 7 needs a 6 to land on 1, which Black holds.
        let board = Board::from_layout(
            &[(7, Color::White, 1), (1, Color::Black, 2), (23, Color::Black, 13)],
            0,
            0,
        )
        .unwrap();
        let turn = calc_moves_made(&rolled(&board, Color::White, 6, 5), &[5]);

        let (next, outcome) = after_move(&board, &turn);

        assert_eq!(outcome, TurnOutcome::ForcedPass);
        assert_eq!(next.active, Color::Black);
    }

    #[test]
    fn game_result_grades_gammons_and_backgammons() {
        let single = Board::from_layout(&[(20, Color::Black, 10)], 0, 0).unwrap();
        assert_eq!(GameResult::new(&single, Color::White).kind, WinKind::Single);

        let gammon = Board::from_layout(&[(12, Color::Black, 15)], 0, 0).unwrap();
        let result = GameResult::new(&gammon, Color::White);
        assert_eq!(result.kind, WinKind::Gammon);
        assert_eq!(result.points, 2);

        let backgammon = Board::from_layout(&[(12, Color::Black, 14)], 0, 1).unwrap();
        let result = GameResult::new(&backgammon, Color::White);
        assert_eq!(result.kind, WinKind::Backgammon);
        assert_eq!(result.points, 3);
    }
}
