//! Move legality: which destinations a source can reach with the dice left.
//!
//! Every function here is pure and reads only the board and the turn. An
//! empty result means "nothing legal", never an error.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::player::Landing;
use crate::turn::Turn;
use crate::types::{Color, Location, NUM_POINTS};

/// One legal destination together with the dice it consumes, in play order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reach {
    pub to: Location,
    pub dice: Vec<u8>,
}

impl Reach {
    fn single(to: Location, die: u8) -> Self {
        Self { to, dice: vec![die] }
    }
}

/// True when every checker of `color` is inside its home quadrant and none is on the bar.
pub fn ready_to_end(board: &Board, color: Color) -> bool {
    board.bar(color) == 0 && board.occupied_by(color).all(|point| color.is_home(point))
}

/// Exact-or-overage bear-off rule for a single checker on `point`.
fn can_bear_off_with(board: &Board, color: Color, point: usize, die: u8) -> bool {
    let distance = color.distance_to_off(point);
    die == distance || (die > distance && board.farthest_distance(color) <= distance)
}

/// Destinations of the checker on `from`, including combined moves and bearing off.
pub fn possible_moves_from_point(board: &Board, turn: &Turn, from: usize) -> Vec<Reach> {
    let color = turn.active;
    if !turn.rolled
        || from >= NUM_POINTS
        || board.bar(color) > 0
        || board.owner_at(from) != Some(color)
    {
        return Vec::new();
    }

    let bearing_off = ready_to_end(board, color);
    let mut reaches: Vec<Reach> = Vec::new();

    // Smallest die first so that bearing off prefers the exact or cheapest die.
    let mut dice = turn.distinct_dice();
    dice.reverse();
    for die in dice {
        match color.advance(from as i8, die) {
            Landing::Point(to) if board.is_open_for(to, color) => {
                reaches.push(Reach::single(Location::Point(to as u8), die));
            }
            Landing::Off
                if bearing_off
                    && can_bear_off_with(board, color, from, die)
                    && !reaches.iter().any(|r| r.to == Location::Off) =>
            {
                reaches.push(Reach::single(Location::Off, die));
            }
            _ => {}
        }
    }

    for combined in combined_moves(board, turn, from) {
        if !reaches.iter().any(|r| r.to == combined.to) {
            reaches.push(combined);
        }
    }

    reaches
}

/// Multi-die moves of a single checker. Every landing on the way must be open.
/// The last hop may bear the checker off once the player is bearing off.
fn combined_moves(board: &Board, turn: &Turn, from: usize) -> Vec<Reach> {
    let color = turn.active;
    if turn.remaining.len() < 2 {
        return Vec::new();
    }

    let orders: Vec<Vec<u8>> = match turn.distinct_dice().as_slice() {
        [die] => (2..=turn.remaining.len()).map(|n| vec![*die; n]).collect(),
        [high, low] => vec![vec![*low, *high], vec![*high, *low]],
        _ => Vec::new(),
    };

    let mut reaches: Vec<Reach> = Vec::new();
    for order in orders {
        if let Some(to) = walk(board, color, from, &order)
            && !reaches.iter().any(|r| r.to == to)
        {
            reaches.push(Reach { to, dice: order });
        }
    }
    reaches
}

/// Follows `dice` hop by hop from `from`. `None` if a landing is closed, or if
/// the checker leaves the board before the last hop or without a legal bear-off.
fn walk(board: &Board, color: Color, from: usize, dice: &[u8]) -> Option<Location> {
    let (&last, passing) = dice.split_last()?;
    let mut at = from;
    for &die in passing {
        match color.advance(at as i8, die) {
            Landing::Point(next) if board.is_open_for(next, color) => at = next,
            _ => return None,
        }
    }

    match color.advance(at as i8, last) {
        Landing::Point(to) => board.is_open_for(to, color).then_some(Location::Point(to as u8)),
        Landing::Off if ready_to_end(board, color) => {
            // Judge the last die from where the checker stands after the earlier hops.
            let mut moved = *board;
            moved.remove_from_point(from, color);
            moved.place_on_point(at, color);
            can_bear_off_with(&moved, color, at, last).then_some(Location::Off)
        }
        Landing::Off => None,
    }
}

/// Entry points for a checker on the active player's bar.
pub fn possible_entry_from_bar(board: &Board, turn: &Turn) -> Vec<Reach> {
    let color = turn.active;
    if !turn.rolled || board.bar(color) == 0 {
        return Vec::new();
    }

    let mut dice = turn.distinct_dice();
    dice.reverse();
    dice.into_iter()
        .filter_map(|die| {
            let entry = color.entry_point(die)?;
            board
                .is_open_for(entry, color)
                .then(|| Reach::single(Location::Point(entry as u8), die))
        })
        .collect()
}

/// `(point, die)` pairs that may bear a checker off right now.
pub fn possible_bear_off_dice(board: &Board, turn: &Turn) -> Vec<(usize, u8)> {
    let color = turn.active;
    if !turn.rolled || !ready_to_end(board, color) {
        return Vec::new();
    }

    let mut dice = turn.distinct_dice();
    dice.reverse();
    let mut pairs = Vec::new();
    for point in board.occupied_by(color) {
        for &die in &dice {
            if can_bear_off_with(board, color, point, die) {
                pairs.push((point, die));
            }
        }
    }
    pairs
}

pub fn has_any_legal_move(board: &Board, turn: &Turn) -> bool {
    if !turn.rolled || turn.remaining.is_empty() {
        return false;
    }
    if board.bar(turn.active) > 0 {
        return !possible_entry_from_bar(board, turn).is_empty();
    }
    !possible_bear_off_dice(board, turn).is_empty()
        || board
            .occupied_by(turn.active)
            .any(|point| !possible_moves_from_point(board, turn, point).is_empty())
}

/// Reaches for any kind of source. For `Off` the reaches are the points whose
/// checker can be borne off, each with the smallest die that does it.
pub fn destinations(board: &Board, turn: &Turn, from: Location) -> Vec<Reach> {
    match from {
        Location::Point(point) => possible_moves_from_point(board, turn, point as usize),
        Location::Bar => possible_entry_from_bar(board, turn),
        Location::Off => {
            let mut reaches: Vec<Reach> = Vec::new();
            for (point, die) in possible_bear_off_dice(board, turn) {
                let to = Location::Point(point as u8);
                if !reaches.iter().any(|r| r.to == to) {
                    reaches.push(Reach::single(to, die));
                }
            }
            reaches
        }
    }
}

/// Every source the active player could pick right now.
pub fn legal_sources(board: &Board, turn: &Turn) -> Vec<Location> {
    if board.bar(turn.active) > 0 {
        return if possible_entry_from_bar(board, turn).is_empty() {
            Vec::new()
        } else {
            vec![Location::Bar]
        };
    }

    let mut sources: Vec<Location> = board
        .occupied_by(turn.active)
        .filter(|&point| !possible_moves_from_point(board, turn, point).is_empty())
        .map(|point| Location::Point(point as u8))
        .collect();
    if !possible_bear_off_dice(board, turn).is_empty() {
        sources.push(Location::Off);
    }
    sources
}
