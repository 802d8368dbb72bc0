use serde::Serialize;

use crate::board::Board;
use crate::player::Landing;
use crate::rules::Reach;
use crate::types::{Color, Location};

/// Board after a move plus the points where opponent checkers were hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Execution {
    pub board: Board,
    pub hits: Vec<u8>,
}

/// Applies a move that the legality calculator has already approved.
///
/// One checker leaves `from` (a point or the bar), touches down on every
/// intermediate landing of a combined move, and ends on `reach.to` or in the
/// off area. Lone opponent checkers it lands on go to their bar.
pub fn execute_move(board: &Board, color: Color, from: Location, reach: &Reach) -> Execution {
    let mut next = *board;
    let mut hits = Vec::new();

    let origin = match from {
        Location::Point(point) => {
            let removed = next.remove_from_point(point as usize, color);
            debug_assert!(removed, "no {color:?} checker on point {point}");
            point as i8
        }
        Location::Bar => {
            let taken = next.take_from_bar(color);
            debug_assert!(taken, "no {color:?} checker on the bar");
            color.bar_origin()
        }
        Location::Off => {
            debug_assert!(false, "checkers never leave the off area");
            return Execution { board: *board, hits };
        }
    };

    let (last, passing) = match reach.dice.split_last() {
        Some((last, passing)) => (*last, passing),
        None => return Execution { board: *board, hits },
    };

    let mut at = origin;
    for &die in passing {
        if let Landing::Point(point) = color.advance(at, die) {
            if next.hit_blot(point, color) {
                hits.push(point as u8);
            }
            at = point as i8;
        }
    }

    match reach.to {
        Location::Point(point) => {
            debug_assert_eq!(color.advance(at, last), Landing::Point(point as usize));
            if next.place_on_point(point as usize, color) {
                hits.push(point);
            }
        }
        Location::Off => next.bear_off(color),
        Location::Bar => debug_assert!(false, "moves never end on the bar"),
    }

    Execution { board: next, hits }
}
