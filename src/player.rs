use std::ops::RangeInclusive;

use crate::types::{Color, NUM_POINTS};

/// Where a hop of `pips` from some origin lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Point(usize),
    /// Past the colour's own edge, i.e. bearing off.
    Off,
}

impl Color {
    /// +1 for Black, -1 for White.
    pub fn direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Virtual position of the bar: one step before the first entry point.
    pub fn bar_origin(self) -> i8 {
        match self {
            Color::White => NUM_POINTS as i8,
            Color::Black => -1,
        }
    }

    pub fn home_range(self) -> RangeInclusive<usize> {
        match self {
            Color::White => 0..=5,
            Color::Black => 18..=23,
        }
    }

    pub fn is_home(self, point: usize) -> bool {
        self.home_range().contains(&point)
    }

    /// Pips needed to carry a checker on `point` off the board.
    pub fn distance_to_off(self, point: usize) -> u8 {
        match self {
            Color::White => point as u8 + 1,
            Color::Black => (NUM_POINTS - point) as u8,
        }
    }

    /// Point a bar checker enters on with `die`; `None` for a die outside 1..=6.
    pub fn entry_point(self, die: u8) -> Option<usize> {
        if !(1..=6).contains(&die) {
            return None;
        }
        match self.advance(self.bar_origin(), die) {
            Landing::Point(point) => Some(point),
            Landing::Off => None,
        }
    }

    /// Moves `pips` from `origin` in this colour's direction of travel.
    pub fn advance(self, origin: i8, pips: u8) -> Landing {
        let target = origin as i32 + self.direction() as i32 * pips as i32;
        if (0..NUM_POINTS as i32).contains(&target) {
            Landing::Point(target as usize)
        } else {
            Landing::Off
        }
    }
}
