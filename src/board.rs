use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::types::{CHECKERS_PER_COLOR, Color, NUM_POINTS};

/// Standard opening layout for White as `(point, count)`; Black is mirrored.
const OPENING: [(usize, u8); 4] = [(23, 2), (12, 5), (7, 3), (5, 5)];

/// One point: an owner and a stack height. A point can never hold both colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    owner: Option<Color>,
    count: u8,
}

impl Point {
    pub fn owner(&self) -> Option<Color> {
        self.owner
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Signed count, positive for White and negative for Black.
    pub fn signed(&self) -> i8 {
        match self.owner {
            Some(Color::White) => self.count as i8,
            Some(Color::Black) => -(self.count as i8),
            None => 0,
        }
    }
}

/// Backgammon board: 24 points plus a bar and an off area per colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    points: [Point; NUM_POINTS],
    bar: [u8; 2],
    off: [u8; 2],
}

impl Board {
    /// Creates the standard opening position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (point, count) in OPENING {
            board.points[point] = Point {
                owner: Some(Color::White),
                count,
            };
            board.points[NUM_POINTS - 1 - point] = Point {
                owner: Some(Color::Black),
                count,
            };
        }
        board
    }

    fn empty() -> Self {
        Self {
            points: [Point::default(); NUM_POINTS],
            bar: [0; 2],
            off: [0; 2],
        }
    }

    /// Builds a board from explicit `(point, colour, count)` entries and bar counts.
    /// Checkers of a colour not placed on a point or the bar are counted as borne off.
    pub fn from_layout(
        layout: &[(usize, Color, u8)],
        white_bar: u8,
        black_bar: u8,
    ) -> Result<Self, LayoutError> {
        let mut board = Self::empty();
        board.bar = [white_bar, black_bar];

        let mut placed = [white_bar as u32, black_bar as u32];
        for &(_, color, count) in layout {
            placed[color.slot()] += count as u32;
        }
        for color in [Color::White, Color::Black] {
            let count = placed[color.slot()];
            if count > CHECKERS_PER_COLOR as u32 {
                return Err(LayoutError::TooManyCheckers { color, count });
            }
            board.off[color.slot()] = CHECKERS_PER_COLOR - count as u8;
        }

        for &(point, color, count) in layout {
            if point >= NUM_POINTS {
                return Err(LayoutError::PointOutOfRange(point));
            }
            let slot = &mut board.points[point];
            if slot.owner.is_some_and(|owner| owner != color) {
                return Err(LayoutError::MixedPoint(point));
            }
            if count == 0 {
                continue;
            }
            slot.owner = Some(color);
            slot.count += count;
        }

        Ok(board)
    }

    /// Checks a board that came from outside, e.g. a deserialized snapshot.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (idx, point) in self.points.iter().enumerate() {
            if point.owner.is_some() != (point.count > 0) {
                return Err(LayoutError::InconsistentPoint(idx));
            }
        }
        for color in [Color::White, Color::Black] {
            let count = self
                .points
                .iter()
                .filter(|p| p.owner == Some(color))
                .map(|p| p.count as u32)
                .sum::<u32>()
                + self.bar(color) as u32
                + self.off(color) as u32;
            if count != CHECKERS_PER_COLOR as u32 {
                return Err(LayoutError::WrongCheckerCount { color, count });
            }
        }
        Ok(())
    }

    pub fn point(&self, point: usize) -> Point {
        self.points[point]
    }

    pub fn points(&self) -> &[Point; NUM_POINTS] {
        &self.points
    }

    pub fn owner_at(&self, point: usize) -> Option<Color> {
        self.points[point].owner
    }

    pub fn count_at(&self, point: usize) -> u8 {
        self.points[point].count
    }

    pub fn bar(&self, color: Color) -> u8 {
        self.bar[color.slot()]
    }

    pub fn off(&self, color: Color) -> u8 {
        self.off[color.slot()]
    }

    /// Checkers of `color` still on the 24 points.
    pub fn on_board(&self, color: Color) -> u8 {
        self.points
            .iter()
            .filter(|p| p.owner == Some(color))
            .map(|p| p.count)
            .sum()
    }

    /// Board + bar + off. Always 15 for a board built through this API.
    pub fn total(&self, color: Color) -> u8 {
        self.on_board(color) + self.bar(color) + self.off(color)
    }

    /// Point indices holding at least one checker of `color`.
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        (0..NUM_POINTS).filter(move |&point| self.points[point].owner == Some(color))
    }

    /// A point is open when it is empty, owned by `color`, or a single opponent blot.
    pub fn is_open_for(&self, point: usize, color: Color) -> bool {
        let p = self.points[point];
        match p.owner {
            None => true,
            Some(owner) if owner == color => true,
            Some(_) => p.count <= 1,
        }
    }

    /// True when the point holds exactly one checker of the opponent of `color`.
    pub fn is_blot_against(&self, point: usize, color: Color) -> bool {
        let p = self.points[point];
        p.owner == Some(color.opponent()) && p.count == 1
    }

    /// Distance to the off edge of the farthest on-board checker of `color`, 0 when none.
    pub fn farthest_distance(&self, color: Color) -> u8 {
        self.occupied_by(color)
            .map(|point| color.distance_to_off(point))
            .max()
            .unwrap_or(0)
    }

    /// Pips `color` still has to travel, bar checkers counting 25 each.
    pub fn pip_count(&self, color: Color) -> u32 {
        let on_points: u32 = self
            .occupied_by(color)
            .map(|point| color.distance_to_off(point) as u32 * self.points[point].count as u32)
            .sum();
        on_points + self.bar(color) as u32 * (NUM_POINTS as u32 + 1)
    }

    /// Takes one checker of `color` off `point`. Returns false when there is none.
    pub(crate) fn remove_from_point(&mut self, point: usize, color: Color) -> bool {
        let slot = &mut self.points[point];
        if slot.owner != Some(color) || slot.count == 0 {
            return false;
        }
        slot.count -= 1;
        if slot.count == 0 {
            slot.owner = None;
        }
        true
    }

    /// Puts one checker of `color` on `point`, first sending a lone opponent to its bar.
    /// Returns true when a checker was hit.
    pub(crate) fn place_on_point(&mut self, point: usize, color: Color) -> bool {
        let hit = self.hit_blot(point, color);
        let slot = &mut self.points[point];
        slot.owner = Some(color);
        slot.count += 1;
        hit
    }

    /// Sends a lone opponent checker on `point` to its bar. Returns true when one was there.
    pub(crate) fn hit_blot(&mut self, point: usize, color: Color) -> bool {
        if !self.is_blot_against(point, color) {
            return false;
        }
        let opponent = color.opponent();
        self.points[point] = Point::default();
        self.bar[opponent.slot()] += 1;
        true
    }

    pub(crate) fn take_from_bar(&mut self, color: Color) -> bool {
        let bar = &mut self.bar[color.slot()];
        if *bar == 0 {
            return false;
        }
        *bar -= 1;
        true
    }

    pub(crate) fn bear_off(&mut self, color: Color) {
        self.off[color.slot()] += 1;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
