use core::fmt;
use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell coordinate. Signed so that scans may step past the grid border before
/// being rejected by the bounds check. Ordered by `x`, then `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// The 8 surrounding positions, regardless of whether they lie on a grid.
    pub fn moore_neighborhood(&self) -> [Position; 8] {
        Direction::ALL.map(|d| *self + d)
    }

    /// Number of single 8-connected steps between the two positions on an open plane.
    pub fn move_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Position {
        Position::new(x, y)
    }
}

/// Direction of travel between two cells, stored as the per-axis sign of the
/// displacement. Each component is one of -1, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    /// All 8 unit directions: horizontal first, then the row below, then the row above.
    pub const ALL: [Direction; 8] = [
        Direction::new(1, 0),
        Direction::new(-1, 0),
        Direction::new(0, 1),
        Direction::new(1, 1),
        Direction::new(-1, 1),
        Direction::new(0, -1),
        Direction::new(1, -1),
        Direction::new(-1, -1),
    ];

    pub const fn new(dx: i32, dy: i32) -> Direction {
        Direction { dx, dy }
    }

    /// Per-axis sign of `to - from`.
    pub fn between(from: Position, to: Position) -> Direction {
        Direction::new((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    pub fn diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Horizontal component as a direction of its own.
    pub fn x_dir(&self) -> Direction {
        Direction::new(self.dx, 0)
    }

    /// Vertical component as a direction of its own.
    pub fn y_dir(&self) -> Direction {
        Direction::new(0, self.dy)
    }

    /// Both unit offsets perpendicular to a straight direction, negative side first.
    pub fn perpendicular(&self) -> [Direction; 2] {
        if self.dx != 0 {
            [Direction::new(0, -1), Direction::new(0, 1)]
        } else {
            [Direction::new(-1, 0), Direction::new(1, 0)]
        }
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, rhs: Direction) -> Position {
        Position::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}
