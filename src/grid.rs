use core::fmt;
use std::str::FromStr;

use num_traits::Zero;

use crate::error::GridError;
use crate::point::Position;

/// Value stored per grid cell. Anything greater than zero is traversable, exactly zero
/// is blocked.
pub trait Cell: Copy + PartialOrd + Zero {}

impl<T: Copy + PartialOrd + Zero> Cell for T {}

/// Number of cells of a `width` by `height` grid. Both sides must be addressable by a
/// [Position].
fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    let max_side = i32::MAX as usize;
    match width.checked_mul(height) {
        Some(count) if width <= max_side && height <= max_side => Ok(count),
        _ => Err(GridError::TooLarge { width, height }),
    }
}

/// Row-major occupancy buffer of `width * height` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid<T = u8> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Default for OccupancyGrid<T> {
    fn default() -> OccupancyGrid<T> {
        OccupancyGrid {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }
}

impl<T: Cell> OccupancyGrid<T> {
    /// Wraps a row-major buffer. The buffer must hold exactly `width * height` cells.
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Result<OccupancyGrid<T>, GridError> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(GridError::BufferSize {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(OccupancyGrid {
            width,
            height,
            cells,
        })
    }

    /// A grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<OccupancyGrid<T>, GridError> {
        Ok(OccupancyGrid {
            width,
            height,
            cells: vec![value; cell_count(width, height)?],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// Occupancy test for an in-range position. Callers check bounds first.
    pub fn traversable(&self, pos: Position) -> bool {
        debug_assert!(self.in_bounds(pos), "{pos} is not on the grid");
        self.cells[self.index(pos)] > T::zero()
    }

    /// In range and traversable.
    pub fn is_free(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.traversable(pos)
    }

    /// In range and not traversable. Cells beyond the border are not blocked, they
    /// do not exist.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.traversable(pos)
    }

    pub fn get(&self, pos: Position) -> Option<T> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Overwrites a cell, returning the previous value, or `None` if `pos` is off the grid.
    pub fn set(&mut self, pos: Position, value: T) -> Option<T> {
        if !self.in_bounds(pos) {
            return None;
        }
        let ix = self.index(pos);
        Some(std::mem::replace(&mut self.cells[ix], value))
    }

    /// Iterates over all in-range positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

impl<T: Cell> fmt::Display for OccupancyGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row = (0..self.width as i32)
                .map(|x| {
                    if self.traversable(Position::new(x, y)) {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Parses rows of `.` (free, stored as 255) and `#` (blocked, stored as 0). Blank lines
/// are ignored, so maps may be written as indented raw strings.
impl FromStr for OccupancyGrid<u8> {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<&str>>();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                cells.push(match symbol {
                    '.' => u8::MAX,
                    '#' => 0,
                    _ => {
                        return Err(GridError::UnknownCell {
                            row,
                            column,
                            symbol,
                        })
                    }
                });
            }
        }
        OccupancyGrid::new(width, rows.len(), cells)
    }
}
