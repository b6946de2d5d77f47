//! Jump point search over an [OccupancyGrid]. Neighbours are pruned by the direction
//! of travel and every remaining neighbour is jumped along that direction until a
//! position that has to be queued is found: the target, a position with forced
//! neighbours, or (for diagonal jumps) a position from which a straight jump succeeds.
//!
//! Diagonal steps only require the diagonal cell itself to be free, so paths may cut
//! past blocked corners.
use smallvec::SmallVec;

use crate::grid::{Cell, OccupancyGrid};
use crate::point::{Direction, Position};
use crate::solver::{FrontierOrdering, GridSolver};
use crate::N_SMALLVEC_SIZE;

/// At most two forced neighbours exist for any direction of travel.
pub type Forced = SmallVec<[Position; 2]>;

#[derive(Clone, Debug, Default)]
pub struct JPSSolver {
    pub ordering: FrontierOrdering,
}

impl JPSSolver {
    pub fn new(ordering: FrontierOrdering) -> JPSSolver {
        JPSSolver { ordering }
    }
}

impl GridSolver for JPSSolver {
    type Successors = SmallVec<[Position; N_SMALLVEC_SIZE]>;

    fn successors<T: Cell>(
        &self,
        grid: &OccupancyGrid<T>,
        parent: Option<Position>,
        node: &Position,
        target: &Position,
    ) -> Self::Successors {
        pruned_neighbors(grid, parent, node)
            .into_iter()
            .filter_map(|n| jump_point(grid, node, &n, target))
            .collect()
    }

    fn ordering(&self) -> FrontierOrdering {
        self.ordering
    }
}

/// Forced neighbours of `current` while travelling straight along `dir`. On each side
/// of the line of travel, the cell ahead of the side cell is forced when the side cell
/// is blocked and the cell ahead is free.
pub fn straight_forced<T: Cell>(
    grid: &OccupancyGrid<T>,
    current: &Position,
    dir: Direction,
) -> Forced {
    debug_assert!(!dir.diagonal());
    let mut forced = Forced::new();
    for side in dir.perpendicular() {
        let beside = *current + side;
        let ahead = beside + dir;
        if grid.is_blocked(beside) && grid.is_free(ahead) {
            forced.push(ahead);
        }
    }
    forced
}

/// Forced neighbours of `current` while travelling diagonally along `dir`. A blocked
/// cell behind `current` on one axis forces the cell diagonally past it.
pub fn diagonal_forced<T: Cell>(
    grid: &OccupancyGrid<T>,
    current: &Position,
    dir: Direction,
) -> Forced {
    debug_assert!(dir.diagonal());
    let mut forced = Forced::new();
    let behind_y = Position::new(current.x, current.y - dir.dy);
    let past_y = Position::new(current.x + dir.dx, current.y - dir.dy);
    if grid.is_blocked(behind_y) && grid.is_free(past_y) {
        forced.push(past_y);
    }
    let behind_x = Position::new(current.x - dir.dx, current.y);
    let past_x = Position::new(current.x - dir.dx, current.y + dir.dy);
    if grid.is_blocked(behind_x) && grid.is_free(past_x) {
        forced.push(past_x);
    }
    forced
}

/// All free cells around `node`, diagonals included whatever the orthogonal cells
/// between them hold.
pub fn free_neighborhood<T: Cell>(
    grid: &OccupancyGrid<T>,
    node: &Position,
) -> SmallVec<[Position; N_SMALLVEC_SIZE]> {
    node.moore_neighborhood()
        .into_iter()
        .filter(|p| grid.is_free(*p))
        .collect()
}

/// Neighbours of `current` worth jumping from. The start node (no parent) keeps its
/// whole free neighbourhood; any other node keeps the natural neighbours along its
/// direction of travel plus the forced ones.
pub fn pruned_neighbors<T: Cell>(
    grid: &OccupancyGrid<T>,
    parent: Option<Position>,
    current: &Position,
) -> SmallVec<[Position; N_SMALLVEC_SIZE]> {
    let parent = match parent {
        Some(parent) => parent,
        None => return free_neighborhood(grid, current),
    };
    let dir = Direction::between(parent, *current);
    let mut pruned = SmallVec::new();
    if dir.diagonal() {
        for natural in [
            *current + dir.x_dir(),
            *current + dir.y_dir(),
            *current + dir,
        ] {
            if grid.is_free(natural) {
                pruned.push(natural);
            }
        }
        pruned.extend(diagonal_forced(grid, current, dir));
    } else if !dir.is_zero() {
        let natural = *current + dir;
        if grid.is_free(natural) {
            pruned.push(natural);
        }
        pruned.extend(straight_forced(grid, current, dir));
    }
    pruned
}

/// Scans from `origin` (inclusive) along the straight `dir` and returns the first cell
/// that is the target or has forced neighbours. `None` once the scan leaves the grid
/// or runs into a blocked cell, and for a direction that is not straight.
pub fn straight_scan<T: Cell>(
    grid: &OccupancyGrid<T>,
    origin: Position,
    target: &Position,
    dir: Direction,
) -> Option<Position> {
    if dir.is_zero() || dir.diagonal() {
        return None;
    }
    let mut current = origin;
    while grid.is_free(current) {
        if current == *target || !straight_forced(grid, &current, dir).is_empty() {
            return Some(current);
        }
        current = current + dir;
    }
    None
}

/// Diagonal counterpart of [straight_scan]. A cell also stops the scan when a straight
/// scan along either component of `dir` succeeds from it. `None` for a direction that
/// is not diagonal.
pub fn diagonal_scan<T: Cell>(
    grid: &OccupancyGrid<T>,
    origin: Position,
    target: &Position,
    dir: Direction,
) -> Option<Position> {
    if !dir.diagonal() {
        return None;
    }
    let mut current = origin;
    while grid.is_free(current) {
        if current == *target
            || !diagonal_forced(grid, &current, dir).is_empty()
            || straight_scan(grid, current, target, dir.x_dir()).is_some()
            || straight_scan(grid, current, target, dir.y_dir()).is_some()
        {
            return Some(current);
        }
        current = current + dir;
    }
    None
}

/// Jump point reached by moving from `parent` through its neighbour `current`.
pub fn jump_point<T: Cell>(
    grid: &OccupancyGrid<T>,
    parent: &Position,
    current: &Position,
    target: &Position,
) -> Option<Position> {
    let dir = Direction::between(*parent, *current);
    if dir.is_zero() {
        None
    } else if dir.diagonal() {
        diagonal_scan(grid, *current, target, dir)
    } else {
        straight_scan(grid, *current, target, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> OccupancyGrid {
        text.parse().unwrap()
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn sorted(points: impl IntoIterator<Item = Position>) -> Vec<Position> {
        let mut points = points.into_iter().collect::<Vec<_>>();
        points.sort();
        points
    }

    const OPEN_5X5: &str = "
        .....
        .....
        .....
        .....
        .....
    ";

    #[test]
    fn start_node_keeps_all_free_neighbours() {
        let pruned = pruned_neighbors(&grid(OPEN_5X5), None, &p(1, 1));
        assert_eq!(
            sorted(pruned),
            sorted([
                p(0, 0),
                p(1, 0),
                p(2, 0),
                p(0, 1),
                p(2, 1),
                p(0, 2),
                p(1, 2),
                p(2, 2)
            ])
        );
    }

    #[test]
    fn start_node_cuts_corners() {
        let map = grid(
            "
            .#.
            #..
            ...
        ",
        );
        assert_eq!(pruned_neighbors(&map, None, &p(0, 0)).to_vec(), vec![p(1, 1)]);
        let pruned = pruned_neighbors(&map, None, &p(1, 1));
        assert!(pruned.contains(&p(0, 0)));
        assert_eq!(pruned.len(), 6);
    }

    #[test]
    fn straight_forced_right() {
        let map = grid(
            "
            .....
            ..#..
            .....
            .....
            .....
        ",
        );
        let pruned = pruned_neighbors(&map, Some(p(1, 2)), &p(2, 2));
        assert_eq!(sorted(pruned), vec![p(3, 1), p(3, 2)]);
    }

    #[test]
    fn straight_forced_left() {
        let map = grid(
            "
            .....
            ..#..
            .....
            ..#..
            .....
        ",
        );
        let pruned = pruned_neighbors(&map, Some(p(3, 2)), &p(2, 2));
        assert_eq!(sorted(pruned), vec![p(1, 1), p(1, 2), p(1, 3)]);
    }

    #[test]
    fn straight_forced_up() {
        let map = grid(
            "
            .....
            .##..
            .#.#.
            .....
            .....
        ",
        );
        let pruned = pruned_neighbors(&map, Some(p(2, 3)), &p(2, 2));
        assert_eq!(sorted(pruned), vec![p(3, 1)]);
    }

    #[test]
    fn straight_into_wall() {
        let map = grid(
            "
            .....
            .....
            .....
            .....
            #####
        ",
        );
        assert!(pruned_neighbors(&map, Some(p(2, 2)), &p(2, 3)).is_empty());
    }

    #[test]
    fn diagonal_natural() {
        let pruned = pruned_neighbors(&grid(OPEN_5X5), Some(p(1, 1)), &p(2, 2));
        assert_eq!(sorted(pruned), vec![p(2, 3), p(3, 2), p(3, 3)]);
    }

    #[test]
    fn diagonal_forced_neighbour() {
        let map = grid(
            "
            .....
            ..#..
            .....
            .....
            .....
        ",
        );
        let pruned = pruned_neighbors(&map, Some(p(3, 1)), &p(2, 2));
        assert_eq!(sorted(pruned), vec![p(1, 1), p(1, 2), p(1, 3), p(2, 3)]);
        assert_eq!(
            diagonal_forced(&map, &p(2, 2), Direction::new(-1, 1)).to_vec(),
            vec![p(1, 1)]
        );
    }

    #[test]
    fn diagonal_into_wall() {
        let map = grid(
            "
            .....
            .##..
            .#...
            .....
            .....
        ",
        );
        assert!(pruned_neighbors(&map, Some(p(3, 3)), &p(2, 2)).is_empty());
    }

    #[test]
    fn straight_forced_on_both_directions() {
        let map = grid(
            "
            .#.
            ...
        ",
        );
        assert_eq!(
            straight_forced(&map, &p(1, 1), Direction::new(-1, 0)).to_vec(),
            vec![p(0, 0)]
        );
        assert_eq!(
            straight_forced(&map, &p(1, 1), Direction::new(1, 0)).to_vec(),
            vec![p(2, 0)]
        );
    }

    #[test]
    fn forced_cells_must_lie_on_the_grid() {
        let map = grid(
            "
            ..#
            ...
        ",
        );
        // The cell past the blocked one would be at x = 3
        assert!(straight_forced(&map, &p(2, 1), Direction::new(1, 0)).is_empty());
        // Cells beyond the border do not count as blocked
        assert!(straight_forced(&map, &p(0, 1), Direction::new(1, 0)).is_empty());
        assert!(diagonal_forced(&map, &p(1, 1), Direction::new(1, 1)).is_empty());
    }

    #[test]
    fn straight_jump_into_wall() {
        let map = grid(
            "
            #....
            #....
            #....
            #....
            #....
        ",
        );
        assert_eq!(jump_point(&map, &p(4, 2), &p(3, 2), &p(0, 0)), None);
    }

    #[test]
    fn straight_jump_stops_at_forced_neighbour() {
        let map = grid(
            "
            ..#..
            ..#..
            ..#..
            ..#..
            .....
        ",
        );
        assert_eq!(jump_point(&map, &p(1, 0), &p(1, 1), &p(0, 0)), Some(p(1, 3)));
    }

    #[test]
    fn straight_jump_stops_at_target() {
        assert_eq!(
            jump_point(&grid(OPEN_5X5), &p(0, 2), &p(1, 2), &p(3, 2)),
            Some(p(3, 2))
        );
        assert_eq!(jump_point(&grid(OPEN_5X5), &p(0, 2), &p(1, 2), &p(3, 3)), None);
    }

    #[test]
    fn diagonal_jump_into_wall() {
        let map = grid(
            "
            .....
            .....
            .....
            ....#
            ....#
        ",
        );
        assert_eq!(jump_point(&map, &p(0, 0), &p(1, 1), &p(0, 0)), None);
    }

    #[test]
    fn diagonal_jump_stops_where_straight_jump_succeeds() {
        let map = grid(
            "
            .....
            ...#.
            ...#.
            .....
            .....
        ",
        );
        assert_eq!(jump_point(&map, &p(0, 4), &p(1, 3), &p(0, 0)), Some(p(1, 3)));

        let map = grid(
            "
            ........
            ........
            ........
            ......#.
            ......#.
            ......#.
        ",
        );
        assert_eq!(jump_point(&map, &p(0, 5), &p(1, 4), &p(0, 0)), Some(p(3, 2)));
    }

    #[test]
    fn diagonal_jump_finds_target_beside_its_line() {
        // (3,1) is reached by a straight scan from (1,1)
        assert_eq!(
            jump_point(&grid(OPEN_5X5), &p(0, 0), &p(1, 1), &p(3, 1)),
            Some(p(1, 1))
        );
        assert_eq!(
            jump_point(&grid(OPEN_5X5), &p(0, 0), &p(1, 1), &p(3, 3)),
            Some(p(3, 3))
        );
    }

    #[test]
    fn zero_direction_has_no_jump_point() {
        assert_eq!(jump_point(&grid(OPEN_5X5), &p(2, 2), &p(2, 2), &p(4, 4)), None);
    }

    #[test]
    fn scans_reject_mismatched_directions() {
        let map = grid(OPEN_5X5);
        let zero = Direction::new(0, 0);
        assert_eq!(straight_scan(&map, p(1, 1), &p(0, 0), zero), None);
        assert_eq!(diagonal_scan(&map, p(1, 1), &p(0, 0), zero), None);
        assert_eq!(straight_scan(&map, p(1, 1), &p(3, 3), Direction::new(1, 1)), None);
        assert_eq!(diagonal_scan(&map, p(1, 1), &p(1, 3), Direction::new(0, 1)), None);
        assert_eq!(straight_scan(&map, p(1, 1), &p(1, 3), Direction::new(0, 1)), Some(p(1, 3)));
    }

    #[test]
    fn successors_are_jump_points_of_pruned_neighbours() {
        let map = grid(
            "
            ..#..
            ..#..
            ..#..
            ..#..
            .....
        ",
        );
        let solver = JPSSolver::default();
        let succ = solver.successors(&map, Some(p(1, 0)), &p(1, 1), &p(4, 0));
        assert_eq!(succ.to_vec(), vec![p(1, 3)]);
    }
}
