use smallvec::SmallVec;

use crate::grid::{Cell, OccupancyGrid};
use crate::point::Position;
use crate::solver::{jps::free_neighborhood, FrontierOrdering, GridSolver};
use crate::N_SMALLVEC_SIZE;

/// Plain A* over the 8-neighbourhood with the same costs and corner cutting as
/// [JPSSolver](super::jps::JPSSolver). Expands every free neighbour, so it serves as the
/// reference the jump point search is checked against.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub ordering: FrontierOrdering,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            ordering: FrontierOrdering::StrictF,
        }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[Position; N_SMALLVEC_SIZE]>;

    fn successors<T: Cell>(
        &self,
        grid: &OccupancyGrid<T>,
        _parent: Option<Position>,
        node: &Position,
        _target: &Position,
    ) -> Self::Successors {
        free_neighborhood(grid, node)
    }

    fn ordering(&self) -> FrontierOrdering {
        self.ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid: OccupancyGrid = OccupancyGrid::filled(1, 1, 255).unwrap();
        let solver = AstarSolver::new();
        let start = Position::new(0, 0);
        let outcome = solver.search(&grid, start, start).unwrap();
        assert!(outcome.reached);
        assert!(outcome.path.is_empty());
    }

    /// Every step of the reference path is a single move.
    #[test]
    fn solve_simple_problem() {
        let grid: OccupancyGrid = "
            ...
            .#.
            ...
        "
        .parse()
        .unwrap();
        let solver = AstarSolver::new();
        let start = Position::new(0, 0);
        let path = solver.find_path(&grid, start, Position::new(2, 2)).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&Position::new(2, 2)));
        assert!((solver.get_path_cost(start, &path) - (2.0 + 2f64.sqrt())).abs() < 1e-6);
    }

    /// Diagonal moves slip between two blocked corners.
    #[test]
    fn test_diagonal_corner_cutting() {
        //  __
        // |.#|
        // |#.|
        //  __
        let grid: OccupancyGrid = ".#\n#.".parse().unwrap();
        let path = AstarSolver::new()
            .find_path(&grid, Position::new(0, 0), Position::new(1, 1))
            .unwrap();
        assert_eq!(path, vec![Position::new(1, 1)]);
    }

    #[test]
    fn unreachable_goal() {
        let grid: OccupancyGrid = "
            ..#..
            ..#..
            ..#..
        "
        .parse()
        .unwrap();
        let outcome = AstarSolver::new()
            .search(&grid, Position::new(0, 0), Position::new(4, 2))
            .unwrap();
        assert!(!outcome.reached);
        assert!(outcome.path.is_empty());
        assert!(outcome.stats.expanded >= 6);
    }

    #[test]
    fn out_of_range() {
        let grid: OccupancyGrid = OccupancyGrid::filled(2, 2, 255).unwrap();
        assert!(matches!(
            AstarSolver::new().find_path(&grid, Position::new(0, 0), Position::new(0, 2)),
            Err(SearchError::OutOfRange { .. })
        ));
    }
}
