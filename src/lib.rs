//! # jps_astar
//!
//! Shortest 8-connected paths on binary occupancy grids using
//! [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search) A*, following
//! "Online Graph Pruning for Pathfinding on Grid Maps" by Harabor and Grastien. This
//! assumes a uniform-cost grid: every step costs its Euclidean length and the same
//! distance is used as heuristic. Diagonal moves may cut past blocked corners.
//!
//! Grids are row-major buffers where any cell greater than zero is traversable and
//! zero is blocked. Optionally pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to answer queries between disconnected cells without flood-filling the grid.
//!
//! ```
//! use jps_astar::{JpsAStar, OccupancyGrid, Position};
//!
//! let grid: OccupancyGrid = "
//!     ....
//!     .##.
//!     ....
//! "
//! .parse()
//! .unwrap();
//! let engine = JpsAStar::new(grid);
//! let path = engine.find_path(Position::new(0, 0), Position::new(3, 2)).unwrap();
//! assert_eq!(path.last(), Some(&Position::new(3, 2)));
//! ```
mod astar_jps;
pub mod components;
pub mod error;
pub mod grid;
pub mod point;
pub mod solver;

use itertools::Itertools;
use log::{info, warn};

pub use crate::components::ReachabilityIndex;
pub use crate::error::{Endpoint, GridError, SearchError};
pub use crate::grid::{Cell, OccupancyGrid};
pub use crate::point::{Direction, Position};
pub use crate::solver::{
    astar::AstarSolver, jps::JPSSolver, FrontierOrdering, GridSolver, SearchConfig,
    SearchOutcome, SearchStats,
};

/// Inline capacity of neighbour and successor lists.
pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Turns waypoints into a path on the grid which can be followed step by step, starting
/// with `start`. Segments between consecutive jump points are straight or diagonal, so
/// every intermediate cell was visited by the scan that produced them.
pub fn expand_waypoints(start: Position, waypoints: &[Position]) -> Vec<Position> {
    let mut path = vec![start];
    let mut current = start;
    for &next in waypoints {
        while current != next {
            current = current + Direction::between(current, next);
            path.push(current);
        }
    }
    path
}

/// Euclidean length of the polyline through `start` and the waypoints.
pub fn path_length(start: Position, waypoints: &[Position]) -> f64 {
    std::iter::once(&start)
        .chain(waypoints)
        .tuple_windows()
        .map(|(a, b)| f64::from(a.x - b.x).hypot(f64::from(a.y - b.y)))
        .sum()
}

/// Jump point search engine over an owned [OccupancyGrid].
///
/// Queries borrow the engine immutably, so the grid cannot change while a search is
/// running; [set_grid](Self::set_grid) needs exclusive access.
#[derive(Clone, Debug)]
pub struct JpsAStar<T = u8> {
    grid: OccupancyGrid<T>,
    config: SearchConfig,
    solver: JPSSolver,
    components: Option<ReachabilityIndex>,
}

impl<T: Cell> JpsAStar<T> {
    pub fn new(grid: OccupancyGrid<T>) -> JpsAStar<T> {
        JpsAStar::with_config(grid, SearchConfig::default())
    }

    pub fn with_config(grid: OccupancyGrid<T>, config: SearchConfig) -> JpsAStar<T> {
        let components = config
            .reachability_check
            .then(|| ReachabilityIndex::new(&grid));
        JpsAStar {
            solver: JPSSolver::new(config.ordering),
            grid,
            config,
            components,
        }
    }

    /// Replaces the grid. The buffer is moved in, not copied.
    pub fn set_grid(&mut self, grid: OccupancyGrid<T>) {
        if self.config.reachability_check {
            self.components = Some(ReachabilityIndex::new(&grid));
        }
        self.grid = grid;
    }

    /// A copy of the current grid, independent of the engine.
    pub fn grid(&self) -> OccupancyGrid<T> {
        self.grid.clone()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Applies new settings, building or dropping the reachability index as needed.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.components = match (config.reachability_check, self.components.take()) {
            (true, Some(index)) => Some(index),
            (true, None) => Some(ReachabilityIndex::new(&self.grid)),
            (false, _) => None,
        };
        self.solver = JPSSolver::new(config.ordering);
        self.config = config;
    }

    /// Computes waypoints from `start` (excluded) to `target` (included). Consecutive
    /// waypoints are joined by straight or diagonal lines of free cells; use
    /// [expand_waypoints] for a step-by-step path. The result is empty when the target
    /// cannot be reached or equals the start.
    pub fn find_path(&self, start: Position, target: Position) -> Result<Vec<Position>, SearchError> {
        self.search(start, target).map(|outcome| outcome.path)
    }

    /// Like [find_path](Self::find_path), also reporting whether the target was
    /// reached and how much work the search did.
    pub fn search(&self, start: Position, target: Position) -> Result<SearchOutcome, SearchError> {
        solver::validate_endpoints(&self.grid, start, target)?;
        if let Some(index) = &self.components {
            if !index.may_reach(&self.grid, &start, &target) {
                info!("{target} is not reachable from {start}");
                return Ok(SearchOutcome::unreachable());
            }
        }
        let outcome = self.solver.search(&self.grid, start, target)?;
        if self.components.is_some() && !outcome.reached {
            warn!("Reachable target {target} could not be pathed to from {start}");
        }
        Ok(outcome)
    }
}
