use crate::astar_jps::astar_jps;
use crate::error::{Endpoint, SearchError};
use crate::grid::{Cell, OccupancyGrid};
use crate::point::Position;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod astar;
pub mod jps;

/// Euclidean distance. Serves as both the step cost and the heuristic, which keeps the
/// heuristic admissible.
pub fn distance(a: &Position, b: &Position) -> f32 {
    ((a.x - b.x) as f32).hypot((a.y - b.y) as f32)
}

/// Sort key used when inserting nodes into the frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrontierOrdering {
    /// The root is keyed by its cost so far (zero), every later node by `g + h`.
    #[default]
    Mixed,
    /// Every node is keyed by `g + h`, as in textbook A*.
    StrictF,
}

/// Settings of a [JpsAStar](crate::JpsAStar) engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub ordering: FrontierOrdering,
    /// Maintain connected components of the grid and answer queries between
    /// disconnected cells without searching.
    pub reachability_check: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            ordering: FrontierOrdering::Mixed,
            reachability_check: true,
        }
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and moved to the closed set.
    pub expanded: usize,
    /// Nodes created, the root included.
    pub generated: usize,
    /// Closed positions reopened through a cheaper path.
    pub reopened: usize,
}

/// Result of a search that passed bounds validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchOutcome {
    /// Waypoints from start (excluded) to target (included).
    pub path: Vec<Position>,
    /// Whether the target was reached. Distinguishes `start == target` from an
    /// unreachable target, both of which yield an empty path.
    pub reached: bool,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub(crate) fn unreachable() -> SearchOutcome {
        SearchOutcome::default()
    }
}

/// Checks that both endpoints lie on the grid, start first.
pub fn validate_endpoints<T: Cell>(
    grid: &OccupancyGrid<T>,
    start: Position,
    target: Position,
) -> Result<(), SearchError> {
    for (endpoint, position) in [(Endpoint::Start, start), (Endpoint::Target, target)] {
        if !grid.in_bounds(position) {
            return Err(SearchError::OutOfRange {
                endpoint,
                position,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }
    Ok(())
}

pub trait GridSolver {
    type Successors: IntoIterator<Item = Position>;

    /// Positions to queue after expanding `node`, which was reached from `parent`.
    fn successors<T: Cell>(
        &self,
        grid: &OccupancyGrid<T>,
        parent: Option<Position>,
        node: &Position,
        target: &Position,
    ) -> Self::Successors;

    fn ordering(&self) -> FrontierOrdering;

    /// Runs the search on `grid`. Fails only when an endpoint is off the grid.
    fn search<T: Cell>(
        &self,
        grid: &OccupancyGrid<T>,
        start: Position,
        target: Position,
    ) -> Result<SearchOutcome, SearchError> {
        validate_endpoints(grid, start, target)?;
        debug!("Searching from {start} to {target}");
        let (path, stats) = astar_jps(
            start,
            target,
            self.ordering(),
            |parent, node| self.successors(grid, parent, node, &target),
            distance,
            |p| distance(p, &target),
        );
        debug!(
            "Search from {start} to {target} expanded {} and generated {} nodes ({} reopened)",
            stats.expanded, stats.generated, stats.reopened
        );
        Ok(match path {
            Some(path) => SearchOutcome {
                path,
                reached: true,
                stats,
            },
            None => SearchOutcome {
                stats,
                ..SearchOutcome::unreachable()
            },
        })
    }

    /// Waypoints from start (excluded) to target (included); empty when the target
    /// cannot be reached or equals the start.
    fn find_path<T: Cell>(
        &self,
        grid: &OccupancyGrid<T>,
        start: Position,
        target: Position,
    ) -> Result<Vec<Position>, SearchError> {
        self.search(grid, start, target).map(|outcome| outcome.path)
    }

    /// Euclidean length of `waypoints` walked from `start`.
    fn get_path_cost(&self, start: Position, waypoints: &[Position]) -> f64 {
        crate::path_length(start, waypoints)
    }
}
