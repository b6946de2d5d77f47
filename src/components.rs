use log::info;
use petgraph::unionfind::UnionFind;

use crate::grid::{Cell, OccupancyGrid};
use crate::point::Position;

/// Connected components of the free cells of a grid under 8-connectivity, diagonals
/// passing blocked corners included. Answers whether a search could possibly succeed
/// without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct ReachabilityIndex {
    width: usize,
    height: usize,
    components: UnionFind<usize>,
}

impl ReachabilityIndex {
    /// Generates a new [UnionFind] structure and links up free neighbours to the same
    /// components.
    pub fn new<T: Cell>(grid: &OccupancyGrid<T>) -> ReachabilityIndex {
        let (width, height) = (grid.width(), grid.height());
        info!("Generating connected components of a {width}x{height} grid");
        let mut components = UnionFind::new(width * height);
        for point in grid.positions().filter(|p| grid.traversable(*p)) {
            let ix = Self::ix(width, &point);
            // Each unordered pair of neighbours is visited once
            [
                Position::new(point.x + 1, point.y - 1),
                Position::new(point.x + 1, point.y),
                Position::new(point.x + 1, point.y + 1),
                Position::new(point.x, point.y + 1),
            ]
            .into_iter()
            .filter(|n| grid.is_free(*n))
            .for_each(|n| {
                components.union(ix, Self::ix(width, &n));
            });
        }
        ReachabilityIndex {
            width,
            height,
            components,
        }
    }

    fn ix(width: usize, point: &Position) -> usize {
        point.y as usize * width + point.x as usize
    }

    fn in_bounds(&self, point: &Position) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn get_component(&self, point: &Position) -> Option<usize> {
        if self.in_bounds(point) {
            Some(self.components.find(Self::ix(self.width, point)))
        } else {
            None
        }
    }

    /// Checks if two in-range cells are on the same component. Blocked cells form
    /// singleton components.
    pub fn connected(&self, a: &Position, b: &Position) -> bool {
        self.in_bounds(a)
            && self.in_bounds(b)
            && self
                .components
                .equiv(Self::ix(self.width, a), Self::ix(self.width, b))
    }

    /// Whether a search from `start` may reach `target` on `grid`, which must be the
    /// grid the index was built from. A blocked start still expands its free
    /// neighbours, while a blocked target is never entered.
    pub fn may_reach<T: Cell>(
        &self,
        grid: &OccupancyGrid<T>,
        start: &Position,
        target: &Position,
    ) -> bool {
        if start == target {
            return true;
        }
        if !grid.is_free(*target) {
            return false;
        }
        if grid.is_free(*start) {
            return self.connected(start, target);
        }
        start
            .moore_neighborhood()
            .iter()
            .any(|n| grid.is_free(*n) && self.connected(n, target))
    }
}
