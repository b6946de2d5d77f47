use jps_astar::{AstarSolver, GridSolver, JpsAStar, OccupancyGrid, Position};

// Compares how much work jump point search and plain A* do on the same query.
fn main() {
    let grid: OccupancyGrid = "
        ....................
        ....................
        ....######..........
        .........#..........
        .........#..........
        .........#####......
        ....................
        ....................
    "
    .parse()
    .unwrap_or_default();
    let start = Position::new(0, 4);
    let end = Position::new(19, 4);

    let engine = JpsAStar::new(grid.clone());
    let astar = AstarSolver::new();
    for (name, outcome) in [
        ("JPS", engine.search(start, end)),
        ("A*", astar.search(&grid, start, end)),
    ] {
        match outcome {
            Ok(outcome) => println!(
                "{name}: reached {}, {} waypoints, {} expanded, {} generated, {} reopened",
                outcome.reached,
                outcome.path.len(),
                outcome.stats.expanded,
                outcome.stats.generated,
                outcome.stats.reopened
            ),
            Err(e) => println!("{name}: {e}"),
        }
    }
}
