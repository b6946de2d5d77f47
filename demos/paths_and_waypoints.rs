use jps_astar::{expand_waypoints, path_length, JpsAStar, OccupancyGrid, Position};

/// This example illustrates the type of output [JpsAStar::find_path] gives. It is a
/// minimal representation that can be expanded using [expand_waypoints].
/// A path is found on a 5x5 grid with shape
/// S....
/// .#...
/// .....
/// .....
/// ....E
/// where
/// - S marks the start
/// - E marks the end
fn main() {
    let mut grid = OccupancyGrid::filled(5, 5, 255u8).unwrap();
    grid.set(Position::new(1, 1), 0);
    println!("{}", grid);
    let engine = JpsAStar::new(grid);
    let start = Position::new(0, 0);
    let end = Position::new(4, 4);
    let waypoints = match engine.find_path(start, end) {
        Ok(waypoints) => waypoints,
        Err(e) => {
            println!("{e}");
            return;
        }
    };
    println!("Unexpanded path:");
    for p in &waypoints {
        println!("{p}");
    }
    println!("Expanded path:");
    for p in expand_waypoints(start, &waypoints) {
        println!("{p}");
    }
    println!("Length: {:.3}", path_length(start, &waypoints));
}
