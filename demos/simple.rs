use jps_astar::{JpsAStar, OccupancyGrid, Position};

// In this example a path is found on a grid with shape
// #####
// #S..#
// #.#.#
// #..E#
// #####
// S marks the start
// E marks the end
fn main() {
    let mut grid = OccupancyGrid::filled(5, 5, 0u8).unwrap();
    for y in 1..4 {
        for x in 1..4 {
            grid.set(Position::new(x, y), 255);
        }
    }
    grid.set(Position::new(2, 2), 0);
    let engine = JpsAStar::new(grid);
    let start = Position::new(1, 1);
    let end = Position::new(3, 3);
    match engine.find_path(start, end) {
        Ok(path) if !path.is_empty() => {
            println!("A path has been found:");
            for p in path {
                println!("{p}");
            }
        }
        Ok(_) => println!("No path from {start} to {end}"),
        Err(e) => println!("{e}"),
    }
}
