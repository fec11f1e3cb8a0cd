//! Builds a 200x200 grid, blocks a short wall and prints the path found
//! from (0, 0) to (60, 50).
//!
//! Run: cargo run --bin tester [-- -v]

use gridpath::{Grid, Point};

fn main() {
    let verbose = std::env::args().any(|a| a == "-v");
    gridpath_demos::init_logging(verbose);

    let start = Point::new(0, 0);
    let goal = Point::new(60, 50);

    let mut grid = Grid::new(200, 200);
    for y in 4..=6 {
        if let Err(e) = grid.set_walkable(Point::new(4, y), false) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    match grid.find_path(start, goal) {
        Ok(path) => {
            for p in path.positions() {
                println!("{p}");
            }
            log::info!(
                "{} steps, cost {}, {} nodes expanded",
                path.len(),
                path.cost(),
                path.expanded()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
