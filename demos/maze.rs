//! Random obstacle map, searched corner to corner and drawn as ASCII.
//!
//! Run: cargo run --bin maze -- [seed] [heuristic] [config.json] [-v]
//!
//! `heuristic` is one of manhattan, euclidean, chebyshev, octile.

use gridpath::{Metric, Pathfinder, Point, SearchConfig};

const WIDTH: i32 = 60;
const HEIGHT: i32 = 24;
const BLOCKED_PCT: u32 = 28;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v");
    args.retain(|a| a != "-v");
    gridpath_demos::init_logging(verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let seed = match args.first() {
        Some(s) => s.parse::<u64>()?,
        None => 42,
    };
    let metric = match args.get(1) {
        Some(name) => {
            Metric::from_name(name).ok_or_else(|| format!("unknown heuristic \u{201c}{name}\u{201d}"))?
        }
        None => Metric::Octile,
    };
    let config = match args.get(2) {
        Some(path) => gridpath_demos::load_config(path)?,
        None => SearchConfig::default(),
    };
    log::info!("seed {seed}, heuristic {}, {config:?}", metric.name());

    let start = Point::new(0, 0);
    let goal = Point::new(WIDTH - 1, HEIGHT - 1);
    let grid = gridpath_demos::random_grid(seed, WIDTH, HEIGHT, BLOCKED_PCT, &[start, goal]);

    let mut pf = Pathfinder::with_config(config)?;
    let path = pf.find_path(&grid, start, goal, &metric)?;

    println!("{}", gridpath_demos::render(&grid, start, goal, &path));
    if path.is_empty() {
        log::info!("no path ({} nodes expanded)", path.expanded());
    } else {
        log::info!(
            "{} steps, cost {}, {} nodes expanded",
            path.len(),
            path.cost(),
            path.expanded()
        );
    }
    Ok(())
}
