//! Shared helpers for the gridpath demo binaries: logging setup, random
//! obstacle maps, config loading and ASCII rendering of a path.

use std::collections::HashSet;
use std::error::Error;

use gridpath::{Grid, Path, Point, SearchConfig};
use rand::{RngExt, SeedableRng};

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install `env_logger`. `RUST_LOG` wins when set; otherwise the filter is
/// `trace` when `verbose` and `info` when not.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "trace" } else { "info" };
    // A second call (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

// ---------------------------------------------------------------------------
// Maps and config
// ---------------------------------------------------------------------------

/// A grid with roughly `blocked_pct` percent of its cells blocking. `keep`
/// cells are always left walkable.
pub fn random_grid(seed: u64, width: i32, height: i32, blocked_pct: u32, keep: &[Point]) -> Grid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(width, height);
    grid.fill_fn(|p| {
        let blocked = rng.random_range(0..100) < blocked_pct && !keep.contains(&p);
        (!blocked).into()
    });
    grid
}

/// Read a [`SearchConfig`] from a JSON file. Missing fields use defaults.
pub fn load_config(path: &str) -> Result<SearchConfig, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let config: SearchConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw the grid with `S` at the start, `G` at the goal and `*` on the path.
pub fn render(grid: &Grid, start: Point, goal: Point, path: &Path) -> String {
    let on_path: HashSet<Point> = path.positions().collect();
    let mut out = String::with_capacity(grid.len() + grid.height().max(0) as usize);
    for p in grid.bounds() {
        if p.x == 0 && p.y > 0 {
            out.push('\n');
        }
        let walkable = grid.is_walkable(p).unwrap_or(false);
        let ch = if p == start {
            'S'
        } else if p == goal {
            'G'
        } else if on_path.contains(&p) {
            '*'
        } else if walkable {
            gridpath::WALKABLE_CHAR
        } else {
            gridpath::BLOCKING_CHAR
        };
        out.push(ch);
    }
    out
}
