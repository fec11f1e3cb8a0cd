//! A* shortest-path search over walkability grids.
//!
//! A [`Grid`] holds the map topology: one [`Node`] per cell, each either
//! [`NodeState::Walkable`] or [`NodeState::Blocking`]. A [`Pathfinder`] runs
//! A* over a borrowed grid and keeps the per-search bookkeeping (costs,
//! parent links, open set) in its own reusable table, so the same grid can be
//! searched from several threads at once.
//!
//! Movement is 8-directional by default, costing `1.0` per orthogonal step
//! and `1.5` per diagonal step; see [`SearchConfig`].
//!
//! ```
//! use gridpath::{Grid, Metric, Pathfinder, Point};
//!
//! let mut grid = Grid::new(10, 10);
//! for y in 0..10 {
//!     if y != 5 {
//!         grid.set_walkable(Point::new(5, y), false).unwrap();
//!     }
//! }
//!
//! let mut pf = Pathfinder::new();
//! let path = pf
//!     .find_path(&grid, Point::new(0, 0), Point::new(9, 9), &Metric::Euclidean)
//!     .unwrap();
//! assert!(path.positions().any(|p| p == Point::new(5, 5)));
//! ```
//!
//! # Heuristics
//!
//! | Function | Admissible with default costs |
//! |---|---|
//! | [`manhattan`] (default) | only with diagonals disabled |
//! | [`euclidean`] | yes |
//! | [`chebyshev`] | yes |
//! | [`octile`] | yes |
//!
//! Any `Fn(Point, Point) -> f32` can be passed as a [`Heuristic`].

mod astar;
mod config;
mod grid;
mod heuristic;
mod node;
mod path;
mod pathfinder;

pub use astar::{find_path, find_path_with};
pub use config::{DIAGONAL_COST, ORTHOGONAL_COST, SearchConfig};
pub use grid::{BLOCKING_CHAR, Grid, GridError, WALKABLE_CHAR};
pub use gridpath_geom::{Point, Range};
pub use heuristic::{Heuristic, Metric, chebyshev, euclidean, manhattan, octile};
pub use node::{Node, NodeState, PathNode};
pub use path::Path;
pub use pathfinder::{Pathfinder, SearchError};
