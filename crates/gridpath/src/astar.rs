use std::cmp::Ordering;

use gridpath_geom::Point;

use crate::grid::Grid;
use crate::heuristic::{Heuristic, Metric};
use crate::node::PathNode;
use crate::path::Path;
use crate::pathfinder::{NO_PARENT, OpenEntry, Pathfinder, Record, SearchError, Status};

impl Pathfinder {
    /// Compute the cheapest path from `start` to `goal` using A*.
    ///
    /// The returned path excludes `start` and ends at `goal`. It is empty
    /// when `start == goal` or when no walkable route exists; a blocking goal
    /// is therefore unreachable. The start cell's own state is not checked.
    ///
    /// The result is optimal whenever `heuristic` is admissible for the
    /// configured step costs. Ties in `f` go to the node that entered the
    /// open set first, so equal inputs always give the same path.
    pub fn find_path<H: Heuristic + ?Sized>(
        &mut self,
        grid: &Grid,
        start: Point,
        goal: Point,
        heuristic: &H,
    ) -> Result<Path, SearchError> {
        let start_idx = grid.index(start)?;
        let goal_idx = grid.index(goal)?;

        let cur_gen = self.begin(grid);

        // Initialise the start node.
        let h = heuristic.estimate(start, goal);
        let seq = self.take_seq();
        self.records[start_idx] = Record {
            g: 0.0,
            h,
            f: h,
            parent: NO_PARENT,
            generation: cur_gen,
            seq,
            status: Status::Open,
        };
        self.open.push(OpenEntry {
            idx: start_idx,
            f: h,
            seq,
        });

        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip entries superseded by a cheaper push or already closed.
            // total_cmp so a NaN estimate still matches its own entry.
            let rec = &self.records[ci];
            if rec.generation != cur_gen
                || rec.status != Status::Open
                || rec.f.total_cmp(&current.f) != Ordering::Equal
            {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    log::warn!("search {start} -> {goal}: expansion limit {limit} reached");
                    return Err(SearchError::LimitReached { expanded });
                }
            }

            self.records[ci].status = Status::Closed;
            expanded += 1;
            let current_g = self.records[ci].g;
            let current_point = grid.point(ci);
            log::trace!("expand {current_point} g={current_g} f={}", current.f);

            for node in grid.neighbours(current_point)? {
                if !node.is_walkable() {
                    continue;
                }
                let np = node.pos();
                let diagonal = current_point.is_diagonal_to(np);
                if diagonal && !self.config.diagonals {
                    continue;
                }
                let ni = grid.index(np)?;
                let tentative_g = current_g + self.config.step_cost(diagonal);

                let n = &self.records[ni];
                let seq = if n.generation == cur_gen {
                    if n.status == Status::Closed || tentative_g >= n.g {
                        continue;
                    }
                    // Improved while open: keep its place among f-ties.
                    n.seq
                } else {
                    self.take_seq()
                };

                let h = heuristic.estimate(np, goal);
                let f = tentative_g + h;
                self.records[ni] = Record {
                    g: tentative_g,
                    h,
                    f,
                    parent: ci,
                    generation: cur_gen,
                    seq,
                    status: Status::Open,
                };
                self.open.push(OpenEntry { idx: ni, f, seq });
            }
        };

        if !found {
            log::debug!("search {start} -> {goal}: unreachable after {expanded} expansions");
            return Ok(Path::new(Vec::new(), expanded));
        }

        // Reconstruct path, stopping before the start node.
        let mut nodes = Vec::new();
        let mut ci = goal_idx;
        while self.records[ci].parent != NO_PARENT {
            let r = &self.records[ci];
            nodes.push(PathNode {
                pos: grid.point(ci),
                g: r.g,
                h: r.h,
                f: r.f,
                parent: Some(grid.point(r.parent)),
            });
            ci = r.parent;
        }
        nodes.reverse();

        let path = Path::new(nodes, expanded);
        log::debug!(
            "search {start} -> {goal}: {} steps, cost {}, {expanded} expansions",
            path.len(),
            path.cost()
        );
        Ok(path)
    }

    /// [`find_path`](Self::find_path) with the [`Metric::Manhattan`] heuristic.
    pub fn find_path_default(
        &mut self,
        grid: &Grid,
        start: Point,
        goal: Point,
    ) -> Result<Path, SearchError> {
        self.find_path(grid, start, goal, &Metric::Manhattan)
    }
}

impl Grid {
    /// Shortest path on this grid with default settings and the Manhattan
    /// heuristic. See [`Pathfinder::find_path`].
    pub fn find_path(&self, start: Point, goal: Point) -> Result<Path, SearchError> {
        find_path(self, start, goal)
    }
}

/// One-off search with default settings and the Manhattan heuristic.
///
/// The state table is allocated for this call and dropped afterwards.
///
/// ```
/// use gridpath::{Grid, Point, find_path};
///
/// let mut grid = Grid::new(10, 10);
/// grid.set_walkable(Point::new(4, 4), false).unwrap();
/// let path = find_path(&grid, Point::new(0, 0), Point::new(9, 9)).unwrap();
/// assert_eq!(path.goal(), Some(Point::new(9, 9)));
/// ```
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Result<Path, SearchError> {
    Pathfinder::new().find_path_default(grid, start, goal)
}

/// One-off search with default settings and a caller-supplied heuristic.
pub fn find_path_with<H: Heuristic + ?Sized>(
    grid: &Grid,
    start: Point,
    goal: Point,
    heuristic: &H,
) -> Result<Path, SearchError> {
    Pathfinder::new().find_path(grid, start, goal, heuristic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::grid::GridError;
    use crate::heuristic::{chebyshev, euclidean, octile};
    use rand::{RngExt, SeedableRng};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// Bellman-Ford style relaxation over every cell until nothing changes.
    fn reference_cost(grid: &Grid, start: Point, goal: Point, cfg: &SearchConfig) -> Option<f32> {
        let rng = grid.bounds();
        let mut dist = vec![f32::INFINITY; grid.len()];
        dist[rng.index_of(start).unwrap()] = 0.0;
        loop {
            let mut changed = false;
            for cp in rng.iter() {
                let d = dist[rng.index_of(cp).unwrap()];
                if !d.is_finite() {
                    continue;
                }
                for np in cp.neighbors_8() {
                    let Some(ni) = rng.index_of(np) else {
                        continue;
                    };
                    let diagonal = cp.is_diagonal_to(np);
                    if !grid.is_walkable(np).unwrap() || (diagonal && !cfg.diagonals) {
                        continue;
                    }
                    let nd = d + cfg.step_cost(diagonal);
                    if nd < dist[ni] {
                        dist[ni] = nd;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        let d = dist[rng.index_of(goal).unwrap()];
        d.is_finite().then_some(d)
    }

    /// Checks adjacency, walkability, parent links and accumulated cost.
    fn assert_valid(grid: &Grid, start: Point, path: &Path, cfg: &SearchConfig) {
        let mut prev = start;
        let mut g = 0.0;
        for n in path {
            let (dx, dy) = prev.abs_delta(n.pos);
            assert!(dx <= 1 && dy <= 1 && (dx, dy) != (0, 0), "{prev} -> {} not a step", n.pos);
            assert!(grid.is_walkable(n.pos).unwrap(), "{} is blocking", n.pos);
            assert_eq!(n.parent, Some(prev));
            g += cfg.step_cost(prev.is_diagonal_to(n.pos));
            assert_eq!(n.g, g);
            assert_eq!(n.f, n.g + n.h);
            prev = n.pos;
        }
        assert_eq!(path.cost(), g);
    }

    fn random_grid(seed: u64, w: i32, h: i32, blocked_pct: u32) -> Grid {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(w, h);
        for pt in grid.bounds().iter() {
            if rng.random_range(0..100) < blocked_pct {
                grid.set_walkable(pt, false).unwrap();
            }
        }
        grid
    }

    #[test]
    fn open_grid_diagonal() {
        let grid = Grid::new(10, 10);
        let path = grid.find_path(p(0, 0), p(9, 9)).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 13.5);
        let expected: Vec<Point> = (1..=9).map(|i| p(i, i)).collect();
        assert_eq!(path.positions().collect::<Vec<_>>(), expected);
        assert_valid(&grid, p(0, 0), &path, &SearchConfig::default());
    }

    #[test]
    fn wall_with_single_gap() {
        let mut grid = Grid::new(10, 10);
        for y in 0..10 {
            if y != 5 {
                grid.set_walkable(p(5, y), false).unwrap();
            }
        }
        let path = grid.find_path(p(0, 0), p(9, 9)).unwrap();
        assert!(path.positions().any(|q| q == p(5, 5)));
        assert_eq!(path.goal(), Some(p(9, 9)));
        assert_valid(&grid, p(0, 0), &path, &SearchConfig::default());
    }

    #[test]
    fn start_equals_goal_is_empty() {
        let grid = Grid::new(3, 3);
        let path = grid.find_path(p(1, 1), p(1, 1)).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
        assert_eq!(path.expanded(), 0);
    }

    #[test]
    fn blocking_goal_is_unreachable() {
        let mut grid = Grid::new(5, 5);
        grid.set_walkable(p(4, 4), false).unwrap();
        let path = grid.find_path(p(0, 0), p(4, 4)).unwrap();
        assert!(path.is_empty());
        // Everything else was explored before giving up.
        assert_eq!(path.expanded(), 24);
    }

    #[test]
    fn blocking_start_still_searches() {
        let mut grid = Grid::new(3, 1);
        grid.set_walkable(p(0, 0), false).unwrap();
        let path = grid.find_path(p(0, 0), p(2, 0)).unwrap();
        assert_eq!(path.positions().collect::<Vec<_>>(), vec![p(1, 0), p(2, 0)]);
    }

    #[test]
    fn disconnected_regions() {
        let mut grid = Grid::new(7, 5);
        for y in 0..5 {
            grid.set_walkable(p(3, y), false).unwrap();
        }
        let path = grid.find_path(p(0, 2), p(6, 2)).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.expanded(), 15);
    }

    #[test]
    fn manhattan_and_euclidean_agree_on_cost() {
        let grid = Grid::new(10, 10);
        let (s, g) = (p(0, 0), p(9, 4));
        let mut pf = Pathfinder::new();
        let by_manhattan = pf.find_path(&grid, s, g, &Metric::Manhattan).unwrap();
        let by_euclid = pf.find_path(&grid, s, g, &Metric::Euclidean).unwrap();
        assert_eq!(by_manhattan.cost(), 11.0);
        assert_eq!(by_euclid.cost(), 11.0);
        assert_eq!(
            reference_cost(&grid, s, g, &SearchConfig::default()),
            Some(11.0)
        );
    }

    #[test]
    fn deterministic() {
        let grid = random_grid(7, 20, 20, 25);
        let (s, g) = (p(0, 0), p(19, 19));
        let mut pf = Pathfinder::new();
        let a = pf.find_path(&grid, s, g, &Metric::Euclidean).unwrap();
        let b = pf.find_path(&grid, s, g, &Metric::Euclidean).unwrap();
        let c = Pathfinder::new().find_path(&grid, s, g, &Metric::Euclidean).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn reset_isolation() {
        let mut grid = Grid::new(12, 12);
        for y in 2..12 {
            grid.set_walkable(p(6, y), false).unwrap();
        }
        let mut pf = Pathfinder::new();
        let first = pf.find_path_default(&grid, p(0, 11), p(11, 11)).unwrap();
        assert!(!first.is_empty());
        assert!(pf.record(p(6, 0)).is_some());

        let second = pf.find_path_default(&grid, p(11, 0), p(10, 0)).unwrap();
        let fresh = Pathfinder::new().find_path_default(&grid, p(11, 0), p(10, 0)).unwrap();
        assert_eq!(second, fresh);
        // Cells only the first search touched are unvisited now.
        assert!(pf.record(p(0, 10)).is_none());

        pf.reset();
        assert!(pf.record(p(10, 0)).is_none());
    }

    #[test]
    fn record_exposes_search_state() {
        let grid = Grid::new(5, 1);
        let mut pf = Pathfinder::new();
        pf.find_path_default(&grid, p(0, 0), p(3, 0)).unwrap();
        let start = pf.record(p(0, 0)).unwrap();
        assert_eq!((start.g, start.h, start.parent), (0.0, 3.0, None));
        let mid = pf.record(p(2, 0)).unwrap();
        assert_eq!((mid.g, mid.h, mid.f, mid.parent), (2.0, 1.0, 3.0, Some(p(1, 0))));
        assert!(pf.record(p(9, 0)).is_none());
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let grid = Grid::new(4, 4);
        for (s, g) in [(p(-1, 0), p(1, 1)), (p(0, 0), p(4, 0)), (p(0, 0), p(0, 4))] {
            match grid.find_path(s, g) {
                Err(SearchError::OutOfBounds(GridError::OutOfBounds { width: 4, height: 4, .. })) => {}
                other => panic!("expected OutOfBounds, got {other:?}"),
            }
        }
    }

    #[test]
    fn orthogonal_only() {
        let grid = Grid::new(5, 5);
        let cfg = SearchConfig::default().with_diagonals(false);
        let mut pf = Pathfinder::with_config(cfg).unwrap();
        let path = pf.find_path_default(&grid, p(0, 0), p(4, 4)).unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.cost(), 8.0);
        assert_valid(&grid, p(0, 0), &path, &cfg);
        let mut prev = p(0, 0);
        for q in path.positions() {
            assert!(!prev.is_diagonal_to(q));
            prev = q;
        }
    }

    #[test]
    fn expansion_limit() {
        let grid = Grid::new(50, 50);
        let mut pf = Pathfinder::with_config(SearchConfig::default().with_max_expansions(10)).unwrap();
        let err = pf.find_path(&grid, p(0, 0), p(49, 49), &|_: Point, _: Point| 0.0_f32);
        assert_eq!(err, Err(SearchError::LimitReached { expanded: 10 }));
        // A neighbour of the start is found well within the limit.
        assert_eq!(pf.find_path_default(&grid, p(0, 0), p(1, 1)).unwrap().len(), 1);
    }

    #[test]
    fn zero_cost_steps() {
        let grid = Grid::new(4, 1);
        let mut pf = Pathfinder::with_config(SearchConfig::default().with_costs(0.0, 0.0)).unwrap();
        let path = pf.find_path_default(&grid, p(0, 0), p(3, 0)).unwrap();
        assert_eq!(path.positions().collect::<Vec<_>>(), vec![p(1, 0), p(2, 0), p(3, 0)]);
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn nan_estimate_still_finds_a_path() {
        let nan = |_: Point, _: Point| f32::NAN;
        let path = find_path_with(&Grid::new(3, 1), p(0, 0), p(2, 0), &nan).unwrap();
        assert_eq!(path.positions().collect::<Vec<_>>(), vec![p(1, 0), p(2, 0)]);
        assert_eq!(path.expanded(), 2);

        let path = find_path_with(&Grid::new(4, 4), p(0, 0), p(3, 3), &nan).unwrap();
        assert_eq!(path.goal(), Some(p(3, 3)));
    }

    #[test]
    fn improved_open_node_keeps_its_tie_break_place() {
        // (1,1) opens diagonally from the start at g=3, then drops to g=2
        // via (1,0) and ties with (2,0), which opened after it.
        let grid = Grid::new(3, 3);
        let cfg = SearchConfig::default().with_costs(1.0, 3.0);
        let mut pf = Pathfinder::with_config(cfg).unwrap();
        let zero = |_: Point, _: Point| 0.0_f32;
        let path = pf.find_path(&grid, p(0, 0), p(2, 2), &zero).unwrap();

        assert_eq!(
            path.positions().collect::<Vec<_>>(),
            vec![p(1, 0), p(1, 1), p(2, 1), p(2, 2)]
        );
        assert_eq!(path.cost(), 4.0);
        let east = pf.record(p(2, 1)).unwrap();
        assert_eq!(east.parent, Some(p(1, 1)));
        assert_eq!(east.g, 3.0);
        assert_valid(&grid, p(0, 0), &path, &cfg);
    }

    #[test]
    fn optimal_on_random_grids() {
        let heuristics: [(&str, &dyn Heuristic); 4] = [
            ("euclidean", &euclidean),
            ("chebyshev", &chebyshev),
            ("octile", &octile),
            ("zero", &|_: Point, _: Point| 0.0_f32),
        ];
        let cfg = SearchConfig::default();
        let mut pf = Pathfinder::new();
        let (s, g) = (p(0, 0), p(13, 11));
        for seed in 0..20 {
            let mut grid = random_grid(seed, 14, 12, 30);
            grid.set_walkable(s, true).unwrap();
            grid.set_walkable(g, true).unwrap();
            let expected = reference_cost(&grid, s, g, &cfg);
            for (name, h) in heuristics {
                let path = pf.find_path(&grid, s, g, h).unwrap();
                match expected {
                    Some(cost) => {
                        assert_eq!(path.cost(), cost, "seed {seed}, {name}");
                        assert_valid(&grid, s, &path, &cfg);
                    }
                    None => assert!(path.is_empty(), "seed {seed}, {name}"),
                }
            }
        }
    }

    #[test]
    fn manhattan_optimal_without_diagonals() {
        let cfg = SearchConfig::default().with_diagonals(false);
        let mut pf = Pathfinder::with_config(cfg).unwrap();
        let (s, g) = (p(0, 0), p(15, 15));
        for seed in 100..110 {
            let mut grid = random_grid(seed, 16, 16, 25);
            grid.set_walkable(s, true).unwrap();
            grid.set_walkable(g, true).unwrap();
            let path = pf.find_path_default(&grid, s, g).unwrap();
            match reference_cost(&grid, s, g, &cfg) {
                Some(cost) => assert_eq!(path.cost(), cost, "seed {seed}"),
                None => assert!(path.is_empty(), "seed {seed}"),
            }
        }
    }

    #[test]
    fn concurrent_searches_share_grid() {
        let mut grid = random_grid(3, 40, 40, 20);
        let (s, g) = (p(1, 1), p(38, 38));
        grid.set_walkable(s, true).unwrap();
        grid.set_walkable(g, true).unwrap();
        let expected = find_path_with(&grid, s, g, &Metric::Octile).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut pf = Pathfinder::new();
                        pf.find_path(&grid, s, g, &Metric::Octile).unwrap()
                    })
                })
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn reuse_across_grid_sizes() {
        let mut pf = Pathfinder::new();
        let big = Grid::new(20, 20);
        let small = Grid::from_ascii("...\n.#.\n...").unwrap();
        pf.find_path_default(&big, p(0, 0), p(19, 19)).unwrap();
        let path = pf.find_path_default(&small, p(0, 1), p(2, 1)).unwrap();
        assert_eq!(path.cost(), 3.0);
        assert_valid(&small, p(0, 1), &path, pf.config());
    }
}
