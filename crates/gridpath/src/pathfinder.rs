use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use gridpath_geom::{Point, Range};

use crate::config::SearchConfig;
use crate::grid::{Grid, GridError};
use crate::node::PathNode;

/// Parent index of a record with no predecessor.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-search records
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Open,
    Closed,
}

/// Search state for one cell. Only meaningful when `generation` matches the
/// pathfinder's current generation; any other record is unvisited.
#[derive(Clone, Debug)]
pub(crate) struct Record {
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) f: f32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) seq: u64,
    pub(crate) status: Status,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: NO_PARENT,
            generation: 0,
            seq: 0,
            status: Status::Open,
        }
    }
}

/// Open-set entry. Lowest `f` first, then lowest insertion sequence.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: f32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Runs A* searches over a [`Grid`].
///
/// A `Pathfinder` owns the per-search state (costs, parent links, open set),
/// so the grid itself is only borrowed immutably. Reuse one pathfinder for
/// repeated queries to avoid reallocating; give each thread its own to search
/// a shared grid concurrently.
///
/// State from one search never leaks into the next: every call starts a new
/// generation, which marks all records from earlier calls as unvisited.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    pub(crate) config: SearchConfig,
    pub(crate) records: Vec<Record>,
    pub(crate) generation: u32,
    pub(crate) open: BinaryHeap<OpenEntry>,
    pub(crate) next_seq: u64,
    // bounds of the grid searched last, for `record` lookups
    pub(crate) last_bounds: Range,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pathfinder {
    /// A pathfinder with [`SearchConfig::default`].
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
            records: Vec::new(),
            generation: 0,
            open: BinaryHeap::new(),
            next_seq: 0,
            last_bounds: Range::default(),
        }
    }

    pub fn with_config(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) -> Result<(), SearchError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Clear every record back to `g = h = f = 0`, no parent, unvisited.
    ///
    /// Searches do this lazily on their own; calling it is only needed to
    /// drop the results of the last search from [`record`](Self::record).
    pub fn reset(&mut self) {
        for r in &mut self.records {
            *r = Record::default();
        }
        self.generation = 0;
        self.open.clear();
        self.next_seq = 0;
    }

    /// Search record of `p` from the most recent search, if that search
    /// reached it.
    pub fn record(&self, p: Point) -> Option<PathNode> {
        let idx = self.last_bounds.index_of(p)?;
        let r = self.records.get(idx)?;
        if self.generation == 0 || r.generation != self.generation {
            return None;
        }
        Some(PathNode {
            pos: p,
            g: r.g,
            h: r.h,
            f: r.f,
            parent: (r.parent != NO_PARENT).then(|| self.last_bounds.point_at(r.parent)),
        })
    }

    /// Prepare the state table for a search over `grid` and return the new
    /// generation.
    pub(crate) fn begin(&mut self, grid: &Grid) -> u32 {
        if self.records.len() < grid.len() {
            self.records.resize(grid.len(), Record::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could alias the new generation.
            for r in &mut self.records {
                r.generation = 0;
            }
            self.generation = 1;
        }
        self.open.clear();
        self.next_seq = 0;
        self.last_bounds = grid.bounds();
        self.generation
    }

    #[inline]
    pub(crate) fn take_seq(&mut self) -> u64 {
        let s = self.next_seq;
        self.next_seq += 1;
        s
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from a path search. An unreachable goal is not an error; it yields
/// an empty [`Path`](crate::Path).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Start or goal lies outside the grid.
    OutOfBounds(GridError),
    /// A step cost in the [`SearchConfig`] is negative or not finite.
    InvalidCost { name: &'static str, value: f32 },
    /// `max_expansions` was reached before the search finished.
    LimitReached { expanded: usize },
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::OutOfBounds(e)
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(e) => write!(f, "search: invalid endpoint: {e}"),
            Self::InvalidCost { name, value } => {
                write!(f, "search: {name} must be finite and non-negative, got {value}")
            }
            Self::LimitReached { expanded } => {
                write!(f, "search: gave up after expanding {expanded} nodes")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(e) => Some(e),
            _ => None,
        }
    }
}
