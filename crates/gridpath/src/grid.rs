//! The walkability grid searched by [`Pathfinder`](crate::Pathfinder).

use std::fmt;

use gridpath_geom::{Point, Range};

use crate::node::{Node, NodeState};

/// Character for a walkable cell in the ASCII format.
pub const WALKABLE_CHAR: char = '.';
/// Character for a blocking cell in the ASCII format.
pub const BLOCKING_CHAR: char = '#';

/// A rectangular grid of [`Node`]s covering `[0, width) x [0, height)`.
///
/// The grid owns every node; nodes are created once in [`Grid::new`] and
/// only their [`NodeState`] changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Range,
    nodes: Vec<Node>,
}

impl Grid {
    /// Create a grid of walkable nodes. Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width, height);
        let nodes = bounds.iter().map(Node::new).collect();
        Self { bounds, nodes }
    }

    /// Build a grid from text: `.` is walkable, `#` is blocking, one line per
    /// row. Surrounding whitespace is ignored; every row must be the same
    /// width.
    ///
    /// ```
    /// use gridpath::{Grid, Point};
    ///
    /// let grid = Grid::from_ascii("..#\n.##\n...").unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert!(!grid.is_walkable(Point::new(2, 0)).unwrap());
    /// ```
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let rows: Vec<&str> = s.lines().map(str::trim_end).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(GridError::InconsistentSize(s.to_string()));
        }

        let (w, h) = ascii_size(width, rows.len())?;
        let mut grid = Grid::new(w, h);
        let cells = rows.iter().flat_map(|r| r.chars());
        for (pos, ch) in grid.bounds().iter().zip(cells) {
            let state = match ch {
                WALKABLE_CHAR => NodeState::Walkable,
                BLOCKING_CHAR => NodeState::Blocking,
                _ => return Err(GridError::InvalidRune { ch, pos }),
            };
            grid.set_state(pos, state)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The valid coordinate range.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of `p`, or `OutOfBounds`.
    #[inline]
    pub(crate) fn index(&self, p: Point) -> Result<usize, GridError> {
        self.bounds.index_of(p).ok_or(GridError::OutOfBounds {
            pos: p,
            width: self.width(),
            height: self.height(),
        })
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.bounds.point_at(idx)
    }

    /// The node at `p`.
    pub fn node(&self, p: Point) -> Result<&Node, GridError> {
        let i = self.index(p)?;
        Ok(&self.nodes[i])
    }

    /// The node at `(x, y)`.
    pub fn node_at(&self, x: i32, y: i32) -> Result<&Node, GridError> {
        self.node(Point::new(x, y))
    }

    pub fn node_mut(&mut self, p: Point) -> Result<&mut Node, GridError> {
        let i = self.index(p)?;
        Ok(&mut self.nodes[i])
    }

    pub fn set_state(&mut self, p: Point, state: NodeState) -> Result<(), GridError> {
        self.node_mut(p)?.state = state;
        Ok(())
    }

    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> Result<(), GridError> {
        self.set_state(p, walkable.into())
    }

    pub fn is_walkable(&self, p: Point) -> Result<bool, GridError> {
        Ok(self.node(p)?.is_walkable())
    }

    /// Set every node to `state`.
    pub fn fill(&mut self, state: NodeState) {
        for n in &mut self.nodes {
            n.state = state;
        }
    }

    /// Set each node's state from a function of its position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> NodeState) {
        for n in &mut self.nodes {
            n.state = f(n.pos());
        }
    }

    /// Nodes in row-major order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// In-bounds nodes adjacent to `p` (orthogonally or diagonally), in
    /// compass order N, NE, E, SE, S, SW, W, NW. Walkability is not filtered.
    pub fn neighbours(&self, p: Point) -> Result<impl Iterator<Item = &Node> + '_, GridError> {
        self.index(p)?;
        Ok(p.neighbors_8()
            .into_iter()
            .filter_map(move |np| self.bounds.index_of(np).map(|i| &self.nodes[i])))
    }

    /// Count of blocking nodes.
    pub fn blocking_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_walkable()).count()
    }
}

/// Grid dimensions for text of `width` columns and `height` rows.
fn ascii_size(width: usize, height: usize) -> Result<(i32, i32), GridError> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(GridError::TooLarge { width, height }),
    }
}

impl fmt::Display for Grid {
    /// Renders the format read by [`Grid::from_ascii`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width().max(1) as usize;
        for (i, row) in self.nodes.chunks(w).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for n in row {
                let ch = if n.is_walkable() { WALKABLE_CHAR } else { BLOCKING_CHAR };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors from grid access and construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// ASCII rows have different widths.
    InconsistentSize(String),
    /// A character other than `.` or `#` was found.
    InvalidRune { ch: char, pos: Point },
    /// ASCII input has more rows or columns than an `i32` coordinate holds.
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "grid: {pos} is outside a {width}x{height} grid")
            }
            Self::InconsistentSize(s) => write!(f, "grid: inconsistent row widths:\n{s}"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid: {width}x{height} text exceeds the coordinate range")
            }
        }
    }
}

impl std::error::Error for GridError {}
