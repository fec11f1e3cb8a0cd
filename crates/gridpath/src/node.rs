use gridpath_geom::Point;

/// Whether a cell can be entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    #[default]
    Walkable,
    Blocking,
}

impl NodeState {
    #[inline]
    pub fn is_walkable(self) -> bool {
        self == NodeState::Walkable
    }
}

impl From<bool> for NodeState {
    /// `true` maps to [`NodeState::Walkable`].
    fn from(walkable: bool) -> Self {
        if walkable {
            NodeState::Walkable
        } else {
            NodeState::Blocking
        }
    }
}

/// One cell of a [`Grid`](crate::Grid).
///
/// A node only carries topology. Search costs live in the
/// [`Pathfinder`](crate::Pathfinder) that is running the query, so a grid can
/// be shared by several searches at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pos: Point,
    pub state: NodeState,
}

impl Node {
    /// A walkable node at `pos`.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            state: NodeState::Walkable,
        }
    }

    /// Grid coordinate of this node. Fixed for the node's lifetime.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.state.is_walkable()
    }

    #[inline]
    pub fn set_walkable(&mut self, walkable: bool) {
        self.state = walkable.into();
    }
}

/// Snapshot of a node's search record, as returned along a [`Path`](crate::Path).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    /// Accumulated movement cost from the start.
    pub g: f32,
    /// Heuristic estimate to the goal.
    pub h: f32,
    /// `g + h`.
    pub f: f32,
    /// Predecessor on the path; the start cell for the first step.
    pub parent: Option<Point>,
}
