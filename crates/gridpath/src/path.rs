use gridpath_geom::Point;

use crate::node::PathNode;

/// Result of a search: the cells to walk from start to goal.
///
/// The start cell is not included; the goal cell is the last element. A
/// path is empty when the goal is unreachable or equal to the start.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    nodes: Vec<PathNode>,
    expanded: usize,
}

impl Path {
    pub(crate) fn new(nodes: Vec<PathNode>, expanded: usize) -> Self {
        Self { nodes, expanded }
    }

    /// Steps in walking order.
    #[inline]
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<PathNode> {
        self.nodes
    }

    /// Coordinates in walking order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.pos)
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total movement cost, i.e. the goal's `g`. Zero for an empty path.
    pub fn cost(&self) -> f32 {
        self.nodes.last().map_or(0.0, |n| n.g)
    }

    /// Last cell of the path.
    pub fn goal(&self) -> Option<Point> {
        self.nodes.last().map(|n| n.pos)
    }

    /// Nodes taken off the open set during the search that produced this path.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathNode;
    type IntoIter = std::slice::Iter<'a, PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
