/// A node with an associated cost, yielded by [`Search`](crate::Search) and
/// returned from [`bfs_map`](crate::bfs_map).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode<N> {
    pub node: N,
    pub cost: i64,
}

/// A route from a source to a destination.
///
/// The first node is the source and the last the destination; consecutive
/// nodes are adjacent in the graph the path was computed on. A path from a
/// node to itself holds that single node and costs 0.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<N> {
    nodes: Vec<N>,
    cost: i64,
}

impl<N: Copy> Path<N> {
    pub(crate) fn new(nodes: Vec<N>, cost: i64) -> Self {
        Self { nodes, cost }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Total edge weight along the path.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Number of moves, i.e. nodes minus one.
    pub fn steps(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<N> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<N> {
        self.nodes.last().copied()
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}
