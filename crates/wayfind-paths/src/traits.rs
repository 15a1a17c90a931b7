use std::fmt;

/// Minimal search interface: node indexing and neighbour enumeration.
///
/// Every node has a dense index below [`capacity`](Self::capacity). Slots
/// that are not nodes (walls on a grid) map to `None`. The shortest-path
/// engine breaks distance ties by ascending dense index.
pub trait Pather {
    type Node: Copy + Ord + fmt::Debug;

    /// Number of index slots.
    fn capacity(&self) -> usize;

    /// Dense index of `n`, or `None` if `n` is not a node.
    fn index(&self, n: Self::Node) -> Option<usize>;

    /// Node stored at dense index `i`, if any.
    fn node(&self, i: usize) -> Option<Self::Node>;

    /// Append neighbours of `n` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, n: Self::Node, buf: &mut Vec<Self::Node>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Self::Node, to: Self::Node) -> i32;
}
