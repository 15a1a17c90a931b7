//! Random weighted graphs for the interactive shortest-path board.

use std::fmt;

use rand::{Rng, RngExt};
use wayfind_paths::{Graph, GraphError, NodeId};

/// Largest node count [`random_graph`] accepts.
pub const MAX_NODES: u32 = 1 << 16;

/// Parameters for [`random_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphGenConfig {
    pub min_nodes: u32,
    pub max_nodes: u32,
    /// Weights are drawn from `1..=max_weight`.
    pub max_weight: i32,
}

impl Default for GraphGenConfig {
    fn default() -> Self {
        Self {
            min_nodes: 5,
            max_nodes: 10,
            max_weight: 20,
        }
    }
}

/// A random graph with a chosen start and end node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPuzzle {
    pub graph: Graph,
    pub start: NodeId,
    pub end: NodeId,
}

/// Build a random graph.
///
/// Node count is uniform in `[min_nodes, max_nodes]`. Then between `n` and
/// `3n - 1` random pairs of distinct nodes are linked with a random weight;
/// a pair drawn twice keeps the later weight. Start and end are distinct.
pub fn random_graph<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GraphGenConfig,
) -> Result<GraphPuzzle, GraphGenError> {
    if config.min_nodes < 2
        || config.min_nodes > config.max_nodes
        || config.max_nodes > MAX_NODES
    {
        return Err(GraphGenError::NodeRange {
            min: config.min_nodes,
            max: config.max_nodes,
        });
    }
    if config.max_weight < 1 {
        return Err(GraphGenError::MaxWeight(config.max_weight));
    }

    let n = rng.random_range(config.min_nodes..=config.max_nodes);
    let mut graph = Graph::with_nodes(n as usize);
    let attempts = rng.random_range(n..3 * n);
    for _ in 0..attempts {
        let (a, b) = distinct_pair(rng, n);
        let weight = rng.random_range(1..=config.max_weight);
        graph.add_edge(a, b, weight)?;
    }
    let (start, end) = distinct_pair(rng, n);
    Ok(GraphPuzzle { graph, start, end })
}

/// Two different nodes of `0..n`, uniformly. `n` must be at least 2.
fn distinct_pair<R: Rng + ?Sized>(rng: &mut R, n: u32) -> (NodeId, NodeId) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (NodeId(a), NodeId(b))
}

/// Invalid [`GraphGenConfig`] or a rejected edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphGenError {
    /// Needs `2 <= min <= max <= MAX_NODES`.
    NodeRange { min: u32, max: u32 },
    MaxWeight(i32),
    Graph(GraphError),
}

impl From<GraphError> for GraphGenError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl fmt::Display for GraphGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeRange { min, max } => write!(
                f,
                "graph gen: node range {min}..={max} needs 2 <= min <= max <= {MAX_NODES}"
            ),
            Self::MaxWeight(w) => write!(f, "graph gen: max weight {w} must be positive"),
            Self::Graph(e) => write!(f, "graph gen: {e}"),
        }
    }
}

impl std::error::Error for GraphGenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}
