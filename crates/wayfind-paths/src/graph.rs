//! Weighted undirected graph.

use std::collections::BTreeMap;
use std::fmt;

use crate::traits::{Pather, WeightedPather};

/// Opaque node identifier, stable for the node's lifetime.
///
/// Identifiers are handed out in ascending order by [`Graph::add_node`] and
/// are only reused after [`Graph::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weighted undirected graph.
///
/// At most one edge exists per unordered pair of nodes; re-adding a pair
/// overwrites its weight. Self-loops and non-positive weights are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GraphData", into = "GraphData"))]
pub struct Graph {
    // adj[a][b] == adj[b][a] == weight of the a-b edge
    adj: Vec<BTreeMap<NodeId, i32>>,
}

/// Serialized form of [`Graph`]. Every entry goes back through
/// [`Graph::add_edge`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GraphData {
    adj: Vec<BTreeMap<NodeId, i32>>,
}

#[cfg(feature = "serde")]
impl From<Graph> for GraphData {
    fn from(g: Graph) -> Self {
        Self { adj: g.adj }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GraphData> for Graph {
    type Error = GraphError;

    fn try_from(data: GraphData) -> Result<Self, GraphError> {
        let mut g = Graph::with_nodes(data.adj.len());
        for (i, links) in data.adj.iter().enumerate() {
            let a = NodeId(i as u32);
            for (&b, &w) in links {
                g.add_edge(a, b, w)?;
                let back = data.adj.get(b.index()).and_then(|m| m.get(&a));
                if back != Some(&w) {
                    return Err(GraphError::OneWay { from: a, to: b });
                }
            }
        }
        Ok(g)
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with `n` isolated nodes `0..n`.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            adj: vec![BTreeMap::new(); n],
        }
    }

    /// Add a new isolated node and return its identifier.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.adj.len() as u32);
        self.adj.push(BTreeMap::new());
        id
    }

    /// Insert the undirected edge `a`–`b`, or update its weight if the pair
    /// is already connected.
    ///
    /// Returns the previous weight of the pair, if any.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: i32) -> Result<Option<i32>, GraphError> {
        for n in [a, b] {
            if !self.contains(n) {
                return Err(GraphError::UnknownNode(n));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if weight <= 0 {
            return Err(GraphError::NonPositiveWeight { a, b, weight });
        }
        let prev = self.adj[a.index()].insert(b, weight);
        self.adj[b.index()].insert(a, weight);
        Ok(prev)
    }

    /// Weight of the `a`–`b` edge, if it exists.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<i32> {
        self.adj.get(a.index())?.get(&b).copied()
    }

    /// Whether `n` is a node of this graph.
    #[inline]
    pub fn contains(&self, n: NodeId) -> bool {
        n.index() < self.adj.len()
    }

    /// All nodes in ascending identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adj.len()).map(|i| NodeId(i as u32))
    }

    /// Neighbours of `n` with the connecting edge weight, in ascending
    /// identifier order. Empty if `n` is not a node.
    pub fn neighbors(&self, n: NodeId) -> impl Iterator<Item = (NodeId, i32)> + '_ {
        self.adj
            .get(n.index())
            .into_iter()
            .flat_map(|m| m.iter().map(|(&k, &w)| (k, w)))
    }

    /// Every edge once as `(a, b, weight)` with `a < b`, ascending.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, i32)> + '_ {
        self.nodes().flat_map(move |a| {
            self.neighbors(a)
                .filter(move |&(b, _)| a < b)
                .map(move |(b, w)| (a, b, w))
        })
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Remove every node and edge. Identifiers restart from 0.
    pub fn clear(&mut self) {
        self.adj.clear();
    }
}

impl Pather for Graph {
    type Node = NodeId;

    fn capacity(&self) -> usize {
        self.adj.len()
    }

    fn index(&self, n: NodeId) -> Option<usize> {
        self.contains(n).then_some(n.index())
    }

    fn node(&self, i: usize) -> Option<NodeId> {
        (i < self.adj.len()).then_some(NodeId(i as u32))
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        if let Some(m) = self.adj.get(n.index()) {
            buf.extend(m.keys().copied());
        }
    }
}

impl WeightedPather for Graph {
    fn cost(&self, from: NodeId, to: NodeId) -> i32 {
        // Only called for pairs reported by `neighbors`.
        self.weight(from, to).unwrap_or(i32::MAX)
    }
}

/// Rejected graph edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The identifier does not name a node of this graph.
    UnknownNode(NodeId),
    /// Both endpoints of the edge are the same node.
    SelfLoop(NodeId),
    /// Edge weights must be strictly positive.
    NonPositiveWeight { a: NodeId, b: NodeId, weight: i32 },
    /// Stored adjacency lists `from -> to` without the matching
    /// `to -> from` entry of the same weight.
    OneWay { from: NodeId, to: NodeId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(n) => write!(f, "graph: unknown node {n}"),
            Self::SelfLoop(n) => write!(f, "graph: self-loop on node {n}"),
            Self::NonPositiveWeight { a, b, weight } => {
                write!(f, "graph: edge {a}-{b} has non-positive weight {weight}")
            }
            Self::OneWay { from, to } => {
                write!(f, "graph: edge {from}-{to} is missing its reverse direction")
            }
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Graph, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_edge(a, b, 4).unwrap();
        g.add_edge(b, c, 1).unwrap();
        g.add_edge(a, c, 10).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn ids_are_sequential() {
        let mut g = Graph::new();
        assert_eq!(g.add_node(), NodeId(0));
        assert_eq!(g.add_node(), NodeId(1));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn edges_are_symmetric() {
        let (g, a, b, c) = triangle();
        assert_eq!(g.weight(a, b), Some(4));
        assert_eq!(g.weight(b, a), Some(4));
        assert_eq!(g.weight(c, a), Some(10));
        assert_eq!(g.edge_count(), 3);
        let ns: Vec<_> = g.neighbors(b).collect();
        assert_eq!(ns, vec![(a, 4), (c, 1)]);
    }

    #[test]
    fn duplicate_pair_updates_weight() {
        let (mut g, a, b, _) = triangle();
        assert_eq!(g.add_edge(b, a, 7), Ok(Some(4)));
        assert_eq!(g.weight(a, b), Some(7));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn rejects_bad_edges() {
        let (mut g, a, b, _) = triangle();
        assert_eq!(g.add_edge(a, a, 3), Err(GraphError::SelfLoop(a)));
        assert_eq!(
            g.add_edge(a, b, 0),
            Err(GraphError::NonPositiveWeight { a, b, weight: 0 })
        );
        assert!(matches!(
            g.add_edge(a, b, -2),
            Err(GraphError::NonPositiveWeight { weight: -2, .. })
        ));
        assert_eq!(
            g.add_edge(a, NodeId(9), 1),
            Err(GraphError::UnknownNode(NodeId(9)))
        );
        // Rejected edits leave the graph untouched.
        assert_eq!(g.weight(a, b), Some(4));
    }

    #[test]
    fn edges_listed_once() {
        let (g, a, b, c) = triangle();
        let es: Vec<_> = g.edges().collect();
        assert_eq!(es, vec![(a, b, 4), (a, c, 10), (b, c, 1)]);
    }

    #[test]
    fn clear_resets_ids() {
        let (mut g, ..) = triangle();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.add_node(), NodeId(0));
    }

    #[test]
    fn error_messages() {
        let e = GraphError::NonPositiveWeight {
            a: NodeId(1),
            b: NodeId(2),
            weight: 0,
        };
        assert_eq!(e.to_string(), "graph: edge 1-2 has non-positive weight 0");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn graph_round_trip() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(NodeId(0), NodeId(2), 5).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    fn load(json: &str) -> Result<Graph, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn one_way_edge_is_rejected() {
        let err = load(r#"{"adj":[{"1":5},{}]}"#).unwrap_err();
        assert!(err.to_string().contains("missing its reverse direction"));
        // Both directions present but disagreeing on the weight.
        assert!(load(r#"{"adj":[{"1":5},{"0":6}]}"#).is_err());
    }

    #[test]
    fn invalid_edges_are_rejected() {
        let err = load(r#"{"adj":[{"0":3}]}"#).unwrap_err();
        assert!(err.to_string().contains("self-loop"));
        let err = load(r#"{"adj":[{"1":0},{"0":0}]}"#).unwrap_err();
        assert!(err.to_string().contains("non-positive weight"));
        let err = load(r#"{"adj":[{"4":1},{}]}"#).unwrap_err();
        assert!(err.to_string().contains("unknown node 4"));
    }

    #[test]
    fn symmetric_table_loads() {
        let g = load(r#"{"adj":[{"1":5},{"0":5,"2":1},{"1":1}]}"#).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(NodeId(2), NodeId(1)), Some(1));
    }
}
