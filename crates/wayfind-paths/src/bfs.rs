use std::collections::VecDeque;

use crate::path::PathNode;
use crate::traits::Pather;

/// Breadth-first search from `source`, each step costing 1.
///
/// Returns every reached node (the source first) in visiting order. Empty
/// if `source` is not a node.
pub fn bfs_map<P: Pather>(pather: &P, source: P::Node) -> Vec<PathNode<P::Node>> {
    let mut results = Vec::new();
    let Some(si) = pather.index(source) else {
        return results;
    };

    let mut seen = vec![false; pather.capacity()];
    let mut queue: VecDeque<(P::Node, i64)> = VecDeque::new();
    seen[si] = true;
    queue.push_back((source, 0));

    let mut nbuf = Vec::with_capacity(8);

    while let Some((cn, dist)) = queue.pop_front() {
        results.push(PathNode { node: cn, cost: dist });

        nbuf.clear();
        pather.neighbors(cn, &mut nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = pather.index(np) else {
                continue;
            };
            if seen[ni] {
                continue;
            }
            seen[ni] = true;
            queue.push_back((np, dist + 1));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, NodeId};

    #[test]
    fn counts_hops_not_weights() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(NodeId(0), NodeId(1), 50).unwrap();
        g.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        g.add_edge(NodeId(0), NodeId(2), 99).unwrap();

        let reached = bfs_map(&g, NodeId(0));
        assert_eq!(reached.len(), 3);
        assert_eq!(reached[0], PathNode { node: NodeId(0), cost: 0 });
        assert!(reached.iter().all(|r| r.cost <= 1));
        assert!(!reached.iter().any(|r| r.node == NodeId(3)));
    }

    #[test]
    fn unknown_source_reaches_nothing() {
        let g = Graph::with_nodes(2);
        assert!(bfs_map(&g, NodeId(8)).is_empty());
    }
}
