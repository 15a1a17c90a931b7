//! Single-source shortest paths (Dijkstra) with optional early exit.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

use crate::path::{Path, PathNode};
use crate::traits::WeightedPather;

const NOT_REACHED: i64 = i64::MAX;
const NO_PARENT: usize = usize::MAX;

/// Reference into the distance table, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    dist: i64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest (dist, idx) first.
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A resumable Dijkstra run from one source.
///
/// Each call to [`next`](Iterator::next) selects the unvisited node with the
/// smallest tentative distance (ties go to the smallest dense index), removes
/// it from the unvisited set, relaxes its unvisited neighbours and yields it
/// with its final distance. Nodes that were never reached are not yielded.
///
/// When a stop node is given, it is yielded last and its neighbours are not
/// relaxed. Distances of nodes that were not yielded may then be
/// over-estimates.
pub struct Search<'a, P: WeightedPather> {
    pather: &'a P,
    source: P::Node,
    stop: Option<P::Node>,
    stop_idx: Option<usize>,
    dist: Vec<i64>,
    parent: Vec<usize>,
    settled: Vec<bool>,
    open: BinaryHeap<NodeRef>,
    nbuf: Vec<P::Node>,
    steps: usize,
    done: bool,
}

impl<'a, P: WeightedPather> Search<'a, P> {
    /// Start a search from `source`, optionally stopping once `stop` is
    /// selected.
    pub fn new(
        pather: &'a P,
        source: P::Node,
        stop: Option<P::Node>,
    ) -> Result<Self, PathError<P::Node>> {
        let src_idx = pather
            .index(source)
            .ok_or(PathError::UnknownSource(source))?;
        let stop_idx = match stop {
            Some(s) => Some(pather.index(s).ok_or(PathError::UnknownStop(s))?),
            None => None,
        };

        let len = pather.capacity();
        let mut dist = vec![NOT_REACHED; len];
        dist[src_idx] = 0;
        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            idx: src_idx,
            dist: 0,
        });

        Ok(Self {
            pather,
            source,
            stop,
            stop_idx,
            dist,
            parent: vec![NO_PARENT; len],
            settled: vec![false; len],
            open,
            nbuf: Vec::with_capacity(8),
            steps: 0,
            done: false,
        })
    }

    /// Whether the search has terminated.
    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Current tentative distance of `n`, `None` while unreached.
    pub fn distance(&self, n: P::Node) -> Option<i64> {
        let i = self.pather.index(n)?;
        let d = self.dist[i];
        (d != NOT_REACHED).then_some(d)
    }

    /// Run to completion and return the distance/predecessor table.
    pub fn finish(mut self) -> ShortestPaths<P::Node> {
        for _ in self.by_ref() {}
        log::trace!(
            "dijkstra from {:?}: {} nodes selected, stop {:?}",
            self.source,
            self.steps,
            self.stop
        );
        table(self.pather, self.source, self.stop, &self.dist, &self.parent)
    }
}

impl<P: WeightedPather> Iterator for Search<'_, P> {
    type Item = PathNode<P::Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(current) = self.open.pop() {
            let ci = current.idx;
            // Skip stale entries.
            if self.settled[ci] || current.dist != self.dist[ci] {
                continue;
            }
            let Some(cn) = self.pather.node(ci) else {
                continue;
            };
            let current_dist = current.dist;
            self.steps += 1;

            if self.stop_idx == Some(ci) {
                self.done = true;
                return Some(PathNode {
                    node: cn,
                    cost: current_dist,
                });
            }

            self.settled[ci] = true;

            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            self.pather.neighbors(cn, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.pather.index(np) else {
                    continue;
                };
                if self.settled[ni] {
                    continue;
                }
                let tentative = current_dist + i64::from(self.pather.cost(cn, np));
                if tentative < self.dist[ni] {
                    self.dist[ni] = tentative;
                    self.parent[ni] = ci;
                    self.open.push(NodeRef {
                        idx: ni,
                        dist: tentative,
                    });
                }
            }

            self.nbuf = nbuf;
            return Some(PathNode {
                node: cn,
                cost: current_dist,
            });
        }

        self.done = true;
        None
    }
}

/// Build the public table from the dense working arrays.
fn table<P: WeightedPather>(
    pather: &P,
    source: P::Node,
    stop: Option<P::Node>,
    dist: &[i64],
    parent: &[usize],
) -> ShortestPaths<P::Node> {
    let mut entries = BTreeMap::new();
    for i in 0..pather.capacity() {
        let Some(n) = pather.node(i) else {
            continue;
        };
        let distance = (dist[i] != NOT_REACHED).then_some(dist[i]);
        let predecessor = match parent[i] {
            NO_PARENT => None,
            p => pather.node(p),
        };
        entries.insert(
            n,
            Entry {
                distance,
                predecessor,
            },
        );
    }
    ShortestPaths {
        source,
        stop,
        entries,
    }
}

// ---------------------------------------------------------------------------
// ShortestPaths
// ---------------------------------------------------------------------------

/// Distance and predecessor of one node after a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<N> {
    /// `None` means the node was not reached.
    pub distance: Option<i64>,
    pub predecessor: Option<N>,
}

/// Result of a single-source shortest-path computation.
///
/// Holds an [`Entry`] for every node of the searched graph. The source has
/// distance 0 and no predecessor; any reached node has a predecessor chain
/// back to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths<N> {
    source: N,
    stop: Option<N>,
    entries: BTreeMap<N, Entry<N>>,
}

impl<N: Copy + Ord + fmt::Debug> ShortestPaths<N> {
    /// Run Dijkstra from `source` to completion, or until `stop` is selected.
    pub fn compute<P>(pather: &P, source: N, stop: Option<N>) -> Result<Self, PathError<N>>
    where
        P: WeightedPather<Node = N>,
    {
        Ok(Search::new(pather, source, stop)?.finish())
    }

    /// Reference O(V²) variant: every iteration scans the unvisited nodes in
    /// ascending index order for the first one with minimum distance.
    ///
    /// Produces exactly the same table as [`compute`](Self::compute).
    pub fn compute_scan<P>(pather: &P, source: N, stop: Option<N>) -> Result<Self, PathError<N>>
    where
        P: WeightedPather<Node = N>,
    {
        let src_idx = pather
            .index(source)
            .ok_or(PathError::UnknownSource(source))?;
        let stop_idx = match stop {
            Some(s) => Some(pather.index(s).ok_or(PathError::UnknownStop(s))?),
            None => None,
        };

        let len = pather.capacity();
        let mut dist = vec![NOT_REACHED; len];
        let mut parent = vec![NO_PARENT; len];
        let mut unvisited: Vec<bool> = (0..len).map(|i| pather.node(i).is_some()).collect();
        dist[src_idx] = 0;
        let mut nbuf = Vec::with_capacity(8);

        loop {
            let mut current: Option<usize> = None;
            for i in 0..len {
                if unvisited[i]
                    && dist[i] != NOT_REACHED
                    && current.is_none_or(|c| dist[i] < dist[c])
                {
                    current = Some(i);
                }
            }
            let Some(ci) = current else {
                break;
            };
            if stop_idx == Some(ci) {
                break;
            }
            unvisited[ci] = false;
            let Some(cn) = pather.node(ci) else {
                continue;
            };

            nbuf.clear();
            pather.neighbors(cn, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = pather.index(np) else {
                    continue;
                };
                if !unvisited[ni] {
                    continue;
                }
                let alt = dist[ci] + i64::from(pather.cost(cn, np));
                if alt < dist[ni] {
                    dist[ni] = alt;
                    parent[ni] = ci;
                }
            }
        }

        Ok(table(pather, source, stop, &dist, &parent))
    }

    pub fn source(&self) -> N {
        self.source
    }

    /// The stop node the search was given, if any.
    pub fn stop(&self) -> Option<N> {
        self.stop
    }

    /// Entry of `n`, `None` if `n` was not a node of the searched graph.
    pub fn entry(&self, n: N) -> Option<&Entry<N>> {
        self.entries.get(&n)
    }

    /// Distance from the source, `None` if `n` was not reached.
    pub fn distance(&self, n: N) -> Option<i64> {
        self.entries.get(&n)?.distance
    }

    pub fn predecessor(&self, n: N) -> Option<N> {
        self.entries.get(&n)?.predecessor
    }

    pub fn is_reached(&self, n: N) -> bool {
        self.distance(n).is_some()
    }

    /// Every reached node with its distance, in ascending node order.
    pub fn reached(&self) -> impl Iterator<Item = PathNode<N>> + '_ {
        self.entries.iter().filter_map(|(&node, e)| {
            e.distance.map(|cost| PathNode { node, cost })
        })
    }

    /// Number of nodes in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk predecessors from `target` back to the source.
    ///
    /// Returns `None` if `target` was not reached (or is not a node). A
    /// target equal to the source gives the single-node path of cost 0.
    pub fn path_to(&self, target: N) -> Option<Path<N>> {
        let cost = self.distance(target)?;
        let mut nodes = vec![target];
        let mut cur = target;
        while cur != self.source {
            cur = self.predecessor(cur)?;
            nodes.push(cur);
            if nodes.len() > self.entries.len() {
                return None;
            }
        }
        nodes.reverse();
        Some(Path::new(nodes, cost))
    }
}

/// Shortest path from `source` to `target`, stopping the search as soon as
/// `target` is selected.
///
/// `Ok(None)` means `target` is unreachable from `source`.
pub fn shortest_path<P: WeightedPather>(
    pather: &P,
    source: P::Node,
    target: P::Node,
) -> Result<Option<Path<P::Node>>, PathError<P::Node>> {
    let sp = ShortestPaths::compute(pather, source, Some(target))?;
    Ok(sp.path_to(target))
}

/// Invalid search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError<N> {
    /// The source is not a node of the graph.
    UnknownSource(N),
    /// The stop node is not a node of the graph.
    UnknownStop(N),
}

impl<N: fmt::Debug> fmt::Display for PathError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSource(n) => write!(f, "shortest path: unknown source node {n:?}"),
            Self::UnknownStop(n) => write!(f, "shortest path: unknown stop node {n:?}"),
        }
    }
}

impl<N: fmt::Debug> std::error::Error for PathError<N> {}
