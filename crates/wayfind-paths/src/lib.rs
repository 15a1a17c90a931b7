//! Weighted undirected graphs and single-source shortest paths.
//!
//! - **Graph model**: [`Graph`] stores nodes and positive-weight undirected
//!   edges, at most one edge per unordered pair.
//! - **Dijkstra**: [`Search`] runs the algorithm step by step,
//!   [`ShortestPaths`] holds the finished distance/predecessor table and
//!   reconstructs [`Path`]s.
//! - **BFS**: [`bfs_map`] for unweighted reachability.
//!
//! The algorithms are generic over [`Pather`] / [`WeightedPather`], so the
//! same engine runs on a [`Graph`] and on any grid that implements the
//! traits.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |

mod bfs;
mod dijkstra;
mod distance;
mod graph;
mod path;
mod traits;

pub use bfs::bfs_map;
pub use dijkstra::{Entry, PathError, Search, ShortestPaths, shortest_path};
pub use distance::manhattan;
pub use graph::{Graph, GraphError, NodeId};
pub use path::{Path, PathNode};
pub use traits::{Pather, WeightedPather};
