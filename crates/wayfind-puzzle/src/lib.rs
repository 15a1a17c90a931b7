//! Maze and graph puzzles built on the wayfind shortest-path engine.
//!
//! - [`mapgen`]: procedural maze generation ([`MazeGen`], [`generate_maze`])
//! - [`maze`]: the finished [`Maze`] and its reference solution
//! - [`levels`]: a reproducible set of levels ([`LevelSet`])
//! - [`trail`] and [`mod@score`]: the player's drawn route and how it scores
//! - [`graphgen`]: random boards for the weighted-graph visualizer

pub mod graphgen;
pub mod grid;
pub mod levels;
pub mod mapgen;
pub mod maze;
pub mod score;
pub mod trail;

pub use graphgen::{GraphGenConfig, GraphGenError, GraphPuzzle, MAX_NODES, random_graph};
pub use grid::{Grid, GridError, Tile};
pub use levels::{DEFAULT_LEVELS, Level, LevelSet};
pub use mapgen::{MazeConfig, MazeGen, generate_maze};
pub use maze::{Maze, MazeError};
pub use score::{Evaluation, score};
pub use trail::{Progress, Trail, TrailError};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seeded_maze_serializes_identically() {
        let a = generate_maze(32, 24, StdRng::seed_from_u64(8)).unwrap();
        let b = generate_maze(32, 24, StdRng::seed_from_u64(8)).unwrap();
        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        assert_eq!(ja, jb);
        let back: Maze = serde_json::from_str(&ja).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn config_round_trip() {
        let cfg = MazeConfig::new(40, 30);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
