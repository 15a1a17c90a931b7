//! A fixed set of pre-generated maze levels.

use rand::SeedableRng;
use rand::rngs::StdRng;
use wayfind_core::Point;
use wayfind_paths::Path;

use crate::mapgen::{MazeConfig, MazeGen};
use crate::maze::{Maze, MazeError};

/// Number of levels in a standard game.
pub const DEFAULT_LEVELS: usize = 10;

/// One level: a maze and its reference shortest route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// 1-based level number.
    pub number: usize,
    pub maze: Maze,
    pub solution: Path<Point>,
}

impl Level {
    /// Build level `number` from the set seed.
    pub fn generate(config: &MazeConfig, seed: u64, number: usize) -> Result<Self, MazeError> {
        let rng = StdRng::seed_from_u64(level_seed(seed, number));
        let maze = MazeGen::new(config.clone(), rng).generate()?;
        let solution = maze.solve()?.ok_or(MazeError::Unsolvable)?;
        log::debug!(
            "level {number}: optimal route {} steps, cost {}",
            solution.steps(),
            solution.cost()
        );
        Ok(Self {
            number,
            maze,
            solution,
        })
    }
}

/// Seed for a single level. Levels never share RNG state, so they can be
/// generated in any order or in parallel.
pub fn level_seed(seed: u64, number: usize) -> u64 {
    seed ^ (number as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// All levels of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    /// Generate levels `1..=count`.
    pub fn generate(config: &MazeConfig, count: usize, seed: u64) -> Result<Self, MazeError> {
        let levels = (1..=count)
            .map(|n| Level::generate(config, seed, n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    /// Level by 1-based number.
    pub fn get(&self, number: usize) -> Option<&Level> {
        self.levels.get(number.checked_sub(1)?)
    }

    /// Number following `number`, wrapping from the last level to 1.
    pub fn next_number(&self, number: usize) -> usize {
        if self.levels.is_empty() {
            return 0;
        }
        number % self.levels.len() + 1
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a LevelSet {
    type Item = &'a Level;
    type IntoIter = std::slice::Iter<'a, Level>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
