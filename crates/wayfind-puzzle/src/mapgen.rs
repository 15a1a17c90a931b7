//! Maze generation.
//!
//! [`MazeGen`] builds a maze in four passes over an all-wall grid:
//!
//! 1. **Carve**: randomized depth-first backtracking over the odd-coordinate
//!    lattice. Every visited anchor and the cell between two linked anchors
//!    become floor, so the floor forms a spanning tree.
//! 2. **Cycles**: `min(w, h) / 10` walls that sit between two opposite floor
//!    cells are knocked out, adding alternate routes.
//! 3. **Endpoints**: a random floor cell becomes the start, then a random
//!    floor cell at Manhattan distance at least `min(w, h) / 2` becomes the
//!    end.
//! 4. **Hazards**: `min(w, h) / 4` further floor cells become hazards.
//!
//! Every random cell search gives up after [`MazeConfig::max_attempts`]
//! draws and then scans the whole grid for qualifying cells, picking one of
//! them with the same RNG. Generation is therefore bounded and, for a seeded
//! RNG, reproducible.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngExt};
use wayfind_core::{Point, Range};
use wayfind_paths::manhattan;

use crate::grid::{Grid, Tile};
use crate::maze::{Maze, MazeError};

/// Smallest supported side length.
pub const MIN_SIDE: i32 = 5;

/// Maze generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    /// Random draws per cell search before falling back to a full scan.
    pub max_attempts: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            max_attempts: 1000,
        }
    }
}

impl MazeConfig {
    /// Config for a `width` x `height` maze with default attempts.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn min_side(&self) -> i32 {
        self.width.min(self.height)
    }

    /// Number of walls knocked out to create cycles.
    pub fn cycle_count(&self) -> usize {
        (self.min_side() / 10).max(0) as usize
    }

    /// Number of hazard cells.
    pub fn hazard_count(&self) -> usize {
        (self.min_side() / 4).max(0) as usize
    }

    /// Whether `a` and `b` are far enough apart to be start and end,
    /// i.e. `manhattan(a, b) >= min(w, h) / 2` without rounding.
    pub fn far_enough(&self, a: Point, b: Point) -> bool {
        2 * manhattan(a, b) >= self.min_side()
    }

    fn validate(&self) -> Result<(), MazeError> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(MazeError::TooSmall {
                width: self.width,
                height: self.height,
                min: MIN_SIDE,
            });
        }
        Ok(())
    }
}

/// One anchor on the carving stack with its shuffled exits.
struct Frame {
    pos: Point,
    dirs: [Point; 4],
    next: usize,
}

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub config: MazeConfig,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(config: MazeConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Generate a maze.
    ///
    /// Fails with [`MazeError::TooSmall`] for sides below [`MIN_SIDE`] and
    /// with [`MazeError::Placement`] if no cell can host the start, the end
    /// or a hazard.
    pub fn generate(&mut self) -> Result<Maze, MazeError> {
        self.config.validate()?;
        let mut grid = Grid::new(self.config.width, self.config.height);

        self.carve(&mut grid);
        let cycles = self.add_cycles(&mut grid);

        let start = self
            .pick(&grid, grid.bounds(), |g, p| g.at(p) == Some(Tile::Empty))
            .ok_or(MazeError::Placement("start"))?;
        grid.set(start, Tile::Start);

        let cfg = self.config.clone();
        let end = self
            .pick(&grid, grid.bounds(), |g, p| {
                g.at(p) == Some(Tile::Empty) && cfg.far_enough(start, p)
            })
            .ok_or(MazeError::Placement("end"))?;
        grid.set(end, Tile::End);

        for _ in 0..self.config.hazard_count() {
            let h = self
                .pick(&grid, grid.bounds(), |g, p| g.at(p) == Some(Tile::Empty))
                .ok_or(MazeError::Placement("hazard"))?;
            grid.set(h, Tile::Hazard);
        }

        log::trace!(
            "maze {}x{}: start {start}, end {end}, {cycles} cycles, {} floor cells",
            self.config.width,
            self.config.height,
            grid.count_fn(|_, t| t.is_passable())
        );
        Ok(Maze::from_parts(grid, start, end))
    }

    /// Carve a spanning tree of passages with iterative backtracking.
    fn carve(&mut self, grid: &mut Grid) {
        let start = Point::new(
            1 + self.rng.random_range(0..(self.config.width - 1) / 2) * 2,
            1 + self.rng.random_range(0..(self.config.height - 1) / 2) * 2,
        );

        let mut stack = vec![self.open_anchor(grid, start)];
        while let Some(top) = stack.last_mut() {
            let Some(&d) = top.dirs.get(top.next) else {
                stack.pop();
                continue;
            };
            top.next += 1;
            let pos = top.pos;
            let target = pos + d + d;
            if grid.at(target) == Some(Tile::Wall) {
                grid.set(pos + d, Tile::Empty);
                stack.push(self.open_anchor(grid, target));
            }
        }
    }

    fn open_anchor(&mut self, grid: &mut Grid, pos: Point) -> Frame {
        let mut dirs = Point::CARDINALS;
        dirs.shuffle(&mut self.rng);
        grid.set(pos, Tile::Empty);
        Frame { pos, dirs, next: 0 }
    }

    /// Knock out walls between opposite passages. Returns how many were
    /// opened, which is less than requested only if no such wall is left.
    fn add_cycles(&mut self, grid: &mut Grid) -> usize {
        let inner = Range::new(1, 1, self.config.width - 1, self.config.height - 1);
        let wanted = self.config.cycle_count();
        for made in 0..wanted {
            let Some(p) = self.pick(grid, inner, links_passages) else {
                log::debug!("maze: only {made} of {wanted} cycles fit");
                return made;
            };
            grid.set(p, Tile::Empty);
        }
        wanted
    }

    /// Uniformly pick a point of `area` satisfying `keep`.
    ///
    /// Draws random points up to `max_attempts` times, then falls back to
    /// choosing among all qualifying points. `None` if there are none.
    fn pick(
        &mut self,
        grid: &Grid,
        area: Range,
        keep: impl Fn(&Grid, Point) -> bool,
    ) -> Option<Point> {
        if area.is_empty() {
            return None;
        }
        for _ in 0..self.config.max_attempts {
            let p = Point::new(
                self.rng.random_range(area.min.x..area.max.x),
                self.rng.random_range(area.min.y..area.max.y),
            );
            if keep(grid, p) {
                return Some(p);
            }
        }
        let candidates: Vec<Point> = area.iter().filter(|&p| keep(grid, p)).collect();
        log::debug!(
            "maze: random search exhausted, scanning {} candidates",
            candidates.len()
        );
        candidates.choose(&mut self.rng).copied()
    }
}

/// A wall with floor on both sides horizontally or vertically.
fn links_passages(grid: &Grid, p: Point) -> bool {
    if grid.at(p) != Some(Tile::Wall) {
        return false;
    }
    let empty = |q: Point| grid.at(q) == Some(Tile::Empty);
    (empty(p.shift(-1, 0)) && empty(p.shift(1, 0))) || (empty(p.shift(0, -1)) && empty(p.shift(0, 1)))
}

/// Generate a `width` x `height` maze with default settings.
pub fn generate_maze<R: Rng>(width: i32, height: i32, rng: R) -> Result<Maze, MazeError> {
    MazeGen::new(MazeConfig::new(width, height), rng).generate()
}
