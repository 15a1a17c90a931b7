//! A route drawn cell by cell by the player.

use std::fmt;

use wayfind_core::Point;
use wayfind_paths::Path;

use crate::grid::Tile;
use crate::maze::Maze;
use crate::score::{Evaluation, score};

/// What an accepted [`Trail::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The trail began on the start cell.
    Started,
    /// The trail grew by one cell.
    Extended,
    /// The trail grew onto a hazard.
    HitHazard,
    /// The trail reached the end cell and is complete.
    Finished,
}

/// The player's route through one maze.
///
/// A trail begins on the start cell, grows one cardinal step at a time
/// through non-wall cells it has not visited yet, and is complete once it
/// steps onto the end cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    cells: Vec<Point>,
    hazard_hits: usize,
    complete: bool,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to extend the trail to `p`.
    pub fn step(&mut self, maze: &Maze, p: Point) -> Result<Progress, TrailError> {
        if self.complete {
            return Err(TrailError::Complete);
        }
        let tile = maze.tile(p).ok_or(TrailError::OutOfBounds(p))?;

        let Some(&last) = self.cells.last() else {
            return match tile {
                Tile::Start => {
                    self.cells.push(p);
                    Ok(Progress::Started)
                }
                Tile::Wall => Err(TrailError::Wall(p)),
                Tile::Empty | Tile::End | Tile::Hazard => Err(TrailError::NotAtStart(p)),
            };
        };

        if tile == Tile::Wall {
            return Err(TrailError::Wall(p));
        }
        if !last.is_adjacent(p) {
            return Err(TrailError::NotAdjacent { from: last, to: p });
        }
        if self.cells.contains(&p) {
            return Err(TrailError::Revisit(p));
        }

        self.cells.push(p);
        match tile {
            Tile::End => {
                self.complete = true;
                Ok(Progress::Finished)
            }
            Tile::Hazard => {
                self.hazard_hits += 1;
                Ok(Progress::HitHazard)
            }
            Tile::Empty | Tile::Start | Tile::Wall => Ok(Progress::Extended),
        }
    }

    /// Discard an unfinished trail.
    pub fn reset(&mut self) -> Result<(), TrailError> {
        if self.complete {
            return Err(TrailError::Complete);
        }
        *self = Self::default();
        Ok(())
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn is_started(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Moves made so far; the start cell does not count.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn hazard_hits(&self) -> usize {
        self.hazard_hits
    }

    /// Running score.
    pub fn score(&self) -> usize {
        score(self.steps(), self.hazard_hits)
    }

    /// Compare against the maze's reference route.
    pub fn evaluate(&self, optimal: &Path<Point>) -> Evaluation {
        Evaluation::new(self.steps(), optimal.steps(), self.hazard_hits)
    }
}

/// A rejected trail step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailError {
    /// The trail already reached the end.
    Complete,
    OutOfBounds(Point),
    Wall(Point),
    /// The first cell must be the start cell.
    NotAtStart(Point),
    NotAdjacent { from: Point, to: Point },
    /// The cell is already on the trail.
    Revisit(Point),
}

impl fmt::Display for TrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "trail: already complete"),
            Self::OutOfBounds(p) => write!(f, "trail: {p} is outside the maze"),
            Self::Wall(p) => write!(f, "trail: {p} is a wall"),
            Self::NotAtStart(p) => write!(f, "trail: must begin at the start, not {p}"),
            Self::NotAdjacent { from, to } => write!(f, "trail: {to} is not next to {from}"),
            Self::Revisit(p) => write!(f, "trail: {p} is already on the trail"),
        }
    }
}

impl std::error::Error for TrailError {}
