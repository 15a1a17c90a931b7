//! A finished maze: tile grid plus its start and end cells.

use std::fmt;

use wayfind_core::Point;
use wayfind_paths::{Path, PathError, Pather, WeightedPather, bfs_map, shortest_path};

use crate::grid::{Grid, GridError, Tile};

/// A grid maze with exactly one start and one end.
///
/// Movement is 4-directional through non-wall tiles. Stepping onto a tile
/// costs [`Tile::entry_cost`], so hazards weigh 2 and everything else 1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MazeData", into = "MazeData"))]
pub struct Maze {
    // grid.at(start) == Some(Tile::Start), grid.at(end) == Some(Tile::End)
    grid: Grid,
    start: Point,
    end: Point,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MazeData {
    grid: Grid,
    start: Point,
    end: Point,
}

#[cfg(feature = "serde")]
impl From<Maze> for MazeData {
    fn from(m: Maze) -> Self {
        Self {
            grid: m.grid,
            start: m.start,
            end: m.end,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<MazeData> for Maze {
    type Error = MazeError;

    fn try_from(data: MazeData) -> Result<Self, MazeError> {
        let maze = Maze::from_grid(data.grid)?;
        if (maze.start, maze.end) != (data.start, data.end) {
            return Err(MazeError::Misplaced {
                start: data.start,
                end: data.end,
            });
        }
        Ok(maze)
    }
}

impl Maze {
    pub(crate) fn from_parts(grid: Grid, start: Point, end: Point) -> Self {
        Self { grid, start, end }
    }

    /// Wrap a grid, checking that it has exactly one start and one end.
    pub fn from_grid(grid: Grid) -> Result<Self, MazeError> {
        let starts: Vec<Point> = grid.positions(Tile::Start).collect();
        let ends: Vec<Point> = grid.positions(Tile::End).collect();
        match (starts.as_slice(), ends.as_slice()) {
            (&[start], &[end]) => Ok(Self { grid, start, end }),
            _ => Err(MazeError::Endpoints {
                starts: starts.len(),
                ends: ends.len(),
            }),
        }
    }

    /// Parse a text picture (see [`Grid::parse`]) into a maze.
    pub fn parse(s: &str) -> Result<Self, MazeError> {
        Self::from_grid(Grid::parse(s)?)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Tile at `p`, `None` outside the maze.
    pub fn tile(&self, p: Point) -> Option<Tile> {
        self.grid.at(p)
    }

    pub fn is_passable(&self, p: Point) -> bool {
        self.tile(p).is_some_and(Tile::is_passable)
    }

    pub fn hazards(&self) -> impl Iterator<Item = Point> + '_ {
        self.grid.positions(Tile::Hazard)
    }

    /// How many cells of `cells` are hazards.
    pub fn hazard_hits(&self, cells: &[Point]) -> usize {
        cells
            .iter()
            .filter(|&&p| self.tile(p) == Some(Tile::Hazard))
            .count()
    }

    /// Whether every non-wall cell can be reached from the start.
    pub fn is_connected(&self) -> bool {
        let open = self.grid.count_fn(|_, t| t.is_passable());
        bfs_map(self, self.start).len() == open
    }

    /// Cheapest route from start to end, or `None` if the end is cut off.
    ///
    /// Every constructor places the endpoints on their own tiles, so the
    /// error only shows up if that invariant is broken.
    pub fn solve(&self) -> Result<Option<Path<Point>>, PathError<Point>> {
        shortest_path(self, self.start, self.end)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

impl Pather for Maze {
    type Node = Point;

    fn capacity(&self) -> usize {
        self.grid.bounds().len()
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.is_passable(p) {
            return None;
        }
        self.grid.bounds().index(p)
    }

    fn node(&self, i: usize) -> Option<Point> {
        let p = self.grid.bounds().point(i);
        self.is_passable(p).then_some(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}

impl WeightedPather for Maze {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.tile(to).map_or(1, Tile::entry_cost)
    }
}

/// Errors from building or generating a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The text picture could not be parsed.
    Grid(GridError),
    /// A maze needs exactly one start and one end.
    Endpoints { starts: usize, ends: usize },
    /// Requested dimensions are below the supported minimum.
    TooSmall { width: i32, height: i32, min: i32 },
    /// No cell satisfied the constraints for the named feature.
    Placement(&'static str),
    /// Stored start and end that are not the grid's start and end tiles.
    Misplaced { start: Point, end: Point },
    /// The search rejected the maze's start or end.
    Search(PathError<Point>),
    /// The generated maze has no route from start to end.
    Unsolvable,
}

impl From<GridError> for MazeError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PathError<Point>> for MazeError {
    fn from(e: PathError<Point>) -> Self {
        Self::Search(e)
    }
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "maze: {e}"),
            Self::Endpoints { starts, ends } => write!(
                f,
                "maze: expected one start and one end, found {starts} and {ends}"
            ),
            Self::TooSmall { width, height, min } => write!(
                f,
                "maze: {width}x{height} is too small, each side must be at least {min}"
            ),
            Self::Placement(what) => write!(f, "maze: no room to place {what}"),
            Self::Misplaced { start, end } => write!(
                f,
                "maze: start {start} and end {end} do not match the grid's S and E tiles"
            ),
            Self::Search(e) => write!(f, "maze: {e}"),
            Self::Unsolvable => write!(f, "maze: end is unreachable from start"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::generate_maze;
    use crate::score::score;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wayfind_paths::{ShortestPaths, manhattan};

    const CORRIDOR: &str = "\
#####
#####
S...E
#####
#####";

    const HAZARD_ROOM: &str = "\
#######
#S.*.E#
#.###.#
#.....#
#######";

    #[test]
    fn straight_corridor_path_is_manhattan() {
        let m = Maze::parse(CORRIDOR).unwrap();
        let path = m.solve().unwrap().unwrap();
        let d = manhattan(m.start(), m.end()) as usize;
        assert_eq!(path.steps(), d);
        assert_eq!(path.cost(), d as i64);
        assert_eq!(score(path.steps(), m.hazard_hits(path.nodes())), d);
    }

    #[test]
    fn hazards_cost_extra_on_entry() {
        let m = Maze::parse(HAZARD_ROOM).unwrap();
        assert_eq!(m.cost(Point::new(2, 1), Point::new(3, 1)), 2);
        assert_eq!(m.cost(Point::new(3, 1), Point::new(4, 1)), 1);

        // Through the hazard: 4 steps costing 5; around it: 8 steps.
        let path = m.solve().unwrap().unwrap();
        assert_eq!(path.cost(), 5);
        assert_eq!(path.steps(), 4);
        assert_eq!(m.hazard_hits(path.nodes()), 1);
    }

    #[test]
    fn walls_are_not_nodes() {
        let m = Maze::parse(HAZARD_ROOM).unwrap();
        assert_eq!(m.index(Point::new(0, 0)), None);
        assert_eq!(m.node(0), None);
        assert_eq!(m.index(Point::new(1, 1)), Some(8));
        assert_eq!(m.node(8), Some(Point::new(1, 1)));
        let mut buf = Vec::new();
        m.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(1, 2)]);
    }

    #[test]
    fn sealed_end_is_unsolvable() {
        let m = Maze::parse(
            "\
#####
#S#E#
#####",
        )
        .unwrap();
        assert_eq!(m.solve(), Ok(None));
        assert!(!m.is_connected());
    }

    #[test]
    fn connectivity_counts_every_open_cell() {
        assert!(Maze::parse(HAZARD_ROOM).unwrap().is_connected());
    }

    #[test]
    fn endpoints_must_be_unique() {
        assert_eq!(
            Maze::parse("S.S.E"),
            Err(MazeError::Endpoints { starts: 2, ends: 1 })
        );
        assert_eq!(
            Maze::parse("S...."),
            Err(MazeError::Endpoints { starts: 1, ends: 0 })
        );
        assert!(matches!(Maze::parse("S.?.E"), Err(MazeError::Grid(_))));
    }

    #[test]
    fn broken_endpoint_is_reported() {
        let mut m = Maze::parse(HAZARD_ROOM).unwrap();
        m.start = Point::new(0, 0);
        assert_eq!(
            m.solve(),
            Err(PathError::UnknownSource(Point::new(0, 0)))
        );
    }

    #[test]
    fn heap_matches_linear_scan_on_mazes() {
        for seed in 0..6 {
            let m = generate_maze(31, 21, StdRng::seed_from_u64(seed)).unwrap();
            for stop in [None, Some(m.end())] {
                let heap = ShortestPaths::compute(&m, m.start(), stop).unwrap();
                let scan = ShortestPaths::compute_scan(&m, m.start(), stop).unwrap();
                assert_eq!(heap, scan, "seed {seed}, stop {stop:?}");
            }
        }
    }

    #[test]
    fn display_matches_picture() {
        let m = Maze::parse(HAZARD_ROOM).unwrap();
        assert_eq!(m.to_string(), HAZARD_ROOM);
        assert_eq!(m.hazards().collect::<Vec<_>>(), vec![Point::new(3, 1)]);
    }
}
