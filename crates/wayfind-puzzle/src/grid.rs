//! A tile grid for maze representation.
//!
//! [`Tile`] is the closed set of cell kinds a maze is made of. [`Grid`] owns
//! a row-major array of tiles and can be built from a text picture, which is
//! how fixed mazes are written in tests.

use std::fmt;
use wayfind_core::{Point, Range};

/// Kind of a maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Wall,
    Empty,
    Start,
    End,
    /// Walkable, but entering it costs extra and counts as a hit.
    Hazard,
}

impl Tile {
    /// Whether a walker may stand on this tile.
    #[inline]
    pub const fn is_passable(self) -> bool {
        match self {
            Tile::Wall => false,
            Tile::Empty | Tile::Start | Tile::End | Tile::Hazard => true,
        }
    }

    /// Cost of stepping onto this tile from a neighbour.
    #[inline]
    pub const fn entry_cost(self) -> i32 {
        match self {
            Tile::Hazard => 2,
            Tile::Wall | Tile::Empty | Tile::Start | Tile::End => 1,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => '.',
            Tile::Start => 'S',
            Tile::End => 'E',
            Tile::Hazard => '*',
        }
    }

    pub const fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Empty),
            'S' => Some(Tile::Start),
            'E' => Some(Tile::End),
            '*' => Some(Tile::Hazard),
            _ => None,
        }
    }
}

/// A fixed-size 2D grid of [`Tile`] values, origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridData", into = "GridData"))]
pub struct Grid {
    // tiles.len() == bounds.len(), bounds.min == Point::ZERO
    tiles: Vec<Tile>,
    bounds: Range,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridData {
    tiles: Vec<Tile>,
    bounds: Range,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridData {
    fn from(g: Grid) -> Self {
        Self {
            tiles: g.tiles,
            bounds: g.bounds,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, GridError> {
        if data.bounds.min != Point::ZERO {
            return Err(GridError::Origin(data.bounds));
        }
        if data.tiles.len() != data.bounds.len() {
            return Err(GridError::TileCount {
                expected: data.bounds.len(),
                found: data.tiles.len(),
            });
        }
        Ok(Self {
            tiles: data.tiles,
            bounds: data.bounds,
        })
    }
}

impl Grid {
    /// Create a new grid filled with walls.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width.max(0), height.max(0));
        Self {
            tiles: vec![Tile::Wall; bounds.len()],
            bounds,
        }
    }

    /// Parse a text picture, one line per row, using the characters of
    /// [`Tile::to_char`]. Surrounding whitespace of the whole string and of
    /// each line is ignored.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GridError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found: row.chars().count(),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(GridError::InvalidChar {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                tiles.push(tile);
            }
        }
        Ok(Self {
            tiles,
            bounds: Range::with_size(width as i32, rows.len() as i32),
        })
    }

    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.bounds.index(p).and_then(|i| self.tiles.get(i).copied())
    }

    /// Set the tile at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(t) = self.bounds.index(p).and_then(|i| self.tiles.get_mut(i)) {
            *t = tile;
        }
    }

    /// Count how many cells hold the given tile.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, Tile) -> bool) -> usize {
        self.iter().filter(|&(p, t)| f(p, t)).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }

    /// Points holding the given tile, row-major.
    pub fn positions(&self, tile: Tile) -> impl Iterator<Item = Point> + '_ {
        self.iter().filter(move |&(_, t)| t == tile).map(|(p, _)| p)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width().max(1) as usize;
        for (i, row) in self.tiles.chunks(w).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for t in row {
                write!(f, "{}", t.to_char())?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a grid picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row does not have the width of the first row.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character that names no tile.
    InvalidChar { ch: char, pos: Point },
    /// Stored bounds that do not start at (0, 0).
    Origin(Range),
    /// Stored tiles that do not cover the bounds exactly.
    TileCount { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::Origin(r) => write!(f, "grid: bounds {r} do not start at the origin"),
            Self::TileCount { expected, found } => {
                write!(f, "grid: {found} tiles for {expected} cells")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_walls() {
        let g = Grid::new(10, 5);
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 5);
        assert_eq!(g.count(Tile::Wall), 50);
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(4, 4);
        let p = Point::new(2, 3);
        g.set(p, Tile::Hazard);
        assert_eq!(g.at(p), Some(Tile::Hazard));
        assert_eq!(g.at(Point::new(0, 0)), Some(Tile::Wall));
        assert_eq!(g.at(Point::new(10, 10)), None);
        g.set(Point::new(-1, 0), Tile::Empty);
        assert_eq!(g.count(Tile::Empty), 0);
    }

    #[test]
    fn parse_and_display_round_trip() {
        let text = "\
#####
#S.*#
#..E#
#####";
        let g = Grid::parse(text).unwrap();
        assert_eq!(g.bounds(), Range::with_size(5, 4));
        assert_eq!(g.at(Point::new(1, 1)), Some(Tile::Start));
        assert_eq!(g.at(Point::new(3, 1)), Some(Tile::Hazard));
        assert_eq!(g.positions(Tile::End).collect::<Vec<_>>(), vec![Point::new(3, 2)]);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            Grid::parse("###\n##"),
            Err(GridError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::parse("#x#"),
            Err(GridError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 0)
            })
        );
    }

    #[test]
    fn passability_and_cost() {
        assert!(!Tile::Wall.is_passable());
        assert!(Tile::Hazard.is_passable());
        assert_eq!(Tile::Hazard.entry_cost(), 2);
        assert_eq!(Tile::End.entry_cost(), 1);
    }

    #[test]
    fn count_fn_filters_by_position() {
        let g = Grid::parse("...\n...\n...").unwrap();
        assert_eq!(g.count_fn(|p, t| p.x == 1 && t == Tile::Empty), 3);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::parse("#S.\n.E#").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn short_tile_list_is_rejected() {
        let json = r#"{"tiles":["Wall"],"bounds":{"min":{"x":0,"y":0},"max":{"x":5,"y":5}}}"#;
        let err = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("1 tiles for 25 cells"));
    }

    #[test]
    fn offset_bounds_are_rejected() {
        let json = r#"{"tiles":["Wall"],"bounds":{"min":{"x":1,"y":0},"max":{"x":2,"y":1}}}"#;
        let err = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("do not start at the origin"));
    }
}
