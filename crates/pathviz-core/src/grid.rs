//! The obstacle map a search runs over.
//!
//! [`Grid`] is a fixed-size row-major array of [`Tile`]s. Its dimensions never
//! change after construction; only tiles can be toggled. A running search
//! borrows the grid immutably, so toggling is only possible between searches.

use std::fmt;

use crate::geom::{Bounds, Coord};

/// Classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Free,
    Obstacle,
}

impl Tile {
    /// ASCII form used by [`Grid::parse`] and `Display`.
    pub const fn as_char(self) -> char {
        match self {
            Self::Free => '.',
            Self::Obstacle => '#',
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Free),
            '#' => Some(Self::Obstacle),
            _ => None,
        }
    }
}

/// Errors from [`Grid::parse`] and from deserializing a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridParseError {
    /// A row's length differs from the first row's.
    #[error("grid: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.` or `#` was found.
    #[error("grid: invalid character {ch:?} at {pos}")]
    InvalidChar { ch: char, pos: Coord },
    /// The tile list does not cover the bounds exactly.
    #[error("grid: {found} tiles for {expected} cells")]
    TileCount { expected: usize, found: usize },
}

/// A rectangular map of free and obstacle cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    bounds: Bounds,
    tiles: Vec<Tile>,
}

/// Unchecked wire form of [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    bounds: Bounds,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridParseError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let bounds = Bounds::new(raw.bounds.rows(), raw.bounds.cols());
        if raw.tiles.len() != bounds.len() {
            return Err(GridParseError::TileCount {
                expected: bounds.len(),
                found: raw.tiles.len(),
            });
        }
        Ok(Self {
            bounds,
            tiles: raw.tiles,
        })
    }
}

impl Grid {
    /// Create a grid with every cell free.
    ///
    /// Non-positive dimensions give an empty grid in which every coordinate
    /// is out of bounds.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            bounds,
            tiles: vec![Tile::Free; bounds.len()],
        }
    }

    /// Parse an ASCII picture: one line per row, `.` free and `#` obstacle.
    ///
    /// Leading and trailing blank lines and surrounding whitespace on each
    /// line are ignored.
    pub fn parse(s: &str) -> Result<Self, GridParseError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut tiles = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridParseError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(GridParseError::InvalidChar {
                    ch,
                    pos: Coord::new(row as i32, col as i32),
                })?;
                tiles.push(tile);
            }
        }
        Ok(Self {
            bounds: Bounds::new(lines.len() as i32, cols as i32),
            tiles,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn is_in_bounds(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// The tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, c: Coord) -> Option<Tile> {
        self.bounds.index(c).map(|i| self.tiles[i])
    }

    /// Whether `c` is an obstacle. Out-of-bounds coordinates report `false`;
    /// check [`is_in_bounds`](Self::is_in_bounds) first.
    #[inline]
    pub fn is_obstacle(&self, c: Coord) -> bool {
        self.tile(c) == Some(Tile::Obstacle)
    }

    /// Whether `c` is in bounds and free.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.tile(c) == Some(Tile::Free)
    }

    /// Mark `c` as obstacle or free. Does nothing if out of bounds.
    pub fn set_obstacle(&mut self, c: Coord, obstacle: bool) {
        if let Some(i) = self.bounds.index(c) {
            self.tiles[i] = if obstacle { Tile::Obstacle } else { Tile::Free };
        }
    }

    /// Make every cell free.
    pub fn clear(&mut self) {
        self.tiles.fill(Tile::Free);
    }

    pub fn obstacle_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Obstacle).count()
    }

    /// Passable orthogonal neighbours of `c` in East, South, West, North
    /// order. Yields nothing when `c` itself is out of bounds.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        // Offsets are only added to in-bounds cells, so they cannot overflow.
        self.is_in_bounds(c)
            .then(|| c.neighbors_4())
            .into_iter()
            .flatten()
            .filter(move |&n| self.is_passable(n))
    }

    /// Iterate over `(Coord, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, tile) in self.iter() {
            if c.col == 0 && c.row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", tile.as_char())?;
        }
        Ok(())
    }
}
