//! The maze occupancy grid.
//!
//! A [`Maze`] is a dense row-major grid of [`Cell`] values. Generators build
//! one by mutation; once a maze is handed to a search it is only read, and a
//! "new maze" replaces it wholesale.
//!
//! The text form used by [`Maze::parse`] and [`Display`](std::fmt::Display)
//! is one line per row, `#` for blocked and `.` for passable.

use std::fmt;
use std::str::FromStr;

use crate::error::MazeError;
use crate::geom::{Coord, Range};

/// Occupancy of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Passable,
    Blocked,
}

impl Cell {
    /// The other occupancy.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Passable => Self::Blocked,
            Self::Blocked => Self::Passable,
        }
    }

    /// Character used by the text form.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            Self::Passable => '.',
            Self::Blocked => '#',
        }
    }

    fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Passable),
            '#' => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// A rectangular grid of passable and blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMaze"))]
pub struct Maze {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

/// Unchecked serialized form of a [`Maze`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMaze {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self, MazeError> {
        let expected = cell_count(raw.rows, raw.cols)?;
        if raw.cells.len() != expected {
            return Err(MazeError::CellCountMismatch {
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

/// `rows * cols` for positive dimensions, without overflow.
fn cell_count(rows: i32, cols: i32) -> Result<usize, MazeError> {
    if rows <= 0 || cols <= 0 {
        return Err(MazeError::InvalidDimensions { rows, cols });
    }
    (rows as usize)
        .checked_mul(cols as usize)
        .ok_or(MazeError::InvalidDimensions { rows, cols })
}

impl Maze {
    /// Create a `rows x cols` maze with every cell set to `fill`.
    ///
    /// Both dimensions must be positive.
    pub fn filled(rows: i32, cols: i32, fill: Cell) -> Result<Self, MazeError> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![fill; len],
        })
    }

    /// Create a fully passable maze.
    pub fn open(rows: i32, cols: i32) -> Result<Self, MazeError> {
        Self::filled(rows, cols, Cell::Passable)
    }

    /// Create a fully blocked maze.
    pub fn solid(rows: i32, cols: i32) -> Result<Self, MazeError> {
        Self::filled(rows, cols, Cell::Blocked)
    }

    /// Parse the `#`/`.` text form.
    ///
    /// Leading and trailing whitespace of the whole string is ignored, as is
    /// leading whitespace on each line, so mazes can be written as indented
    /// string literals. Every row must have the same width.
    pub fn parse(s: &str) -> Result<Self, MazeError> {
        let mut cells = Vec::new();
        let mut cols: i32 = -1;
        let mut rows: i32 = 0;

        for (row, line) in s.trim().lines().enumerate() {
            let line = line.trim_start();
            let mut width: i32 = 0;
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_glyph(ch).ok_or(MazeError::InvalidGlyph {
                    ch,
                    at: Coord::new(row as i32, col as i32),
                })?;
                cells.push(cell);
                width += 1;
            }
            if cols >= 0 && width != cols {
                return Err(MazeError::InconsistentWidth {
                    row: row as i32,
                    expected: cols,
                    found: width,
                });
            }
            cols = width;
            rows += 1;
        }

        if rows == 0 || cols <= 0 {
            return Err(MazeError::InvalidDimensions {
                rows,
                cols: cols.max(0),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The half-open range covering every cell.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.rows, self.cols)
    }

    /// Whether `c` lies inside the maze.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds().contains(c)
    }

    /// Top-left cell, the conventional search start.
    #[inline]
    pub fn entrance(&self) -> Coord {
        Coord::ZERO
    }

    /// Bottom-right cell, the conventional search goal.
    #[inline]
    pub fn exit(&self) -> Coord {
        Coord::new(self.rows - 1, self.cols - 1)
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        c.row as usize * self.cols as usize + c.col as usize
    }

    /// The cell at `c`, or `None` if out of bounds.
    pub fn at(&self, c: Coord) -> Option<Cell> {
        if !self.contains(c) {
            return None;
        }
        Some(self.cells[self.index(c)])
    }

    /// Whether `c` is inside the maze and passable.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.at(c) == Some(Cell::Passable)
    }

    /// Set the cell at `c`. Does nothing if out of bounds.
    pub fn set(&mut self, c: Coord, cell: Cell) {
        if !self.contains(c) {
            return;
        }
        let idx = self.index(c);
        self.cells[idx] = cell;
    }

    /// Fill every cell of `rng` (clipped to the maze) with `cell`.
    pub fn fill_range(&mut self, rng: Range, cell: Cell) {
        for c in rng.intersect(self.bounds()) {
            self.set(c, cell);
        }
    }

    /// Set every cell on the outer border to `cell`.
    pub fn fill_border(&mut self, cell: Cell) {
        let (rows, cols) = (self.rows, self.cols);
        self.fill_range(Range::new(0, 0, 1, cols), cell);
        self.fill_range(Range::new(rows - 1, 0, rows, cols), cell);
        self.fill_range(Range::new(0, 0, rows, 1), cell);
        self.fill_range(Range::new(0, cols - 1, rows, cols), cell);
    }

    /// The single occupancy shared by every cell of `rng`, or `None` when
    /// the range is mixed, empty or not fully inside the maze.
    pub fn uniform(&self, rng: Range) -> Option<Cell> {
        if rng.is_empty() || rng.intersect(self.bounds()) != rng {
            return None;
        }
        let mut it = rng.iter().map(|c| self.cells[self.index(c)]);
        let first = it.next()?;
        it.all(|cell| cell == first).then_some(first)
    }

    /// Count the cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over `(Coord, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let cell = self.cells[self.index(Coord::new(row, col))];
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
        ..##
        #..#
        ##..";

    #[test]
    fn parse_and_size() {
        let m = Maze::parse(ROOM).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.is_passable(Coord::new(0, 0)));
        assert!(!m.is_passable(Coord::new(0, 2)));
        assert!(m.is_passable(Coord::new(2, 3)));
        assert_eq!(m.exit(), Coord::new(2, 3));
        assert_eq!(m.count(Cell::Blocked), 6);
    }

    #[test]
    fn display_matches_text_form() {
        let m = Maze::parse(ROOM).unwrap();
        assert_eq!(m.to_string(), "..##\n#..#\n##..");
        let back: Maze = m.to_string().parse().unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Maze::parse("...\n..").unwrap_err();
        assert_eq!(
            err,
            MazeError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let err = Maze::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            MazeError::InvalidGlyph {
                ch: 'x',
                at: Coord::new(1, 1)
            }
        );
    }

    #[test]
    fn non_positive_dimensions_rejected() {
        assert!(Maze::open(0, 3).is_err());
        assert!(Maze::solid(3, -1).is_err());
        assert!(Maze::parse("   ").is_err());
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let m = Maze::open(2, 2).unwrap();
        assert_eq!(m.at(Coord::new(-1, 0)), None);
        assert_eq!(m.at(Coord::new(2, 0)), None);
        assert!(!m.is_passable(Coord::new(0, 2)));
    }

    #[test]
    fn border_fill() {
        let mut m = Maze::open(4, 5).unwrap();
        m.fill_border(Cell::Blocked);
        assert_eq!(m.count(Cell::Passable), 2 * 3);
        assert!(!m.is_passable(Coord::new(0, 2)));
        assert!(!m.is_passable(Coord::new(3, 4)));
        assert!(m.is_passable(Coord::new(1, 1)));
    }

    #[test]
    fn uniform_blocks() {
        let m = Maze::parse(ROOM).unwrap();
        assert_eq!(m.uniform(Range::new(1, 1, 2, 3)), Some(Cell::Passable));
        assert_eq!(m.uniform(Range::new(1, 0, 3, 1)), Some(Cell::Blocked));
        assert_eq!(m.uniform(Range::new(0, 0, 2, 3)), None);
        // partially outside
        assert_eq!(m.uniform(Range::new(2, 3, 4, 4)), None);
    }

    #[test]
    fn cell_flip_and_glyph() {
        assert_eq!(Cell::Passable.flipped(), Cell::Blocked);
        assert_eq!(Cell::Blocked.flipped(), Cell::Passable);
        assert_eq!(Cell::Blocked.glyph(), '#');
    }

    #[test]
    fn cell_count_does_not_wrap() {
        assert_eq!(
            cell_count(0, 5),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(cell_count(3, 4), Ok(12));
        // 70_000^2 overflows i32
        #[cfg(target_pointer_width = "64")]
        assert_eq!(cell_count(70_000, 70_000), Ok(4_900_000_000));
    }
}
