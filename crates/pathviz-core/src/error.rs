//! Errors raised while building or parsing mazes.

use thiserror::Error;

use crate::geom::Coord;

/// Errors that can occur when constructing a [`Maze`](crate::Maze).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A dimension was zero or negative.
    #[error("invalid maze dimensions {rows}x{cols}: both must be positive")]
    InvalidDimensions { rows: i32, cols: i32 },

    /// Rows of the text form have different widths.
    #[error("maze row {row} has width {found}, expected {expected}")]
    InconsistentWidth { row: i32, expected: i32, found: i32 },

    /// A character other than `#` or `.` was found.
    #[error("maze contains invalid glyph \u{201c}{ch}\u{201d} at {at}")]
    InvalidGlyph { ch: char, at: Coord },

    /// Stored cells do not match the declared dimensions.
    #[error("maze has {found} cells, expected {expected}")]
    CellCountMismatch { expected: usize, found: usize },
}
