use pathviz_core::MazeError;
use thiserror::Error;

/// Errors returned by [`MazeGen`](crate::MazeGen).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeGenError {
    /// Mazes need at least two rows and two columns.
    #[error("invalid maze dimensions {rows}x{cols}: need at least 2x2")]
    InvalidDimensions { rows: i32, cols: i32 },

    /// Every candidate was rejected.
    #[error("no solvable {rows}x{cols} maze after {attempts} attempts")]
    RetriesExhausted { rows: i32, cols: i32, attempts: usize },

    /// A generator setting is out of range.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Maze(#[from] MazeError),
}
