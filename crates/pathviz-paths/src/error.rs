use pathviz_core::Coord;
use thiserror::Error;

use crate::algorithm::Algorithm;

/// Errors raised by the search steppers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// `step()` was called after the search had already finished.
    #[error("invalid state: {algorithm} search already completed")]
    InvalidState { algorithm: Algorithm },

    /// The start coordinate lies outside the grid.
    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Coord),

    /// The start coordinate is a wall.
    #[error("start {0} is blocked")]
    StartBlocked(Coord),

    /// The goal coordinate lies outside the grid.
    #[error("goal {0} is outside the grid")]
    GoalOutOfBounds(Coord),

    /// An algorithm name could not be parsed.
    #[error("unknown algorithm \u{201c}{0}\u{201d}")]
    UnknownAlgorithm(String),
}
