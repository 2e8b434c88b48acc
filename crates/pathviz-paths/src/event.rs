//! Visualization events produced by the search steppers.

use pathviz_core::Coord;

/// One discrete unit of search progress, as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A node was popped from the frontier and examined.
    Process(Coord),
    /// A node was discovered and pushed onto the frontier.
    Visit(Coord),
    /// The goal was reached. The path runs from start to goal inclusive.
    PathFound(Vec<Coord>),
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

/// How a finished search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Start-to-goal path, both endpoints included.
    Found(Vec<Coord>),
    Exhausted,
}

impl Outcome {
    /// The solution path, empty when exhausted.
    pub fn path(&self) -> &[Coord] {
        match self {
            Self::Found(path) => path,
            Self::Exhausted => &[],
        }
    }
}
