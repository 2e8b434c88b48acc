use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// The search strategies a stepper can run.
///
/// They share one expansion skeleton and differ only in frontier ordering
/// and neighbor admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// FIFO frontier, first discovery wins. Shortest paths.
    Bfs,
    /// LIFO frontier, first discovery wins.
    Dfs,
    /// Min-heap on Manhattan distance to the goal, first discovery wins.
    GreedyBestFirst,
    /// Min-heap on `g + h`; re-admits a node on a strictly lower `g`.
    /// Shortest paths.
    AStar,
}

impl Algorithm {
    /// Every algorithm, in comparison display order.
    pub const ALL: [Algorithm; 4] = [
        Self::Bfs,
        Self::Dfs,
        Self::GreedyBestFirst,
        Self::AStar,
    ];

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::GreedyBestFirst => "Greedy",
            Self::AStar => "A*",
        }
    }

    /// Whether returned paths are guaranteed shortest.
    pub const fn is_optimal(self) -> bool {
        matches!(self, Self::Bfs | Self::AStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            "greedy" | "heuristic" | "greedy-best-first" => Ok(Self::GreedyBestFirst),
            "a*" | "astar" | "a-star" => Ok(Self::AStar),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}
