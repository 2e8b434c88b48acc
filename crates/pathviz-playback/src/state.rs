use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use pathviz_core::{Coord, Maze};
use pathviz_paths::{Algorithm, Outcome, SearchStats};
use serde::{Deserialize, Serialize};

/// Run state shown to the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Idle with the last run's caches still visible.
    #[default]
    Stopped,
    Running,
    Paused,
    /// Idle with caches cleared.
    Reset,
}

impl RunState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Reset => "Reset",
        }
    }

    /// Whether a run is in progress, paused or not.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timing state and rendering caches of one controller.
///
/// Mutated only by the controller; renderers read it through
/// [`PlaybackController::state`](crate::PlaybackController::state) or an
/// owned [`Snapshot`].
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub run_state: RunState,
    pub speed_factor: f64,
    /// Scaled time not yet spent on steps.
    pub accumulated: Duration,
    pub current_node: Option<Coord>,
    pub visited: HashSet<Coord>,
    pub solution_path: Vec<Coord>,
    /// Set once the run ends on its own.
    pub outcome: Option<Outcome>,
    pub stats: SearchStats,
}

impl PlaybackState {
    pub(crate) fn new(speed_factor: f64) -> Self {
        Self {
            run_state: RunState::Stopped,
            speed_factor,
            accumulated: Duration::ZERO,
            current_node: None,
            visited: HashSet::new(),
            solution_path: Vec::new(),
            outcome: None,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    /// Drop everything a renderer would draw over the maze.
    pub(crate) fn clear_caches(&mut self) {
        self.accumulated = Duration::ZERO;
        self.current_node = None;
        self.visited.clear();
        self.solution_path.clear();
        self.outcome = None;
        self.stats = SearchStats::default();
    }
}

/// Owned copy of everything needed to draw one controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub algorithm: Algorithm,
    pub maze: Maze,
    pub current_node: Option<Coord>,
    /// Sorted row-major.
    pub visited: Vec<Coord>,
    pub solution_path: Vec<Coord>,
    pub label: RunState,
    pub speed_factor: f64,
    pub outcome: Option<Outcome>,
    pub stats: SearchStats,
}
