//! Side-by-side runs of every algorithm on one maze.

use std::time::Duration;

use log::debug;
use pathviz_core::Maze;
use pathviz_mazegen::MazeSource;
use pathviz_paths::Algorithm;

use crate::command::{Command, Control};
use crate::config::PlaybackConfig;
use crate::controller::PlaybackController;
use crate::error::PlaybackError;
use crate::state::{RunState, Snapshot};

/// One [`PlaybackController`] per algorithm, driven by a shared clock and
/// a shared control surface.
///
/// Each child owns its own copy of the maze and its own stepper, so no
/// search state is shared between them.
pub struct Comparison {
    config: PlaybackConfig,
    maze: Maze,
    children: Vec<PlaybackController>,
}

impl Comparison {
    pub fn new(config: PlaybackConfig, maze: Maze) -> Result<Self, PlaybackError> {
        let children = Algorithm::ALL
            .iter()
            .map(|&alg| PlaybackController::new(config.clone(), maze.clone(), alg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            config,
            maze,
            children,
        })
    }

    pub fn generate<S: MazeSource + ?Sized>(
        config: PlaybackConfig,
        source: &mut S,
    ) -> Result<Self, PlaybackError> {
        config.validate()?;
        let maze = source.next_maze(config.rows, config.cols)?;
        Self::new(config, maze)
    }

    /// The maze every child was handed a copy of.
    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn controllers(&self) -> &[PlaybackController] {
        &self.children
    }

    pub fn controller(&self, algorithm: Algorithm) -> Option<&PlaybackController> {
        self.children.iter().find(|c| c.algorithm() == algorithm)
    }

    /// Shared speed factor.
    pub fn speed_factor(&self) -> f64 {
        self.children
            .first()
            .map_or(self.config.default_speed, |c| c.speed_factor())
    }

    /// Label for the group: running if any child runs, else paused if any
    /// child is paused, else the first child's label.
    pub fn run_state(&self) -> RunState {
        let states = self.children.iter().map(|c| c.run_state());
        if states.clone().any(|s| s == RunState::Running) {
            RunState::Running
        } else if states.clone().any(|s| s == RunState::Paused) {
            RunState::Paused
        } else {
            self.children
                .first()
                .map_or(RunState::Stopped, |c| c.run_state())
        }
    }

    /// Whether every child has reached an outcome.
    pub fn is_finished(&self) -> bool {
        self.children.iter().all(|c| c.outcome().is_some())
    }

    /// Start every child. Rejected while any child is still active.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.children.iter().any(|c| c.run_state().is_active()) {
            return Err(self.invalid("start"));
        }
        for child in &mut self.children {
            child.start()?;
        }
        Ok(())
    }

    /// Pause every running child, or resume every paused one.
    ///
    /// Children that already finished are left alone.
    pub fn toggle_pause(&mut self) -> Result<(), PlaybackError> {
        match self.run_state() {
            RunState::Running => {
                for child in self.children.iter_mut().filter(|c| c.is_running()) {
                    child.pause()?;
                }
                Ok(())
            }
            RunState::Paused => {
                for child in self.children.iter_mut().filter(|c| c.is_paused()) {
                    child.resume()?;
                }
                Ok(())
            }
            _ => Err(self.invalid("toggle pause")),
        }
    }

    pub fn stop(&mut self) {
        for child in &mut self.children {
            child.stop();
        }
    }

    pub fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }

    /// Regenerate once and hand every child a fresh copy.
    pub fn new_maze<S: MazeSource + ?Sized>(&mut self, source: &mut S) -> Result<(), PlaybackError> {
        let maze = source.next_maze(self.config.rows, self.config.cols)?;
        debug!(
            "comparison: distributing {}x{} maze to {} runs",
            maze.rows(),
            maze.cols(),
            self.children.len()
        );
        for child in &mut self.children {
            child.replace_maze(maze.clone());
        }
        self.maze = maze;
        Ok(())
    }

    /// Set the shared speed. Every child is updated even when the factor
    /// is rejected, so they stay in step.
    pub fn set_speed_factor(&mut self, factor: f64) -> Result<f64, PlaybackError> {
        let mut result = Ok(self.config.default_speed);
        for child in &mut self.children {
            result = child.set_speed_factor(factor);
        }
        result
    }

    /// Fan one clock tick out to every child. Returns the total steps run.
    pub fn tick(&mut self, elapsed: Duration) -> Result<usize, PlaybackError> {
        let mut steps = 0;
        for child in &mut self.children {
            steps += child.tick(elapsed)?;
        }
        Ok(steps)
    }

    pub fn apply<S: MazeSource + ?Sized>(
        &mut self,
        cmd: Command,
        source: &mut S,
    ) -> Result<Control, PlaybackError> {
        match cmd {
            Command::Start => self.start()?,
            Command::PauseToggle => self.toggle_pause()?,
            Command::Stop => self.stop(),
            Command::NewMaze => self.new_maze(source)?,
            Command::SetSpeedFactor(f) => {
                self.set_speed_factor(f)?;
            }
            Command::SelectAlgorithm(_) => return Err(self.invalid("select an algorithm")),
            Command::Back => {
                self.reset();
                return Ok(Control::Back);
            }
            Command::SpeedUp => self.for_each(PlaybackController::double_speed),
            Command::SlowDown => self.for_each(PlaybackController::halve_speed),
            Command::ResetSpeed => self.for_each(PlaybackController::reset_speed),
        }
        Ok(Control::Continue)
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.children.iter().map(|c| c.snapshot()).collect()
    }

    fn for_each(&mut self, f: impl Fn(&mut PlaybackController) -> f64) {
        for child in &mut self.children {
            f(child);
        }
    }

    fn invalid(&self, action: &'static str) -> PlaybackError {
        PlaybackError::InvalidState {
            action,
            state: self.run_state(),
        }
    }
}
