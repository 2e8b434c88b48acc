//! Paced playback of one search stepper.
//!
//! [`PlaybackController`] owns a maze, the selected algorithm and at most
//! one live stepper. An external loop calls [`tick`](PlaybackController::tick)
//! once per frame with the elapsed wall time; the controller scales it by the
//! speed factor and runs one stepper call per base interval, updating the
//! rendering caches from each returned [`Event`].

use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace, warn};
use pathviz_core::{Coord, Maze};
use pathviz_mazegen::MazeSource;
use pathviz_paths::{Algorithm, Event, Outcome, Search, SearchStats, SearchStepper};

use crate::command::{Command, Control};
use crate::config::PlaybackConfig;
use crate::error::PlaybackError;
use crate::state::{PlaybackState, RunState, Snapshot};

// ---------------------------------------------------------------------------
// PlaybackController
// ---------------------------------------------------------------------------

/// Drives one search stepper against an external clock.
///
/// Steppers are never reused: every [`start`](Self::start) builds a fresh
/// one, and stop, reset, maze replacement and algorithm changes drop it.
pub struct PlaybackController {
    config: PlaybackConfig,
    maze: Rc<Maze>,
    algorithm: Algorithm,
    stepper: Option<Box<dyn SearchStepper>>,
    state: PlaybackState,
    /// Set by the first stop press; the next one clears the caches.
    stop_armed: bool,
}

impl PlaybackController {
    /// Create an idle controller for `maze`.
    pub fn new(
        config: PlaybackConfig,
        maze: Maze,
        algorithm: Algorithm,
    ) -> Result<Self, PlaybackError> {
        config.validate()?;
        let state = PlaybackState::new(config.default_speed);
        Ok(Self {
            config,
            maze: Rc::new(maze),
            algorithm,
            stepper: None,
            state,
            stop_armed: false,
        })
    }

    /// Create an idle controller on a maze of the configured size drawn
    /// from `source`.
    pub fn generate<S: MazeSource + ?Sized>(
        config: PlaybackConfig,
        algorithm: Algorithm,
        source: &mut S,
    ) -> Result<Self, PlaybackError> {
        config.validate()?;
        let maze = source.next_maze(config.rows, config.cols)?;
        Self::new(config, maze, algorithm)
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[inline]
    pub fn speed_factor(&self) -> f64 {
        self.state.speed_factor
    }

    #[inline]
    pub fn current_node(&self) -> Option<Coord> {
        self.state.current_node
    }

    #[inline]
    pub fn solution_path(&self) -> &[Coord] {
        &self.state.solution_path
    }

    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.outcome.as_ref()
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.state.stats
    }

    // -- run control --------------------------------------------------------

    /// Begin a fresh run on the current maze.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.state.run_state.is_active() {
            return Err(self.invalid("start"));
        }
        let start = self.config.start_in(&self.maze);
        let goal = self.config.goal_in(&self.maze);
        let search = Search::new(self.algorithm, Rc::clone(&self.maze), start, goal)?;

        self.stepper = Some(Box::new(search));
        self.state.clear_caches();
        self.state.run_state = RunState::Running;
        self.stop_armed = false;
        debug!("{} run started: {start} -> {goal}", self.algorithm);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if !self.state.is_running() {
            return Err(self.invalid("pause"));
        }
        self.state.run_state = RunState::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), PlaybackError> {
        if !self.state.is_paused() {
            return Err(self.invalid("resume"));
        }
        self.state.run_state = RunState::Running;
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), PlaybackError> {
        match self.state.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            _ => Err(self.invalid("toggle pause")),
        }
    }

    /// Two-press stop.
    ///
    /// The first press drops the stepper and freezes the caches
    /// ([`RunState::Stopped`]); the second clears them ([`RunState::Reset`]).
    /// Pressing again after that changes nothing.
    pub fn stop(&mut self) {
        if self.state.run_state == RunState::Reset {
            return;
        }
        if self.stop_armed {
            self.reset();
            return;
        }
        self.stepper = None;
        self.state.run_state = RunState::Stopped;
        self.state.accumulated = Duration::ZERO;
        self.stop_armed = true;
        debug!("{} run stopped", self.algorithm);
    }

    /// Drop the stepper and clear every cache at once.
    pub fn reset(&mut self) {
        self.stepper = None;
        self.state.clear_caches();
        self.state.run_state = RunState::Reset;
        self.stop_armed = false;
        debug!("{} run reset", self.algorithm);
    }

    /// Swap in a new maze, tearing down the current run.
    pub fn replace_maze(&mut self, maze: Maze) {
        self.reset();
        debug!(
            "{}: new {}x{} maze",
            self.algorithm,
            maze.rows(),
            maze.cols()
        );
        self.maze = Rc::new(maze);
    }

    /// Switch algorithm, tearing down the current run.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.reset();
        self.algorithm = algorithm;
    }

    // -- speed --------------------------------------------------------------

    /// Set the speed factor, clamped to the configured bounds.
    ///
    /// A non-positive or non-finite factor is rejected and the speed is
    /// pinned to the configured minimum instead.
    pub fn set_speed_factor(&mut self, factor: f64) -> Result<f64, PlaybackError> {
        if !factor.is_finite() || factor <= 0.0 {
            warn!("rejected speed factor {factor}; using {}", self.config.min_speed);
            self.state.speed_factor = self.config.min_speed;
            return Err(PlaybackError::InvalidSpeed(factor));
        }
        self.state.speed_factor = self.config.clamp_speed(factor);
        Ok(self.state.speed_factor)
    }

    pub fn double_speed(&mut self) -> f64 {
        self.state.speed_factor = self.config.clamp_speed(self.state.speed_factor * 2.0);
        self.state.speed_factor
    }

    pub fn halve_speed(&mut self) -> f64 {
        self.state.speed_factor = self.config.clamp_speed(self.state.speed_factor / 2.0);
        self.state.speed_factor
    }

    pub fn reset_speed(&mut self) -> f64 {
        self.state.speed_factor = self.config.default_speed;
        self.state.speed_factor
    }

    // -- clock --------------------------------------------------------------

    /// Advance by `elapsed` wall time and return how many steps ran.
    ///
    /// Does nothing unless running. At most `max_steps_per_tick` steps run
    /// per call; scaled time beyond one further interval is dropped.
    pub fn tick(&mut self, elapsed: Duration) -> Result<usize, PlaybackError> {
        if !self.state.is_running() {
            return Ok(0);
        }
        let scaled = scale(elapsed, self.state.speed_factor);
        self.state.accumulated = self.state.accumulated.saturating_add(scaled);

        let interval = self.config.base_interval();
        let mut steps = 0;
        while self.state.accumulated >= interval {
            if steps == self.config.max_steps_per_tick {
                trace!(
                    "{}: catch-up capped at {steps} steps, dropping {:?}",
                    self.algorithm,
                    self.state.accumulated.saturating_sub(interval)
                );
                self.state.accumulated = interval;
                break;
            }
            self.state.accumulated -= interval;
            self.step_once()?;
            steps += 1;
            if !self.state.is_running() {
                break;
            }
        }
        Ok(steps)
    }

    fn step_once(&mut self) -> Result<(), PlaybackError> {
        let Some(stepper) = self.stepper.as_mut() else {
            return Ok(());
        };
        let event = stepper.step()?;
        self.state.stats = stepper.stats();

        match event {
            Event::Process(c) => self.state.current_node = Some(c),
            Event::Visit(c) => {
                self.state.visited.insert(c);
            }
            Event::PathFound(path) => {
                self.state.solution_path = path.clone();
                self.finish(Outcome::Found(path));
            }
            Event::Exhausted => {
                self.state.solution_path.clear();
                self.finish(Outcome::Exhausted);
            }
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        let stats = self.state.stats;
        match &outcome {
            Outcome::Found(path) => debug!(
                "{} found a {}-cell path: {} processed, {} discovered",
                self.algorithm,
                path.len(),
                stats.processed,
                stats.discovered
            ),
            Outcome::Exhausted => debug!(
                "{} exhausted after {} processed",
                self.algorithm, stats.processed
            ),
        }
        self.stepper = None;
        self.state.outcome = Some(outcome);
        self.state.run_state = RunState::Stopped;
        self.state.accumulated = Duration::ZERO;
    }

    // -- commands -----------------------------------------------------------

    /// Dispatch a UI command. `source` is only consulted for `NewMaze`.
    pub fn apply<S: MazeSource + ?Sized>(
        &mut self,
        cmd: Command,
        source: &mut S,
    ) -> Result<Control, PlaybackError> {
        match cmd {
            Command::Start => self.start()?,
            Command::PauseToggle => self.toggle_pause()?,
            Command::Stop => self.stop(),
            Command::NewMaze => {
                let maze = source.next_maze(self.config.rows, self.config.cols)?;
                self.replace_maze(maze);
            }
            Command::SetSpeedFactor(f) => {
                self.set_speed_factor(f)?;
            }
            Command::SelectAlgorithm(a) => self.select_algorithm(a),
            Command::Back => {
                self.reset();
                return Ok(Control::Back);
            }
            Command::SpeedUp => {
                self.double_speed();
            }
            Command::SlowDown => {
                self.halve_speed();
            }
            Command::ResetSpeed => {
                self.reset_speed();
            }
        }
        Ok(Control::Continue)
    }

    /// Owned copy of the render feed.
    pub fn snapshot(&self) -> Snapshot {
        let mut visited: Vec<Coord> = self.state.visited.iter().copied().collect();
        visited.sort();
        Snapshot {
            algorithm: self.algorithm,
            maze: Maze::clone(&self.maze),
            current_node: self.state.current_node,
            visited,
            solution_path: self.state.solution_path.clone(),
            label: self.state.run_state,
            speed_factor: self.state.speed_factor,
            outcome: self.state.outcome.clone(),
            stats: self.state.stats,
        }
    }

    fn invalid(&self, action: &'static str) -> PlaybackError {
        PlaybackError::InvalidState {
            action,
            state: self.state.run_state,
        }
    }
}

/// `elapsed * factor`, rounded to the nanosecond and saturating.
fn scale(elapsed: Duration, factor: f64) -> Duration {
    let nanos = (elapsed.as_nanos() as f64 * factor).round();
    // float-to-int casts saturate
    Duration::from_nanos(nanos as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_mazegen::FixedMaze;
    use pathviz_paths::SearchError;

    const MS10: Duration = Duration::from_millis(10);

    fn open(rows: i32, cols: i32) -> Maze {
        Maze::open(rows, cols).unwrap()
    }

    fn controller(maze: Maze, alg: Algorithm) -> PlaybackController {
        PlaybackController::new(PlaybackConfig::default(), maze, alg).unwrap()
    }

    fn run_to_end(c: &mut PlaybackController) -> usize {
        let mut total = 0;
        for _ in 0..10_000 {
            if !c.is_running() {
                break;
            }
            total += c.tick(Duration::from_secs(1)).unwrap();
        }
        total
    }

    #[test]
    fn idle_tick_is_a_noop() {
        let mut c = controller(open(4, 4), Algorithm::Bfs);
        assert_eq!(c.run_state(), RunState::Stopped);
        assert_eq!(c.tick(Duration::from_secs(5)).unwrap(), 0);
        assert_eq!(c.state().accumulated, Duration::ZERO);
        assert_eq!(c.current_node(), None);
    }

    #[test]
    fn ticks_follow_the_base_interval() {
        let mut c = controller(open(4, 4), Algorithm::Bfs);
        c.start().unwrap();
        assert_eq!(c.tick(Duration::from_millis(4)).unwrap(), 0);
        assert_eq!(c.tick(Duration::from_millis(6)).unwrap(), 1);
        assert_eq!(c.current_node(), Some(Coord::ZERO));

        assert_eq!(c.tick(Duration::from_millis(25)).unwrap(), 2);
        assert_eq!(c.state().accumulated, Duration::from_millis(5));
        assert_eq!(c.tick(Duration::from_millis(5)).unwrap(), 1);
        // (1,0) and (0,1) discovered
        assert_eq!(c.state().visited.len(), 2);
    }

    #[test]
    fn speed_scales_elapsed_time() {
        let mut c = controller(open(6, 6), Algorithm::Bfs);
        c.start().unwrap();
        c.set_speed_factor(2.0).unwrap();
        assert_eq!(c.tick(MS10).unwrap(), 2);
        c.set_speed_factor(0.5).unwrap();
        assert_eq!(c.tick(MS10).unwrap(), 0);
        assert_eq!(c.tick(MS10).unwrap(), 1);
    }

    #[test]
    fn catch_up_is_capped() {
        let config = PlaybackConfig {
            max_steps_per_tick: 4,
            ..PlaybackConfig::default()
        };
        let mut c = PlaybackController::new(config, open(10, 10), Algorithm::Bfs).unwrap();
        c.start().unwrap();
        assert_eq!(c.tick(Duration::from_secs(1)).unwrap(), 4);
        // at most one interval survives the cap
        assert_eq!(c.state().accumulated, MS10);
        assert_eq!(c.tick(Duration::ZERO).unwrap(), 1);
        assert_eq!(c.tick(Duration::ZERO).unwrap(), 0);
    }

    #[test]
    fn huge_elapsed_does_not_overflow() {
        let mut c = controller(open(10, 10), Algorithm::Bfs);
        c.start().unwrap();
        c.set_speed_factor(50.0).unwrap();
        assert_eq!(c.tick(Duration::MAX).unwrap(), 64);
    }

    #[test]
    fn bfs_run_completes_with_shortest_path() {
        let mut c = controller(open(4, 4), Algorithm::Bfs);
        c.start().unwrap();
        // 16 Process, 15 Visit, 1 PathFound
        assert_eq!(run_to_end(&mut c), 32);

        assert!(!c.is_running());
        assert_eq!(c.run_state(), RunState::Stopped);
        assert_eq!(c.solution_path().len(), 7);
        assert_eq!(c.solution_path().first(), Some(&Coord::ZERO));
        assert_eq!(c.solution_path().last(), Some(&Coord::new(3, 3)));
        assert!(matches!(c.outcome(), Some(Outcome::Found(_))));
        assert_eq!(c.stats().processed, 16);
        assert_eq!(c.state().visited.len(), 15);
        assert_eq!(c.tick(Duration::from_secs(1)).unwrap(), 0);
    }

    #[test]
    fn blocked_goal_ends_exhausted() {
        let maze = Maze::parse(
            "
            ....
            ....
            ...#
            ..#.",
        )
        .unwrap();
        for alg in Algorithm::ALL {
            let mut c = controller(maze.clone(), alg);
            c.start().unwrap();
            let steps = run_to_end(&mut c);
            assert_eq!(c.outcome(), Some(&Outcome::Exhausted), "{alg}");
            assert!(c.solution_path().is_empty());
            assert!(steps <= 2 * 16, "{alg}: {steps} steps");
        }
    }

    #[test]
    fn restart_builds_a_fresh_stepper() {
        let mut c = controller(open(4, 4), Algorithm::AStar);
        c.start().unwrap();
        run_to_end(&mut c);
        let first = c.snapshot();

        c.start().unwrap();
        assert!(c.state().visited.is_empty());
        assert_eq!(c.outcome(), None);
        run_to_end(&mut c);
        let second = c.snapshot();
        assert_eq!(first.solution_path, second.solution_path);
        assert_eq!(first.visited, second.visited);
    }

    #[test]
    fn speed_factor_bounds() {
        let mut c = controller(open(4, 4), Algorithm::Bfs);
        assert!(matches!(
            c.set_speed_factor(-1.0),
            Err(PlaybackError::InvalidSpeed(_))
        ));
        assert_eq!(c.speed_factor(), 0.1);

        c.reset_speed();
        assert!(c.set_speed_factor(0.0).is_err());
        assert_eq!(c.speed_factor(), 0.1);
        assert!(c.set_speed_factor(f64::NAN).is_err());
        assert_eq!(c.speed_factor(), 0.1);

        assert_eq!(c.set_speed_factor(120.0).unwrap(), 50.0);
        assert_eq!(c.set_speed_factor(0.01).unwrap(), 0.1);
        assert_eq!(c.set_speed_factor(3.5).unwrap(), 3.5);
    }

    #[test]
    fn speed_presets() {
        let mut c = controller(open(4, 4), Algorithm::Bfs);
        assert_eq!(c.double_speed(), 2.0);
        assert_eq!(c.double_speed(), 4.0);
        assert_eq!(c.halve_speed(), 2.0);
        c.set_speed_factor(40.0).unwrap();
        assert_eq!(c.double_speed(), 50.0);
        c.set_speed_factor(0.15).unwrap();
        assert_eq!(c.halve_speed(), 0.1);
        assert_eq!(c.reset_speed(), 1.0);
    }

    #[test]
    fn stop_twice_clears_then_holds() {
        let mut c = controller(open(5, 5), Algorithm::Bfs);
        c.start().unwrap();
        c.tick(Duration::from_millis(50)).unwrap();
        let visited = c.state().visited.len();
        assert!(visited > 0);

        c.stop();
        assert_eq!(c.run_state(), RunState::Stopped);
        assert_eq!(c.state().visited.len(), visited);
        assert_eq!(c.tick(MS10).unwrap(), 0);

        c.stop();
        assert_eq!(c.run_state(), RunState::Reset);
        assert!(c.state().visited.is_empty());
        assert_eq!(c.current_node(), None);

        let cleared = c.snapshot();
        c.stop();
        assert_eq!(c.snapshot(), cleared);
    }

    #[test]
    fn pause_and_resume_protocol() {
        let mut c = controller(open(4, 4), Algorithm::Dfs);
        assert!(matches!(
            c.resume(),
            Err(PlaybackError::InvalidState { state: RunState::Stopped, .. })
        ));
        assert!(c.pause().is_err());
        assert!(c.toggle_pause().is_err());

        c.start().unwrap();
        assert!(c.start().is_err());
        c.pause().unwrap();
        assert!(c.is_paused());
        assert_eq!(c.tick(Duration::from_secs(1)).unwrap(), 0);
        assert!(c.start().is_err());
        assert!(c.pause().is_err());

        c.toggle_pause().unwrap();
        assert!(c.is_running());
        assert!(c.resume().is_err());
        assert_eq!(c.tick(MS10).unwrap(), 1);
    }

    #[test]
    fn commands_dispatch() {
        let fixed = Maze::parse("..\n..").unwrap();
        let mut src = FixedMaze(fixed.clone());
        let mut c = controller(open(4, 4), Algorithm::Bfs);

        assert_eq!(c.apply(Command::Start, &mut src).unwrap(), Control::Continue);
        assert!(c.is_running());
        c.apply(Command::PauseToggle, &mut src).unwrap();
        assert!(c.is_paused());
        c.apply(Command::SpeedUp, &mut src).unwrap();
        c.apply(Command::SpeedUp, &mut src).unwrap();
        c.apply(Command::SlowDown, &mut src).unwrap();
        assert_eq!(c.speed_factor(), 2.0);
        c.apply(Command::ResetSpeed, &mut src).unwrap();
        assert_eq!(c.speed_factor(), 1.0);
        assert!(c.apply(Command::SetSpeedFactor(-3.0), &mut src).is_err());

        c.apply(Command::NewMaze, &mut src).unwrap();
        assert_eq!(c.maze(), &fixed);
        assert_eq!(c.run_state(), RunState::Reset);

        c.apply(Command::SelectAlgorithm(Algorithm::AStar), &mut src)
            .unwrap();
        assert_eq!(c.algorithm(), Algorithm::AStar);

        c.apply(Command::Start, &mut src).unwrap();
        c.apply(Command::Stop, &mut src).unwrap();
        assert_eq!(c.run_state(), RunState::Stopped);
        assert_eq!(c.apply(Command::Back, &mut src).unwrap(), Control::Back);
        assert_eq!(c.run_state(), RunState::Reset);
    }

    #[test]
    fn select_algorithm_tears_down_run() {
        let mut c = controller(open(4, 4), Algorithm::Bfs);
        c.start().unwrap();
        c.tick(Duration::from_millis(30)).unwrap();
        c.select_algorithm(Algorithm::GreedyBestFirst);
        assert!(!c.is_running());
        assert!(c.state().visited.is_empty());
        c.start().unwrap();
        run_to_end(&mut c);
        assert_eq!(c.snapshot().algorithm, Algorithm::GreedyBestFirst);
    }

    #[test]
    fn out_of_bounds_endpoint_fails_start() {
        let config = PlaybackConfig {
            goal: Some(Coord::new(9, 9)),
            ..PlaybackConfig::default()
        };
        let mut c = PlaybackController::new(config, open(4, 4), Algorithm::Bfs).unwrap();
        assert!(matches!(c.start(), Err(PlaybackError::Search(_))));
        assert!(!c.is_running());
    }

    #[test]
    fn blocked_start_fails_start() {
        let maze = Maze::parse(
            "
            ....
            .#..
            ....
            ....",
        )
        .unwrap();
        let config = PlaybackConfig {
            start: Some(Coord::new(1, 1)),
            ..PlaybackConfig::default()
        };
        let mut c = PlaybackController::new(config, maze, Algorithm::AStar).unwrap();
        assert!(matches!(
            c.start(),
            Err(PlaybackError::Search(SearchError::StartBlocked(p))) if p == Coord::new(1, 1)
        ));
        assert!(!c.is_running());
        assert!(c.solution_path().is_empty());
    }

    #[test]
    fn generate_uses_configured_size() {
        let config = PlaybackConfig {
            rows: 7,
            cols: 9,
            ..PlaybackConfig::default()
        };
        let mut generator = pathviz_mazegen::MazeGen::new(
            <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(5),
        );
        let c = PlaybackController::generate(config, Algorithm::Bfs, &mut generator).unwrap();
        assert_eq!((c.maze().rows(), c.maze().cols()), (7, 9));
    }

    #[test]
    fn snapshot_is_sorted_and_serializable() {
        let mut c = controller(open(5, 5), Algorithm::Dfs);
        c.start().unwrap();
        c.tick(Duration::from_millis(120)).unwrap();
        let snap = c.snapshot();
        assert!(snap.visited.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(snap.label, RunState::Running);

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
