//! Paced, controllable playback of the search steppers.
//!
//! A [`PlaybackController`] turns wall-clock ticks into stepper calls and
//! keeps the rendering caches a viewer draws: the node being processed, the
//! discovered set and the final path. [`Comparison`] runs one controller
//! per [`Algorithm`](pathviz_paths::Algorithm) on copies of the same maze
//! behind a single control surface.
//!
//! ```
//! use std::time::Duration;
//!
//! use pathviz_core::Maze;
//! use pathviz_paths::Algorithm;
//! use pathviz_playback::{PlaybackConfig, PlaybackController};
//!
//! let maze = Maze::open(4, 4).unwrap();
//! let mut player = PlaybackController::new(PlaybackConfig::default(), maze, Algorithm::Bfs).unwrap();
//! player.start().unwrap();
//! while player.is_running() {
//!     player.tick(Duration::from_millis(16)).unwrap();
//! }
//! assert_eq!(player.solution_path().len(), 7);
//! ```

mod command;
mod comparison;
mod config;
mod controller;
mod error;
mod state;

pub use command::{Command, Control};
pub use comparison::Comparison;
pub use config::PlaybackConfig;
pub use controller::PlaybackController;
pub use error::PlaybackError;
pub use state::{PlaybackState, RunState, Snapshot};
