//! Playback configuration.
//!
//! Every field is optional in TOML and falls back to its default:
//!
//! ```
//! use pathviz_playback::PlaybackConfig;
//!
//! let config = PlaybackConfig::from_toml_str(r#"
//!     base_interval_ms = 20
//!     max_speed = 10.0
//!
//!     [maze_gen]
//!     max_attempts = 64
//! "#).unwrap();
//!
//! assert_eq!(config.base_interval_ms, 20);
//! assert_eq!(config.rows, 10);
//! assert_eq!(config.maze_gen.max_attempts, 64);
//! ```

use std::path::Path;
use std::time::Duration;

use pathviz_core::{Coord, Maze};
use pathviz_mazegen::MazeGenConfig;
use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Timing, speed and maze settings shared by every controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Wall time per search step at speed factor 1.0.
    pub base_interval_ms: u64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub default_speed: f64,
    /// Catch-up ceiling: steps run by a single `tick`.
    pub max_steps_per_tick: usize,
    /// Size of generated mazes.
    pub rows: i32,
    pub cols: i32,
    /// Search start; the maze entrance when unset.
    pub start: Option<Coord>,
    /// Search goal; the maze exit when unset.
    pub goal: Option<Coord>,
    pub maze_gen: MazeGenConfig,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 10,
            min_speed: 0.1,
            max_speed: 50.0,
            default_speed: 1.0,
            max_steps_per_tick: 64,
            rows: 10,
            cols: 10,
            start: None,
            goal: None,
            maze_gen: MazeGenConfig::default(),
        }
    }
}

impl PlaybackConfig {
    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PlaybackError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PlaybackError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlaybackError> {
        if self.base_interval_ms == 0 {
            return Err(invalid("base_interval_ms must be positive"));
        }
        let finite = [self.min_speed, self.max_speed, self.default_speed]
            .iter()
            .all(|s| s.is_finite());
        if !finite || self.min_speed <= 0.0 {
            return Err(invalid("speed bounds must be positive and finite"));
        }
        if self.min_speed > self.max_speed {
            return Err(invalid("min_speed exceeds max_speed"));
        }
        if !(self.min_speed..=self.max_speed).contains(&self.default_speed) {
            return Err(invalid("default_speed lies outside [min_speed, max_speed]"));
        }
        if self.max_steps_per_tick == 0 {
            return Err(invalid("max_steps_per_tick must be at least 1"));
        }
        if self.rows < 2 || self.cols < 2 {
            return Err(PlaybackError::Config(format!(
                "maze size {}x{} is below 2x2",
                self.rows, self.cols
            )));
        }
        self.maze_gen.validate()?;
        Ok(())
    }

    #[inline]
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    /// Clamp a positive speed factor into the configured bounds.
    #[inline]
    pub fn clamp_speed(&self, factor: f64) -> f64 {
        factor.clamp(self.min_speed, self.max_speed)
    }

    pub fn start_in(&self, maze: &Maze) -> Coord {
        self.start.unwrap_or_else(|| maze.entrance())
    }

    pub fn goal_in(&self, maze: &Maze) -> Coord {
        self.goal.unwrap_or_else(|| maze.exit())
    }
}

fn invalid(msg: &str) -> PlaybackError {
    PlaybackError::Config(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = PlaybackConfig::default();
        c.validate().unwrap();
        assert_eq!(c.base_interval(), Duration::from_millis(10));
        assert_eq!(c.clamp_speed(0.01), 0.1);
        assert_eq!(c.clamp_speed(80.0), 50.0);
        assert_eq!(c.clamp_speed(3.0), 3.0);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(
            PlaybackConfig::from_toml_str("").unwrap(),
            PlaybackConfig::default()
        );
    }

    #[test]
    fn toml_endpoints() {
        let c = PlaybackConfig::from_toml_str(
            r#"
            rows = 6
            cols = 8
            start = { row = 1, col = 1 }
            "#,
        )
        .unwrap();
        let maze = Maze::open(6, 8).unwrap();
        assert_eq!(c.start_in(&maze), Coord::new(1, 1));
        assert_eq!(c.goal_in(&maze), Coord::new(5, 7));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            PlaybackConfig::from_toml_str("min_speed = 5.0\nmax_speed = 1.0"),
            Err(PlaybackError::Config(_))
        ));
        assert!(matches!(
            PlaybackConfig::from_toml_str("default_speed = 100.0"),
            Err(PlaybackError::Config(_))
        ));
        assert!(matches!(
            PlaybackConfig::from_toml_str("rows = 1"),
            Err(PlaybackError::Config(_))
        ));
        assert!(matches!(
            PlaybackConfig::from_toml_str("max_steps_per_tick = 0"),
            Err(PlaybackError::Config(_))
        ));
        assert!(matches!(
            PlaybackConfig::from_toml_str("[maze_gen]\nmax_attempts = 0"),
            Err(PlaybackError::MazeGen(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            PlaybackConfig::from_toml_str("rows = \"ten\""),
            Err(PlaybackError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            PlaybackConfig::from_toml_file("/nonexistent/pathviz.toml"),
            Err(PlaybackError::Io(_))
        ));
    }
}
