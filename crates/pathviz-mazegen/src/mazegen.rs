//! The maze generator.
//!
//! Every candidate is built in four stages:
//!
//! 1. randomized Prim spanning tree over odd-coordinate rooms,
//! 2. outer border forced blocked, entrance and exit forced passable,
//! 3. a random monotone route from entrance to exit,
//! 4. repair passes over uniform 2x3 / 3x2 blocks.
//!
//! A candidate is accepted only if no uniform block remains and a
//! breadth-first traversal joins the entrance to the exit. Rejected
//! candidates are silently discarded and a new one is built from scratch.

use log::debug;
use pathviz_core::{Cell, Maze};
use pathviz_paths::connected;
use rand::Rng;

use crate::error::MazeGenError;
use crate::{prim, repair};

/// Tuning knobs for [`MazeGen`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeGenConfig {
    /// Candidates to try before giving up.
    pub max_attempts: usize,
    /// Repair flips allowed per candidate, as a multiple of the cell count.
    pub repair_factor: usize,
}

impl Default for MazeGenConfig {
    fn default() -> Self {
        Self {
            max_attempts: 256,
            repair_factor: 4,
        }
    }
}

impl MazeGenConfig {
    /// Reject settings that could never produce a maze.
    pub fn validate(&self) -> Result<(), MazeGenError> {
        if self.max_attempts == 0 {
            return Err(MazeGenError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.repair_factor == 0 {
            return Err(MazeGenError::InvalidConfig(
                "repair_factor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Solvable maze generator driven by an injected random source.
///
/// Output is deterministic for a given seeded `R`.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub config: MazeGenConfig,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator with the default config.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, MazeGenConfig::default())
    }

    pub fn with_config(rng: R, config: MazeGenConfig) -> Self {
        Self { rng, config }
    }

    /// Generate a `rows x cols` maze with a passable route from `(0, 0)` to
    /// `(rows - 1, cols - 1)` and no uniform 2x3 or 3x2 block.
    pub fn generate(&mut self, rows: i32, cols: i32) -> Result<Maze, MazeGenError> {
        if rows < 2 || cols < 2 {
            return Err(MazeGenError::InvalidDimensions { rows, cols });
        }
        self.config.validate()?;

        let budget = self.config.repair_factor * (rows as usize) * (cols as usize);
        for attempt in 1..=self.config.max_attempts {
            let mut maze = Maze::solid(rows, cols)?;
            prim::carve(&mut maze, &mut self.rng);

            maze.fill_border(Cell::Blocked);
            maze.set(maze.entrance(), Cell::Passable);
            maze.set(maze.exit(), Cell::Passable);
            prim::carve_route(&mut maze, &mut self.rng);

            if !repair::repair(&mut maze, &mut self.rng, budget) {
                debug!("maze candidate {attempt} ({rows}x{cols}): repair budget spent");
                continue;
            }
            if !connected(&maze, maze.entrance(), maze.exit()) {
                debug!("maze candidate {attempt} ({rows}x{cols}): repair cut the route");
                continue;
            }

            debug!(
                "generated {rows}x{cols} maze after {attempt} attempt(s), {} open cells",
                maze.count(Cell::Passable)
            );
            return Ok(maze);
        }

        Err(MazeGenError::RetriesExhausted {
            rows,
            cols,
            attempts: self.config.max_attempts,
        })
    }
}
