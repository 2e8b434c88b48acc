//! Solvable maze generation for the pathfinding visualizer.
//!
//! [`MazeGen`] builds mazes with a randomized Prim spanning tree, forces a
//! blocked border with an open entrance at `(0, 0)` and exit at
//! `(rows - 1, cols - 1)`, carves a monotone route between them, then
//! repairs uniform 2x3 / 3x2 blocks. Candidates that fail the final
//! connectivity check are thrown away and rebuilt.
//!
//! ```
//! use pathviz_mazegen::MazeGen;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut generator = MazeGen::new(StdRng::seed_from_u64(7));
//! let maze = generator.generate(10, 10).unwrap();
//! assert!(pathviz_paths::connected(&maze, maze.entrance(), maze.exit()));
//! ```

mod error;
mod mazegen;
mod prim;
mod repair;

pub use error::MazeGenError;
pub use mazegen::{MazeGen, MazeGenConfig};
pub use repair::{BLOCK_SHAPES, degenerate_blocks};

use pathviz_core::Maze;
use rand::Rng;

/// Something that hands out mazes on demand.
///
/// The playback controller asks its source for a new maze whenever a
/// `NewMaze` command arrives, so tests can swap the random generator for a
/// fixed layout.
pub trait MazeSource {
    fn next_maze(&mut self, rows: i32, cols: i32) -> Result<Maze, MazeGenError>;
}

impl<R: Rng> MazeSource for MazeGen<R> {
    fn next_maze(&mut self, rows: i32, cols: i32) -> Result<Maze, MazeGenError> {
        self.generate(rows, cols)
    }
}

/// A source that always returns the same maze, ignoring the requested size.
#[derive(Debug, Clone)]
pub struct FixedMaze(pub Maze);

impl MazeSource for FixedMaze {
    fn next_maze(&mut self, _rows: i32, _cols: i32) -> Result<Maze, MazeGenError> {
        Ok(self.0.clone())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_fills_missing_fields() {
        let cfg: MazeGenConfig = serde_json::from_str(r#"{"max_attempts": 9}"#).unwrap();
        assert_eq!(cfg.max_attempts, 9);
        assert_eq!(cfg.repair_factor, MazeGenConfig::default().repair_factor);
    }
}
