//! **pathviz-core**: core types for the grid pathfinding visualizer.
//!
//! This crate provides the foundational types shared by the search
//! steppers, the maze generator and the playback controller: grid
//! coordinates, half-open ranges and the occupancy [`Maze`].

pub mod error;
pub mod geom;
pub mod maze;

pub use error::MazeError;
pub use geom::{Coord, Range, RangeIter};
pub use maze::{Cell, Maze};
