//! Resumable grid search for step-by-step visualization.
//!
//! This crate provides the four search strategies of the visualizer as
//! *steppers*: instead of running to completion they hand back one
//! [`Event`] per call so an external clock can pace them.
//!
//! - **Breadth-first** (FIFO frontier, shortest paths)
//! - **Depth-first** (LIFO frontier)
//! - **Greedy best-first** (Manhattan-distance priority)
//! - **A\*** (`g + h` priority, shortest paths)
//!
//! All four share one expansion skeleton in [`Search`] and differ only in
//! frontier ordering and neighbor admission, selected by [`Algorithm`].
//!
//! [`DistanceMap`] offers a plain breadth-first distance map for
//! connectivity checks and reference shortest-path lengths.

mod algorithm;
mod bfs;
mod distance;
mod error;
mod event;
mod frontier;
mod search;
mod traits;

pub use algorithm::Algorithm;
pub use bfs::{DistanceMap, UNREACHABLE, connected};
pub use distance::manhattan;
pub use error::SearchError;
pub use event::{Event, Outcome};
pub use search::{Phase, Search, SearchStats, SearchStepper};
pub use traits::Pather;
