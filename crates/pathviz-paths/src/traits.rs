use pathviz_core::{Coord, Maze, Range};

/// Minimal search interface: grid extent plus neighbor enumeration.
pub trait Pather {
    /// The rectangle of addressable coordinates.
    fn range(&self) -> Range;

    /// Whether a search may stand on `c`.
    fn passable(&self, c: Coord) -> bool;

    /// Append the traversable neighbors of `c` into `buf`, in expansion
    /// order. The caller clears `buf` before calling.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);
}

impl Pather for Maze {
    fn range(&self) -> Range {
        self.bounds()
    }

    fn passable(&self, c: Coord) -> bool {
        self.is_passable(c)
    }

    /// In-bounds passable cells, up, down, left, right.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        buf.extend(c.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}
