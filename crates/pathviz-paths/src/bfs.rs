use std::collections::VecDeque;

use pathviz_core::{Coord, Range};

use crate::traits::Pather;

/// Sentinel value meaning "unreachable" in a [`DistanceMap`].
pub const UNREACHABLE: i32 = i32::MAX;

/// Breadth-first step distances from a set of sources.
///
/// Used to check maze connectivity and as the reference shortest-path
/// length when validating search results.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    rng: Range,
    dist: Vec<i32>,
}

impl DistanceMap {
    /// Compute a multi-source breadth-first distance map.
    ///
    /// Each step has cost 1. Sources outside the pather's range are
    /// ignored.
    pub fn new<P: Pather>(pather: &P, sources: &[Coord]) -> Self {
        let rng = pather.range();
        let mut map = Self {
            rng,
            dist: vec![UNREACHABLE; rng.len()],
        };

        let mut queue: VecDeque<usize> = VecDeque::new();
        for &src in sources {
            let Some(si) = map.idx(src) else {
                continue;
            };
            if map.dist[si] != UNREACHABLE {
                continue;
            }
            map.dist[si] = 0;
            queue.push_back(si);
        }

        let mut nbuf = Vec::with_capacity(4);
        while let Some(ci) = queue.pop_front() {
            let current_dist = map.dist[ci];
            let cp = map.coord(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = map.idx(np) else {
                    continue;
                };
                if map.dist[ni] != UNREACHABLE {
                    continue;
                }
                map.dist[ni] = current_dist + 1;
                queue.push_back(ni);
            }
        }

        map
    }

    /// Step distance to `c`, or [`UNREACHABLE`].
    pub fn at(&self, c: Coord) -> i32 {
        match self.idx(c) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    /// Whether `c` was reached from any source.
    pub fn reaches(&self, c: Coord) -> bool {
        self.at(c) != UNREACHABLE
    }

    /// Number of reached coordinates, sources included.
    pub fn reached(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }

    #[inline]
    fn idx(&self, c: Coord) -> Option<usize> {
        if !self.rng.contains(c) {
            return None;
        }
        let row = (c.row - self.rng.min.row) as usize;
        let col = (c.col - self.rng.min.col) as usize;
        Some(row * self.rng.cols() as usize + col)
    }

    #[inline]
    fn coord(&self, idx: usize) -> Coord {
        let w = self.rng.cols() as usize;
        Coord::new(
            (idx / w) as i32 + self.rng.min.row,
            (idx % w) as i32 + self.rng.min.col,
        )
    }
}

/// Whether a 4-directional passable route joins `from` and `to`.
pub fn connected<P: Pather>(pather: &P, from: Coord, to: Coord) -> bool {
    DistanceMap::new(pather, &[from]).reaches(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Maze;

    #[test]
    fn distances_on_open_grid_are_manhattan() {
        let m = Maze::open(4, 5).unwrap();
        let d = DistanceMap::new(&m, &[Coord::ZERO]);
        assert_eq!(d.at(Coord::ZERO), 0);
        assert_eq!(d.at(Coord::new(3, 4)), 7);
        assert_eq!(d.at(Coord::new(2, 1)), 3);
        assert_eq!(d.reached(), 20);
    }

    #[test]
    fn walls_force_detours() {
        let m = Maze::parse(
            "
            ....
            ###.
            ....",
        )
        .unwrap();
        let d = DistanceMap::new(&m, &[Coord::ZERO]);
        assert_eq!(d.at(Coord::new(2, 0)), 8);
        assert_eq!(d.at(Coord::new(1, 0)), UNREACHABLE);
    }

    #[test]
    fn disconnected_regions() {
        let m = Maze::parse(
            "
            .#.
            .#.",
        )
        .unwrap();
        assert!(!connected(&m, Coord::ZERO, Coord::new(1, 2)));
        assert!(connected(&m, Coord::ZERO, Coord::new(1, 0)));
    }

    #[test]
    fn out_of_range_queries() {
        let m = Maze::open(2, 2).unwrap();
        let d = DistanceMap::new(&m, &[Coord::new(5, 5)]);
        assert_eq!(d.reached(), 0);
        assert_eq!(d.at(Coord::new(-1, 0)), UNREACHABLE);
    }
}
