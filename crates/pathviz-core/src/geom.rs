//! Geometry primitives: [`Coord`] and [`Range`].
//!
//! Coordinates are `(row, col)` pairs with rows growing down and columns
//! growing right. A coordinate is its own node identity in every search.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid cell address. Rows grow down, columns grow right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Offsets of the four orthogonal neighbours in expansion order:
    /// up, down, left, right.
    pub const CARDINALS: [Coord; 4] = [
        Self::new(-1, 0),
        Self::new(1, 0),
        Self::new(0, -1),
        Self::new(0, 1),
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in expansion order (up, down, left,
    /// right). Some may lie outside any given grid.
    #[inline]
    pub fn neighbors_4(self) -> [Coord; 4] {
        Self::CARDINALS.map(|d| self + d)
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Coord,
    pub max: Coord,
}

impl Range {
    /// Create a new range from two corners and canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(row0: i32, col0: i32, row1: i32, col1: i32) -> Self {
        Self {
            min: Coord::new(row0.min(row1), col0.min(col1)),
            max: Coord::new(row0.max(row1), col0.max(col1)),
        }
    }

    /// The range `[0, rows) x [0, cols)`.
    #[inline]
    pub fn with_size(rows: i32, cols: i32) -> Self {
        Self::new(0, 0, rows, cols)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(self) -> i32 {
        self.max.row - self.min.row
    }

    /// Number of columns.
    #[inline]
    pub fn cols(self) -> i32 {
        self.max.col - self.min.col
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.rows() as usize) * (self.cols() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.row >= self.max.row || self.min.col >= self.max.col
    }

    /// Whether `c` is inside the half-open range.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= self.min.row && c.row < self.max.row && c.col >= self.min.col && c.col < self.max.col
    }

    /// Intersection of two ranges. Disjoint ranges yield the empty default.
    #[inline]
    pub fn intersect(self, other: Range) -> Self {
        let r = Self {
            min: Coord::new(
                self.min.row.max(other.min.row),
                self.min.col.max(other.min.col),
            ),
            max: Coord::new(
                self.max.row.min(other.max.row),
                self.max.col.min(other.max.col),
            ),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Every `rows x cols` sub-rectangle fully inside this range, in
    /// row-major order of their top-left corner.
    pub fn windows(self, rows: i32, cols: i32) -> impl Iterator<Item = Range> {
        let corners = Range {
            min: self.min,
            max: Coord::new(self.max.row - rows + 1, self.max.col - cols + 1),
        };
        corners
            .iter()
            .map(move |c| Range::new(c.row, c.col, c.row + rows, c.col + cols))
    }

    /// Row-major iterator over every coordinate in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Coord;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Coord,
}

impl Iterator for RangeIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.cur.row >= self.range.max.row || self.range.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.range.max.col {
            self.cur.col = self.range.min.col;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.row >= self.range.max.row {
            return (0, Some(0));
        }
        let w = self.range.cols() as usize;
        let remaining_in_row = (self.range.max.col - self.cur.col) as usize;
        let remaining_rows = (self.range.max.row - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_in_expansion_order() {
        let c = Coord::new(2, 3);
        assert_eq!(
            c.neighbors_4(),
            [
                Coord::new(1, 3),
                Coord::new(3, 3),
                Coord::new(2, 2),
                Coord::new(2, 4),
            ]
        );
    }

    #[test]
    fn coord_orders_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(1, 0)]);
    }

    #[test]
    fn range_contains_half_open() {
        let r = Range::with_size(3, 4);
        assert!(r.contains(Coord::ZERO));
        assert!(r.contains(Coord::new(2, 3)));
        assert!(!r.contains(Coord::new(3, 0)));
        assert!(!r.contains(Coord::new(0, 4)));
        assert!(!r.contains(Coord::new(-1, 0)));
        assert_eq!(r.len(), 12);
    }

    #[test]
    fn range_iter_row_major_exact_size() {
        let r = Range::with_size(2, 3);
        let it = r.iter();
        assert_eq!(it.len(), 6);
        let cells: Vec<Coord> = it.collect();
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[2], Coord::new(0, 2));
        assert_eq!(cells[3], Coord::new(1, 0));
        assert_eq!(cells[5], Coord::new(1, 2));
    }

    #[test]
    fn empty_range_iterates_nothing() {
        let r = Range::with_size(0, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn windows_cover_every_placement() {
        let r = Range::with_size(4, 5);
        let w: Vec<Range> = r.windows(2, 3).collect();
        // 3 row placements x 3 column placements
        assert_eq!(w.len(), 9);
        assert_eq!(w[0], Range::new(0, 0, 2, 3));
        assert_eq!(w[8], Range::new(2, 2, 4, 5));
        assert!(w.iter().all(|b| b.len() == 6));
    }

    #[test]
    fn windows_larger_than_range_is_empty() {
        let r = Range::with_size(2, 2);
        assert_eq!(r.windows(2, 3).count(), 0);
        assert_eq!(r.windows(3, 2).count(), 0);
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Range::new(0, 0, 2, 2);
        let b = Range::new(3, 3, 5, 5);
        assert!(a.intersect(b).is_empty());
        assert_eq!(a.intersect(Range::new(1, 1, 4, 4)), Range::new(1, 1, 2, 2));
    }
}
