use std::ops::{Add, AddAssign};

use super::direction::Direction;

/// A grid coordinate.
///
/// Coordinates are signed so that stepping off the edge of a map produces a
/// representable (if out-of-bounds) cell rather than an underflow.
///
/// Ordering is row-major: `row` first, then `col`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    parse_display::Display,
)]
#[display("({row}, {col})")]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// All four orthogonal neighbors, in [`Direction::iter`] order.
    ///
    /// No bounds checking is performed.
    pub fn neighbors(self) -> impl 'static + Iterator<Item = Cell> {
        Direction::iter().map(move |direction| self + direction)
    }
}

impl AddAssign<Direction> for Cell {
    fn add_assign(&mut self, rhs: Direction) {
        let (dr, dc) = rhs.deltas();
        self.row += dr;
        self.col += dc;
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(mut self, rhs: Direction) -> Self::Output {
        self += rhs;
        self
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row as i32, col as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let neighbors: Vec<_> = Cell::new(1, 1).neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_row_major_order() {
        assert!(Cell::new(0, 5) < Cell::new(1, 0));
        assert!(Cell::new(1, 0) < Cell::new(1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(3, -1).to_string(), "(3, -1)");
    }
}
