/// Direction on a square grid.
///
/// Rows grow downward and columns grow rightward, so `Up` decreases the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Iterate through all `Direction`s: top, bottom, left, right.
    ///
    /// This order is load-bearing: it is the order in which graph edges are built,
    /// and therefore the order in which shortest-path ties are resolved.
    pub fn iter() -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(Direction::Up), |direction| {
            use Direction::*;

            match direction {
                Up => Some(Down),
                Down => Some(Left),
                Left => Some(Right),
                Right => None,
            }
        })
    }

    /// `(d_row, d_col)` for a single step in this direction.
    pub fn deltas(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}
