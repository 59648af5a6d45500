//! The elevation grid of a single island.

use crate::{
    geometry::{Cell, Map},
    input::InputShapeError,
};
use std::fmt;

/// Height of a single cell above sea level.
pub type Elevation = u32;

/// Padded elevation grid.
///
/// The interior of an `H x W` island occupies rows `1..=H` and columns `1..=W`.
/// It is surrounded by a one-cell frame at sea level (height `0`), so the
/// underlying map is `(H + 2) x (W + 2)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Terrain {
    map: Map<Elevation>,
}

impl Terrain {
    /// Build a padded terrain from the interior rows of an island.
    ///
    /// `height` rows of exactly `width` values each are required.
    pub fn from_rows<Row>(width: usize, height: usize, rows: &[Row]) -> Result<Self, InputShapeError>
    where
        Row: AsRef<[Elevation]>,
    {
        let (padded_width, padded_height) = Terrain::padded_dimensions(width, height)?;
        if rows.len() != height {
            return Err(InputShapeError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.as_ref().len() != width)
        {
            return Err(InputShapeError::RowWidth {
                row: row + 1,
                expected: width,
                found: values.as_ref().len(),
            });
        }

        let map = Map::procedural(padded_width, padded_height, |cell| {
            let (row, col) = (cell.row as usize, cell.col as usize);
            if (1..=height).contains(&row) && (1..=width).contains(&col) {
                rows[row - 1].as_ref()[col - 1]
            } else {
                0
            }
        });
        Ok(Terrain { map })
    }

    /// `(width, height)` of the padded grid for an island of the given interior size.
    ///
    /// Cells are addressed with `i32` coordinates, so the padded grid must fit that range.
    pub fn padded_dimensions(width: usize, height: usize) -> Result<(usize, usize), InputShapeError> {
        let too_large = InputShapeError::TooLarge { height, width };
        let padded_width = width.checked_add(2).ok_or_else(|| too_large.clone())?;
        let padded_height = height.checked_add(2).ok_or_else(|| too_large.clone())?;
        match padded_width.checked_mul(padded_height) {
            Some(area) if area <= i32::MAX as usize => Ok((padded_width, padded_height)),
            _ => Err(too_large),
        }
    }

    /// Number of interior rows.
    pub fn height(&self) -> usize {
        self.map.height() - 2
    }

    /// Number of interior columns.
    pub fn width(&self) -> usize {
        self.map.width() - 2
    }

    /// The padded grid, frame included.
    pub fn padded(&self) -> &Map<Elevation> {
        &self.map
    }

    /// `true` for cells which are part of the island proper, not the frame.
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.row >= 1
            && cell.col >= 1
            && cell.row as usize <= self.height()
            && cell.col as usize <= self.width()
    }

    /// `true` for cells on the sea-level frame.
    pub fn is_frame(&self, cell: Cell) -> bool {
        self.map.in_bounds(cell) && !self.is_interior(cell)
    }

    /// Iterate over the interior cells in row-major order.
    pub fn interior_cells(&self) -> impl '_ + Iterator<Item = Cell> {
        self.map.points().filter(move |&cell| self.is_interior(cell))
    }

    /// Elevation of a cell of the padded grid.
    ///
    /// Panics if the cell lies outside the frame.
    pub fn elevation(&self, cell: Cell) -> Elevation {
        self.map[cell]
    }

    /// Overwrite the elevation of an interior cell.
    ///
    /// The frame is sea level and never changes; attempts to raise it are ignored.
    pub fn set_elevation(&mut self, cell: Cell, elevation: Elevation) {
        if self.is_interior(cell) {
            self.map[cell] = elevation;
        }
    }

    /// A copy of the interior, without the frame.
    pub fn interior(&self) -> Map<Elevation> {
        Map::procedural(self.width(), self.height(), |cell| {
            self.map[Cell::new(cell.row + 1, cell.col + 1)]
        })
    }
}

impl fmt::Debug for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terrain")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl fmt::Display for Terrain {
    /// Renders only the interior.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.interior().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl() -> Terrain {
        let rows: [[Elevation; 3]; 3] = [[5, 5, 5], [5, 0, 5], [5, 5, 5]];
        Terrain::from_rows(3, 3, &rows).unwrap()
    }

    #[test]
    fn test_frame_is_sea_level() {
        let terrain = bowl();
        assert_eq!(terrain.padded().width(), 5);
        assert_eq!(terrain.padded().height(), 5);
        for (cell, &elevation) in terrain.padded().iter() {
            if terrain.is_frame(cell) {
                assert_eq!(elevation, 0, "frame cell {} must be at sea level", cell);
            }
        }
    }

    #[test]
    fn test_interior_offset_by_one() {
        let terrain = bowl();
        assert_eq!(terrain.elevation(Cell::new(2, 2)), 0);
        assert_eq!(terrain.elevation(Cell::new(1, 1)), 5);
        assert_eq!(terrain.interior_cells().count(), 9);
        assert_eq!(terrain.interior_cells().next(), Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_set_elevation_ignores_frame() {
        let mut terrain = bowl();
        terrain.set_elevation(Cell::new(0, 2), 9);
        terrain.set_elevation(Cell::new(2, 2), 5);
        assert_eq!(terrain.elevation(Cell::new(0, 2)), 0);
        assert_eq!(terrain.elevation(Cell::new(2, 2)), 5);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows: Vec<Vec<Elevation>> = vec![vec![1, 2], vec![3]];
        let err = Terrain::from_rows(2, 2, &rows).unwrap_err();
        assert!(matches!(
            err,
            InputShapeError::RowWidth {
                row: 2,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_missing_rows_rejected() {
        let rows: [[Elevation; 2]; 1] = [[1, 2]];
        let err = Terrain::from_rows(2, 3, &rows).unwrap_err();
        assert!(matches!(
            err,
            InputShapeError::RowCount {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_oversized_rejected() {
        let rows: [[Elevation; 0]; 0] = [];
        assert_eq!(
            Terrain::from_rows(usize::MAX, 0, &rows).unwrap_err(),
            InputShapeError::TooLarge {
                height: 0,
                width: usize::MAX
            }
        );
        assert_eq!(Terrain::padded_dimensions(3, 2), Ok((5, 4)));
        assert!(Terrain::padded_dimensions(1 << 16, 1 << 16).is_err());
    }

    #[test]
    fn test_display_shows_interior() {
        assert_eq!(bowl().to_string(), "5 5 5\n5 0 5\n5 5 5\n");
    }
}
