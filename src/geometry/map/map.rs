use crate::geometry::Cell;
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A Map keeps track of a rectangular tile grid.
///
/// Its coordinate system puts the origin in the top left: `row` grows downward
/// and `col` grows rightward, matching the order in which grids are written down.
///
/// ## Entry Points
///
/// - [`Map::new`] creates a map full of default tiles.
/// - [`Map::procedural`] creates a map from a function of each cell.
///
/// ## Panics
///
/// Several internal methods assume that the width and height of the map can be
/// represented in an `i32`. Very large maps may panic if that assumption is violated.
#[derive(Clone, Default)]
pub struct Map<Tile> {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl<Tile> Map<Tile> {
    /// Procedurally create a new `Map` from a function.
    pub fn procedural(width: usize, height: usize, procedure: impl Fn(Cell) -> Tile) -> Map<Tile> {
        let area = width * height;
        let mut map = Map {
            tiles: Vec::with_capacity(area),
            width,
            height,
        };
        for idx in 0..area {
            let cell = map.index2cell(idx);
            map.tiles.push(procedure(cell));
        }
        map
    }

    /// Width of this map.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of this map.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles in this map.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate over the cells and tiles of this map, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &Tile)> {
        let index2cell = self.make_index2cell();
        self.tiles
            .iter()
            .enumerate()
            .map(move |(idx, tile)| (index2cell(idx), tile))
    }

    /// Iterate over the cells and tiles of this map, with mutable access to the tiles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Cell, &mut Tile)> {
        let index2cell = self.make_index2cell();
        self.tiles
            .iter_mut()
            .enumerate()
            .map(move |(idx, tile)| (index2cell(idx), tile))
    }

    /// Iterate over the cells of this map without depending on the lifetime of `self`.
    pub fn points(&self) -> impl Iterator<Item = Cell> {
        let index2cell = self.make_index2cell();
        (0..self.tiles.len()).map(index2cell)
    }

    /// `true` when a cell is legal within the bounds of this map.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.make_in_bounds()(cell)
    }

    /// Make a function which returns `true` when a cell is within the bounds of this map,
    /// without borrowing `self`.
    fn make_in_bounds(&self) -> impl Fn(Cell) -> bool {
        let (width, height) = (self.width, self.height);
        move |cell| {
            cell.row >= 0 && cell.col >= 0 && (cell.row as usize) < height && (cell.col as usize) < width
        }
    }

    /// Return an iterator of all legal cells orthogonally adjacent to the given cell,
    /// in [`Cell::neighbors`] order.
    ///
    /// This iterator will return up to 4 elements; it does not include diagonals.
    pub fn orthogonal_adjacencies(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let in_bounds = self.make_in_bounds();
        cell.neighbors().filter(move |&neighbor| in_bounds(neighbor))
    }

    /// Dense index of a cell, usable as a key into side tables of length [`Map::len`].
    ///
    /// `None` when the cell is out of bounds.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.col as usize + (cell.row as usize * self.width))
    }

    /// convert a 1d index in the tiles into a 2d cell
    fn index2cell(&self, idx: usize) -> Cell {
        (idx / self.width, idx % self.width).into()
    }

    /// make a function which converts a 1d index in the tiles into a cell without borrowing self
    fn make_index2cell(&self) -> impl Fn(usize) -> Cell {
        let width = self.width;
        move |idx| (idx / width, idx % width).into()
    }
}

impl<Tile: Clone + Default> Map<Tile> {
    /// Create a new map of the specified dimensions, filled with default tiles.
    #[inline]
    pub fn new(width: usize, height: usize) -> Map<Tile> {
        Map {
            tiles: vec![Tile::default(); width * height],
            width,
            height,
        }
    }
}

impl<Tile> fmt::Debug for Map<Tile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Map<{}>", std::any::type_name::<Tile>()))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tiles", &format_args!("[...; {}]", self.tiles.len()))
            .finish()
    }
}

impl<Tile: PartialEq> PartialEq for Map<Tile> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.tiles == other.tiles
    }
}

impl<Tile: Eq> Eq for Map<Tile> {}

impl<Tile> Index<Cell> for Map<Tile> {
    type Output = Tile;

    /// Panics if the cell is out of bounds.
    fn index(&self, cell: Cell) -> &Tile {
        let idx = self
            .index_of(cell)
            .unwrap_or_else(|| panic!("{} is out of bounds", cell));
        self.tiles.index(idx)
    }
}

impl<Tile> IndexMut<Cell> for Map<Tile> {
    /// Panics if the cell is out of bounds.
    fn index_mut(&mut self, cell: Cell) -> &mut Tile {
        let idx = self
            .index_of(cell)
            .unwrap_or_else(|| panic!("{} is out of bounds", cell));
        self.tiles.index_mut(idx)
    }
}

impl<Tile> fmt::Display for Map<Tile>
where
    Tile: fmt::Display,
{
    /// Tiles are right-aligned in columns as wide as the widest rendered tile,
    /// separated by a single space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.tiles.iter().map(ToString::to_string).collect();
        let width = rendered.iter().map(String::len).max().unwrap_or_default();
        for row in rendered.chunks(self.width.max(1)) {
            for (idx, tile) in row.iter().enumerate() {
                if idx != 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", tile, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
