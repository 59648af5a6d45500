pub mod cell;
pub mod direction;
pub mod map;

pub use cell::Cell;
pub use direction::Direction;
pub use map::Map;
