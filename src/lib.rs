//! Trapped water on gridded islands.
//!
//! An island is a rectangle of integer elevations surrounded by sea. Water may flow
//! between orthogonally adjacent cells; climbing to higher ground costs the height gained.
//! Every basin is filled from its lowest cell upward until it spills toward the sea,
//! and the total water retained is the island's volume.
//!
//! ```
//! let islands = drainage::input::parse_str("1\n3 3\n5 5 5\n5 0 5\n5 5 5\n").unwrap();
//! let volumes = drainage::solve(islands, Default::default()).unwrap();
//! assert_eq!(volumes, vec![5]);
//! ```

pub mod config;
pub mod drainage;
pub mod fill;
pub mod geometry;
pub mod graph;
pub mod input;
mod queue;
pub mod solver;
pub mod terrain;
pub mod volume;

pub use config::Config;
pub use drainage::{DrainOptions, Drainage, Island};
pub use queue::TieBreak;
pub use solver::InconsistentGraphError;
pub use terrain::{Elevation, Terrain};
pub use volume::Volume;

/// Drain each island in turn, returning the trapped volumes in input order.
pub fn solve(
    islands: impl IntoIterator<Item = Terrain>,
    options: DrainOptions,
) -> Result<Vec<Volume>, InconsistentGraphError> {
    islands
        .into_iter()
        .map(|terrain| Island::from(terrain).drain(options).map(|drainage| drainage.volume))
        .collect()
}

/// Parse problem input and drain every island it describes.
pub fn solve_str(data: &str, options: DrainOptions) -> Result<Vec<Volume>, Error> {
    let islands = input::parse_str(data)?;
    solve(islands, options).map_err(Into::into)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reading input")]
    Input(#[from] input::Error),
    #[error("draining island")]
    InconsistentGraph(#[from] InconsistentGraphError),
}
