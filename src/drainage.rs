//! Filling every basin of an island, lowest source first.

use crate::{
    fill::fill_path,
    geometry::Cell,
    graph::{Graph, Node},
    queue::{SourceQueue, TieBreak},
    solver::{shortest_paths, Distance, InconsistentGraphError, ShortestPaths, SolverOptions},
    terrain::{Elevation, Terrain},
    volume::{spill_height, trapped_volume, Volume},
};

/// Everything which influences how an island is drained.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainOptions {
    pub solver: SolverOptions,
    pub tie_break: TieBreak,
}

/// A basin found and filled from a single source cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basin {
    pub source: Cell,
    /// Minimum climb from the source out to sea, before filling.
    pub distance: Distance,
    /// Interior cells from the one where water leaves the island to the source.
    pub path: Vec<Cell>,
    pub volume: Volume,
    pub spill: Elevation,
}

/// Summary of draining a whole island.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Drainage {
    pub volume: Volume,
    pub basins: usize,
    pub solver_runs: usize,
}

/// An island: its terrain and the drainage graph kept consistent with it.
#[derive(Debug, Clone)]
pub struct Island {
    terrain: Terrain,
    graph: Graph,
}

impl From<Terrain> for Island {
    fn from(terrain: Terrain) -> Self {
        let graph = Graph::build(&terrain);
        Island { terrain, graph }
    }
}

impl Island {
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Solve minimum-climb distances from an interior cell.
    pub fn solve_from(
        &self,
        source: Cell,
        options: SolverOptions,
    ) -> Result<ShortestPaths<'_>, InconsistentGraphError> {
        shortest_paths(&self.graph, Node::Cell(source), options)
    }

    /// Drain a single source cell.
    ///
    /// When the source is enclosed by higher ground, the water trapped along its drainage
    /// path is measured and the path is filled to its spill height. A source which already
    /// drains freely leaves the terrain untouched and yields `None`.
    pub fn drain_cell(
        &mut self,
        source: Cell,
        options: SolverOptions,
    ) -> Result<Option<Basin>, InconsistentGraphError> {
        let paths = self.solve_from(source, options)?;
        let distance = match paths.distance_to_sea() {
            Some(0) => return Ok(None),
            Some(distance) => distance,
            None => {
                tracing::warn!(%source, "no route to the sea");
                return Ok(None);
            }
        };
        let path = drainage_path(&paths, &self.terrain)?;

        let profile: Vec<Elevation> = path
            .iter()
            .map(|&cell| self.terrain.elevation(cell))
            .collect();
        let volume = trapped_volume(&profile);
        let spill = spill_height(&profile);

        fill_path(&mut self.terrain, &mut self.graph, &path, spill);
        tracing::debug!(%source, distance, volume, spill, path_len = path.len(), "filled basin");

        Ok(Some(Basin {
            source,
            distance,
            path,
            volume,
            spill,
        }))
    }

    /// Drain every interior cell in ascending order of elevation, accumulating trapped volume.
    ///
    /// Each cell is used as a source exactly once. The order is fixed by the elevations at
    /// the moment draining begins, even though filling may later raise a queued cell.
    ///
    /// Afterwards, [`Island::terrain`] shows the filled surface.
    pub fn drain(&mut self, options: DrainOptions) -> Result<Drainage, InconsistentGraphError> {
        let queue = SourceQueue::snapshot(&self.terrain, options.tie_break);
        tracing::trace!(sources = queue.len(), "draining island");

        let mut drainage = Drainage::default();
        for source in queue {
            drainage.solver_runs += 1;
            if let Some(basin) = self.drain_cell(source, options.solver)? {
                drainage.volume += basin.volume;
                drainage.basins += 1;
            }
        }

        tracing::info!(
            width = self.terrain.width(),
            height = self.terrain.height(),
            volume = drainage.volume,
            basins = drainage.basins,
            "drained island"
        );
        Ok(drainage)
    }
}

/// The interior stretch of the shortest route from the source to the sea.
///
/// Predecessors are followed back from the sea; everything up to and including the last
/// frame cell is dropped. What remains runs from the interior cell where the water leaves
/// the island to the source.
pub fn drainage_path(
    paths: &ShortestPaths<'_>,
    terrain: &Terrain,
) -> Result<Vec<Cell>, InconsistentGraphError> {
    let chain = paths.chain_to(Node::Sea)?;
    let is_interior = |node: &Node| node.cell().map_or(false, |cell| terrain.is_interior(cell));
    let start = chain
        .iter()
        .rposition(|node| !is_interior(node))
        .map_or(0, |idx| idx + 1);
    Ok(chain[start..].iter().filter_map(|node| node.cell()).collect())
}
