//! Order in which interior cells are taken as drainage sources: lowest first.

use crate::{
    geometry::Cell,
    terrain::{Elevation, Terrain},
};
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;

/// How cells of equal elevation are ordered in the source queue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Lower rows first, then lower columns.
    #[default]
    RowMajor,
    /// Higher rows first, then higher columns.
    ReverseRowMajor,
}

/// Source queue state
// https://doc.rust-lang.org/std/collections/binary_heap/#examples
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct QueueEntry {
    pub elevation: Elevation,
    pub rank: usize,
    pub cell: Cell,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for QueueEntry {
    fn cmp(&self, other: &QueueEntry) -> std::cmp::Ordering {
        // Notice that we flip the ordering on elevation and rank.
        // Ranks are unique per cell, which keeps `PartialEq` and `Ord` consistent.
        other
            .elevation
            .cmp(&self.elevation)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &QueueEntry) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Every interior cell, lowest first.
///
/// Priorities are a snapshot of the elevations at construction time; cells are not
/// reprioritized when the terrain later changes.
#[derive(Debug)]
pub(crate) struct SourceQueue(BinaryHeap<QueueEntry>);

impl SourceQueue {
    pub fn snapshot(terrain: &Terrain, tie_break: TieBreak) -> SourceQueue {
        let cells: Vec<Cell> = terrain.interior_cells().collect();
        let count = cells.len();
        let heap = cells
            .into_iter()
            .enumerate()
            .map(|(idx, cell)| QueueEntry {
                elevation: terrain.elevation(cell),
                rank: match tie_break {
                    TieBreak::RowMajor => idx,
                    TieBreak::ReverseRowMajor => count - 1 - idx,
                },
                cell,
            })
            .collect();
        SourceQueue(heap)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Iterator for SourceQueue {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        self.0.pop().map(|entry| entry.cell)
    }
}
