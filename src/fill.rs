//! Raising a drained basin to its spill height.

use crate::{
    geometry::Cell,
    graph::Graph,
    terrain::{Elevation, Terrain},
};

/// Set every cell on `path` to `spill`, then refresh the graph edges touching those cells.
///
/// All elevations change before any weight is recomputed, so edges between two cells
/// of the same path see both of their final heights.
pub fn fill_path(terrain: &mut Terrain, graph: &mut Graph, path: &[Cell], spill: Elevation) {
    for &cell in path {
        terrain.set_elevation(cell, spill);
    }
    for &cell in path {
        graph.refresh_edges(terrain, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{climb, Node};

    fn setup(rows: &[&[Elevation]]) -> (Terrain, Graph) {
        let width = rows.first().map(|row| row.len()).unwrap_or_default();
        let terrain = Terrain::from_rows(width, rows.len(), rows).unwrap();
        let graph = Graph::build(&terrain);
        (terrain, graph)
    }

    #[test]
    fn test_fill_matches_rebuilt_graph() {
        let (mut terrain, mut graph) = setup(&[&[4, 4, 4, 4], &[4, 1, 0, 4], &[4, 4, 4, 4]]);
        let path = [Cell::new(1, 2), Cell::new(2, 2), Cell::new(2, 3)];
        fill_path(&mut terrain, &mut graph, &path, 4);

        for cell in &path {
            assert_eq!(terrain.elevation(*cell), 4);
        }

        let rebuilt = Graph::build(&terrain);
        for (from, to, weight) in rebuilt.edges() {
            assert_eq!(
                graph.weight(from, to),
                Some(weight),
                "edge {} -> {} out of date",
                from,
                to
            );
        }
    }

    #[test]
    fn test_fill_updates_incoming_weights() {
        let (mut terrain, mut graph) = setup(&[&[2, 0, 2]]);
        let pit = Cell::new(1, 2);
        let west = Cell::new(1, 1);
        assert_eq!(graph.weight(pit.into(), west.into()), Some(2));

        fill_path(&mut terrain, &mut graph, &[pit], 2);

        assert_eq!(graph.weight(west.into(), pit.into()), Some(climb(2, 2)));
        assert_eq!(graph.weight(pit.into(), west.into()), Some(0));
        assert_eq!(graph.weight(Node::Cell(Cell::new(0, 2)), pit.into()), Some(2));
    }

    #[test]
    fn test_fill_leaves_frame_alone() {
        let (mut terrain, mut graph) = setup(&[&[1]]);
        fill_path(&mut terrain, &mut graph, &[Cell::new(0, 1), Cell::new(1, 1)], 3);
        assert_eq!(terrain.elevation(Cell::new(0, 1)), 0);
        assert_eq!(terrain.elevation(Cell::new(1, 1)), 3);
    }
}
