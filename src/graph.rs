//! Drainage graph: the padded terrain as a directed, weighted graph with a single sea sink.

use crate::{
    geometry::{Cell, Map},
    terrain::{Elevation, Terrain},
};
use std::{collections::HashMap, fmt};

/// Cost of an edge: the elevation climbed by taking it.
pub type Weight = u32;

/// A vertex of the drainage graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// A cell of the padded grid, frame included.
    Cell(Cell),
    /// The open water beyond the frame. Every drainage path ends here.
    Sea,
}

impl Node {
    pub fn cell(self) -> Option<Cell> {
        match self {
            Node::Cell(cell) => Some(cell),
            Node::Sea => None,
        }
    }
}

impl From<Cell> for Node {
    fn from(cell: Cell) -> Self {
        Node::Cell(cell)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Cell(cell) => cell.fmt(f),
            Node::Sea => write!(f, "sea"),
        }
    }
}

/// Climb cost of moving between two elevations.
///
/// Moving to equal or lower ground is free.
#[inline]
pub fn climb(from: Elevation, to: Elevation) -> Weight {
    to.saturating_sub(from)
}

/// Directed graph over the padded terrain plus the sea.
///
/// Adjacency is indexed by cell; edge weights live in a separate table keyed by
/// `(from, to)`. The graph holds no references into the terrain: whenever an
/// elevation changes, the affected weights must be refreshed with
/// [`Graph::refresh_edges`].
#[derive(Clone)]
pub struct Graph {
    adjacency: Map<Vec<Node>>,
    weights: HashMap<(Node, Node), Weight>,
}

impl Graph {
    /// Build the drainage graph for a terrain.
    ///
    /// Every cell of the padded grid gets an edge to each of its neighbors on the grid, in
    /// top, bottom, left, right order. Cells on the outer border of the frame, which are
    /// missing at least one neighbor, get a single free edge to the sea after those.
    pub fn build(terrain: &Terrain) -> Graph {
        let padded = terrain.padded();
        let mut adjacency: Map<Vec<Node>> = Map::new(padded.width(), padded.height());
        let mut weights = HashMap::with_capacity(padded.len() * 4);

        for (cell, edges) in adjacency.iter_mut() {
            let from = Node::Cell(cell);
            let elevation = padded[cell];
            for neighbor in padded.orthogonal_adjacencies(cell) {
                let to = Node::Cell(neighbor);
                edges.push(to);
                weights.insert((from, to), climb(elevation, padded[neighbor]));
            }
            if edges.len() < 4 {
                edges.push(Node::Sea);
                weights.insert((from, Node::Sea), 0);
            }
        }

        Graph { adjacency, weights }
    }

    /// Number of nodes, sea included.
    pub fn node_count(&self) -> usize {
        self.adjacency.len() + 1
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Dense index of a node in `0..self.node_count()`.
    ///
    /// Cells are numbered in row-major order; the sea comes last.
    pub fn index(&self, node: Node) -> Option<usize> {
        match node {
            Node::Cell(cell) => self.adjacency.index_of(cell),
            Node::Sea => Some(self.adjacency.len()),
        }
    }

    /// Iterate over all nodes in index order.
    pub fn nodes(&self) -> impl '_ + Iterator<Item = Node> {
        self.adjacency
            .points()
            .map(Node::Cell)
            .chain(std::iter::once(Node::Sea))
    }

    /// Outgoing neighbors of a node. The sea has none.
    pub fn neighbors(&self, node: Node) -> &[Node] {
        match node {
            Node::Cell(cell) if self.adjacency.in_bounds(cell) => self.adjacency[cell].as_slice(),
            _ => &[],
        }
    }

    /// Weight of the edge `from -> to`, if that edge exists.
    pub fn weight(&self, from: Node, to: Node) -> Option<Weight> {
        self.weights.get(&(from, to)).copied()
    }

    /// Iterate over every edge as `(from, to, weight)`.
    ///
    /// Edges are produced grouped by source node in index order, and within each source
    /// in the order they were added.
    pub fn edges(&self) -> impl '_ + Iterator<Item = (Node, Node, Weight)> {
        self.adjacency.iter().flat_map(move |(cell, neighbors)| {
            neighbors.iter().filter_map(move |&to| {
                let from = Node::Cell(cell);
                self.weight(from, to).map(|weight| (from, to, weight))
            })
        })
    }

    /// Recompute the weights of every edge incident to `cell` from the current terrain.
    ///
    /// Both directions are refreshed: edges from each neighbor into `cell`, and edges out
    /// of `cell` into its neighbors. Edges to the sea are always free.
    pub fn refresh_edges(&mut self, terrain: &Terrain, cell: Cell) {
        if !self.adjacency.in_bounds(cell) {
            return;
        }
        let elevation = terrain.elevation(cell);
        let node = Node::Cell(cell);

        for neighbor in self.adjacency.orthogonal_adjacencies(cell) {
            let neighbor_elevation = terrain.elevation(neighbor);
            let neighbor = Node::Cell(neighbor);
            if let Some(weight) = self.weights.get_mut(&(neighbor, node)) {
                *weight = climb(neighbor_elevation, elevation);
            }
            if let Some(weight) = self.weights.get_mut(&(node, neighbor)) {
                *weight = climb(elevation, neighbor_elevation);
            }
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
