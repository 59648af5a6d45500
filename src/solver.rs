//! Single-source minimum-climb distances over the drainage graph.

use crate::graph::{Graph, Node, Weight};
use bitvec::bitvec;
use serde::{Deserialize, Serialize};

/// Total elevation climbed along a path.
pub type Distance = u64;

/// Tuning knobs for [`shortest_paths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Stop relaxing once a full round over every edge changes nothing.
    ///
    /// Later rounds could not change anything either, so results are identical.
    pub early_exit: bool,
    /// Check the triangle inequality over every edge once relaxation is done.
    pub verify: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            early_exit: true,
            verify: true,
        }
    }
}

/// Distances and predecessor links from a single source.
///
/// Only meaningful for the state of the graph at the moment it was solved.
#[derive(Debug)]
pub struct ShortestPaths<'g> {
    graph: &'g Graph,
    distance: Vec<Option<Distance>>,
    hops: Vec<usize>,
    predecessor: Vec<Option<Node>>,
    rounds: usize,
}

impl<'g> ShortestPaths<'g> {
    /// Number of relaxation rounds actually run.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Minimum total climb from the source to `node`; `None` when unreachable.
    pub fn distance(&self, node: Node) -> Option<Distance> {
        self.graph
            .index(node)
            .and_then(|idx| self.distance[idx])
    }

    /// Number of edges on the chosen path from the source to `node`.
    pub fn hops(&self, node: Node) -> Option<usize> {
        self.graph
            .index(node)
            .filter(|&idx| self.distance[idx].is_some())
            .map(|idx| self.hops[idx])
    }

    /// Minimum total climb from the source out to open water.
    pub fn distance_to_sea(&self) -> Option<Distance> {
        self.distance(Node::Sea)
    }

    /// The node preceding `node` on a shortest path from the source.
    pub fn predecessor(&self, node: Node) -> Option<Node> {
        self.graph
            .index(node)
            .and_then(|idx| self.predecessor[idx])
    }

    /// Follow predecessor links backward from `target`.
    ///
    /// The result starts with `target` and ends with the source. It is empty when the
    /// target is unreachable.
    pub fn chain_to(&self, target: Node) -> Result<Vec<Node>, InconsistentGraphError> {
        if self.distance(target).is_none() {
            return Ok(Vec::new());
        }

        let mut visited = bitvec!(0; self.graph.node_count());
        let mut chain = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            let idx = self
                .graph
                .index(node)
                .ok_or(InconsistentGraphError::UnknownNode(node))?;
            if visited[idx] {
                return Err(InconsistentGraphError::PredecessorCycle(node));
            }
            visited.set(idx, true);
            chain.push(node);
            current = self.predecessor[idx];
        }
        Ok(chain)
    }

    /// Check `distance(to) <= distance(from) + weight` for every edge.
    fn verify(&self) -> Result<(), InconsistentGraphError> {
        for (from, to, weight) in self.graph.edges() {
            let Some(from_distance) = self.distance(from) else {
                continue;
            };
            let bound = from_distance + Distance::from(weight);
            match self.distance(to) {
                Some(to_distance) if to_distance <= bound => {}
                to_distance => {
                    return Err(InconsistentGraphError::TriangleInequality {
                        from,
                        to,
                        weight,
                        from_distance,
                        to_distance,
                    })
                }
            }
        }
        Ok(())
    }
}

/// Compute minimum-climb distances from `source` to every node with Bellman-Ford.
///
/// Every edge is relaxed `|V| - 1` times, in the order [`Graph::edges`] produces them.
/// Paths are ranked by `(climb, hops)`: among routes of equal climb the one with fewest
/// edges wins. A predecessor only changes on a strict improvement of that pair, so the
/// first such path found in edge order wins any remaining tie.
pub fn shortest_paths(
    graph: &Graph,
    source: Node,
    options: SolverOptions,
) -> Result<ShortestPaths<'_>, InconsistentGraphError> {
    let node_count = graph.node_count();
    let source_idx = graph
        .index(source)
        .ok_or(InconsistentGraphError::UnknownNode(source))?;

    let mut distance: Vec<Option<Distance>> = vec![None; node_count];
    let mut hops = vec![0_usize; node_count];
    let mut predecessor: Vec<Option<Node>> = vec![None; node_count];
    distance[source_idx] = Some(0);

    let mut rounds = 0;
    for _ in 1..node_count {
        rounds += 1;
        let mut changed = false;
        for (from, to, weight) in graph.edges() {
            let (Some(from_idx), Some(to_idx)) = (graph.index(from), graph.index(to)) else {
                continue;
            };
            let Some(from_distance) = distance[from_idx] else {
                continue;
            };
            let candidate = (from_distance + Distance::from(weight), hops[from_idx] + 1);
            if distance[to_idx].map_or(true, |current| candidate < (current, hops[to_idx])) {
                distance[to_idx] = Some(candidate.0);
                hops[to_idx] = candidate.1;
                predecessor[to_idx] = Some(from);
                changed = true;
            }
        }
        if options.early_exit && !changed {
            break;
        }
    }

    let paths = ShortestPaths {
        graph,
        distance,
        hops,
        predecessor,
        rounds,
    };
    tracing::trace!(source = %source, rounds, to_sea = ?paths.distance_to_sea(), "solved");

    if options.verify {
        paths.verify()?;
    }
    Ok(paths)
}

/// The graph violated an invariant that construction and mutation are meant to uphold.
///
/// Edge weights are never negative, so none of these can arise from a correctly
/// maintained graph; seeing one indicates a defect in whatever last touched it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InconsistentGraphError {
    #[error("node {0} is not part of the graph")]
    UnknownNode(Node),
    #[error(
        "edge {from} -> {to} (weight {weight}) violates the triangle inequality: \
         distance {to_distance:?} exceeds {from_distance} + {weight}"
    )]
    TriangleInequality {
        from: Node,
        to: Node,
        weight: Weight,
        from_distance: Distance,
        to_distance: Option<Distance>,
    },
    #[error("predecessor chain loops back through {0}")]
    PredecessorCycle(Node),
}
