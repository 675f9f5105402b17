//! Path-finding strategies behind a common trait.
//!
//! The route composer only talks to [`PathFinder`], so the dense and heap
//! Dijkstra variants are interchangeable per request.

use crate::graph::Graph;
use crate::path::{shortest_path, shortest_path_heap, PathResult};
use crate::registry::LocationId;

use super::PathAlgorithm;

/// Trait for single-pair shortest-path strategies.
pub trait PathFinder: Send + Sync {
    /// The algorithm identifier for this finder.
    fn algorithm(&self) -> PathAlgorithm;

    /// Compute the shortest path between `start` and `end`.
    fn find_path(&self, graph: &Graph, start: LocationId, end: LocationId) -> PathResult;
}

/// O(V²) Dijkstra over the dense matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseDijkstra;

impl PathFinder for DenseDijkstra {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Dense
    }

    fn find_path(&self, graph: &Graph, start: LocationId, end: LocationId) -> PathResult {
        shortest_path(graph, start, end)
    }
}

/// Priority-queue Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapDijkstra;

impl PathFinder for HeapDijkstra {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Heap
    }

    fn find_path(&self, graph: &Graph, start: LocationId, end: LocationId) -> PathResult {
        shortest_path_heap(graph, start, end)
    }
}

/// Select the finder implementing `algorithm`.
pub fn select_finder(algorithm: PathAlgorithm) -> Box<dyn PathFinder> {
    match algorithm {
        PathAlgorithm::Dense => Box::new(DenseDijkstra),
        PathAlgorithm::Heap => Box::new(HeapDijkstra),
    }
}
