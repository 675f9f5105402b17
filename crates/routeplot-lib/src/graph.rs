use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::registry::LocationId;

/// Contents of one adjacency-matrix cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeWeight {
    /// The two locations are not directly connected.
    NoEdge,
    /// Direct connection with a positive, finite weight.
    Weight(f64),
}

impl EdgeWeight {
    pub fn value(self) -> Option<f64> {
        match self {
            EdgeWeight::NoEdge => None,
            EdgeWeight::Weight(weight) => Some(weight),
        }
    }

    pub fn is_edge(self) -> bool {
        matches!(self, EdgeWeight::Weight(_))
    }
}

/// Raw edge row as it appears in the data files. Location ids are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub record: u32,
    pub first: u32,
    pub second: u32,
    pub weight: f64,
}

/// Dense, symmetric weighted adjacency matrix.
///
/// The matrix is shared behind an [`Arc`]; a `Graph` is never mutated after
/// [`build_graph`] returns, so clones can be handed to other threads freely.
#[derive(Debug, Clone)]
pub struct Graph {
    size: usize,
    cells: Arc<[EdgeWeight]>,
}

impl Graph {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Weight of the direct edge between `a` and `b`.
    ///
    /// Out-of-range identifiers report [`EdgeWeight::NoEdge`].
    pub fn weight(&self, a: LocationId, b: LocationId) -> EdgeWeight {
        if a >= self.size || b >= self.size {
            return EdgeWeight::NoEdge;
        }
        self.cells[a * self.size + b]
    }

    /// Real edges leaving `vertex`, in ascending neighbour order.
    pub fn neighbours(&self, vertex: LocationId) -> impl Iterator<Item = (LocationId, f64)> + '_ {
        let row: &[EdgeWeight] = if vertex < self.size {
            &self.cells[vertex * self.size..(vertex + 1) * self.size]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter_map(|(target, cell)| cell.value().map(|weight| (target, weight)))
    }

    /// Every undirected edge exactly once, as `(a, b, weight)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (LocationId, LocationId, f64)> + '_ {
        (0..self.size).flat_map(move |a| {
            self.neighbours(a)
                .filter(move |&(b, _)| b > a)
                .map(move |(b, weight)| (a, b, weight))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            size: 0,
            cells: Arc::from(Vec::new()),
        }
    }
}

/// Build the adjacency matrix for `location_count` locations.
///
/// Every cell starts as [`EdgeWeight::NoEdge`]; each record then sets both
/// `(first-1, second-1)` and its mirror. A later record for the same pair
/// replaces the earlier weight. Any invalid record aborts the build.
pub fn build_graph<I>(location_count: usize, edges: I) -> Result<Graph>
where
    I: IntoIterator<Item = EdgeRecord>,
{
    let mut cells = vec![EdgeWeight::NoEdge; location_count * location_count];
    let mut applied = 0usize;
    let mut replaced = 0usize;

    for edge in edges {
        let first = vertex_index(&edge, edge.first, location_count)?;
        let second = vertex_index(&edge, edge.second, location_count)?;
        if first == second {
            return Err(LoadError::SelfLoop {
                record: edge.record,
                id: edge.first,
            }
            .into());
        }
        if !(edge.weight.is_finite() && edge.weight > 0.0) {
            return Err(LoadError::InvalidWeight {
                record: edge.record,
                weight: edge.weight,
            }
            .into());
        }

        let forward = first * location_count + second;
        if cells[forward].is_edge() {
            replaced += 1;
            debug!(
                record = edge.record,
                first = edge.first,
                second = edge.second,
                "edge redefined; keeping the later weight"
            );
        }
        cells[forward] = EdgeWeight::Weight(edge.weight);
        cells[second * location_count + first] = EdgeWeight::Weight(edge.weight);
        applied += 1;
    }

    debug!(
        locations = location_count,
        edges = applied,
        replaced,
        "built adjacency matrix"
    );

    Ok(Graph {
        size: location_count,
        cells: Arc::from(cells),
    })
}

fn vertex_index(edge: &EdgeRecord, id: u32, location_count: usize) -> Result<LocationId> {
    let id_usize = id as usize;
    if id == 0 || id_usize > location_count {
        return Err(LoadError::EdgeOutOfRange {
            record: edge.record,
            id,
            location_count,
        }
        .into());
    }
    Ok(id_usize - 1)
}
