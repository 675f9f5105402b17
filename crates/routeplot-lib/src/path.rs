use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::graph::Graph;
use crate::registry::LocationId;

/// Outcome of a single-pair shortest-path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathResult {
    /// `path` runs from the start to the end, both inclusive.
    Found {
        path: Vec<LocationId>,
        distance: f64,
    },
    /// No sequence of edges connects the two locations.
    Unreachable,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            PathResult::Found { distance, .. } => Some(*distance),
            PathResult::Unreachable => None,
        }
    }

    pub fn path(&self) -> Option<&[LocationId]> {
        match self {
            PathResult::Found { path, .. } => Some(path),
            PathResult::Unreachable => None,
        }
    }
}

/// Dense Dijkstra: O(V²) selection over fixed-size bookkeeping arrays.
///
/// The unsettled vertex with the smallest tentative distance is settled next,
/// ties going to the lowest identifier. Only real edges are relaxed. Ids
/// outside the graph have no path to anything.
pub fn shortest_path(graph: &Graph, start: LocationId, end: LocationId) -> PathResult {
    let size = graph.len();
    if start >= size || end >= size {
        return PathResult::Unreachable;
    }
    if start == end {
        return PathResult::Found {
            path: vec![start],
            distance: 0.0,
        };
    }

    let mut distances = vec![f64::INFINITY; size];
    let mut predecessors: Vec<Option<LocationId>> = vec![None; size];
    let mut settled = vec![false; size];

    distances[start] = 0.0;
    predecessors[start] = Some(start);

    for _ in 0..size {
        let mut current = None;
        for vertex in 0..size {
            if settled[vertex] {
                continue;
            }
            match current {
                Some(best) if distances[vertex] >= distances[best] => {}
                _ => current = Some(vertex),
            }
        }

        let Some(current) = current else {
            break;
        };
        // Everything left unsettled is unreachable from the start.
        if distances[current].is_infinite() {
            break;
        }

        settled[current] = true;
        if current == end {
            break;
        }

        for (next, weight) in graph.neighbours(current) {
            if settled[next] {
                continue;
            }
            let candidate = distances[current] + weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                predecessors[next] = Some(current);
            }
        }
    }

    match reconstruct_path(&predecessors, start, end) {
        Some(path) => PathResult::Found {
            path,
            distance: distances[end],
        },
        None => PathResult::Unreachable,
    }
}

/// Binary-heap Dijkstra for larger, sparse inputs.
///
/// Produces the same distances as [`shortest_path`]; among several equally
/// short paths it may pick a different one.
pub fn shortest_path_heap(graph: &Graph, start: LocationId, end: LocationId) -> PathResult {
    let size = graph.len();
    if start >= size || end >= size {
        return PathResult::Unreachable;
    }
    if start == end {
        return PathResult::Found {
            path: vec![start],
            distance: 0.0,
        };
    }

    let mut distances = vec![f64::INFINITY; size];
    let mut predecessors: Vec<Option<LocationId>> = vec![None; size];
    let mut queue = BinaryHeap::new();

    distances[start] = 0.0;
    predecessors[start] = Some(start);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if entry.cost.0 > distances[entry.node] {
            continue;
        }
        if entry.node == end {
            break;
        }

        for (next, weight) in graph.neighbours(entry.node) {
            let next_cost = entry.cost.0 + weight;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                predecessors[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    match reconstruct_path(&predecessors, start, end) {
        Some(path) => PathResult::Found {
            path,
            distance: distances[end],
        },
        None => PathResult::Unreachable,
    }
}

/// Walk predecessors back from `end`; `None` when the chain breaks first.
fn reconstruct_path(
    predecessors: &[Option<LocationId>],
    start: LocationId,
    end: LocationId,
) -> Option<Vec<LocationId>> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = predecessors[current]?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: LocationId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, EdgeRecord};

    fn graph(count: usize, edges: &[(u32, u32, f64)]) -> Graph {
        let records = edges
            .iter()
            .enumerate()
            .map(|(index, &(first, second, weight))| EdgeRecord {
                record: index as u32 + 1,
                first,
                second,
                weight,
            });
        build_graph(count, records).expect("valid test graph")
    }

    #[test]
    fn prefers_cheaper_multi_hop_route() {
        let g = graph(4, &[(1, 2, 5.0), (2, 3, 3.0), (1, 3, 10.0), (3, 4, 2.0)]);
        let result = shortest_path(&g, 0, 3);
        assert_eq!(result.path(), Some(&[0, 1, 2, 3][..]));
        assert_eq!(result.distance(), Some(10.0));
    }

    #[test]
    fn start_equals_end_is_zero_length() {
        let g = graph(2, &[]);
        assert_eq!(
            shortest_path(&g, 1, 1),
            PathResult::Found {
                path: vec![1],
                distance: 0.0
            }
        );
    }

    #[test]
    fn disconnected_vertices_are_unreachable() {
        let g = graph(3, &[(1, 2, 1.0)]);
        assert_eq!(shortest_path(&g, 0, 2), PathResult::Unreachable);
        assert_eq!(shortest_path_heap(&g, 0, 2), PathResult::Unreachable);
    }

    #[test]
    fn out_of_range_ids_are_unreachable() {
        let g = graph(2, &[(1, 2, 1.0)]);
        assert_eq!(shortest_path(&g, 0, 5), PathResult::Unreachable);
        assert_eq!(shortest_path(&g, 5, 0), PathResult::Unreachable);
    }

    #[test]
    fn ties_prefer_lowest_identifier() {
        // 1 -> 4 is 2.0 via either 2 or 3; vertex 2 settles first.
        let g = graph(4, &[(1, 2, 1.0), (1, 3, 1.0), (2, 4, 1.0), (3, 4, 1.0)]);
        assert_eq!(shortest_path(&g, 0, 3).path(), Some(&[0, 1, 3][..]));
    }

    #[test]
    fn last_vertex_is_relaxed() {
        let g = graph(3, &[(1, 3, 2.0)]);
        assert_eq!(shortest_path(&g, 0, 2).distance(), Some(2.0));
    }

    #[test]
    fn heap_and_dense_agree() {
        let g = graph(
            6,
            &[
                (1, 2, 7.0),
                (1, 3, 9.0),
                (1, 6, 14.0),
                (2, 3, 10.0),
                (2, 4, 15.0),
                (3, 4, 11.0),
                (3, 6, 2.0),
                (4, 5, 6.0),
                (5, 6, 9.0),
            ],
        );
        for a in 0..6 {
            for b in 0..6 {
                assert_eq!(
                    shortest_path(&g, a, b).distance(),
                    shortest_path_heap(&g, a, b).distance(),
                    "pair {a} -> {b}"
                );
            }
        }
        assert_eq!(shortest_path(&g, 0, 4).distance(), Some(20.0));
        assert_eq!(shortest_path(&g, 0, 4).path(), Some(&[0, 2, 5, 4][..]));
    }
}
