//! Multi-waypoint route planning.
//!
//! This module provides:
//! - [`PathAlgorithm`] - Supported single-pair search strategies
//! - [`Route`] - The composed result of a planning request
//! - [`plan_route`] / [`plan_route_with`] - Main entry points
//!
//! A route is planned pair by pair over consecutive waypoints. A pair with no
//! connecting path is recorded in [`Route::skipped`] and the remaining pairs
//! are still planned, so one broken leg does not discard the whole trip.
//! Paths are never joined across a skipped pair: [`Route::legs`] starts a new
//! leg after each gap and [`Route::entries`] marks where the route resumes.
//!
//! # Example
//!
//! ```ignore
//! use routeplot_lib::{load_network, plan_route, DataPaths};
//!
//! let network = load_network(&DataPaths::in_dir("data"))?;
//! let route = plan_route(&network.graph, &[0, 5, 9])?;
//! println!("{:.2} km", route.total_distance);
//! ```

mod planner;

pub use planner::{select_finder, DenseDijkstra, HeapDijkstra, PathFinder};

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{InputError, Result};
use crate::dataset::Network;
use crate::graph::Graph;
use crate::path::PathResult;
use crate::registry::LocationId;

/// Supported single-pair search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// O(V²) Dijkstra over the dense matrix.
    #[default]
    Dense,
    /// Binary-heap Dijkstra.
    Heap,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::Dense => "dense",
            PathAlgorithm::Heap => "heap",
        };
        f.write_str(value)
    }
}

/// Position of a waypoint pair within the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// First of several pairs.
    First,
    /// Neither first nor last.
    Middle,
    /// Last of several pairs.
    Last,
    /// The single pair of a two-waypoint route.
    Only,
}

impl SegmentKind {
    fn for_pair(index: usize, pair_count: usize) -> Self {
        match (index == 0, index + 1 == pair_count) {
            (true, true) => SegmentKind::Only,
            (true, false) => SegmentKind::First,
            (false, true) => SegmentKind::Last,
            (false, false) => SegmentKind::Middle,
        }
    }

    pub fn is_first(self) -> bool {
        matches!(self, SegmentKind::First | SegmentKind::Only)
    }

    pub fn is_last(self) -> bool {
        matches!(self, SegmentKind::Last | SegmentKind::Only)
    }
}

/// Label of a location in the display list produced by [`Route::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    First,
    Middle,
    Last,
    /// Start of a segment that follows a skipped pair.
    Resume,
}

impl WaypointKind {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            WaypointKind::First => "Start",
            WaypointKind::Middle => "Via",
            WaypointKind::Last => "End",
            WaypointKind::Resume => "Resume",
        }
    }
}

/// A reachable leg between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    /// Index of the waypoint pair (0 for waypoints 0 → 1).
    pub index: usize,
    pub kind: SegmentKind,
    pub from: LocationId,
    pub to: LocationId,
    pub path: Vec<LocationId>,
    pub distance: f64,
    /// Total over this and every earlier reachable segment.
    pub cumulative_distance: f64,
}

/// A waypoint pair that could not be connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedSegment {
    pub index: usize,
    pub kind: SegmentKind,
    pub from: LocationId,
    pub to: LocationId,
}

/// Display entry: a labelled location with the running distance at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEntry {
    pub kind: WaypointKind,
    pub location: LocationId,
    pub cumulative_distance: f64,
}

/// Planned multi-waypoint route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub algorithm: PathAlgorithm,
    pub waypoints: Vec<LocationId>,
    pub segments: Vec<RouteSegment>,
    pub skipped: Vec<SkippedSegment>,
    pub total_distance: f64,
}

impl Route {
    /// Whether every waypoint pair was connected.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Labelled waypoints with running totals, omitting unreachable legs.
    ///
    /// The start of the first pair is listed (at distance 0) only when that
    /// pair is reachable; every reachable segment then contributes its end
    /// point, labelled [`WaypointKind::Last`] for the final pair. A segment
    /// that follows a skipped pair also lists its start as
    /// [`WaypointKind::Resume`] at the running total reached so far.
    pub fn entries(&self) -> Vec<RouteEntry> {
        let mut entries = Vec::with_capacity(self.segments.len() * 2);
        let mut previous: Option<&RouteSegment> = None;
        for segment in &self.segments {
            if segment.kind.is_first() {
                entries.push(RouteEntry {
                    kind: WaypointKind::First,
                    location: segment.from,
                    cumulative_distance: 0.0,
                });
            } else if !follows(previous, segment) {
                entries.push(RouteEntry {
                    kind: WaypointKind::Resume,
                    location: segment.from,
                    cumulative_distance: previous.map_or(0.0, |prev| prev.cumulative_distance),
                });
            }
            let kind = if segment.kind.is_last() {
                WaypointKind::Last
            } else {
                WaypointKind::Middle
            };
            entries.push(RouteEntry {
                kind,
                location: segment.to,
                cumulative_distance: segment.cumulative_distance,
            });
            previous = Some(segment);
        }
        entries
    }

    /// Visited locations, one list per run of connected segments.
    ///
    /// Consecutive segments share their junction waypoint, which is listed
    /// once. A skipped pair closes the current leg.
    pub fn legs(&self) -> Vec<Vec<LocationId>> {
        let mut legs: Vec<Vec<LocationId>> = Vec::new();
        let mut previous: Option<&RouteSegment> = None;
        for segment in &self.segments {
            match legs.last_mut() {
                Some(leg) if follows(previous, segment) => {
                    leg.extend(segment.path.iter().skip(1).copied());
                }
                _ => legs.push(segment.path.clone()),
            }
            previous = Some(segment);
        }
        legs
    }

    /// Number of edges travelled over all reachable segments.
    pub fn hop_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| segment.path.len().saturating_sub(1))
            .sum()
    }
}

/// Whether `segment` directly continues `previous`, with no skipped pair between.
fn follows(previous: Option<&RouteSegment>, segment: &RouteSegment) -> bool {
    previous.is_some_and(|prev| prev.index + 1 == segment.index)
}

/// Plan a route through `waypoints` with the dense Dijkstra engine.
pub fn plan_route(graph: &Graph, waypoints: &[LocationId]) -> Result<Route> {
    plan_route_with(graph, waypoints, &DenseDijkstra)
}

/// Plan a route through `waypoints` using the given path finder.
///
/// Fails with [`InputError`] before any search when fewer than two waypoints
/// are given or a waypoint is not a vertex of `graph`.
pub fn plan_route_with(
    graph: &Graph,
    waypoints: &[LocationId],
    finder: &dyn PathFinder,
) -> Result<Route> {
    if waypoints.len() < 2 {
        return Err(InputError::NotEnoughWaypoints {
            count: waypoints.len(),
        }
        .into());
    }
    if let Some(&id) = waypoints.iter().find(|&&id| id >= graph.len()) {
        return Err(InputError::UnknownLocationId {
            id,
            location_count: graph.len(),
        }
        .into());
    }

    let pair_count = waypoints.len() - 1;
    let mut segments = Vec::with_capacity(pair_count);
    let mut skipped = Vec::new();
    let mut total_distance = 0.0;

    for (index, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let kind = SegmentKind::for_pair(index, pair_count);
        match finder.find_path(graph, from, to) {
            PathResult::Found { path, distance } => {
                total_distance += distance;
                debug!(index, from, to, distance, total_distance, "planned segment");
                segments.push(RouteSegment {
                    index,
                    kind,
                    from,
                    to,
                    path,
                    distance,
                    cumulative_distance: total_distance,
                });
            }
            PathResult::Unreachable => {
                warn!(index, from, to, "no path between waypoints; skipping segment");
                skipped.push(SkippedSegment {
                    index,
                    kind,
                    from,
                    to,
                });
            }
        }
    }

    Ok(Route {
        algorithm: finder.algorithm(),
        waypoints: waypoints.to_vec(),
        segments,
        skipped,
        total_distance,
    })
}

impl Network {
    /// Resolve waypoint names and plan a route through them.
    pub fn plan_by_names<S: AsRef<str>>(
        &self,
        names: &[S],
        finder: &dyn PathFinder,
    ) -> Result<Route> {
        let waypoints = names
            .iter()
            .map(|name| self.registry.resolve(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        plan_route_with(&self.graph, &waypoints, finder)
    }
}
