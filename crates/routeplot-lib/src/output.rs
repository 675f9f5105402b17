use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::registry::{LocationId, LocationRegistry};
use crate::routing::{PathAlgorithm, Route, WaypointKind};

/// Labelled waypoint with its running distance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaypointSummary {
    pub kind: WaypointKind,
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cumulative_distance: f64,
}

/// Location visited along the route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    /// Connected leg this step belongs to; a skipped pair starts a new leg.
    pub leg: usize,
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Waypoint pair that had no connecting path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedSummary {
    pub from: String,
    pub to: String,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: PathAlgorithm,
    pub hops: usize,
    pub total_distance: f64,
    pub waypoints: Vec<WaypointSummary>,
    pub steps: Vec<RouteStep>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSummary>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with resolved location names.
    pub fn from_route(registry: &LocationRegistry, route: &Route) -> Self {
        let name_of = |id: LocationId| registry.name(id).map(str::to_string);

        let waypoints = route
            .entries()
            .into_iter()
            .map(|entry| WaypointSummary {
                kind: entry.kind,
                id: entry.location,
                name: name_of(entry.location),
                cumulative_distance: entry.cumulative_distance,
            })
            .collect();

        let steps = route
            .legs()
            .into_iter()
            .enumerate()
            .flat_map(|(leg, ids)| ids.into_iter().map(move |id| (leg, id)))
            .enumerate()
            .map(|(index, (leg, id))| RouteStep {
                index,
                leg,
                id,
                name: name_of(id),
            })
            .collect();

        let skipped = route
            .skipped
            .iter()
            .map(|segment| SkippedSummary {
                from: display_name(registry, segment.from),
                to: display_name(registry, segment.to),
            })
            .collect();

        Self {
            algorithm: route.algorithm,
            hops: route.hop_count(),
            total_distance: route.total_distance,
            waypoints,
            steps,
            skipped,
        }
    }

    /// Steps grouped by connected leg.
    pub fn legs(&self) -> impl Iterator<Item = &[RouteStep]> + '_ {
        self.steps.chunk_by(|a, b| a.leg == b.leg)
    }

    /// Step names of each leg joined with arrows.
    pub fn leg_lines(&self) -> Vec<String> {
        self.legs()
            .map(|leg| {
                leg.iter()
                    .map(|step| step.name.as_deref().unwrap_or("<unknown>"))
                    .collect::<Vec<_>>()
                    .join(" -> ")
            })
            .collect()
    }

    /// Plain-text rendering: labelled waypoints with two-decimal running
    /// totals, one path line per connected leg, then any pairs that could not
    /// be joined.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {:.2} total over {} hops (algorithm: {})",
            self.total_distance, self.hops, self.algorithm
        );

        for waypoint in &self.waypoints {
            let name = waypoint.name.as_deref().unwrap_or("<unknown>");
            match waypoint.kind {
                WaypointKind::First => {
                    let _ = writeln!(buffer, "{:<6} {}", waypoint.kind.label(), name);
                }
                _ => {
                    let _ = writeln!(
                        buffer,
                        "{:<6} {:<30} {:>10.2}",
                        waypoint.kind.label(),
                        name,
                        waypoint.cumulative_distance
                    );
                }
            }
        }

        for line in self.leg_lines() {
            let _ = writeln!(buffer, "Path: {line}");
        }

        for skipped in &self.skipped {
            let _ = writeln!(buffer, "No path: {} -> {}", skipped.from, skipped.to);
        }

        buffer
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn display_name(registry: &LocationRegistry, id: LocationId) -> String {
    registry
        .name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", id + 1))
}
