//! Route and path command handlers.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use routeplot_lib::{plan_route_with, select_finder, Network, PathAlgorithm, RouteSummary};

use crate::output::{print_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Waypoint names in visiting order.
    pub waypoints: Vec<String>,
    pub algorithm: PathAlgorithm,
}

/// Plan a multi-stop route through the named waypoints.
///
/// Legs without a connecting path are reported but do not fail the command.
pub fn handle_route_command(
    network: &Network,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let finder = select_finder(args.algorithm);
    let route = network
        .plan_by_names(&args.waypoints, finder.as_ref())
        .context("failed to plan route")?;

    if !route.is_complete() {
        warn!(
            skipped = route.skipped.len(),
            "some waypoint pairs could not be connected"
        );
    }
    info!(
        waypoints = route.waypoints.len(),
        total_distance = route.total_distance,
        "route planned"
    );

    let summary = RouteSummary::from_route(&network.registry, &route);
    print_route(&summary, format)
}

/// Compute the shortest path between two named locations.
///
/// Unlike the route command, an unreachable destination is an error here.
pub fn handle_path_command(
    network: &Network,
    from: &str,
    to: &str,
    algorithm: PathAlgorithm,
    format: OutputFormat,
) -> Result<()> {
    let start = network.registry.resolve(from)?;
    let goal = network.registry.resolve(to)?;

    let finder = select_finder(algorithm);
    let route = plan_route_with(&network.graph, &[start, goal], finder.as_ref())?;
    if !route.is_complete() {
        bail!("no path found between {from} and {to}");
    }

    let summary = RouteSummary::from_route(&network.registry, &route);
    print_route(&summary, format)
}
