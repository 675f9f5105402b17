//! Location listing and lookup handlers.

use anyhow::{bail, Result};

use routeplot_lib::Network;

use crate::output::{print_location_list, print_locations, OutputFormat};

/// List every location in identifier order.
pub fn handle_locations_command(network: &Network, format: OutputFormat) -> Result<()> {
    print_locations(&network.registry, format)
}

/// Report the location closest to a projected point within `radius`.
pub fn handle_nearest_command(
    network: &Network,
    x: f64,
    y: f64,
    radius: f64,
    format: OutputFormat,
) -> Result<()> {
    let Some(location) = network
        .registry
        .nearest(x, y, radius)
        .and_then(|id| network.registry.get(id))
    else {
        bail!("no location within {radius} of ({x}, {y})");
    };
    print_location_list([location], format)
}
