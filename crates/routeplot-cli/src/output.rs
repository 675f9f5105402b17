//! Output formatting for route and location rendering.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use routeplot_lib::{Location, LocationRegistry, RouteSummary, WaypointKind};

use crate::terminal::ColorPalette;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Uncolored text in the library's plain layout.
    Plain,
    /// Pretty-printed JSON.
    Json,
}

/// Render a route summary as colored (or plain) text.
///
/// Waypoints are tagged START/VIA/END with the running distance after each
/// leg, and RESUME where the route picks up after an unreachable pair. The
/// visited locations follow, one line per connected leg.
pub fn render_route_text(summary: &RouteSummary, palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Route ({} hops, algorithm: {}):",
        summary.hops, summary.algorithm
    );

    for waypoint in &summary.waypoints {
        let tag = match waypoint.kind {
            WaypointKind::First => "START ",
            WaypointKind::Middle => " VIA  ",
            WaypointKind::Last => " END  ",
            WaypointKind::Resume => "RESUME",
        };
        let name = waypoint.name.as_deref().unwrap_or("<unknown>");
        let _ = write!(
            buffer,
            "{}{tag}{} {}{name:<30}{}",
            palette.tag(waypoint.kind),
            palette.reset,
            palette.white_bold,
            palette.reset,
        );
        if waypoint.kind == WaypointKind::First {
            let _ = writeln!(buffer);
        } else {
            let _ = writeln!(
                buffer,
                " {}{:>10.2}{}",
                palette.green, waypoint.cumulative_distance, palette.reset
            );
        }
    }

    for line in summary.leg_lines() {
        let _ = writeln!(buffer, "{}via: {line}{}", palette.gray, palette.reset);
    }

    for skipped in &summary.skipped {
        let _ = writeln!(
            buffer,
            "{}no path: {} -> {}{}",
            palette.red, skipped.from, skipped.to, palette.reset
        );
    }

    let _ = writeln!(buffer, "Total distance: {:.2}", summary.total_distance);
    buffer
}

/// Print a route summary in the requested format.
pub fn print_route(summary: &RouteSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_route_text(summary, &ColorPalette::detect())),
        OutputFormat::Plain => print!("{}", summary.render_plain()),
        OutputFormat::Json => {
            let json = summary.to_json().context("failed to serialise route")?;
            println!("{json}");
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct LocationRow<'a> {
    id: u32,
    name: &'a str,
    x: f64,
    y: f64,
}

impl<'a> From<&'a Location> for LocationRow<'a> {
    fn from(location: &'a Location) -> Self {
        Self {
            id: location.record_id(),
            name: &location.name,
            x: location.position.x,
            y: location.position.y,
        }
    }
}

/// Render locations as a text table, one per line, with source identifiers.
pub fn render_locations_text<'a, I>(locations: I) -> String
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut buffer = String::new();
    for location in locations {
        let _ = writeln!(
            buffer,
            "{:>5}  {:<30} {:>12.3} {:>12.3}",
            location.record_id(),
            location.name,
            location.position.x,
            location.position.y
        );
    }
    buffer
}

/// Print the whole registry in the requested format.
pub fn print_locations(registry: &LocationRegistry, format: OutputFormat) -> Result<()> {
    print_location_list(registry.iter(), format)
}

/// Print a selection of locations in the requested format.
pub fn print_location_list<'a, I>(locations: I, format: OutputFormat) -> Result<()>
where
    I: IntoIterator<Item = &'a Location>,
{
    match format {
        OutputFormat::Text | OutputFormat::Plain => {
            print!("{}", render_locations_text(locations))
        }
        OutputFormat::Json => {
            let rows: Vec<LocationRow<'_>> = locations.into_iter().map(LocationRow::from).collect();
            let json = serde_json::to_string_pretty(&rows).context("failed to serialise locations")?;
            println!("{json}");
        }
    }
    Ok(())
}
