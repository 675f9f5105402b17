use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routeplot_cli::output::{self, OutputFormat};
use routeplot_lib::{load_network, resolve_data_dir, DataPaths, Network, PathAlgorithm};

mod commands;

use commands::locations::{handle_locations_command, handle_nearest_command};
use commands::route::{handle_path_command, handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan shortest routes through named map locations")]
struct Cli {
    /// Directory holding locations.txt/edges.txt (or .csv variants).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Explicit path to the locations file.
    #[arg(long, global = true)]
    locations: Option<PathBuf>,

    /// Explicit path to the edges file.
    #[arg(long, global = true)]
    edges: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route through two or more locations, in order.
    Route {
        /// Waypoint names in visiting order.
        #[arg(required = true, num_args = 2..)]
        waypoints: Vec<String>,
        /// Shortest-path algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Dense)]
        algorithm: AlgorithmArg,
    },
    /// Compute the shortest path between two locations.
    Path {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
        /// Shortest-path algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Dense)]
        algorithm: AlgorithmArg,
    },
    /// List all known locations.
    Locations,
    /// Find the location closest to a projected coordinate.
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Maximum accepted distance from the point.
        #[arg(long, default_value_t = 5.0)]
        radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    /// O(V²) Dijkstra over the dense matrix.
    Dense,
    /// Binary-heap Dijkstra.
    Heap,
}

impl From<AlgorithmArg> for PathAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dense => PathAlgorithm::Dense,
            AlgorithmArg::Heap => PathAlgorithm::Heap,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = resolve_paths(
        cli.data_dir.as_deref(),
        cli.locations.clone(),
        cli.edges.clone(),
    )?;
    let network = load(&paths)?;

    match cli.command {
        Command::Route {
            waypoints,
            algorithm,
        } => {
            let args = RouteCommandArgs {
                waypoints,
                algorithm: algorithm.into(),
            };
            handle_route_command(&network, &args, cli.format)
        }
        Command::Path {
            from,
            to,
            algorithm,
        } => handle_path_command(&network, &from, &to, algorithm.into(), cli.format),
        Command::Locations => handle_locations_command(&network, cli.format),
        Command::Nearest { x, y, radius } => {
            handle_nearest_command(&network, x, y, radius, cli.format)
        }
    }
}

fn resolve_paths(
    data_dir: Option<&Path>,
    locations: Option<PathBuf>,
    edges: Option<PathBuf>,
) -> Result<DataPaths> {
    if let (Some(locations), Some(edges)) = (&locations, &edges) {
        return Ok(DataPaths {
            locations: locations.clone(),
            edges: edges.clone(),
        });
    }

    let dir = resolve_data_dir(data_dir).context("failed to resolve the data directory")?;
    let mut paths = DataPaths::in_dir(&dir);
    if let Some(locations) = locations {
        paths.locations = locations;
    }
    if let Some(edges) = edges {
        paths.edges = edges;
    }
    Ok(paths)
}

fn load(paths: &DataPaths) -> Result<Network> {
    load_network(paths).with_context(|| {
        format!(
            "failed to load network from {} and {}",
            paths.locations.display(),
            paths.edges.display()
        )
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
