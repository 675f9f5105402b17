//! routeplot library entry points.
//!
//! This crate loads named locations and weighted undirected edges, builds a
//! dense adjacency matrix over them, and plans shortest routes through an
//! ordered list of waypoints. Higher-level consumers (the CLI, or a map
//! front-end) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod registry;
pub mod routing;

pub use dataset::{
    default_data_dir, load_edges, load_locations, load_network, resolve_data_dir, DataFormat,
    DataPaths, Network, DATA_DIR_ENV,
};
pub use error::{Error, InputError, LoadError, Result};
pub use graph::{build_graph, EdgeRecord, EdgeWeight, Graph};
pub use output::{RouteStep, RouteSummary, WaypointSummary};
pub use path::{shortest_path, shortest_path_heap, PathResult};
pub use registry::{Location, LocationId, LocationRecord, LocationRegistry, Position};
pub use routing::{
    plan_route, plan_route_with, select_finder, DenseDijkstra, HeapDijkstra, PathAlgorithm,
    PathFinder, Route, RouteEntry, RouteSegment, SegmentKind, SkippedSegment, WaypointKind,
};
