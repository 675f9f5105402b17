//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use routeplot_lib::{build_graph, load_network, DataPaths, EdgeRecord, Graph, Network};

/// Path to the fixtures directory shared by the workspace.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the whitespace-format fixture network.
#[allow(dead_code)]
pub fn fixture_network() -> Network {
    load_network(&DataPaths::in_dir(fixtures_dir())).expect("fixture network loads")
}

/// Build a graph from `(first, second, weight)` triples with 1-based ids.
#[allow(dead_code)]
pub fn graph_from(count: usize, edges: &[(u32, u32, f64)]) -> Graph {
    build_graph(count, edge_records(edges)).expect("valid test graph")
}

/// Number the triples as edge records, starting from 1.
#[allow(dead_code)]
pub fn edge_records(edges: &[(u32, u32, f64)]) -> Vec<EdgeRecord> {
    edges
        .iter()
        .enumerate()
        .map(|(index, &(first, second, weight))| EdgeRecord {
            record: index as u32 + 1,
            first,
            second,
            weight,
        })
        .collect()
}
