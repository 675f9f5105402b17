mod common;

use routeplot_lib::{build_graph, EdgeWeight, Error, LoadError};

use common::{edge_records, graph_from};

#[test]
fn build_sets_both_directions() {
    let graph = graph_from(4, &[(1, 2, 5.0), (3, 4, 2.0)]);
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.weight(0, 1), EdgeWeight::Weight(5.0));
    assert_eq!(graph.weight(1, 0), EdgeWeight::Weight(5.0));
    assert_eq!(graph.weight(2, 3), EdgeWeight::Weight(2.0));
    assert_eq!(graph.weight(0, 3), EdgeWeight::NoEdge);
    assert_eq!(graph.weight(0, 0), EdgeWeight::NoEdge);
}

#[test]
fn matrix_is_symmetric() {
    let graph = graph_from(
        5,
        &[(1, 2, 1.0), (2, 5, 4.0), (5, 3, 2.5), (4, 1, 0.25)],
    );
    for a in 0..graph.len() {
        for b in 0..graph.len() {
            assert_eq!(graph.weight(a, b), graph.weight(b, a));
        }
    }
    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(
        edges,
        vec![(0, 1, 1.0), (0, 3, 0.25), (1, 4, 4.0), (2, 4, 2.5)]
    );
}

#[test]
fn out_of_range_identifier_is_a_load_error() {
    let err = build_graph(4, edge_records(&[(1, 2, 1.0), (2, 5, 1.0)]))
        .expect_err("id 5 does not exist");
    assert!(err.is_load_error());
    assert!(matches!(
        err,
        Error::Load(LoadError::EdgeOutOfRange {
            record: 2,
            id: 5,
            location_count: 4
        })
    ));
}

#[test]
fn zero_identifier_is_a_load_error() {
    let err = build_graph(4, edge_records(&[(0, 2, 1.0)])).expect_err("ids are 1-based");
    assert!(matches!(
        err,
        Error::Load(LoadError::EdgeOutOfRange { id: 0, .. })
    ));
}

#[test]
fn building_twice_gives_the_same_matrix() {
    let records = edge_records(&[(1, 2, 5.0), (2, 3, 3.0), (1, 3, 10.0)]);
    let first = build_graph(3, records.clone()).expect("valid");
    let second = build_graph(3, records).expect("valid");
    for a in 0..3 {
        for b in 0..3 {
            assert_eq!(first.weight(a, b), second.weight(a, b));
        }
    }
}

#[test]
fn graph_is_shareable_across_threads() {
    let graph = graph_from(3, &[(1, 2, 1.0), (2, 3, 1.0)]);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = graph.clone();
            std::thread::spawn(move || routeplot_lib::shortest_path(&graph, 0, 2).distance())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), Some(2.0));
    }
}
