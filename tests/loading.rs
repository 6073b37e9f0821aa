use callejero::prelude::*;

const NODES: &str = "\
A;1.0;-77.0;Corner A
B;1.1;-77.1;Corner B
";

#[test]
fn demo_network_loads_completely() {
    let graph = demo_graph().expect("embedded demo dataset");
    assert_eq!(graph.node_count(), 31);
    assert_eq!(graph.edge_count(), 107);

    // Ids are uppercased; the raw data mixes C18a_K25 and C18A_K25.
    assert!(graph.node_index("C18A_K25").is_some());
    assert!(graph.node_index("C18a_K25").is_none());
}

#[test]
fn segment_weights_follow_the_speed_model() {
    let graph = demo_graph().expect("embedded demo dataset");
    let hop = ["C16_K24".to_string(), "C16_K25".to_string()];

    // 94 m at 40 km/h, open to vehicles.
    assert_eq!(
        graph.path_weight(&hop, CostMetric::Distance, TravelMode::Vehicle),
        Some(94.0)
    );
    let vehicle_minutes = graph
        .path_weight(&hop, CostMetric::Time, TravelMode::Vehicle)
        .expect("vehicular segment");
    assert!((vehicle_minutes - 94.0 / 1000.0 / 40.0 * 60.0).abs() < 1e-9);

    // Walking time always uses the fixed walking speed.
    let walking_minutes = graph
        .path_weight(&hop, CostMetric::Time, TravelMode::Pedestrian)
        .expect("pedestrians may use any edge");
    assert!((walking_minutes - 94.0 / 1000.0 / WALKING_SPEED_KMH * 60.0).abs() < 1e-9);

    // The reverse segment exists but is pedestrian-only.
    let back = ["C16_K25".to_string(), "C16_K24".to_string()];
    assert_eq!(
        graph.path_weight(&back, CostMetric::Distance, TravelMode::Vehicle),
        None
    );
    assert_eq!(
        graph.path_weight(&back, CostMetric::Distance, TravelMode::Pedestrian),
        Some(94.0)
    );
}

#[test]
fn demo_network_routes_in_every_mode() {
    let graph = demo_graph().expect("embedded demo dataset");
    for metric in [CostMetric::Distance, CostMetric::Time] {
        for mode in [TravelMode::Vehicle, TravelMode::Pedestrian] {
            let result = compute_path(
                &graph,
                "C16_K24",
                "C20_K29",
                metric,
                mode,
                Algorithm::Dijkstra,
            )
            .expect("valid endpoints");
            assert!(result.found(), "{metric:?} {mode:?}");
            assert_eq!(result.path.first().map(String::as_str), Some("C16_K24"));
            assert_eq!(result.path.last().map(String::as_str), Some("C20_K29"));
        }
    }
}

#[test]
fn malformed_flag_is_rejected() {
    let edges = "A;B;100;30;MAYBE\n";
    let err = street_graph_from_csv(NODES, edges).expect_err("bad flag");
    assert!(matches!(err, Error::Csv(_)));
}

#[test]
fn edge_with_unknown_endpoint_is_rejected() {
    let edges = "A;Z;100;30;FALSE\n";
    let err = street_graph_from_csv(NODES, edges).expect_err("unknown endpoint");
    assert!(matches!(err, Error::NodeNotFound(ref id) if id == "Z"));
}

#[test]
fn duplicate_node_ids_are_rejected() {
    let nodes = "A;1.0;-77.0;Corner A\na;1.2;-77.2;Corner A again\n";
    let err = street_graph_from_csv(nodes, "").expect_err("duplicate id after uppercasing");
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn out_of_range_segment_attributes_are_rejected() {
    let err = street_graph_from_csv(NODES, "A;B;-5;30;FALSE\n").expect_err("negative distance");
    assert!(matches!(err, Error::InvalidData(_)));

    let err = street_graph_from_csv(NODES, "A;B;100;0;FALSE\n").expect_err("zero speed");
    assert!(matches!(err, Error::InvalidData(_)));
}
