use callejero::prelude::*;

fn node(id: &str) -> StreetNode {
    StreetNode {
        id: id.to_string(),
        name: format!("Node {id}"),
        lat: 0.0,
        lon: 0.0,
    }
}

/// A -> B -> C in two cheap hops, plus an expensive direct A -> C edge.
fn triangle() -> StreetGraph {
    let mut graph = StreetGraph::new();
    for id in ["A", "B", "C"] {
        graph.add_node(node(id)).expect("fresh id");
    }
    let segment = |d| StreetEdge::new(d, 30.0, false).expect("valid segment");
    graph.add_edge("A", "B", segment(5.0)).expect("known ids");
    graph.add_edge("B", "C", segment(5.0)).expect("known ids");
    graph.add_edge("A", "C", segment(20.0)).expect("known ids");
    graph
}

const ALGORITHMS: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::BellmanFord];
const METRICS: [CostMetric; 2] = [CostMetric::Distance, CostMetric::Time];
const MODES: [TravelMode; 2] = [TravelMode::Vehicle, TravelMode::Pedestrian];

fn close(a: Cost, b: Cost) -> bool {
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

#[test]
fn two_cheap_hops_beat_one_expensive_edge() {
    let graph = triangle();
    for algorithm in ALGORITHMS {
        let result = compute_path(
            &graph,
            "A",
            "C",
            CostMetric::Distance,
            TravelMode::Vehicle,
            algorithm,
        )
        .expect("valid endpoints");
        assert_eq!(result.path, ["A", "B", "C"], "{algorithm:?}");
        assert_eq!(result.total_weight, 10.0, "{algorithm:?}");
    }
}

#[test]
fn algorithms_agree_on_settled_distances() {
    let graph = demo_graph().expect("embedded demo dataset");
    for metric in METRICS {
        for mode in MODES {
            let dijkstra =
                step_sequence(&graph, "C16_K24", "C20_K29", metric, mode, Algorithm::Dijkstra)
                    .expect("valid endpoints")
                    .last()
                    .expect("final snapshot");
            let bellman_ford = step_sequence(
                &graph,
                "C16_K24",
                "C20_K29",
                metric,
                mode,
                Algorithm::BellmanFord,
            )
            .expect("valid endpoints")
            .last()
            .expect("final snapshot");

            // Dijkstra stops early, so only its settled nodes carry final
            // distances; Bellman-Ford must agree on every one of them.
            // Equal-cost ties may settle through different predecessors,
            // so time weights get a tight float tolerance.
            for id in &dijkstra.visited {
                assert!(
                    close(dijkstra.distances[id], bellman_ford.distances[id]),
                    "{metric:?} {mode:?} disagree at {id}"
                );
            }

            let a = dijkstra.path_result.expect("finished");
            let b = bellman_ford.path_result.expect("finished");
            assert!(close(a.total_weight, b.total_weight), "{metric:?} {mode:?}");
            // Both paths must be valid routes of the same optimal cost.
            for result in [&a, &b] {
                let sum = graph
                    .path_weight(&result.path, metric, mode)
                    .expect("every hop must be a usable edge");
                assert!(close(sum, a.total_weight), "{metric:?} {mode:?}");
            }
        }
    }
}

#[test]
fn paths_are_connected_and_weights_sum_to_total() {
    let graph = demo_graph().expect("embedded demo dataset");
    for algorithm in ALGORITHMS {
        for metric in METRICS {
            for mode in MODES {
                let result =
                    compute_path(&graph, "C16_K24", "C20_K29", metric, mode, algorithm)
                        .expect("valid endpoints");
                assert!(result.found(), "{algorithm:?} {metric:?} {mode:?}");

                let sum = graph
                    .path_weight(&result.path, metric, mode)
                    .expect("every hop must be a usable edge");
                let tolerance = 1e-6 * result.total_weight.max(1.0);
                assert!(
                    (sum - result.total_weight).abs() <= tolerance,
                    "{algorithm:?} {metric:?} {mode:?}: {sum} != {}",
                    result.total_weight
                );
            }
        }
    }
}

#[test]
fn repeated_runs_are_idempotent() {
    let graph = demo_graph().expect("embedded demo dataset");
    for algorithm in ALGORITHMS {
        let first = compute_path(
            &graph,
            "C17_K24",
            "C20_K28",
            CostMetric::Time,
            TravelMode::Pedestrian,
            algorithm,
        )
        .expect("valid endpoints");
        let second = compute_path(
            &graph,
            "C17_K24",
            "C20_K28",
            CostMetric::Time,
            TravelMode::Pedestrian,
            algorithm,
        )
        .expect("valid endpoints");
        assert_eq!(first.path, second.path);
        assert_eq!(first.total_weight, second.total_weight);
        assert_eq!(first.visited_count, second.visited_count);
    }
}

#[test]
fn vehicle_mode_never_uses_pedestrian_only_edges() {
    let mut graph = StreetGraph::new();
    for id in ["A", "B", "C"] {
        graph.add_node(node(id)).expect("fresh id");
    }
    // Short pedestrian-only shortcut, long vehicular detour.
    graph
        .add_edge("A", "B", StreetEdge::new(10.0, 30.0, true).expect("valid"))
        .expect("known ids");
    graph
        .add_edge("A", "C", StreetEdge::new(50.0, 30.0, false).expect("valid"))
        .expect("known ids");
    graph
        .add_edge("C", "B", StreetEdge::new(50.0, 30.0, false).expect("valid"))
        .expect("known ids");

    for algorithm in ALGORITHMS {
        let vehicle = compute_path(
            &graph,
            "A",
            "B",
            CostMetric::Distance,
            TravelMode::Vehicle,
            algorithm,
        )
        .expect("valid endpoints");
        assert_eq!(vehicle.path, ["A", "C", "B"], "{algorithm:?}");
        assert_eq!(vehicle.total_weight, 100.0);

        let pedestrian = compute_path(
            &graph,
            "A",
            "B",
            CostMetric::Distance,
            TravelMode::Pedestrian,
            algorithm,
        )
        .expect("valid endpoints");
        assert_eq!(pedestrian.path, ["A", "B"], "{algorithm:?}");
        assert_eq!(pedestrian.total_weight, 10.0);
    }
}

#[test]
fn identical_endpoints_are_rejected_before_any_snapshot() {
    let graph = triangle();
    for algorithm in ALGORITHMS {
        let err = compute_path(
            &graph,
            "A",
            "A",
            CostMetric::Distance,
            TravelMode::Vehicle,
            algorithm,
        )
        .expect_err("same start and end");
        assert!(matches!(err, Error::IdenticalEndpoints));

        let err = step_sequence(
            &graph,
            "A",
            "Z",
            CostMetric::Distance,
            TravelMode::Vehicle,
            algorithm,
        )
        .err()
        .expect("unknown node");
        assert!(matches!(err, Error::NodeNotFound(ref id) if id == "Z"));
    }
}

#[test]
fn unreachable_destination_finishes_with_empty_path() {
    let mut graph = triangle();
    // No edges lead into D.
    graph.add_node(node("D")).expect("fresh id");

    for algorithm in ALGORITHMS {
        let final_step = step_sequence(
            &graph,
            "A",
            "D",
            CostMetric::Distance,
            TravelMode::Vehicle,
            algorithm,
        )
        .expect("valid endpoints")
        .last()
        .expect("final snapshot");
        assert!(final_step.finished);

        let result = final_step.path_result.expect("finished");
        assert!(result.path.is_empty(), "{algorithm:?}");
        assert!(result.total_weight.is_infinite(), "{algorithm:?}");

        // Other destinations are unaffected.
        let other = compute_path(
            &graph,
            "A",
            "C",
            CostMetric::Distance,
            TravelMode::Vehicle,
            algorithm,
        )
        .expect("valid endpoints");
        assert_eq!(other.path, ["A", "B", "C"]);
    }
}
