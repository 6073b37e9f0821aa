//! Observable search state and the per-step snapshot protocol shared by
//! both sequencers.

use std::time::{Duration, Instant};

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::error;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::Cost;
use crate::error::Error;
use crate::model::StreetGraph;

/// Final outcome of a completed search.
///
/// An unreachable destination is a successful completion with an empty
/// path and `total_weight = +inf`, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node ids from start to end inclusive; empty when unreachable.
    pub path: Vec<String>,
    /// Accumulated weight along the selected metric.
    pub total_weight: Cost,
    /// Nodes settled by the search (Dijkstra) or the node count
    /// (Bellman-Ford, which revisits every node each pass).
    pub visited_count: usize,
    /// Wall-clock time spent inside the algorithm.
    pub execution_time: Duration,
}

impl PathResult {
    #[must_use]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Immutable point-in-time copy of the search state.
///
/// Every snapshot is a deep copy: later mutation of the live state never
/// retroactively alters an emitted snapshot, which is what makes recorded
/// history navigable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmStep {
    /// Node being evaluated, if any.
    pub current_node: Option<String>,
    /// Closed/settled nodes; always empty for Bellman-Ford.
    pub visited: Vec<String>,
    /// Full tentative-distance map, `+inf` for undiscovered nodes.
    pub distances: HashMap<String, Cost>,
    /// Full predecessor map for drawing the shortest-path tree.
    pub predecessors: HashMap<String, Option<String>>,
    /// Human-readable description of what just happened.
    pub log_message: String,
    pub finished: bool,
    /// Present only on the final snapshot.
    pub path_result: Option<PathResult>,
}

/// Mutable algorithm-internal state, indexed by [`NodeIndex`].
pub(crate) struct SearchState {
    pub(crate) distances: Vec<Cost>,
    pub(crate) predecessors: Vec<Option<NodeIndex>>,
    pub(crate) visited: FixedBitSet,
}

impl SearchState {
    pub(crate) fn new(node_count: usize, start: NodeIndex) -> Self {
        let mut distances = vec![Cost::INFINITY; node_count];
        distances[start.index()] = 0.0;
        Self {
            distances,
            predecessors: vec![None; node_count],
            visited: FixedBitSet::with_capacity(node_count),
        }
    }

    /// Deep-copies the live state into an externally visible snapshot.
    pub(crate) fn snapshot(
        &self,
        graph: &StreetGraph,
        current: Option<NodeIndex>,
        log_message: String,
    ) -> AlgorithmStep {
        let mut distances = HashMap::with_capacity(self.distances.len());
        let mut predecessors = HashMap::with_capacity(self.predecessors.len());
        for index in graph.node_indices() {
            let id = graph.node(index).id.clone();
            distances.insert(id.clone(), self.distances[index.index()]);
            predecessors.insert(
                id,
                self.predecessors[index.index()].map(|prev| graph.node(prev).id.clone()),
            );
        }
        let visited = self
            .visited
            .ones()
            .map(|index| graph.node(NodeIndex::new(index)).id.clone())
            .collect();

        AlgorithmStep {
            current_node: current.map(|node| graph.node(node).id.clone()),
            visited,
            distances,
            predecessors,
            log_message,
            finished: false,
            path_result: None,
        }
    }

    /// Follows predecessors backward from `end`; empty when the
    /// destination was never reached. `bound` caps the number of backward
    /// steps (the Bellman-Ford cycle-safety guard).
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptPredecessors`] when the walk exceeds
    /// `bound` without reaching the start node.
    pub(crate) fn reconstruct_path(
        &self,
        graph: &StreetGraph,
        start: NodeIndex,
        end: NodeIndex,
        bound: Option<usize>,
    ) -> Result<Vec<String>, Error> {
        if !self.distances[end.index()].is_finite() {
            return Ok(Vec::new());
        }

        let mut path = Vec::new();
        let mut current = end;
        let mut steps = 0usize;
        loop {
            path.push(graph.node(current).id.clone());
            if current == start {
                break;
            }
            let Some(previous) = self.predecessors[current.index()] else {
                break;
            };
            current = previous;
            steps += 1;
            if bound.is_some_and(|limit| steps > limit) {
                return Err(Error::CorruptPredecessors(graph.node(end).id.clone()));
            }
        }
        path.reverse();
        Ok(path)
    }
}

/// Builds the final `finished = true` snapshot carrying the
/// [`PathResult`]. Shared by both sequencers so their terminal snapshots
/// are identically shaped.
pub(crate) fn conclude(
    state: &SearchState,
    graph: &StreetGraph,
    start: NodeIndex,
    end: NodeIndex,
    bound: Option<usize>,
    visited_count: usize,
    started_at: Instant,
) -> AlgorithmStep {
    let end_distance = state.distances[end.index()];
    let (path, log_message) = match state.reconstruct_path(graph, start, end, bound) {
        Ok(path) if path.is_empty() => (path, "Finished: no route found.".to_string()),
        Ok(path) => (
            path,
            format!("Destination reached. Total cost: {end_distance:.2}"),
        ),
        Err(err) => {
            // Non-negative weights cannot produce a predecessor cycle, so
            // tripping the guard means the search state itself is corrupt.
            error!("path reconstruction aborted: {err}");
            (Vec::new(), format!("Finished with corrupt search state: {err}"))
        }
    };

    let total_weight = if path.is_empty() {
        Cost::INFINITY
    } else {
        end_distance
    };
    let result = PathResult {
        path,
        total_weight,
        visited_count,
        execution_time: started_at.elapsed(),
    };

    let mut step = state.snapshot(graph, None, log_message);
    step.finished = true;
    step.path_result = Some(result);
    step
}
