//! Dijkstra's algorithm as a resumable step sequencer.

use std::time::Instant;

use log::debug;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::queue::PriorityQueue;
use super::step::{AlgorithmStep, SearchState, conclude};
use crate::error::Error;
use crate::model::{CostMetric, StreetGraph, TravelMode};

#[derive(Clone, Copy)]
enum Phase {
    /// Emit the initial "distance to start is 0" snapshot.
    Seed,
    /// Extract the next frontier node, skipping stale queue entries.
    Select,
    /// Relax the usable outgoing edges of the node just settled.
    Relax(NodeIndex),
    /// Emit the final snapshot with the reconstructed path.
    Reconstruct,
    Done,
}

/// Dijkstra search over a [`StreetGraph`], expressed as an explicit state
/// machine: each [`Iterator::next`] call performs one observable unit of
/// work and yields a deep snapshot of the search state.
///
/// Early termination the moment the destination is dequeued relies on
/// non-negative weights, which the weight selector guarantees. Runs in
/// O((V+E) log V).
pub struct DijkstraSequencer<'g> {
    graph: &'g StreetGraph,
    metric: CostMetric,
    mode: TravelMode,
    start: NodeIndex,
    end: NodeIndex,
    state: SearchState,
    queue: PriorityQueue<NodeIndex>,
    phase: Phase,
    started_at: Instant,
}

impl<'g> DijkstraSequencer<'g> {
    /// Validates the endpoints and seeds the frontier with the start
    /// node. No search state is touched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown endpoint id and
    /// [`Error::IdenticalEndpoints`] when start equals end.
    pub fn new(
        graph: &'g StreetGraph,
        start_id: &str,
        end_id: &str,
        metric: CostMetric,
        mode: TravelMode,
    ) -> Result<Self, Error> {
        let start = graph.resolve(start_id)?;
        let end = graph.resolve(end_id)?;
        if start == end {
            return Err(Error::IdenticalEndpoints);
        }
        debug!("dijkstra {start_id} -> {end_id} ({metric:?}, {mode:?})");

        let mut queue = PriorityQueue::with_capacity(graph.node_count() / 4 + 1);
        queue.insert(start, 0.0);

        Ok(Self {
            graph,
            metric,
            mode,
            start,
            end,
            state: SearchState::new(graph.node_count(), start),
            queue,
            phase: Phase::Seed,
            started_at: Instant::now(),
        })
    }

    fn relax_neighbours(&mut self, node: NodeIndex) -> usize {
        let here = self.state.distances[node.index()];
        let mut updates = 0;
        for edge in self.graph.edges(node) {
            if !edge.weight().usable_by(self.mode) {
                continue;
            }
            let next = edge.target();
            let alternative = here + edge.weight().weight(self.metric, self.mode);
            if alternative < self.state.distances[next.index()] {
                self.state.distances[next.index()] = alternative;
                self.state.predecessors[next.index()] = Some(node);
                self.queue.insert(next, alternative);
                updates += 1;
            }
        }
        updates
    }
}

impl Iterator for DijkstraSequencer<'_> {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<AlgorithmStep> {
        loop {
            match self.phase {
                Phase::Seed => {
                    self.phase = Phase::Select;
                    let id = &self.graph.node(self.start).id;
                    return Some(self.state.snapshot(
                        self.graph,
                        Some(self.start),
                        format!("Start: distance to {id} set to 0."),
                    ));
                }
                Phase::Select => {
                    let Some((node, cost)) = self.queue.extract_min() else {
                        self.phase = Phase::Reconstruct;
                        continue;
                    };
                    // Stale lazy-deleted entry: a cheaper path to this
                    // node was found after it was queued.
                    if cost > self.state.distances[node.index()] {
                        continue;
                    }
                    self.state.visited.insert(node.index());
                    self.phase = if node == self.end {
                        Phase::Reconstruct
                    } else {
                        Phase::Relax(node)
                    };
                    let id = &self.graph.node(node).id;
                    return Some(self.state.snapshot(
                        self.graph,
                        Some(node),
                        format!("Evaluating node {id} (accumulated cost: {cost:.1})."),
                    ));
                }
                Phase::Relax(node) => {
                    self.phase = Phase::Select;
                    let updates = self.relax_neighbours(node);
                    if updates > 0 {
                        let id = &self.graph.node(node).id;
                        return Some(self.state.snapshot(
                            self.graph,
                            Some(node),
                            format!("Updated {updates} neighbours of {id}."),
                        ));
                    }
                }
                Phase::Reconstruct => {
                    self.phase = Phase::Done;
                    debug!(
                        "dijkstra settled {} nodes, {} frontier entries left",
                        self.state.visited.count_ones(..),
                        self.queue.len()
                    );
                    return Some(conclude(
                        &self.state,
                        self.graph,
                        self.start,
                        self.end,
                        None,
                        self.state.visited.count_ones(..),
                        self.started_at,
                    ));
                }
                Phase::Done => return None,
            }
        }
    }
}
