//! Bellman-Ford as a resumable step sequencer.

use std::time::Instant;

use log::debug;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::step::{AlgorithmStep, SearchState, conclude};
use crate::error::Error;
use crate::model::{CostMetric, StreetGraph, TravelMode};

enum Phase {
    Seed,
    /// Walk the fixed node order pass by pass, one reached node per
    /// resumption.
    Sweep,
    Reconstruct,
    Done,
}

/// Bellman-Ford search over a [`StreetGraph`] as an explicit state
/// machine.
///
/// Relaxation is grouped by source node rather than raw edge order so the
/// step-by-step narrative reads as a wave spreading from the start; the
/// order is fixed for the whole run (graph node order), which keeps
/// snapshots reproducible. The final distances are order-independent.
/// There is no closed set - every reached node is revisited on every
/// pass. Runs in O(V * E).
pub struct BellmanFordSequencer<'g> {
    graph: &'g StreetGraph,
    metric: CostMetric,
    mode: TravelMode,
    start: NodeIndex,
    end: NodeIndex,
    state: SearchState,
    order: Vec<NodeIndex>,
    pass: usize,
    cursor: usize,
    changed: bool,
    /// Node already snapshotted whose edges are relaxed on the next
    /// resumption, mirroring a suspension point inside the pass loop.
    pending: Option<NodeIndex>,
    phase: Phase,
    started_at: Instant,
}

impl<'g> BellmanFordSequencer<'g> {
    /// Validates the endpoints and fixes the per-pass visitation order.
    /// No search state is touched when validation fails.
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
        debug!("bellman-ford {start_id} -> {end_id} ({metric:?}, {mode:?})");

        Ok(Self {
            graph,
            metric,
            mode,
            start,
            end,
            state: SearchState::new(graph.node_count(), start),
            order: graph.node_indices().collect(),
            pass: 0,
            cursor: 0,
            changed: false,
            pending: None,
            phase: Phase::Seed,
            started_at: Instant::now(),
        })
    }

    fn relax_node(&mut self, node: NodeIndex) -> bool {
        let here = self.state.distances[node.index()];
        let mut changed = false;
        for edge in self.graph.edges(node) {
            if !edge.weight().usable_by(self.mode) {
                continue;
            }
            let next = edge.target();
            let alternative = here + edge.weight().weight(self.metric, self.mode);
            if alternative < self.state.distances[next.index()] {
                self.state.distances[next.index()] = alternative;
                self.state.predecessors[next.index()] = Some(node);
                changed = true;
            }
        }
        changed
    }

    /// Resumes the pass loop. Returns the next snapshot, or `None` once
    /// all passes are exhausted; a "converged early" snapshot moves the
    /// phase to [`Phase::Reconstruct`] itself.
    fn sweep(&mut self) -> Option<AlgorithmStep> {
        if let Some(node) = self.pending.take() {
            if self.relax_node(node) {
                self.changed = true;
            }
        }

        loop {
            if self.cursor == self.order.len() {
                if !self.changed {
                    self.phase = Phase::Reconstruct;
                    let pass = self.pass + 1;
                    return Some(self.state.snapshot(
                        self.graph,
                        None,
                        format!("Converged early in pass {pass}."),
                    ));
                }
                self.pass += 1;
                if self.pass >= self.order.len().saturating_sub(1) {
                    return None;
                }
                self.cursor = 0;
                self.changed = false;
            }

            let node = self.order[self.cursor];
            self.cursor += 1;
            // Only propagate from nodes the search has already reached.
            if self.state.distances[node.index()].is_finite() {
                self.pending = Some(node);
                let pass = self.pass + 1;
                let id = &self.graph.node(node).id;
                return Some(self.state.snapshot(
                    self.graph,
                    Some(node),
                    format!("Pass {pass}: relaxing edges leaving {id}."),
                ));
            }
        }
    }
}

impl Iterator for BellmanFordSequencer<'_> {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<AlgorithmStep> {
        loop {
            match self.phase {
                Phase::Seed => {
                    self.phase = Phase::Sweep;
                    return Some(self.state.snapshot(
                        self.graph,
                        Some(self.start),
                        "Start: Bellman-Ford initialised.".to_string(),
                    ));
                }
                Phase::Sweep => {
                    if let Some(step) = self.sweep() {
                        return Some(step);
                    }
                    self.phase = Phase::Reconstruct;
                }
                Phase::Reconstruct => {
                    self.phase = Phase::Done;
                    // Cycle-safety guard for the backward walk; weights
                    // are non-negative, so tripping it means corrupt
                    // predecessor data, not a negative cycle.
                    let bound = self.order.len() + 2;
                    return Some(conclude(
                        &self.state,
                        self.graph,
                        self.start,
                        self.end,
                        Some(bound),
                        self.order.len(),
                        self.started_at,
                    ));
                }
                Phase::Done => return None,
            }
        }
    }
}
