//! Shortest-path search: instant computation and resumable step
//! sequencing over a [`StreetGraph`].

mod bellman_ford;
mod dijkstra;
mod history;
mod queue;
mod step;

pub use bellman_ford::BellmanFordSequencer;
pub use dijkstra::DijkstraSequencer;
pub use history::{AutoPlayer, StepHistory};
pub use step::{AlgorithmStep, PathResult};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{CostMetric, StreetGraph, TravelMode};

/// Path-search algorithm choice. Both algorithms produce identically
/// shaped output from identical inputs; they differ only in relaxation
/// strategy and complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    BellmanFord,
}

/// Live step sequencer for either algorithm. Yields deep state snapshots
/// until one with `finished = true` has been emitted.
pub enum Sequencer<'g> {
    Dijkstra(DijkstraSequencer<'g>),
    BellmanFord(BellmanFordSequencer<'g>),
}

impl Iterator for Sequencer<'_> {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<AlgorithmStep> {
        match self {
            Self::Dijkstra(sequencer) => sequencer.next(),
            Self::BellmanFord(sequencer) => sequencer.next(),
        }
    }
}

/// Starts a resumable step sequence for the chosen algorithm.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] or [`Error::IdenticalEndpoints`]
/// before the first snapshot; all later conditions (including an
/// unreachable destination) resolve into the final snapshot instead of
/// being raised.
pub fn step_sequence<'g>(
    graph: &'g StreetGraph,
    start_id: &str,
    end_id: &str,
    metric: CostMetric,
    mode: TravelMode,
    algorithm: Algorithm,
) -> Result<Sequencer<'g>, Error> {
    match algorithm {
        Algorithm::Dijkstra => Ok(Sequencer::Dijkstra(DijkstraSequencer::new(
            graph, start_id, end_id, metric, mode,
        )?)),
        Algorithm::BellmanFord => Ok(Sequencer::BellmanFord(BellmanFordSequencer::new(
            graph, start_id, end_id, metric, mode,
        )?)),
    }
}

/// Runs the chosen algorithm to completion and returns its final result.
/// An unreachable destination is a successful result with an empty path
/// and `total_weight = +inf`.
///
/// # Errors
///
/// Same preconditions as [`step_sequence`].
pub fn compute_path(
    graph: &StreetGraph,
    start_id: &str,
    end_id: &str,
    metric: CostMetric,
    mode: TravelMode,
    algorithm: Algorithm,
) -> Result<PathResult, Error> {
    let sequencer = step_sequence(graph, start_id, end_id, metric, mode, algorithm)?;
    let mut result = None;
    for step in sequencer {
        if let Some(path_result) = step.path_result {
            result = Some(path_result);
        }
    }
    result.ok_or_else(|| Error::InvalidData("sequencer terminated without a final snapshot".into()))
}
