//! Street-network shortest path engine with step-by-step search tracing.
//!
//! The crate models a fixed street-intersection network as a directed
//! weighted graph and computes shortest paths on it with two
//! interchangeable algorithms (Dijkstra and Bellman-Ford), two cost
//! metrics (distance and travel time) and two travel modes (vehicle and
//! pedestrian). Every search can either run to completion in one call
//! ([`routing::compute_path`]) or be driven one observable step at a time
//! through a resumable sequencer ([`routing::step_sequence`]) whose
//! snapshots expose the frontier, the visited set and the predecessor
//! tree at each decision point. [`routing::StepHistory`] records emitted
//! snapshots so a consumer can navigate backward and forward through a
//! run without re-executing the algorithm.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{CostMetric, StreetEdge, StreetGraph, StreetNode, TravelMode};
pub use routing::{
    Algorithm, AlgorithmStep, AutoPlayer, PathResult, Sequencer, StepHistory, compute_path,
    step_sequence,
};

/// Scalar edge weight / accumulated path cost.
pub type Cost = f64;

/// Assumed walking speed used for pedestrian time weights, km/h.
pub const WALKING_SPEED_KMH: f64 = 5.0;
