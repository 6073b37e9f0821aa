pub use crate::WALKING_SPEED_KMH;

// Re-export key components
pub use crate::error::Error;
pub use crate::loading::{demo_graph, street_graph_from_csv, street_graph_from_files};
pub use crate::model::{CostMetric, StreetEdge, StreetGraph, StreetNode, TravelMode};
pub use crate::routing::{
    Algorithm, AlgorithmStep, AutoPlayer, BellmanFordSequencer, DijkstraSequencer, PathResult,
    Sequencer, StepHistory, compute_path, step_sequence,
};

// Scalar cost type shared by weights and accumulated distances
pub use crate::Cost;
