//! Street network data model
//!
//! Contains the immutable graph of intersections and street segments that
//! every search runs against.

pub mod components;
pub mod network;

pub use components::{CostMetric, StreetEdge, StreetNode, TravelMode};
pub use network::StreetGraph;
