//! Street network components - intersections, street segments and the
//! metric/mode selectors

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::{Cost, WALKING_SPEED_KMH};

/// Cost metric minimised by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostMetric {
    /// Raw segment length in meters.
    Distance,
    /// Traversal time in minutes; which time weight applies depends on
    /// the travel mode.
    Time,
}

/// Travel mode; determines edge usability and which time weight applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    Vehicle,
    Pedestrian,
}

/// Street graph node (an intersection).
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// Unique id of the intersection
    pub id: String,
    /// Display name
    pub name: String,
    /// Node coordinates, consumed only by the rendering layer
    pub lat: f64,
    pub lon: f64,
}

/// Street graph edge (a directed street segment).
///
/// A bidirectional street is represented as two independent edges. The
/// three weight variants are precomputed at construction so the search
/// loop is a pure lookup.
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Segment length in meters
    pub distance_m: f64,
    /// Speed limit in km/h
    pub max_speed_kmh: f64,
    /// Closed to vehicles when set
    pub pedestrian_only: bool,
    pub weight_distance: Cost,
    pub weight_time_vehicle: Cost,
    pub weight_time_pedestrian: Cost,
}

impl StreetEdge {
    /// Builds a segment and precomputes its weight variants. The vehicle
    /// time weight of a pedestrian-only segment is `+inf`; such an edge
    /// is additionally excluded from vehicle traversal by [`usable_by`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a negative or non-finite
    /// distance, or a non-positive speed limit.
    ///
    /// [`usable_by`]: StreetEdge::usable_by
    pub fn new(distance_m: f64, max_speed_kmh: f64, pedestrian_only: bool) -> Result<Self, Error> {
        if !distance_m.is_finite() || distance_m < 0.0 {
            return Err(Error::InvalidData(format!(
                "segment distance must be a non-negative finite number, got {distance_m}"
            )));
        }
        if !max_speed_kmh.is_finite() || max_speed_kmh <= 0.0 {
            return Err(Error::InvalidData(format!(
                "segment speed limit must be positive, got {max_speed_kmh}"
            )));
        }

        let weight_time_vehicle = if pedestrian_only {
            Cost::INFINITY
        } else {
            distance_m / 1000.0 / max_speed_kmh * 60.0
        };
        let weight_time_pedestrian = distance_m / 1000.0 / WALKING_SPEED_KMH * 60.0;

        Ok(Self {
            distance_m,
            max_speed_kmh,
            pedestrian_only,
            weight_distance: distance_m,
            weight_time_vehicle,
            weight_time_pedestrian,
        })
    }

    /// False iff the segment is pedestrian-only and the mode is vehicle.
    #[must_use]
    pub fn usable_by(&self, mode: TravelMode) -> bool {
        !(self.pedestrian_only && mode == TravelMode::Vehicle)
    }

    /// Weight of this segment under the given metric and mode.
    #[must_use]
    pub fn weight(&self, metric: CostMetric, mode: TravelMode) -> Cost {
        match metric {
            CostMetric::Distance => self.weight_distance,
            CostMetric::Time => match mode {
                TravelMode::Vehicle => self.weight_time_vehicle,
                TravelMode::Pedestrian => self.weight_time_pedestrian,
            },
        }
    }
}
