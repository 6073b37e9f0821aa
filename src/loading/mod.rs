//! This module is responsible for loading street network data from
//! semicolon-separated CSV and building a [`StreetGraph`], including the
//! embedded demo dataset.

use std::path::Path;

use log::info;
use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::model::{StreetEdge, StreetGraph, StreetNode};

const DEMO_NODES: &str = include_str!("../../data/pasto_nodes.csv");
const DEMO_EDGES: &str = include_str!("../../data/pasto_edges.csv");

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: String,
    lat: f64,
    lon: f64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: String,
    target: String,
    distance_m: f64,
    max_speed_kmh: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pedestrian_only: bool,
}

// The source data uses TRUE/FALSE flags
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_uppercase().as_str() {
        "TRUE" | "1" => Ok(true),
        "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected TRUE or FALSE, got `{other}`"
        ))),
    }
}

fn deserialize_rows<T>(data: &str) -> Result<Vec<T>, Error>
where
    T: for<'de> Deserialize<'de>,
{
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes())
        .deserialize()
        .map(|row| row.map_err(Error::from))
        .collect()
}

/// Builds a street graph from headerless CSV data.
///
/// Node rows are `id;lat;lon;name`; edge rows are
/// `source;target;distance_m;max_speed_kmh;pedestrian_only`. Node ids are
/// uppercased on both sides, since the source data is case-inconsistent.
///
/// # Errors
///
/// Returns [`Error::Csv`] for malformed rows, [`Error::InvalidData`] for
/// duplicate node ids or out-of-range segment attributes, and
/// [`Error::NodeNotFound`] for an edge endpoint without a node row.
pub fn street_graph_from_csv(nodes: &str, edges: &str) -> Result<StreetGraph, Error> {
    let node_rows: Vec<NodeRecord> = deserialize_rows(nodes)?;
    let edge_rows: Vec<EdgeRecord> = deserialize_rows(edges)?;

    let mut graph = StreetGraph::new();
    for row in node_rows {
        graph.add_node(StreetNode {
            id: row.id.to_ascii_uppercase(),
            name: row.name,
            lat: row.lat,
            lon: row.lon,
        })?;
    }
    for row in edge_rows {
        let edge = StreetEdge::new(row.distance_m, row.max_speed_kmh, row.pedestrian_only)?;
        graph.add_edge(
            &row.source.to_ascii_uppercase(),
            &row.target.to_ascii_uppercase(),
            edge,
        )?;
    }

    info!(
        "street graph loaded: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Reads node and edge CSV files and builds a street graph.
///
/// # Errors
///
/// Returns [`Error::Io`] when a file cannot be read, otherwise as
/// [`street_graph_from_csv`].
pub fn street_graph_from_files(nodes_path: &Path, edges_path: &Path) -> Result<StreetGraph, Error> {
    let nodes = std::fs::read_to_string(nodes_path)?;
    let edges = std::fs::read_to_string(edges_path)?;
    street_graph_from_csv(&nodes, &edges)
}

/// The fixed demo network shipped with the crate: the street grid of the
/// Pasto (Colombia) city centre, 31 intersections and 107 directed
/// segments.
///
/// # Errors
///
/// Only if the embedded dataset is malformed.
pub fn demo_graph() -> Result<StreetGraph, Error> {
    street_graph_from_csv(DEMO_NODES, DEMO_EDGES)
}
