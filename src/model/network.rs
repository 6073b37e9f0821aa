//! Directed street graph with string-id lookup

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::Directed;
use petgraph::graph::{DiGraph, EdgeIndex, Edges, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::Cost;
use crate::error::Error;
use crate::model::{CostMetric, StreetEdge, StreetNode, TravelMode};

/// The street network: a directed [`petgraph`] graph of intersections and
/// street segments, plus an id index for external lookups.
///
/// The graph is immutable for the lifetime of a search. Parallel edges
/// between the same ordered node pair are permitted and kept independent.
#[derive(Debug, Default)]
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    node_ids: HashMap<String, NodeIndex>,
}

impl StreetGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if a node with the same id already
    /// exists.
    pub fn add_node(&mut self, node: StreetNode) -> Result<NodeIndex, Error> {
        if self.node_ids.contains_key(&node.id) {
            return Err(Error::InvalidData(format!("duplicate node id `{}`", node.id)));
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_ids.insert(id, index);
        Ok(index)
    }

    /// Adds a directed street segment between two existing intersections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if either endpoint is unknown.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        edge: StreetEdge,
    ) -> Result<EdgeIndex, Error> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        Ok(self.graph.add_edge(source, target, edge))
    }

    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    /// Looks up a node index by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown id.
    pub fn resolve(&self, id: &str) -> Result<NodeIndex, Error> {
        self.node_index(id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &StreetNode {
        &self.graph[index]
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Ids of all intersections, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(|node| node.id.as_str())
    }

    /// Outgoing street segments of a node. The graph is directed, so this
    /// is not symmetric.
    #[must_use]
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, StreetEdge, Directed> {
        self.graph.edges(node)
    }

    /// Total weight of a node-id path under the given metric and mode,
    /// taking the cheapest usable parallel edge for each hop.
    ///
    /// `None` when the path contains an unknown id or a hop with no
    /// usable connecting segment.
    #[must_use]
    pub fn path_weight(&self, path: &[String], metric: CostMetric, mode: TravelMode) -> Option<Cost> {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.cheapest_hop(a, b, metric, mode))
            .sum()
    }

    fn cheapest_hop(
        &self,
        source: &str,
        target: &str,
        metric: CostMetric,
        mode: TravelMode,
    ) -> Option<Cost> {
        let source = self.node_index(source)?;
        let target = self.node_index(target)?;
        self.edges(source)
            .filter(|edge| edge.target() == target && edge.weight().usable_by(mode))
            .map(|edge| edge.weight().weight(metric, mode))
            .min_by(f64::total_cmp)
    }
}
