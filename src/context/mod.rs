//! Security context built per scan
//!
//! Converts one graph snapshot into an adjacency index plus the query
//! surface rules evaluate against. A fresh context is built for every
//! scan invocation and never cached across graph mutations.

use crate::graph::{Graph, Node};
use rustc_hash::{FxHashMap, FxHashSet};

/// Read-only view over one graph snapshot and its adjacency index.
///
/// The adjacency index is symmetric: an edge A-B makes B a neighbor of A
/// and A a neighbor of B. Edges referencing missing node ids are skipped.
/// Build cost is O(N+E).
pub struct SecurityContext<'a> {
    graph: &'a Graph,
    nodes_by_id: FxHashMap<&'a str, &'a Node>,
    adjacency: FxHashMap<&'a str, FxHashSet<&'a str>>,
    /// Per-type node lists, preserving graph declaration order so rule
    /// output order is deterministic.
    nodes_by_type: FxHashMap<&'a str, Vec<&'a Node>>,
}

impl<'a> SecurityContext<'a> {
    pub fn build(graph: &'a Graph) -> Self {
        let mut nodes_by_id =
            FxHashMap::with_capacity_and_hasher(graph.nodes.len(), Default::default());
        let mut nodes_by_type: FxHashMap<&str, Vec<&Node>> = FxHashMap::default();
        for node in &graph.nodes {
            nodes_by_id.insert(node.id.as_str(), node);
            nodes_by_type
                .entry(node.resource_type.as_str())
                .or_default()
                .push(node);
        }

        let mut adjacency: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();
        for edge in &graph.edges {
            // Dangling references are tolerated, not an error
            let (Some(source), Some(target)) = (
                nodes_by_id.get(edge.source.as_str()),
                nodes_by_id.get(edge.target.as_str()),
            ) else {
                continue;
            };
            adjacency
                .entry(source.id.as_str())
                .or_default()
                .insert(target.id.as_str());
            adjacency
                .entry(target.id.as_str())
                .or_default()
                .insert(source.id.as_str());
        }

        Self {
            graph,
            nodes_by_id,
            adjacency,
            nodes_by_type,
        }
    }

    pub fn node_by_id(&self, id: &str) -> Option<&'a Node> {
        self.nodes_by_id.get(id).copied()
    }

    pub fn has_node_of_type(&self, resource_type: &str) -> bool {
        self.nodes_by_type.contains_key(resource_type)
    }

    /// Nodes of one type, in graph declaration order.
    pub fn nodes_of_type(&self, resource_type: &str) -> &[&'a Node] {
        self.nodes_by_type
            .get(resource_type)
            .map(|nodes| nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any direct neighbor of `node_id` has the given type.
    pub fn is_connected_to(&self, node_id: &str, neighbor_type: &str) -> bool {
        self.adjacency
            .get(node_id)
            .map(|neighbors| {
                neighbors.iter().any(|id| {
                    self.nodes_by_id
                        .get(id)
                        .is_some_and(|n| n.resource_type == neighbor_type)
                })
            })
            .unwrap_or(false)
    }

    /// IDs of all nodes directly connected to `node_id`. Membership
    /// queries only; iteration order is unspecified.
    pub fn connected_nodes(&self, node_id: &str) -> Option<&FxHashSet<&'a str>> {
        self.adjacency.get(node_id)
    }

    pub fn connection_count(&self, node_id: &str) -> usize {
        self.adjacency.get(node_id).map(|n| n.len()).unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }
}
