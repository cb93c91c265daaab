//! GraphStore: the deduplicated node / multiplicity-preserving edge container

use super::edge::Edge;
use super::node::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Insertion-ordered graph container keyed by stable string node ids.
///
/// Nodes are deduplicated by id: re-adding an existing id replaces its label
/// and styling in place (last write wins) without changing its position in
/// the output order. Edges are never deduplicated; each insertion gets the
/// next monotonic id.
///
/// The store is rebuilt from scratch on every render; there is no identity
/// across renders beyond the id string itself.
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    next_edge_id: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a node.
    ///
    /// Last write wins: an existing node with the same id keeps its insertion
    /// position but takes the new label and styling.
    pub fn add_node(&mut self, node: Node) {
        match self.index.get(&node.id) {
            Some(&pos) => self.nodes[pos] = node,
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Add a directed edge, assigning the next synthetic id.
    ///
    /// Endpoints are not checked for existence; the materializer always adds
    /// both end nodes before the edge.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> u64 {
        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.edges.push(Edge::new(id, source, target));
        id
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Count of edge occurrences touching a node at either endpoint,
    /// including multiplicity. Used by the rendering layer for sizing.
    pub fn degree(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    /// Consume the store into the (nodes, edges) pair handed onward
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

/// A node/edge pair as handed to the rendering layer: the full styled graph,
/// or a neighborhood-restricted subset of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphView {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }
}
