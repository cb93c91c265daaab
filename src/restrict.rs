//! Neighborhood restriction
//!
//! Limits a displayed graph to the nodes within a bounded hop distance of a
//! focal node, following edges in either direction, and restores the full
//! view on request. Operates on the live render's node/edge arrays and never
//! mutates them.

use crate::graph::{Edge, GraphView, Node};
use std::collections::{HashMap, HashSet};

/// The active restriction, kept so a later restriction dialog can pre-fill
/// the previous depth for the same focal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocalState {
    pub focal_id: String,
    pub depth: usize,
}

/// Restriction state for one rendered view. Discarded with the view.
#[derive(Debug, Clone, Default)]
pub struct Restriction {
    current: Option<FocalState>,
}

impl Restriction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the focal node's neighborhood within `depth` undirected
    /// hops. Depth 0 degenerates to the focal node alone; a focal id absent
    /// from the edge list yields a singleton (or empty, if it is not a node
    /// either). The inputs are left untouched.
    pub fn restrict(
        &mut self,
        nodes: &[Node],
        edges: &[Edge],
        focal_id: &str,
        depth: usize,
    ) -> GraphView {
        let visited = neighborhood(edges, focal_id, depth);
        self.current = Some(FocalState {
            focal_id: focal_id.to_string(),
            depth,
        });

        let nodes = nodes
            .iter()
            .filter(|n| visited.contains(n.id.as_str()))
            .cloned()
            .collect();
        let edges = edges
            .iter()
            .filter(|e| visited.contains(e.source.as_str()) && visited.contains(e.target.as_str()))
            .cloned()
            .collect();

        GraphView::new(nodes, edges)
    }

    /// Drop the restriction. The caller re-supplies the retained full pair.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&FocalState> {
        self.current.as_ref()
    }

    pub fn is_restricted(&self) -> bool {
        self.current.is_some()
    }
}

/// Node ids reachable from `focal_id` within `depth` undirected hops,
/// including the focal id itself. Frontier-by-frontier BFS with a visited
/// set; cycles and multi-edges are revisit-safe.
pub fn neighborhood(edges: &[Edge], focal_id: &str, depth: usize) -> HashSet<String> {
    // An edge matches from either endpoint: exploration follows links in
    // both directions regardless of how they were written.
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency.entry(&edge.source).or_default().push(&edge.target);
        adjacency.entry(&edge.target).or_default().push(&edge.source);
    }

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(focal_id.to_string());
    let mut frontier: Vec<&str> = vec![focal_id];

    for _hop in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let mut next: Vec<&str> = Vec::new();
        for id in frontier {
            let Some(neighbors) = adjacency.get(id) else {
                continue;
            };
            for &neighbor in neighbors {
                if visited.insert(neighbor.to_string()) {
                    next.push(neighbor);
                }
            }
        }
        frontier = next;
    }

    visited
}
