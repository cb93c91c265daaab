//! Directed link occurrences between nodes

use serde::{Deserialize, Serialize};

/// A directed link occurrence from one node to another.
///
/// Edges are deliberately not deduplicated by (source, target): two link
/// occurrences between the same pair of documents are two edges, and node
/// degree counts that multiplicity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Synthetic id, monotonically assigned per insertion; not semantically
    /// meaningful beyond identity within one materialized graph
    pub id: u64,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
}

impl Edge {
    pub fn new(id: u64, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether this edge touches the given node id at either endpoint
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite to `id`, if this edge touches `id`
    pub fn other_endpoint(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_either_endpoint() {
        let edge = Edge::new(0, "a.md", "b.md");
        assert!(edge.touches("a.md"));
        assert!(edge.touches("b.md"));
        assert!(!edge.touches("c.md"));
    }

    #[test]
    fn test_other_endpoint() {
        let edge = Edge::new(0, "a.md", "b.md");
        assert_eq!(edge.other_endpoint("a.md"), Some("b.md"));
        assert_eq!(edge.other_endpoint("b.md"), Some("a.md"));
        assert_eq!(edge.other_endpoint("c.md"), None);
    }
}
