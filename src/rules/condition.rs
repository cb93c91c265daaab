//! Rule conditions: pure predicates over a node, the edge list, and the
//! metadata lookup. All matching is case-insensitive.

use crate::graph::{Edge, Node};
use crate::vault::{basename, MetadataIndex};
use std::collections::HashMap;

/// One condition from a parsed rule
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Always matches
    Default,
    /// Node's metadata carries the tag, `#`-tolerant
    Tag(String),
    /// Node is the source of an edge whose target basename equals the name
    LinkTo(String),
    /// Node is the target of an edge; with a name, the source basename must
    /// equal it
    LinkFrom(Option<String>),
    /// `LinkTo` or `LinkFrom` with the same name
    Link(String),
}

impl Condition {
    pub(crate) fn matches(&self, node: &Node, edges: &EdgeIndex, metadata: &MetadataIndex) -> bool {
        match self {
            Self::Default => true,
            Self::Tag(name) => metadata
                .get(&node.id)
                .is_some_and(|meta| meta.has_tag(name)),
            Self::LinkTo(name) => links_to(node, edges, name),
            Self::LinkFrom(name) => links_from(node, edges, name.as_deref()),
            Self::Link(name) => {
                links_to(node, edges, name) || links_from(node, edges, Some(name.as_str()))
            }
        }
    }
}

fn links_to(node: &Node, edges: &EdgeIndex, name: &str) -> bool {
    edges
        .outgoing(&node.id)
        .iter()
        .any(|e| basename(&e.target).eq_ignore_ascii_case(name))
}

fn links_from(node: &Node, edges: &EdgeIndex, name: Option<&str>) -> bool {
    let incoming = edges.incoming(&node.id);
    match name {
        None => !incoming.is_empty(),
        Some(name) => incoming
            .iter()
            .any(|e| basename(&e.source).eq_ignore_ascii_case(name)),
    }
}

/// Per-pass index over the edge list for fast endpoint lookups
pub(crate) struct EdgeIndex<'a> {
    outgoing: HashMap<&'a str, Vec<&'a Edge>>,
    incoming: HashMap<&'a str, Vec<&'a Edge>>,
}

impl<'a> EdgeIndex<'a> {
    pub(crate) fn build(edges: &'a [Edge]) -> Self {
        let mut outgoing: HashMap<&str, Vec<&Edge>> = HashMap::new();
        let mut incoming: HashMap<&str, Vec<&Edge>> = HashMap::new();

        for edge in edges {
            outgoing.entry(&edge.source).or_default().push(edge);
            incoming.entry(&edge.target).or_default().push(edge);
        }

        Self { outgoing, incoming }
    }

    fn outgoing(&self, id: &str) -> &[&'a Edge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn incoming(&self, id: &str) -> &[&'a Edge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
