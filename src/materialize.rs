//! Graph materialization
//!
//! Derives the deduplicated node / multiplicity-preserving edge graph from a
//! note collection, resolving each outbound link through the host's
//! link-resolution service. Unresolved targets become phantom nodes whose id
//! and label are both the raw link text.

use crate::graph::{GraphStore, Node};
use crate::vault::{basename, LinkResolver, MetadataIndex, MetadataSource, NoteRef};
use tracing::debug;

/// The materializer's output: the populated store plus the metadata index
/// the rule engine reads during the styling pass.
#[derive(Debug, Default)]
pub struct Materialized {
    pub store: GraphStore,
    pub metadata: MetadataIndex,
}

/// Builds a [`GraphStore`] from a note collection.
///
/// The whole graph is rebuilt per render; nothing is retained between calls.
pub struct Materializer<'a> {
    resolver: &'a dyn LinkResolver,
    source: &'a dyn MetadataSource,
}

impl<'a> Materializer<'a> {
    pub fn new(resolver: &'a dyn LinkResolver, source: &'a dyn MetadataSource) -> Self {
        Self { resolver, source }
    }

    /// Materialize the graph for `notes`, in the order given.
    ///
    /// Per note: a node for the note itself, then per outbound link either a
    /// resolved target node plus a directed edge (self-links suppressed), or
    /// a phantom node plus an edge. Metadata is recorded for every note and
    /// every resolved target, fetching each document at most once.
    pub fn build(&self, notes: &[NoteRef]) -> Materialized {
        let mut store = GraphStore::new();
        let mut metadata = MetadataIndex::new();

        for note in notes {
            store.add_node(Node::new(&note.path, &note.basename));

            let meta = match metadata.get(&note.path) {
                // Already fetched when this note was hit as a link target
                Some(meta) => meta.clone(),
                None => match self.source.metadata(&note.path) {
                    Some(meta) => {
                        metadata.insert(note.path.clone(), meta.clone());
                        meta
                    }
                    // A note without metadata contributes only its own node
                    None => continue,
                },
            };

            for raw in meta.outbound_links() {
                match self.resolver.resolve(raw, &note.path) {
                    Some(target) => {
                        store.add_node(Node::new(&target, basename(&target)));
                        if target != note.path {
                            store.add_edge(&note.path, &target);
                        }
                        if !metadata.contains_key(&target) {
                            if let Some(target_meta) = self.source.metadata(&target) {
                                metadata.insert(target.clone(), target_meta);
                            }
                        }
                    }
                    None => {
                        store.add_node(Node::phantom(raw));
                        store.add_edge(&note.path, raw);
                    }
                }
            }
        }

        debug!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "materialized graph"
        );
        Materialized { store, metadata }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::NoteMetadata;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory host: notes with metadata, resolution by path or basename.
    /// Counts metadata fetches so dedup behavior is observable.
    struct MockHost {
        metadata: HashMap<String, NoteMetadata>,
        fetches: RefCell<Vec<String>>,
    }

    impl MockHost {
        fn new() -> Self {
            Self {
                metadata: HashMap::new(),
                fetches: RefCell::new(Vec::new()),
            }
        }

        fn with_note(mut self, path: &str, links: &[&str]) -> Self {
            self.metadata.insert(
                path.to_string(),
                NoteMetadata {
                    links: links.iter().map(|s| s.to_string()).collect(),
                    ..Default::default()
                },
            );
            self
        }

        fn notes(&self) -> Vec<NoteRef> {
            let mut paths: Vec<_> = self.metadata.keys().cloned().collect();
            paths.sort();
            paths.into_iter().map(NoteRef::new).collect()
        }
    }

    impl MetadataSource for MockHost {
        fn metadata(&self, id: &str) -> Option<NoteMetadata> {
            self.fetches.borrow_mut().push(id.to_string());
            self.metadata.get(id).cloned()
        }
    }

    impl LinkResolver for MockHost {
        fn resolve(&self, raw_link: &str, _context_id: &str) -> Option<String> {
            if self.metadata.contains_key(raw_link) {
                return Some(raw_link.to_string());
            }
            let with_md = format!("{}.md", raw_link);
            self.metadata.contains_key(&with_md).then_some(with_md)
        }
    }

    #[test]
    fn test_end_to_end_scenario_with_phantom() {
        let host = MockHost::new()
            .with_note("A.md", &["B", "Ghost"])
            .with_note("B.md", &["A"]);

        let out = Materializer::new(&host, &host).build(&host.notes());

        let ids: Vec<_> = out.store.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A.md", "B.md", "Ghost"]);

        let edges: Vec<_> = out
            .store
            .edges()
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![("A.md", "B.md"), ("A.md", "Ghost"), ("B.md", "A.md")]
        );

        let ghost = out.store.get_node("Ghost").unwrap();
        assert_eq!(ghost.label, "Ghost");
    }

    #[test]
    fn test_self_link_adds_node_but_no_edge() {
        let host = MockHost::new().with_note("A.md", &["A", "B"]).with_note("B.md", &[]);

        let out = Materializer::new(&host, &host).build(&host.notes());

        assert!(out.store.contains_node("A.md"));
        assert_eq!(out.store.edge_count(), 1);
        assert!(out.store.edges().iter().all(|e| e.source != e.target));
    }

    #[test]
    fn test_no_metadata_contributes_only_own_node() {
        let host = MockHost::new().with_note("A.md", &["B"]);
        let notes = vec![NoteRef::new("A.md"), NoteRef::new("Empty.md")];

        let out = Materializer::new(&host, &host).build(&notes);

        assert!(out.store.contains_node("Empty.md"));
        assert_eq!(out.store.degree("Empty.md"), 0);
        assert!(!out.metadata.contains_key("Empty.md"));
    }

    #[test]
    fn test_repeated_link_occurrences_keep_multiplicity() {
        let host = MockHost::new().with_note("A.md", &["B", "B"]).with_note("B.md", &[]);

        let out = Materializer::new(&host, &host).build(&host.notes());

        assert_eq!(out.store.node_count(), 2);
        assert_eq!(out.store.edge_count(), 2);
        assert_eq!(out.store.degree("B.md"), 2);
    }

    #[test]
    fn test_metadata_fetched_once_per_document() {
        // B is a target of both A and C, and a collection member itself
        let host = MockHost::new()
            .with_note("A.md", &["B"])
            .with_note("B.md", &[])
            .with_note("C.md", &["B"]);

        let out = Materializer::new(&host, &host).build(&host.notes());

        let fetches = host.fetches.borrow();
        let b_fetches = fetches.iter().filter(|id| *id == "B.md").count();
        assert_eq!(b_fetches, 1);
        assert!(out.metadata.contains_key("B.md"));
    }

    #[test]
    fn test_materialization_is_idempotent() {
        let host = MockHost::new()
            .with_note("A.md", &["B", "Ghost", "B"])
            .with_note("B.md", &["A"]);
        let materializer = Materializer::new(&host, &host);

        let first = materializer.build(&host.notes());
        let second = materializer.build(&host.notes());

        assert_eq!(first.store.nodes(), second.store.nodes());
        assert_eq!(first.store.edges(), second.store.edges());
    }

    #[test]
    fn test_frontmatter_links_also_materialize() {
        let mut host = MockHost::new().with_note("B.md", &[]);
        host.metadata.insert(
            "A.md".into(),
            NoteMetadata {
                frontmatter_links: vec!["B".into()],
                ..Default::default()
            },
        );

        let out = Materializer::new(&host, &host).build(&host.notes());
        assert_eq!(out.store.edge_count(), 1);
        assert_eq!(out.store.edges()[0].target, "B.md");
    }
}
