//! Rendered-view registry
//!
//! The host keeps one rendered graph per display container. The registry is
//! that explicit map, with replace/dispose semantics per key; the core
//! pipeline itself stays stateless per invocation.

use crate::graph::GraphView;
use crate::restrict::{FocalState, Restriction};
use dashmap::DashMap;

/// One rendered view: the full styled graph plus its restriction state.
///
/// `restrict` filters, `unrestrict` restores the retained full pair; the
/// full pair itself is never modified after installation.
#[derive(Debug, Clone)]
pub struct RenderedView {
    full: GraphView,
    restriction: Restriction,
}

impl RenderedView {
    pub fn new(full: GraphView) -> Self {
        Self {
            full,
            restriction: Restriction::new(),
        }
    }

    /// The retained full graph
    pub fn full(&self) -> &GraphView {
        &self.full
    }

    /// Restrict to the focal node's neighborhood; see
    /// [`Restriction::restrict`].
    pub fn restrict(&mut self, focal_id: &str, depth: usize) -> GraphView {
        self.restriction
            .restrict(&self.full.nodes, &self.full.edges, focal_id, depth)
    }

    /// Restore the full view and clear the restriction state
    pub fn unrestrict(&mut self) -> GraphView {
        self.restriction.clear();
        self.full.clone()
    }

    /// The active restriction, if any (for pre-filling the restriction UI)
    pub fn restriction(&self) -> Option<&FocalState> {
        self.restriction.current()
    }
}

/// Registry of rendered views keyed by display container.
///
/// Thread-safe so the host can install a replacement while another thread
/// still reads the old view's key set.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: DashMap<String, RenderedView>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a view for a container, replacing (and returning) any
    /// previous one. Replacement is disposal of the old view.
    pub fn install(&self, key: impl Into<String>, view: RenderedView) -> Option<RenderedView> {
        self.views.insert(key.into(), view)
    }

    /// Remove and return a container's view
    pub fn dispose(&self, key: &str) -> Option<RenderedView> {
        self.views.remove(key).map(|(_, view)| view)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.views.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.views.iter().map(|r| r.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Restrict a container's view in place; `None` if the key is unknown
    pub fn restrict(&self, key: &str, focal_id: &str, depth: usize) -> Option<GraphView> {
        self.views
            .get_mut(key)
            .map(|mut view| view.restrict(focal_id, depth))
    }

    /// Restore a container's full view; `None` if the key is unknown
    pub fn unrestrict(&self, key: &str) -> Option<GraphView> {
        self.views.get_mut(key).map(|mut view| view.unrestrict())
    }

    /// The active restriction for a container, if any
    pub fn restriction(&self, key: &str) -> Option<FocalState> {
        self.views
            .get(key)
            .and_then(|view| view.restriction().cloned())
    }
}
