//! Render pipeline facade
//!
//! Ties the stages together: document collection → materializer → rule
//! application → styled node/edge pair for the rendering layer.

use crate::graph::GraphView;
use crate::materialize::Materializer;
use crate::rules::RuleSet;
use crate::vault::{FsVault, LinkResolver, MetadataSource, NoteRef};
use tracing::info;

/// One render pass over a note collection. Each call materializes from
/// scratch; nothing is shared between passes.
pub struct RenderPipeline<'a> {
    resolver: &'a dyn LinkResolver,
    metadata: &'a dyn MetadataSource,
}

impl<'a> RenderPipeline<'a> {
    pub fn new(resolver: &'a dyn LinkResolver, metadata: &'a dyn MetadataSource) -> Self {
        Self { resolver, metadata }
    }

    /// Materialize the graph for `notes` and run the styling pass.
    pub fn render(&self, notes: &[NoteRef], rules: &RuleSet) -> GraphView {
        let materialized = Materializer::new(self.resolver, self.metadata).build(notes);
        let metadata = materialized.metadata;
        let (nodes, edges) = materialized.store.into_parts();
        let styled = rules.apply(&nodes, &edges, &metadata);

        info!(
            nodes = styled.len(),
            edges = edges.len(),
            rules = rules.len(),
            "rendered graph"
        );
        GraphView::new(styled, edges)
    }
}

/// Render a filesystem vault, which supplies all three collaborator roles.
pub fn render_vault(vault: &FsVault, rules: &RuleSet) -> GraphView {
    RenderPipeline::new(vault, vault).render(vault.notes(), rules)
}
