//! Vaultgraph: graph view engine for linked note vaults
//!
//! Builds a navigable graph from a collection of notes linked to one
//! another, styles it with a small declarative rule language, and restricts
//! the view to a focal node's neighborhood for interactive exploration.
//!
//! # Core Pieces
//!
//! - **Materialization**: per-note link metadata → deduplicated nodes and
//!   multiplicity-preserving edges, with phantom nodes for link targets
//!   that don't resolve to an existing note
//! - **Rule engine**: `condition => action` lines → ordered rule list →
//!   derived color/shape/material/size per node
//! - **Restriction**: undirected breadth-first neighborhood extraction
//!   around a focal node, reversible to the full graph
//!
//! # Example
//!
//! ```no_run
//! use vaultgraph::{render_vault, FsVault, RuleSet};
//!
//! let vault = FsVault::open("./notes")?;
//! let rules = RuleSet::parse("tag(\"project\") => color(\"#d33\")");
//! let view = render_vault(&vault, &rules);
//! println!("{} nodes, {} edges", view.nodes.len(), view.edges.len());
//! # Ok::<(), vaultgraph::VaultError>(())
//! ```

mod api;
mod graph;
mod materialize;
mod restrict;
pub mod rules;
pub mod vault;
mod view;

pub use api::{render_vault, RenderPipeline};
pub use graph::{Edge, GraphStore, GraphView, Node, NodeMaterial, NodeShape};
pub use materialize::{Materialized, Materializer};
pub use restrict::{neighborhood, FocalState, Restriction};
pub use rules::{RuleDiagnostic, RuleSet};
pub use vault::{FsVault, LinkResolver, MetadataIndex, MetadataSource, NoteMetadata, NoteRef, VaultError};
pub use view::{RenderedView, ViewRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
