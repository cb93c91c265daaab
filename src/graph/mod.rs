//! Core graph data structures

mod edge;
mod node;
mod store;

pub use edge::Edge;
pub use node::{Node, NodeMaterial, NodeShape};
pub use store::{GraphStore, GraphView};
