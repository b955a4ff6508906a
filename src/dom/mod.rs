//! DOM arena: slotmap-backed element tree with keyed children and queries.

pub mod attrs;
pub mod factory;
pub mod node;
pub mod query;
pub mod tree;

pub use attrs::{AttrMap, StyleMap};
pub use node::{NodeData, NodeId};
pub use tree::{Child, Content, Dom};
