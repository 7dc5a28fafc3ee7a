//! Menu tree arena: slotmap-backed nodes, ordered children, identity index.

pub mod index;
pub mod node;
pub mod tree;

pub use index::IdentityIndex;
pub use node::{ItemState, MenuNode, NodeAttrs, NodeId, NodeKind};
pub use tree::MenuTree;
