//! Identity index: string ID to live node.

use std::collections::HashMap;

use super::node::NodeId;
use super::tree::MenuTree;

/// Maps every live node's string ID to its arena key, for one menu.
///
/// After every completed operation the index mirrors the set of nodes
/// reachable from the tree root exactly; [`IdentityIndex::mirrors`] checks it.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    ids: HashMap<String, NodeId>,
}

impl IdentityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`. Returns the node previously registered under it.
    pub fn insert(&mut self, id: impl Into<String>, node: NodeId) -> Option<NodeId> {
        self.ids.insert(id.into(), node)
    }

    pub fn remove(&mut self, id: &str) -> Option<NodeId> {
        self.ids.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over `(id, node)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.ids.iter().map(|(id, &node)| (id.as_str(), node))
    }

    /// Whether the index holds exactly the nodes reachable from `tree`'s root,
    /// each under its own ID.
    pub fn mirrors(&self, tree: &MenuTree) -> bool {
        let Some(root) = tree.root() else {
            return self.ids.is_empty();
        };
        let reachable = tree.walk_depth_first(root);
        reachable.len() == self.ids.len()
            && reachable.iter().all(|&node| {
                tree.get(node)
                    .is_some_and(|n| self.get(n.id()) == Some(node))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::NativeHandle;
    use crate::tree::node::{MenuNode, NodeAttrs, NodeKind};

    fn node(id: &str, kind: NodeKind) -> MenuNode {
        MenuNode::new(id, kind, NodeAttrs::new(), NativeHandle::from_raw(0))
    }

    #[test]
    fn insert_get_remove() {
        let mut tree = MenuTree::new();
        let root = tree.insert_root(node("root", NodeKind::Container));
        let mut index = IdentityIndex::new();
        assert_eq!(index.insert("root", root), None);
        assert_eq!(index.get("root"), Some(root));
        assert!(index.contains("root"));
        assert_eq!(index.remove("root"), Some(root));
        assert!(index.is_empty());
    }

    #[test]
    fn insert_returns_previous() {
        let mut tree = MenuTree::new();
        let a = tree.insert_root(node("a", NodeKind::Container));
        let b = tree.insert_child(a, 0, node("b", NodeKind::Item));
        let mut index = IdentityIndex::new();
        index.insert("x", a);
        assert_eq!(index.insert("x", b), Some(a));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn mirrors_complete_index() {
        let mut tree = MenuTree::new();
        let root = tree.insert_root(node("root", NodeKind::Container));
        let open = tree.insert_child(root, 0, node("open", NodeKind::Item));
        let mut index = IdentityIndex::new();
        index.insert("root", root);
        index.insert("open", open);
        assert!(index.mirrors(&tree));
    }

    #[test]
    fn missing_entry_does_not_mirror() {
        let mut tree = MenuTree::new();
        let root = tree.insert_root(node("root", NodeKind::Container));
        tree.insert_child(root, 0, node("open", NodeKind::Item));
        let mut index = IdentityIndex::new();
        index.insert("root", root);
        assert!(!index.mirrors(&tree));
    }

    #[test]
    fn dangling_entry_does_not_mirror() {
        let mut tree = MenuTree::new();
        let root = tree.insert_root(node("root", NodeKind::Container));
        let open = tree.insert_child(root, 0, node("open", NodeKind::Item));
        let mut index = IdentityIndex::new();
        index.insert("root", root);
        index.insert("open", open);
        tree.remove(open);
        assert!(!index.mirrors(&tree));
    }

    #[test]
    fn empty_index_mirrors_empty_tree() {
        assert!(IdentityIndex::new().mirrors(&MenuTree::new()));
    }
}
