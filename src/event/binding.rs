//! Shortcut table: key equivalent → item ID for one menu.
//!
//! The table is rebuilt from the tree after every successful mutation, so it
//! always reflects the live key equivalents. When two items share a chord the
//! first one in display order wins.

use std::collections::HashMap;

use crate::keys::KeyEquivalent;
use crate::tree::MenuTree;

/// Registry of key equivalents, mapping a chord to the item that owns it.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    bindings: HashMap<KeyEquivalent, String>,
}

impl ShortcutTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for every item under the tree's root.
    pub fn from_tree(tree: &MenuTree) -> Self {
        let mut table = Self::new();
        let Some(root) = tree.root() else {
            return table;
        };
        for id in tree.walk_depth_first(root) {
            let Some(node) = tree.get(id) else { continue };
            let Some(keys) = node.shortcut() else { continue };
            if node.is_container() || node.is_separator() {
                continue;
            }
            if let Some(owner) = table.bindings.get(&keys) {
                tracing::debug!(%keys, owner = owner.as_str(), shadowed = node.id(), "shortcut collision");
                continue;
            }
            table.bindings.insert(keys, node.id().to_owned());
        }
        table
    }

    /// Look up the item bound to `keys`.
    pub fn resolve(&self, keys: &KeyEquivalent) -> Option<&str> {
        self.bindings.get(keys).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Key, Modifiers};
    use crate::toolkit::NativeHandle;
    use crate::tree::node::{MenuNode, NodeAttrs, NodeKind};

    fn cmd(c: char) -> KeyEquivalent {
        KeyEquivalent::new(Key::Char(c), Modifiers::CMD)
    }

    fn item_with_keys(id: &str, keys: Option<KeyEquivalent>) -> MenuNode {
        let mut node = MenuNode::new(id, NodeKind::Item, NodeAttrs::new(), NativeHandle::from_raw(0));
        node.shortcut = keys;
        node
    }

    fn flat_tree(items: Vec<MenuNode>) -> MenuTree {
        let mut tree = MenuTree::new();
        let root = tree.insert_root(MenuNode::new("root", NodeKind::Container, NodeAttrs::new(), NativeHandle::from_raw(0)));
        for (i, item) in items.into_iter().enumerate() {
            tree.insert_child(root, i, item);
        }
        tree
    }

    #[test]
    fn resolve_bound_item() {
        let table = ShortcutTable::from_tree(&flat_tree(vec![item_with_keys("open", Some(cmd('o')))]));
        assert_eq!(table.resolve(&cmd('o')), Some("open"));
        assert_eq!(table.resolve(&cmd('s')), None);
    }

    #[test]
    fn modifiers_must_match() {
        let table = ShortcutTable::from_tree(&flat_tree(vec![item_with_keys("open", Some(cmd('o')))]));
        let plain = KeyEquivalent::new(Key::Char('o'), Modifiers::NONE);
        assert_eq!(table.resolve(&plain), None);
    }

    #[test]
    fn separators_and_containers_are_skipped() {
        let mut sep = item_with_keys("sep", Some(cmd('x')));
        sep.attrs = NodeAttrs::new().separator(true);
        let mut sub = MenuNode::new("sub", NodeKind::Container, NodeAttrs::new(), NativeHandle::from_raw(0));
        sub.shortcut = Some(cmd('y'));
        let table = ShortcutTable::from_tree(&flat_tree(vec![sep, sub]));
        assert!(table.is_empty());
    }

    #[test]
    fn from_tree_first_in_display_order_wins() {
        let mut tree = MenuTree::new();
        let root = tree.insert_root(MenuNode::new("root", NodeKind::Container, NodeAttrs::new(), NativeHandle::from_raw(0)));
        let sub = tree.insert_child(root, 0, MenuNode::new("sub", NodeKind::Container, NodeAttrs::new(), NativeHandle::from_raw(0)));
        tree.insert_child(sub, 0, item_with_keys("nested", Some(cmd('o'))));
        tree.insert_child(root, 1, item_with_keys("later", Some(cmd('o'))));
        tree.insert_child(root, 2, item_with_keys("save", Some(cmd('s'))));
        tree.insert_child(root, 3, item_with_keys("plain", None));

        let table = ShortcutTable::from_tree(&tree);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(&cmd('o')), Some("nested"));
        assert_eq!(table.resolve(&cmd('s')), Some("save"));
    }

    #[test]
    fn from_empty_tree() {
        assert!(ShortcutTable::from_tree(&MenuTree::new()).is_empty());
    }
}
