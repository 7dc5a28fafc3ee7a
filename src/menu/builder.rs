//! Tree Builder: descriptor tree → fresh native subtree.
//!
//! Builds depth-first, pre-order. Every node is created on the toolkit,
//! registered in the identity index, and linked under its parent both in
//! the arena and natively, in descriptor order.

use crate::config::EngineConfig;
use crate::descriptor::{validate, MenuDescriptor};
use crate::error::{MenuError, Result};
use crate::keys::{KeyEquivalent, Modifiers};
use crate::toolkit::MenuToolkit;
use crate::tree::{IdentityIndex, MenuNode, MenuTree, NodeId, NodeKind};

/// Mutable view over one menu's tree, index and the toolkit mirroring them.
///
/// Every structural change goes through an editor so the three never drift
/// apart.
pub(crate) struct Editor<'a, T: MenuToolkit + ?Sized> {
    pub(crate) tree: &'a mut MenuTree,
    pub(crate) index: &'a mut IdentityIndex,
    pub(crate) toolkit: &'a mut T,
    pub(crate) primary: Modifiers,
}

/// Parse a raw shortcut spec for node `id`.
///
/// A malformed spec is logged and dropped; the node keeps working without a
/// key equivalent.
pub(crate) fn parse_keys(id: &str, spec: Option<&str>, primary: Modifiers) -> Option<KeyEquivalent> {
    let spec = spec?;
    match KeyEquivalent::parse_with(spec, primary) {
        Ok(keys) => Some(keys),
        Err(err) => {
            tracing::warn!(id, spec, %err, "ignoring malformed shortcut");
            None
        }
    }
}

/// Validate `desc` and build it into a new tree with its index.
///
/// Validation runs first, so on error nothing has been created on the
/// toolkit.
pub fn build_tree<T: MenuToolkit + ?Sized>(
    desc: &MenuDescriptor,
    config: &EngineConfig,
    toolkit: &mut T,
) -> Result<(MenuTree, IdentityIndex)> {
    validate(desc, config.max_depth)?;
    if desc.kind() != NodeKind::Container {
        return Err(MenuError::schema(&desc.id, "the root of a menu must be a container"));
    }

    let mut tree = MenuTree::new();
    let mut index = IdentityIndex::new();
    Editor {
        tree: &mut tree,
        index: &mut index,
        toolkit,
        primary: config.primary_modifier,
    }
    .build(None, 0, desc);
    tracing::debug!(root = desc.id.as_str(), nodes = tree.len(), "menu tree built");
    Ok((tree, index))
}

impl<T: MenuToolkit + ?Sized> Editor<'_, T> {
    /// Build `desc` and its descendants, attaching the subtree under
    /// `parent` at `position` (or as the root when `parent` is `None`).
    ///
    /// `desc` must already be validated, and none of its IDs may be live.
    pub(crate) fn build(&mut self, parent: Option<NodeId>, position: usize, desc: &MenuDescriptor) -> NodeId {
        let kind = desc.kind();
        let attrs = desc.attrs();
        let handle = self.toolkit.create(kind, &attrs);
        let shortcut = parse_keys(&desc.id, attrs.keys.as_deref(), self.primary);
        if shortcut.is_some() {
            self.toolkit.set_key_equivalent(handle, shortcut);
        }

        let mut node = MenuNode::new(desc.id.as_str(), kind, attrs, handle);
        node.shortcut = shortcut;

        let id = match parent {
            Some(parent) => {
                let id = self.tree.insert_child(parent, position, node);
                if let Some(parent_node) = self.tree.get(parent) {
                    self.toolkit.insert(parent_node.handle(), handle, position);
                }
                id
            }
            None => self.tree.insert_root(node),
        };
        let previous = self.index.insert(desc.id.as_str(), id);
        debug_assert!(previous.is_none(), "ID {:?} was already live", desc.id);

        for (i, child) in desc.children().iter().enumerate() {
            self.build(Some(id), i, child);
        }
        id
    }

    /// Detach `id` from its parent and release it with its whole subtree.
    ///
    /// Descendants are released before their container. Returns how many
    /// nodes were removed.
    pub(crate) fn discard(&mut self, id: NodeId) -> usize {
        let Some(node) = self.tree.get(id) else {
            return 0;
        };
        let handle = node.handle();
        if let Some(parent) = self.tree.parent(id).and_then(|p| self.tree.get(p)) {
            self.toolkit.remove(parent.handle(), handle);
        }
        let removed = self.tree.remove(id);
        for node in &removed {
            self.index.remove(node.id());
            self.toolkit.release(node.handle());
        }
        removed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::toolkit::{HeadlessToolkit, ToolkitOp};
    use pretty_assertions::assert_eq;

    fn file_menu() -> MenuDescriptor {
        MenuDescriptor::container("main").with_child(
            MenuDescriptor::container("file")
                .with_label("File")
                .with_child(
                    MenuDescriptor::item("open")
                        .with_label("Open")
                        .with_on_click("doOpen")
                        .with_keys("cmd+o"),
                )
                .with_child(MenuDescriptor::separator("sep"))
                .with_child(MenuDescriptor::item("quit").with_label("Quit")),
        )
    }

    #[test]
    fn every_id_resolves() {
        let mut tk = HeadlessToolkit::new();
        let desc = file_menu();
        let (tree, index) = build_tree(&desc, &EngineConfig::default(), &mut tk).unwrap();

        assert_eq!(tree.len(), desc.node_count());
        assert_eq!(index.len(), desc.node_count());
        assert!(index.mirrors(&tree));
        for record in desc.walk() {
            let id = index.get(&record.id).unwrap();
            assert_eq!(tree.get(id).unwrap().id(), record.id);
        }
    }

    #[test]
    fn children_linked_in_order() {
        let mut tk = HeadlessToolkit::new();
        let (tree, index) = build_tree(&file_menu(), &EngineConfig::default(), &mut tk).unwrap();

        let file = index.get("file").unwrap();
        let ids: Vec<&str> = tree.children(file).iter().map(|&c| tree.get(c).unwrap().id()).collect();
        assert_eq!(ids, vec!["open", "sep", "quit"]);

        let root = tree.get(tree.root().unwrap()).unwrap();
        assert_eq!(
            tk.outline(root.handle()),
            "[]\n  [File]\n    Open (cmd+o)\n    ---\n    Quit"
        );
    }

    #[test]
    fn shortcut_parsed_and_pushed() {
        let mut tk = HeadlessToolkit::new();
        let (tree, index) = build_tree(&file_menu(), &EngineConfig::default(), &mut tk).unwrap();
        let open = tree.get(index.get("open").unwrap()).unwrap();
        let keys = open.shortcut().unwrap();
        assert_eq!(keys.to_string(), "cmd+o");
        assert_eq!(tk.key_equivalent(open.handle()), Some(keys));
    }

    #[test]
    fn malformed_shortcut_is_dropped() {
        let mut tk = HeadlessToolkit::new();
        let desc = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::item("open").with_label("Open").with_keys("cmd+"));
        let (tree, index) = build_tree(&desc, &EngineConfig::default(), &mut tk).unwrap();
        let open = tree.get(index.get("open").unwrap()).unwrap();
        assert!(open.shortcut().is_none());
        assert_eq!(open.attrs().keys.as_deref(), Some("cmd+"));
    }

    #[test]
    fn invalid_tree_creates_nothing() {
        let mut tk = HeadlessToolkit::new();
        let desc = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::item("a"))
            .with_child(MenuDescriptor::item("a"));
        let err = build_tree(&desc, &EngineConfig::default(), &mut tk).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaError);
        assert!(tk.ops().is_empty());
    }

    #[test]
    fn root_must_be_container() {
        let mut tk = HeadlessToolkit::new();
        let err = build_tree(&MenuDescriptor::item("main"), &EngineConfig::default(), &mut tk).unwrap_err();
        assert_eq!(err, MenuError::schema("main", "the root of a menu must be a container"));
        assert!(tk.ops().is_empty());
    }

    #[test]
    fn discard_releases_children_first() {
        let mut tk = HeadlessToolkit::new();
        let (mut tree, mut index) = build_tree(&file_menu(), &EngineConfig::default(), &mut tk).unwrap();
        let file = index.get("file").unwrap();
        tk.take_ops();

        let removed = Editor {
            tree: &mut tree,
            index: &mut index,
            toolkit: &mut tk,
            primary: Modifiers::CMD,
        }
        .discard(file);

        assert_eq!(removed, 4);
        assert_eq!(tree.len(), 1);
        assert!(index.mirrors(&tree));
        let ops = tk.take_ops();
        assert!(matches!(ops.first(), Some(ToolkitOp::Remove { .. })));
        assert!(matches!(ops.last(), Some(ToolkitOp::Release { .. })));
        assert_eq!(ops.iter().filter(|op| matches!(op, ToolkitOp::Release { .. })).count(), 4);
    }
}
