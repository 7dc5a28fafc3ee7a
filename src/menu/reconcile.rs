//! Tree Reconciler: bring a live subtree in line with a descriptor tree.
//!
//! Two phases after a pure preflight:
//!
//! 1. **Removals**, post-order. A node under the subtree root leaves when its
//!    ID is absent from the descriptor, when its descriptor parent is not its
//!    live parent, or when its kind no longer matches.
//! 2. **Updates and inserts**, pre-order. Changed attributes are pushed in
//!    place, surviving children are moved into descriptor order, and new
//!    descriptors are built fresh at their position.
//!
//! Surviving nodes keep their `NodeId` and native handle. Rendering the same
//! descriptor twice issues no toolkit call the second time.

use std::collections::HashMap;

use super::builder::{parse_keys, Editor};
use crate::descriptor::MenuDescriptor;
use crate::error::{MenuError, Result};
use crate::toolkit::MenuToolkit;
use crate::tree::{NodeId, NodeKind};

/// What a reconciliation did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    /// Nodes built fresh.
    pub created: usize,
    /// Nodes whose attributes were pushed to the toolkit.
    pub updated: usize,
    /// Nodes moved to a new position under the same parent.
    pub moved: usize,
    /// Nodes removed, descendants included.
    pub removed: usize,
}

impl ReconcileStats {
    /// Whether the reconciliation changed nothing.
    pub fn is_noop(&self) -> bool {
        *self == ReconcileStats::default()
    }
}

/// Where a record sits in the descriptor tree.
struct Placement<'d> {
    parent: Option<&'d str>,
    kind: NodeKind,
}

fn placements(desc: &MenuDescriptor) -> HashMap<&str, Placement<'_>> {
    let mut map = HashMap::new();
    let mut stack = vec![(desc, None)];
    while let Some((current, parent)) = stack.pop() {
        map.insert(
            current.id.as_str(),
            Placement {
                parent,
                kind: current.kind(),
            },
        );
        for child in current.children() {
            stack.push((child, Some(current.id.as_str())));
        }
    }
    map
}

impl<T: MenuToolkit + ?Sized> Editor<'_, T> {
    /// Check that every ID of `desc` that is already live belongs to the
    /// subtree rooted at `target`. Mutates nothing.
    fn preflight(&self, target: NodeId, desc: &MenuDescriptor) -> Result<()> {
        for record in desc.walk() {
            let Some(live) = self.index.get(&record.id) else {
                continue;
            };
            if live != target && !self.tree.ancestors(live).contains(&target) {
                return Err(MenuError::schema(
                    &record.id,
                    "ID is already used outside the rendered subtree",
                ));
            }
        }
        Ok(())
    }

    /// Reconcile the live subtree at `target` against `desc`.
    ///
    /// `desc` must be validated, carry the same ID as `target` and have the
    /// same kind.
    pub(crate) fn reconcile(&mut self, target: NodeId, desc: &MenuDescriptor) -> Result<ReconcileStats> {
        self.preflight(target, desc)?;

        let mut stats = ReconcileStats::default();
        let wanted = placements(desc);

        // Phase 1: removals.
        for id in self.tree.walk_post_order(target) {
            if id == target || !self.tree.contains(id) {
                continue;
            }
            let Some(node) = self.tree.get(id) else { continue };
            let live_parent = self
                .tree
                .parent(id)
                .and_then(|p| self.tree.get(p))
                .map(|p| p.id());
            let keep = wanted
                .get(node.id())
                .is_some_and(|w| w.parent == live_parent && w.kind == node.kind());
            if !keep {
                tracing::trace!(id = node.id(), "removing stale node");
                stats.removed += self.discard(id);
            }
        }

        // Phase 2: updates and inserts.
        self.update(target, desc, &mut stats);

        tracing::debug!(
            root = desc.id.as_str(),
            created = stats.created,
            updated = stats.updated,
            moved = stats.moved,
            removed = stats.removed,
            "subtree reconciled"
        );
        Ok(stats)
    }

    /// Replace the node at `target` by a fresh build of `desc`, at the same
    /// position under the same parent. Used when the kinds differ.
    pub(crate) fn replace(&mut self, target: NodeId, desc: &MenuDescriptor) -> Result<ReconcileStats> {
        self.preflight(target, desc)?;
        let parent = self
            .tree
            .parent(target)
            .ok_or_else(|| MenuError::schema(&desc.id, "the root of a menu must be a container"))?;
        let position = self.tree.position(parent, target).unwrap_or(0);

        let removed = self.discard(target);
        self.build(Some(parent), position, desc);
        let stats = ReconcileStats {
            created: desc.node_count(),
            removed,
            ..ReconcileStats::default()
        };
        tracing::debug!(id = desc.id.as_str(), kind = desc.kind().as_str(), "node replaced");
        Ok(stats)
    }

    fn update(&mut self, id: NodeId, desc: &MenuDescriptor, stats: &mut ReconcileStats) {
        self.update_attrs(id, desc, stats);

        let Some(handle) = self.tree.get(id).map(|n| n.handle()) else {
            return;
        };
        for (i, child) in desc.children().iter().enumerate() {
            match self.index.get(&child.id) {
                Some(live) => {
                    debug_assert_eq!(self.tree.parent(live), Some(id));
                    if self.tree.position(id, live) != Some(i) {
                        self.tree.move_child(id, live, i);
                        if let Some(node) = self.tree.get(live) {
                            self.toolkit.move_to(handle, node.handle(), i);
                        }
                        stats.moved += 1;
                    }
                    self.update(live, child, stats);
                }
                None => {
                    self.build(Some(id), i, child);
                    stats.created += child.node_count();
                }
            }
        }
    }

    fn update_attrs(&mut self, id: NodeId, desc: &MenuDescriptor, stats: &mut ReconcileStats) {
        let attrs = desc.attrs();
        let primary = self.primary;
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.attrs == attrs {
            return;
        }
        let keys_changed = node.attrs.keys != attrs.keys;
        node.attrs = attrs;
        self.toolkit.update(node.handle, &node.attrs);
        if keys_changed {
            node.shortcut = parse_keys(&node.id, node.attrs.keys.as_deref(), primary);
            self.toolkit.set_key_equivalent(node.handle, node.shortcut);
        }
        stats.updated += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::keys::Modifiers;
    use crate::menu::builder::build_tree;
    use crate::toolkit::{HeadlessToolkit, ToolkitOp};
    use crate::tree::{IdentityIndex, MenuTree};
    use pretty_assertions::assert_eq;

    struct Fixture {
        tree: MenuTree,
        index: IdentityIndex,
        tk: HeadlessToolkit,
    }

    impl Fixture {
        fn new(desc: &MenuDescriptor) -> Self {
            let mut tk = HeadlessToolkit::new();
            let (tree, index) = build_tree(desc, &EngineConfig::default(), &mut tk).unwrap();
            tk.take_ops();
            Self { tree, index, tk }
        }

        fn editor(&mut self) -> Editor<'_, HeadlessToolkit> {
            Editor {
                tree: &mut self.tree,
                index: &mut self.index,
                toolkit: &mut self.tk,
                primary: Modifiers::CMD,
            }
        }

        fn render(&mut self, desc: &MenuDescriptor) -> Result<ReconcileStats> {
            let target = self.index.get(&desc.id).unwrap();
            self.editor().reconcile(target, desc)
        }

        fn node(&self, id: &str) -> NodeId {
            self.index.get(id).unwrap()
        }

        fn child_ids(&self, id: &str) -> Vec<&str> {
            self.tree
                .children(self.node(id))
                .iter()
                .map(|&c| self.tree.get(c).unwrap().id())
                .collect()
        }

        fn outline(&self) -> String {
            let root = self.tree.get(self.tree.root().unwrap()).unwrap();
            self.tk.outline(root.handle())
        }
    }

    fn items(ids: &[&str]) -> MenuDescriptor {
        MenuDescriptor::container("main").with_children(
            ids.iter().map(|id| MenuDescriptor::item(*id).with_label(id.to_uppercase())),
        )
    }

    fn file_menu(open_label: &str) -> MenuDescriptor {
        MenuDescriptor::container("main").with_child(
            MenuDescriptor::container("file")
                .with_label("File")
                .with_child(MenuDescriptor::item("open").with_label(open_label).with_on_click("doOpen"))
                .with_child(MenuDescriptor::item("quit").with_label("Quit")),
        )
    }

    // ── Idempotence ──────────────────────────────────────────────────

    #[test]
    fn same_tree_twice_is_noop() {
        let mut fx = Fixture::new(&file_menu("Open"));
        let stats = fx.render(&file_menu("Open")).unwrap();
        assert!(stats.is_noop());
        assert!(fx.tk.ops().is_empty());
    }

    // ── Attributes ───────────────────────────────────────────────────

    #[test]
    fn label_change_keeps_identity() {
        let mut fx = Fixture::new(&file_menu("Open"));
        let before = fx.node("open");
        let handle = fx.tree.get(before).unwrap().handle();

        let stats = fx.render(&file_menu("Open…")).unwrap();

        assert_eq!(stats, ReconcileStats { updated: 1, ..Default::default() });
        assert_eq!(fx.node("open"), before);
        let node = fx.tree.get(before).unwrap();
        assert_eq!(node.handle(), handle);
        assert_eq!(node.label(), "Open…");
        assert_eq!(fx.tk.take_ops(), vec![ToolkitOp::Update { handle }]);
    }

    #[test]
    fn shortcut_change_is_pushed() {
        let desc = |keys: &str| MenuDescriptor::container("main").with_child(MenuDescriptor::item("a").with_keys(keys));
        let mut fx = Fixture::new(&desc("cmd+a"));
        fx.render(&desc("cmd+b")).unwrap();
        let node = fx.tree.get(fx.node("a")).unwrap();
        assert_eq!(node.shortcut().unwrap().to_string(), "cmd+b");
        assert_eq!(fx.tk.key_equivalent(node.handle()), node.shortcut());
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn removed_ids_leave_the_index() {
        let mut fx = Fixture::new(&items(&["a", "b", "c"]));
        let stats = fx.render(&items(&["a", "c"])).unwrap();
        assert_eq!(stats.removed, 1);
        assert!(fx.index.get("b").is_none());
        assert_eq!(fx.child_ids("main"), vec!["a", "c"]);
        assert!(fx.index.mirrors(&fx.tree));
    }

    #[test]
    fn reorder_moves_without_rebuilding() {
        let mut fx = Fixture::new(&items(&["a", "b", "c"]));
        let handles: Vec<_> = ["a", "b", "c"].iter().map(|id| fx.tree.get(fx.node(id)).unwrap().handle()).collect();

        let stats = fx.render(&items(&["c", "a", "b"])).unwrap();

        assert_eq!(stats.created, 0);
        assert_eq!(stats.removed, 0);
        assert!(stats.moved >= 1);
        assert_eq!(fx.child_ids("main"), vec!["c", "a", "b"]);
        for (id, handle) in ["a", "b", "c"].iter().zip(handles) {
            assert_eq!(fx.tree.get(fx.node(id)).unwrap().handle(), handle);
        }
        assert!(fx.tk.ops().iter().all(|op| matches!(op, ToolkitOp::Move { .. })));
        assert_eq!(fx.outline(), "[]\n  C\n  A\n  B");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut fx = Fixture::new(&items(&["a", "c"]));
        let stats = fx.render(&items(&["a", "b", "c"])).unwrap();
        assert_eq!(stats, ReconcileStats { created: 1, ..Default::default() });
        assert_eq!(fx.child_ids("main"), vec!["a", "b", "c"]);
        assert_eq!(fx.outline(), "[]\n  A\n  B\n  C");
    }

    #[test]
    fn reparented_node_is_rebuilt() {
        let before = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::container("file").with_child(MenuDescriptor::item("open")))
            .with_child(MenuDescriptor::container("edit"));
        let after = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::container("file"))
            .with_child(MenuDescriptor::container("edit").with_child(MenuDescriptor::item("open")));
        let mut fx = Fixture::new(&before);
        let old = fx.node("open");

        let stats = fx.render(&after).unwrap();

        assert_eq!(stats.removed, 1);
        assert_eq!(stats.created, 1);
        assert_ne!(fx.node("open"), old);
        assert_eq!(fx.child_ids("edit"), vec!["open"]);
        assert!(fx.child_ids("file").is_empty());
    }

    #[test]
    fn kind_change_rebuilds() {
        let before = MenuDescriptor::container("main").with_child(MenuDescriptor::item("x").with_label("X"));
        let after = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::container("x").with_label("X").with_child(MenuDescriptor::item("y")));
        let mut fx = Fixture::new(&before);

        fx.render(&after).unwrap();

        let x = fx.tree.get(fx.node("x")).unwrap();
        assert!(x.is_container());
        assert_eq!(fx.child_ids("x"), vec!["y"]);
        assert!(fx.index.mirrors(&fx.tree));
    }

    #[test]
    fn whole_subtree_removed_children_first() {
        let mut fx = Fixture::new(&file_menu("Open"));
        let stats = fx.render(&MenuDescriptor::container("main")).unwrap();
        assert_eq!(stats.removed, 3);
        assert_eq!(fx.tree.len(), 1);

        let released: Vec<_> = fx
            .tk
            .ops()
            .iter()
            .filter_map(|op| match op {
                ToolkitOp::Release { handle } => Some(*handle),
                _ => None,
            })
            .collect();
        // `file` was the first container created after `main`.
        assert_eq!(released.last().map(|h| h.raw()), Some(2));
    }

    // ── Subtrees ─────────────────────────────────────────────────────

    #[test]
    fn nested_subtree_reconcile_leaves_siblings() {
        let desc = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::container("file").with_child(MenuDescriptor::item("open")))
            .with_child(MenuDescriptor::container("edit").with_child(MenuDescriptor::item("copy")));
        let mut fx = Fixture::new(&desc);
        let copy = fx.node("copy");

        let file = MenuDescriptor::container("file")
            .with_child(MenuDescriptor::item("open"))
            .with_child(MenuDescriptor::item("close"));
        fx.render(&file).unwrap();

        assert_eq!(fx.child_ids("file"), vec!["open", "close"]);
        assert_eq!(fx.child_ids("main"), vec!["file", "edit"]);
        assert_eq!(fx.node("copy"), copy);
    }

    #[test]
    fn foreign_id_in_subtree_is_rejected() {
        let desc = MenuDescriptor::container("main")
            .with_child(MenuDescriptor::container("file").with_child(MenuDescriptor::item("open")))
            .with_child(MenuDescriptor::container("edit").with_child(MenuDescriptor::item("copy")));
        let mut fx = Fixture::new(&desc);

        let file = MenuDescriptor::container("file").with_child(MenuDescriptor::item("copy"));
        let err = fx.render(&file).unwrap_err();

        assert!(matches!(err, MenuError::Schema { ref id, .. } if id == "copy"));
        assert!(fx.tk.ops().is_empty());
        assert_eq!(fx.child_ids("file"), vec!["open"]);
    }

    #[test]
    fn replace_keeps_position() {
        let desc = items(&["a", "b", "c"]);
        let mut fx = Fixture::new(&desc);
        let target = fx.node("b");

        let sub = MenuDescriptor::container("b")
            .with_label("B")
            .with_child(MenuDescriptor::item("b1").with_label("B1"));
        let stats = fx.editor().replace(target, &sub).unwrap();

        assert_eq!(stats.removed, 1);
        assert_eq!(stats.created, 2);
        assert_eq!(fx.child_ids("main"), vec!["a", "b", "c"]);
        assert!(fx.tree.get(fx.node("b")).unwrap().is_container());
        assert_eq!(fx.outline(), "[]\n  A\n  [B]\n    B1\n  C");
    }
}
