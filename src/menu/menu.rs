//! The Menu aggregate: one tree, its identity index, shortcuts and hooks.

use crate::config::EngineConfig;
use crate::descriptor::{validate, AttributeSet, MenuDescriptor};
use crate::error::{MenuError, Result};
use crate::event::{Activation, EventRouter, ShortcutTable};
use crate::keys::KeyEquivalent;
use crate::toolkit::{MenuToolkit, NativeHandle};
use crate::tree::{IdentityIndex, ItemState, MenuNode, MenuTree, NodeId, NodeKind};

use super::builder::{build_tree, Editor};
use super::reconcile::ReconcileStats;

/// Which part of the menu a render touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderScope {
    /// The descriptor root was the menu root.
    Root(ReconcileStats),
    /// The descriptor root was a nested node.
    Subtree(ReconcileStats),
    /// The descriptor root matched nothing; the tree was rebuilt.
    Replaced,
}

/// A live menu.
///
/// Owns its tree (and through it every native handle), the identity index
/// over that tree, and the shortcut table derived from it. Also carries the
/// delegate state driven by the host: open/closed and the highlighted item.
#[derive(Debug)]
pub struct Menu {
    id: String,
    tree: MenuTree,
    index: IdentityIndex,
    shortcuts: ShortcutTable,
    highlighted: Option<NodeId>,
    open: bool,
}

impl Menu {
    /// Build a menu from a descriptor tree.
    ///
    /// Fails without creating anything on the toolkit if the tree is
    /// invalid or its root is not a container.
    pub fn create<T: MenuToolkit + ?Sized>(
        id: impl Into<String>,
        desc: &MenuDescriptor,
        config: &EngineConfig,
        toolkit: &mut T,
    ) -> Result<Self> {
        let (tree, index) = build_tree(desc, config, toolkit)?;
        let mut menu = Self {
            id: id.into(),
            tree,
            index,
            shortcuts: ShortcutTable::new(),
            highlighted: None,
            open: false,
        };
        menu.refresh();
        Ok(menu)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn index(&self) -> &IdentityIndex {
        &self.index
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    /// The root container.
    pub fn root(&self) -> Option<&MenuNode> {
        self.tree.root().and_then(|id| self.tree.get(id))
    }

    /// Native handle of the root container.
    pub fn root_handle(&self) -> Option<NativeHandle> {
        self.root().map(MenuNode::handle)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Arena key of the node with `id`.
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.index.get(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.tree.get(id)
    }

    /// Look up a node by its descriptor ID.
    pub fn element_by_id(&self, id: &str) -> Result<&MenuNode> {
        self.index
            .get(id)
            .and_then(|node| self.tree.get(node))
            .ok_or_else(|| self.not_found(id))
    }

    fn not_found(&self, id: &str) -> MenuError {
        MenuError::ElementNotFound {
            menu: self.id.clone(),
            id: id.to_owned(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Reconcile the menu against `desc`.
    ///
    /// The descriptor root selects what is rendered: the whole menu, a
    /// nested subtree, or (when it matches nothing and the config allows it)
    /// a full replacement. On error the menu and the toolkit are untouched.
    pub fn render<T: MenuToolkit + ?Sized>(
        &mut self,
        desc: &MenuDescriptor,
        config: &EngineConfig,
        toolkit: &mut T,
    ) -> Result<RenderScope> {
        validate(desc, config.max_depth)?;

        let scope = match self.index.get(&desc.id) {
            Some(target) if self.tree.root() == Some(target) => {
                if desc.kind() != NodeKind::Container {
                    return Err(MenuError::schema(&desc.id, "the root of a menu must be a container"));
                }
                RenderScope::Root(self.editor(config, toolkit).reconcile(target, desc)?)
            }
            Some(target) => {
                let same_kind = self.tree.get(target).is_some_and(|n| n.kind() == desc.kind());
                let mut editor = self.editor(config, toolkit);
                let stats = if same_kind {
                    editor.reconcile(target, desc)?
                } else {
                    editor.replace(target, desc)?
                };
                RenderScope::Subtree(stats)
            }
            None if config.replace_unmatched_root => {
                let (tree, index) = build_tree(desc, config, toolkit)?;
                let old = std::mem::replace(&mut self.tree, tree);
                self.index = index;
                // Keys of the old arena may alias nodes of the new one.
                self.highlighted = None;
                release_all(&old, toolkit);
                tracing::debug!(menu = self.id.as_str(), root = desc.id.as_str(), "menu tree replaced");
                RenderScope::Replaced
            }
            None => return Err(self.not_found(&desc.id)),
        };
        self.refresh();
        Ok(scope)
    }

    /// Apply an attribute patch to the node `target`.
    pub fn patch<T: MenuToolkit + ?Sized>(
        &mut self,
        target: &str,
        set: &AttributeSet,
        config: &EngineConfig,
        toolkit: &mut T,
    ) -> Result<bool> {
        let node = self.index.get(target).ok_or_else(|| self.not_found(target))?;
        let changed = self.editor(config, toolkit).patch(node, set)?;
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    /// Release every native object of this menu, children before their
    /// container.
    pub fn teardown<T: MenuToolkit + ?Sized>(self, toolkit: &mut T) {
        release_all(&self.tree, toolkit);
        tracing::debug!(menu = self.id.as_str(), nodes = self.tree.len(), "menu torn down");
    }

    fn editor<'a, T: MenuToolkit + ?Sized>(
        &'a mut self,
        config: &EngineConfig,
        toolkit: &'a mut T,
    ) -> Editor<'a, T> {
        Editor {
            tree: &mut self.tree,
            index: &mut self.index,
            toolkit,
            primary: config.primary_modifier,
        }
    }

    /// Re-derive state that depends on the tree after a mutation.
    fn refresh(&mut self) {
        self.shortcuts = ShortcutTable::from_tree(&self.tree);
        if self.highlighted.is_some_and(|id| !self.tree.contains(id)) {
            self.highlighted = None;
        }
        debug_assert!(self.index.mirrors(&self.tree));
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    /// Activate the node `id` and route the resulting event.
    ///
    /// The item is `Activated` while the router runs and `Idle` again
    /// afterwards.
    pub fn activate(&mut self, id: &str, router: &mut EventRouter) -> Result<Activation> {
        let node = self.index.get(id).ok_or_else(|| self.not_found(id))?;
        self.set_state(node, ItemState::Activated);
        let outcome = match self.tree.get(node) {
            Some(live) => router.route(&self.id, live),
            None => return Err(self.not_found(id)),
        };
        self.set_state(node, ItemState::Idle);
        Ok(outcome)
    }

    /// Resolve `keys` against the shortcut table and activate the match.
    pub fn key_press(&mut self, keys: &KeyEquivalent, router: &mut EventRouter) -> Option<Activation> {
        let id = self.shortcuts.resolve(keys)?.to_owned();
        self.activate(&id, router).ok()
    }

    fn set_state(&mut self, id: NodeId, state: ItemState) {
        if let Some(node) = self.tree.get_mut(id) {
            if node.kind == NodeKind::Item {
                node.state = state;
            }
        }
    }

    /// Delegate hook: the menu is about to be shown.
    pub fn will_open(&mut self) {
        self.open = true;
        tracing::trace!(menu = self.id.as_str(), "will open");
    }

    /// Delegate hook: the menu was dismissed. Clears the highlight.
    pub fn did_close(&mut self) {
        self.open = false;
        self.highlighted = None;
        tracing::trace!(menu = self.id.as_str(), "did close");
    }

    /// Delegate hook: the host moved the highlight to `id` (or off every
    /// item).
    pub fn will_highlight(&mut self, id: Option<&str>) -> Result<()> {
        self.highlighted = match id {
            Some(id) => Some(self.index.get(id).ok_or_else(|| self.not_found(id))?),
            None => None,
        };
        tracing::trace!(menu = self.id.as_str(), highlighted = id, "will highlight");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The highlighted node, if it is still live.
    pub fn highlighted(&self) -> Option<&MenuNode> {
        self.highlighted.and_then(|id| self.tree.get(id))
    }
}

fn release_all<T: MenuToolkit + ?Sized>(tree: &MenuTree, toolkit: &mut T) {
    let Some(root) = tree.root() else { return };
    for id in tree.walk_post_order(root) {
        if let Some(node) = tree.get(id) {
            toolkit.release(node.handle());
        }
    }
}
