//! Tree operations: insert at position, move, remove subtree, walk.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{MenuNode, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The native menu tree of one menu, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that removal is O(subtree size) and lookup is O(1).
/// Child order is display order.
#[derive(Debug, Clone)]
pub struct MenuTree {
    nodes: SlotMap<NodeId, MenuNode>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl MenuTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert the root node. Replaces the root pointer if one was set.
    pub fn insert_root(&mut self, node: MenuNode) -> NodeId {
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        self.root = Some(id);
        id
    }

    /// Insert a node as the child of `parent` at `index`.
    ///
    /// `index` is clamped to the current child count.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, node: MenuNode) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            let index = index.min(siblings.len());
            siblings.insert(index, id);
        }
        id
    }

    /// Move `child` within its parent's child list to position `to`.
    ///
    /// Returns the previous position, or `None` if `child` is not a child of
    /// `parent`.
    pub fn move_child(&mut self, parent: NodeId, child: NodeId, to: usize) -> Option<usize> {
        let siblings = self.children.get_mut(parent)?;
        let from = siblings.iter().position(|&c| c == child)?;
        siblings.remove(from);
        let to = to.min(siblings.len());
        siblings.insert(to, child);
        Some(from)
    }

    /// Position of `child` within `parent`'s child list.
    pub fn position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the removed nodes in post-order: descendants before their
    /// container, `id` last. Empty if `id` did not exist.
    pub fn remove(&mut self, id: NodeId) -> Vec<MenuNode> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }

        if let Some(parent_id) = self.parent.get(id).copied() {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let order = self.walk_post_order(id);
        let mut removed = Vec::with_capacity(order.len());
        for current in order {
            self.children.remove(current);
            self.parent.remove(current);
            if let Some(node) = self.nodes.remove(current) {
                removed.push(node);
            }
        }
        removed
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// Does **not** include `id` itself; starts with the immediate parent.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node.
    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(id)
    }

    /// The root container, if the tree has been built.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over every live node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MenuNode)> {
        self.nodes.iter()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Post-order depth-first traversal: every node after its descendants.
    pub fn walk_post_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if !self.nodes.contains_key(start) {
            return result;
        }
        let mut stack = vec![(start, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                result.push(current);
                continue;
            }
            stack.push((current, true));
            for &child in self.children(current).iter().rev() {
                stack.push((child, false));
            }
        }
        result
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}
