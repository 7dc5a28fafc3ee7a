//! In-memory toolkit that mirrors native state and records every call.

use std::collections::HashMap;
use std::fmt::Write;

use super::{MenuToolkit, NativeHandle};
use crate::keys::KeyEquivalent;
use crate::tree::node::{NodeAttrs, NodeKind};

// ---------------------------------------------------------------------------
// ToolkitOp
// ---------------------------------------------------------------------------

/// One recorded toolkit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitOp {
    Create { handle: NativeHandle, kind: NodeKind },
    Update { handle: NativeHandle },
    SetKeys { handle: NativeHandle, keys: Option<KeyEquivalent> },
    Insert { parent: NativeHandle, child: NativeHandle, index: usize },
    Remove { parent: NativeHandle, child: NativeHandle },
    Move { parent: NativeHandle, child: NativeHandle, index: usize },
    Install { root: NativeHandle },
    Release { handle: NativeHandle },
}

impl ToolkitOp {
    /// Whether the call changes structure or creates/destroys objects.
    pub fn is_structural(&self) -> bool {
        !matches!(self, ToolkitOp::Update { .. } | ToolkitOp::SetKeys { .. })
    }
}

// ---------------------------------------------------------------------------
// HeadlessToolkit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct HeadlessObject {
    kind: NodeKind,
    attrs: NodeAttrs,
    keys: Option<KeyEquivalent>,
    children: Vec<NativeHandle>,
}

/// A toolkit without a display.
///
/// Keeps its own object graph so tests can compare native state against the
/// engine's tree, and an operation log to assert which calls a render made.
#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    next: u64,
    objects: HashMap<NativeHandle, HeadlessObject>,
    installed: Option<NativeHandle>,
    ops: Vec<ToolkitOp>,
}

impl HeadlessToolkit {
    /// Create an empty toolkit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far.
    pub fn ops(&self) -> &[ToolkitOp] {
        &self.ops
    }

    /// Drain the operation log.
    pub fn take_ops(&mut self) -> Vec<ToolkitOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of live (unreleased) objects.
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn is_live(&self, handle: NativeHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    /// Native children of `handle`, in display order.
    pub fn children(&self, handle: NativeHandle) -> &[NativeHandle] {
        self.objects
            .get(&handle)
            .map(|o| o.children.as_slice())
            .unwrap_or(&[])
    }

    /// Last attributes pushed to `handle`.
    pub fn attrs(&self, handle: NativeHandle) -> Option<&NodeAttrs> {
        self.objects.get(&handle).map(|o| &o.attrs)
    }

    /// Key equivalent currently assigned to `handle`.
    pub fn key_equivalent(&self, handle: NativeHandle) -> Option<KeyEquivalent> {
        self.objects.get(&handle).and_then(|o| o.keys)
    }

    /// The installed (displayed) root, if any.
    pub fn installed(&self) -> Option<NativeHandle> {
        self.installed
    }

    /// Indented outline of the native object graph under `root`.
    ///
    /// Containers print as `[label]`, separators as `---`, items as their
    /// label followed by the key equivalent when one is set.
    pub fn outline(&self, root: NativeHandle) -> String {
        let mut out = String::new();
        self.write_outline(root, 0, &mut out);
        out.trim_end().to_owned()
    }

    fn write_outline(&self, handle: NativeHandle, depth: usize, out: &mut String) {
        let Some(object) = self.objects.get(&handle) else {
            return;
        };
        let indent = "  ".repeat(depth);
        match object.kind {
            NodeKind::Container => {
                let _ = writeln!(out, "{indent}[{}]", object.attrs.label);
            }
            NodeKind::Item if object.attrs.separator => {
                let _ = writeln!(out, "{indent}---");
            }
            NodeKind::Item => match object.keys {
                Some(keys) => {
                    let _ = writeln!(out, "{indent}{} ({keys})", object.attrs.label);
                }
                None => {
                    let _ = writeln!(out, "{indent}{}", object.attrs.label);
                }
            },
        }
        for &child in &object.children {
            self.write_outline(child, depth + 1, out);
        }
    }
}

impl MenuToolkit for HeadlessToolkit {
    fn create(&mut self, kind: NodeKind, attrs: &NodeAttrs) -> NativeHandle {
        self.next += 1;
        let handle = NativeHandle::from_raw(self.next);
        self.objects.insert(
            handle,
            HeadlessObject {
                kind,
                attrs: attrs.clone(),
                keys: None,
                children: Vec::new(),
            },
        );
        self.ops.push(ToolkitOp::Create { handle, kind });
        handle
    }

    fn update(&mut self, handle: NativeHandle, attrs: &NodeAttrs) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.attrs = attrs.clone();
        }
        self.ops.push(ToolkitOp::Update { handle });
    }

    fn set_key_equivalent(&mut self, handle: NativeHandle, keys: Option<KeyEquivalent>) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.keys = keys;
        }
        self.ops.push(ToolkitOp::SetKeys { handle, keys });
    }

    fn insert(&mut self, parent: NativeHandle, child: NativeHandle, index: usize) {
        if let Some(object) = self.objects.get_mut(&parent) {
            let index = index.min(object.children.len());
            object.children.insert(index, child);
        }
        self.ops.push(ToolkitOp::Insert { parent, child, index });
    }

    fn remove(&mut self, parent: NativeHandle, child: NativeHandle) {
        if let Some(object) = self.objects.get_mut(&parent) {
            object.children.retain(|&c| c != child);
        }
        self.ops.push(ToolkitOp::Remove { parent, child });
    }

    fn move_to(&mut self, parent: NativeHandle, child: NativeHandle, index: usize) {
        if let Some(object) = self.objects.get_mut(&parent) {
            object.children.retain(|&c| c != child);
            let index = index.min(object.children.len());
            object.children.insert(index, child);
        }
        self.ops.push(ToolkitOp::Move { parent, child, index });
    }

    fn install(&mut self, root: NativeHandle) {
        self.installed = Some(root);
        self.ops.push(ToolkitOp::Install { root });
    }

    fn release(&mut self, handle: NativeHandle) {
        self.objects.remove(&handle);
        if self.installed == Some(handle) {
            self.installed = None;
        }
        self.ops.push(ToolkitOp::Release { handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_hands_out_distinct_handles() {
        let mut tk = HeadlessToolkit::new();
        let a = tk.create(NodeKind::Container, &NodeAttrs::new());
        let b = tk.create(NodeKind::Item, &NodeAttrs::new());
        assert_ne!(a, b);
        assert_eq!(tk.live_objects(), 2);
    }

    #[test]
    fn insert_remove_move() {
        let mut tk = HeadlessToolkit::new();
        let menu = tk.create(NodeKind::Container, &NodeAttrs::new());
        let a = tk.create(NodeKind::Item, &NodeAttrs::new().with_label("A"));
        let b = tk.create(NodeKind::Item, &NodeAttrs::new().with_label("B"));
        tk.insert(menu, a, 0);
        tk.insert(menu, b, 1);
        assert_eq!(tk.children(menu), &[a, b]);

        tk.move_to(menu, b, 0);
        assert_eq!(tk.children(menu), &[b, a]);

        tk.remove(menu, b);
        assert_eq!(tk.children(menu), &[a]);
        assert!(tk.is_live(b));
    }

    #[test]
    fn release_kills_handle_and_uninstalls() {
        let mut tk = HeadlessToolkit::new();
        let menu = tk.create(NodeKind::Container, &NodeAttrs::new());
        tk.install(menu);
        assert_eq!(tk.installed(), Some(menu));
        tk.release(menu);
        assert!(!tk.is_live(menu));
        assert_eq!(tk.installed(), None);
    }

    #[test]
    fn ops_are_recorded_and_drained() {
        let mut tk = HeadlessToolkit::new();
        let menu = tk.create(NodeKind::Container, &NodeAttrs::new());
        tk.update(menu, &NodeAttrs::new().with_label("File"));
        let ops = tk.take_ops();
        assert_eq!(ops.len(), 2);
        assert!(ops[0].is_structural());
        assert!(!ops[1].is_structural());
        assert!(tk.ops().is_empty());
    }

    #[test]
    fn outline_shows_labels_separators_and_keys() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.create(NodeKind::Container, &NodeAttrs::new());
        let file = tk.create(NodeKind::Container, &NodeAttrs::new().with_label("File"));
        let open = tk.create(NodeKind::Item, &NodeAttrs::new().with_label("Open"));
        let sep = tk.create(NodeKind::Item, &NodeAttrs::new().separator(true));
        tk.set_key_equivalent(open, KeyEquivalent::parse_with("cmd+o", crate::keys::Modifiers::CMD).ok());
        tk.insert(root, file, 0);
        tk.insert(file, open, 0);
        tk.insert(file, sep, 1);
        assert_eq!(tk.outline(root), "[]\n  [File]\n    Open (cmd+o)\n    ---");
    }
}
