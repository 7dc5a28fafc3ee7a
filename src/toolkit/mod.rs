//! Host toolkit capability: native menu primitives behind a trait.
//!
//! The engine never talks to a platform menu API directly. Every structural
//! or attribute change on a [`MenuTree`](crate::tree::MenuTree) is mirrored
//! through a [`MenuToolkit`], which hands out opaque [`NativeHandle`]s.
//! [`HeadlessToolkit`] is an in-memory implementation that records every call.

pub mod headless;

pub use headless::{HeadlessToolkit, ToolkitOp};

use crate::keys::KeyEquivalent;
use crate::tree::node::{NodeAttrs, NodeKind};

/// Opaque reference to a toolkit-owned menu object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(u64);

impl NativeHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Native menu primitives consumed by the engine.
///
/// All calls happen on the UI thread. Implementations are not required to
/// be `Send`.
pub trait MenuToolkit {
    /// Create a native menu (for containers) or menu item (for items).
    fn create(&mut self, kind: NodeKind, attrs: &NodeAttrs) -> NativeHandle;

    /// Push new scalar attributes onto an existing object.
    fn update(&mut self, handle: NativeHandle, attrs: &NodeAttrs);

    /// Assign or clear the key equivalent of an item.
    fn set_key_equivalent(&mut self, handle: NativeHandle, keys: Option<KeyEquivalent>);

    /// Insert `child` into `parent` at `index`.
    fn insert(&mut self, parent: NativeHandle, child: NativeHandle, index: usize);

    /// Detach `child` from `parent`. The child object stays alive.
    fn remove(&mut self, parent: NativeHandle, child: NativeHandle);

    /// Move `child` to `index` within `parent`, keeping the same object.
    fn move_to(&mut self, parent: NativeHandle, child: NativeHandle, index: usize) {
        self.remove(parent, child);
        self.insert(parent, child, index);
    }

    /// Display `root` as the active menu (application menu bar).
    fn install(&mut self, root: NativeHandle);

    /// Release an object. The handle is dead afterwards.
    fn release(&mut self, handle: NativeHandle);
}
