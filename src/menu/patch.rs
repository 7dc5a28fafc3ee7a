//! Attribute Patcher: scalar-only updates of a single node.
//!
//! A patch never touches structure or identity. It is checked in full before
//! anything is applied, so a rejected patch leaves the node as it was.

use super::builder::{parse_keys, Editor};
use crate::descriptor::AttributeSet;
use crate::error::{MenuError, Result};
use crate::toolkit::MenuToolkit;
use crate::tree::{NodeAttrs, NodeId, NodeKind};

/// Check `set` against the node it targets and compute the merged
/// attributes.
fn merged_attrs(target: &str, kind: NodeKind, current: &NodeAttrs, set: &AttributeSet) -> Result<NodeAttrs> {
    if let Some(id) = &set.id {
        if id != target {
            return Err(MenuError::schema(target, format!("patch carries ID {id:?}")));
        }
    }
    if kind == NodeKind::Item && set.children.is_some() {
        return Err(MenuError::schema(target, "an item cannot become a container"));
    }
    let merged = set.merge(current);
    if let Some(reason) = merged.violation(kind) {
        return Err(MenuError::schema(target, reason));
    }
    Ok(merged)
}

impl<T: MenuToolkit + ?Sized> Editor<'_, T> {
    /// Apply `set` to the node `id`. Returns whether anything changed.
    pub(crate) fn patch(&mut self, id: NodeId, set: &AttributeSet) -> Result<bool> {
        let primary = self.primary;
        let Some(node) = self.tree.get_mut(id) else {
            return Ok(false);
        };
        let merged = merged_attrs(&node.id, node.kind, &node.attrs, set)?;
        if merged == node.attrs {
            tracing::trace!(id = node.id.as_str(), "patch changes nothing");
            return Ok(false);
        }

        let keys_changed = merged.keys != node.attrs.keys;
        node.attrs = merged;
        self.toolkit.update(node.handle, &node.attrs);
        if keys_changed {
            node.shortcut = parse_keys(&node.id, node.attrs.keys.as_deref(), primary);
            self.toolkit.set_key_equivalent(node.handle, node.shortcut);
        }
        tracing::debug!(id = node.id.as_str(), "attributes patched");
        Ok(true)
    }
}
