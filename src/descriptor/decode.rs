//! Payload decoding and schema validation.

use std::collections::HashSet;

use super::record::{AttributeSet, MenuDescriptor};
use crate::error::{MenuError, Result};

/// Decode a JSON payload into a descriptor tree. Does not validate.
pub fn decode_tree(payload: &str) -> Result<MenuDescriptor> {
    Ok(serde_json::from_str(payload)?)
}

/// Decode a JSON payload into an attribute patch.
pub fn decode_attributes(payload: &str) -> Result<AttributeSet> {
    Ok(serde_json::from_str(payload)?)
}

/// Check a descriptor tree against the node invariants.
///
/// Walks pre-order and reports the first offending record:
/// - every record has a non-empty `ID`, unique within the tree;
/// - nesting is at most `max_depth` levels below the root;
/// - a separator has no children, no click handler and no label.
pub fn validate(root: &MenuDescriptor, max_depth: usize) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((desc, depth)) = stack.pop() {
        if desc.id.is_empty() {
            return Err(MenuError::schema("", "record without an ID"));
        }
        if !seen.insert(desc.id.as_str()) {
            return Err(MenuError::schema(&desc.id, "duplicate ID in descriptor tree"));
        }
        if depth > max_depth {
            return Err(MenuError::schema(
                &desc.id,
                format!("nesting deeper than {max_depth} levels"),
            ));
        }
        if desc.separator && desc.children.is_some() {
            return Err(MenuError::schema(&desc.id, "a separator cannot have children"));
        }
        if let Some(reason) = desc.attrs().violation(desc.kind()) {
            return Err(MenuError::schema(&desc.id, reason));
        }
        for child in desc.children().iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}
