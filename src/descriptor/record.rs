//! Descriptor records: desired-state menu trees and attribute patches.

use serde::{Deserialize, Serialize};

use crate::tree::node::{NodeAttrs, NodeKind};

fn is_false(value: &bool) -> bool {
    !*value
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

// ---------------------------------------------------------------------------
// MenuDescriptor
// ---------------------------------------------------------------------------

/// One record of a descriptor tree.
///
/// A record with a `children` array (possibly empty) describes a container;
/// a record without one describes an item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuDescriptor {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "compoID", default, skip_serializing_if = "String::is_empty")]
    pub compo_id: String,
    #[serde(rename = "elemID", default, skip_serializing_if = "String::is_empty")]
    pub elem_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(rename = "onClick", default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub separator: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuDescriptor>>,
}

impl MenuDescriptor {
    /// A container record with no children yet.
    pub fn container(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// An item record.
    pub fn item(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A separator item record.
    pub fn separator(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            separator: true,
            ..Self::default()
        }
    }

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the click handler name (builder).
    pub fn with_on_click(mut self, handler: impl Into<String>) -> Self {
        self.on_click = Some(handler.into());
        self
    }

    /// Set the shortcut spec (builder).
    pub fn with_keys(mut self, keys: impl Into<String>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    /// Set the owning component (builder).
    pub fn with_compo_id(mut self, compo_id: impl Into<String>) -> Self {
        self.compo_id = compo_id.into();
        self
    }

    /// Set the element (handler context) inside the component (builder).
    pub fn with_elem_id(mut self, elem_id: impl Into<String>) -> Self {
        self.elem_id = elem_id.into();
        self
    }

    /// Mark as separator (builder).
    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    /// Mark as disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Append a child (builder). Turns an item record into a container.
    pub fn with_child(mut self, child: MenuDescriptor) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Append several children (builder).
    pub fn with_children(mut self, children: impl IntoIterator<Item = MenuDescriptor>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }

    pub fn kind(&self) -> NodeKind {
        if self.children.is_some() {
            NodeKind::Container
        } else {
            NodeKind::Item
        }
    }

    /// Child records. Empty for items.
    pub fn children(&self) -> &[MenuDescriptor] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Scalar attributes, with empty `onClick`/`keys` normalized to unset.
    pub fn attrs(&self) -> NodeAttrs {
        NodeAttrs {
            compo_id: self.compo_id.clone(),
            elem_id: self.elem_id.clone(),
            label: self.label.clone(),
            on_click: non_empty(self.on_click.as_ref()),
            separator: self.separator,
            disabled: self.disabled,
            keys: non_empty(self.keys.as_ref()),
        }
    }

    /// Every record in the tree, pre-order.
    pub fn walk(&self) -> Vec<&MenuDescriptor> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            result.push(current);
            for child in current.children().iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Number of records in the tree.
    pub fn node_count(&self) -> usize {
        self.walk().len()
    }

    /// Serialize to the JSON payload format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// AttributeSet
// ---------------------------------------------------------------------------

/// Attribute-only patch for a single node.
///
/// Absent fields leave the node unchanged. An empty `onClick` or `keys`
/// clears the attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeSet {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "compoID", default, skip_serializing_if = "Option::is_none")]
    pub compo_id: Option<String>,
    #[serde(rename = "elemID", default, skip_serializing_if = "Option::is_none")]
    pub elem_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "onClick", default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    /// Present only to detect container-shaped patches; never applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<serde_json::Value>,
}

impl AttributeSet {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the click handler (builder).
    pub fn with_on_click(mut self, handler: impl Into<String>) -> Self {
        self.on_click = Some(handler.into());
        self
    }

    /// Set the shortcut spec (builder).
    pub fn with_keys(mut self, keys: impl Into<String>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    /// Set the separator flag (builder).
    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Set the disabled flag (builder).
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// The attributes `base` would have after applying this patch.
    pub fn merge(&self, base: &NodeAttrs) -> NodeAttrs {
        let mut merged = base.clone();
        if let Some(compo_id) = &self.compo_id {
            merged.compo_id = compo_id.clone();
        }
        if let Some(elem_id) = &self.elem_id {
            merged.elem_id = elem_id.clone();
        }
        if let Some(label) = &self.label {
            merged.label = label.clone();
        }
        if let Some(on_click) = &self.on_click {
            merged.on_click = non_empty(Some(on_click));
        }
        if let Some(separator) = self.separator {
            merged.separator = separator;
        }
        if let Some(disabled) = self.disabled {
            merged.disabled = disabled;
        }
        if let Some(keys) = &self.keys {
            merged.keys = non_empty(Some(keys));
        }
        merged
    }

    /// Serialize to the JSON payload format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_follows_children_field() {
        assert_eq!(MenuDescriptor::container("m").kind(), NodeKind::Container);
        assert_eq!(MenuDescriptor::item("i").kind(), NodeKind::Item);
        assert_eq!(MenuDescriptor::item("i").with_child(MenuDescriptor::item("c")).kind(), NodeKind::Container);
    }

    #[test]
    fn deserializes_wire_names() {
        let json = r#"{
            "ID": "open",
            "compoID": "c1",
            "elemID": "e1",
            "label": "Open",
            "onClick": "doOpen",
            "keys": "cmd+o"
        }"#;
        let desc: MenuDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.id, "open");
        assert_eq!(desc.compo_id, "c1");
        assert_eq!(desc.elem_id, "e1");
        assert_eq!(desc.on_click.as_deref(), Some("doOpen"));
        assert_eq!(desc.keys.as_deref(), Some("cmd+o"));
        assert_eq!(desc.kind(), NodeKind::Item);
    }

    #[test]
    fn empty_children_array_is_a_container() {
        let desc: MenuDescriptor = serde_json::from_str(r#"{"ID": "sub", "children": []}"#).unwrap();
        assert_eq!(desc.kind(), NodeKind::Container);
        assert!(desc.children().is_empty());
    }

    #[test]
    fn serializes_without_defaults() {
        let desc = MenuDescriptor::container("root").with_child(MenuDescriptor::separator("s"));
        assert_eq!(
            desc.to_json().unwrap(),
            r#"{"ID":"root","children":[{"ID":"s","separator":true}]}"#
        );
    }

    #[test]
    fn attrs_normalize_empty_strings() {
        let desc = MenuDescriptor::item("i").with_on_click("").with_keys("");
        let attrs = desc.attrs();
        assert_eq!(attrs.on_click, None);
        assert_eq!(attrs.keys, None);
    }

    #[test]
    fn walk_is_pre_order() {
        let desc = MenuDescriptor::container("root")
            .with_child(MenuDescriptor::container("file").with_child(MenuDescriptor::item("open")))
            .with_child(MenuDescriptor::item("quit"));
        let ids: Vec<&str> = desc.walk().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "file", "open", "quit"]);
        assert_eq!(desc.node_count(), 4);
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let base = NodeAttrs::new().with_label("Open").with_on_click("doOpen");
        let merged = AttributeSet::new().with_label("Open…").merge(&base);
        assert_eq!(merged.label, "Open…");
        assert_eq!(merged.on_click.as_deref(), Some("doOpen"));
    }

    #[test]
    fn merge_empty_clears() {
        let base = NodeAttrs::new().with_on_click("doOpen").with_keys("cmd+o");
        let merged = AttributeSet::new().with_on_click("").with_keys("").merge(&base);
        assert_eq!(merged.on_click, None);
        assert_eq!(merged.keys, None);
    }

    #[test]
    fn attribute_set_detects_children_field() {
        let set: AttributeSet = serde_json::from_str(r#"{"label": "x", "children": []}"#).unwrap();
        assert!(set.children.is_some());
        assert_eq!(set.label.as_deref(), Some("x"));
    }
}
