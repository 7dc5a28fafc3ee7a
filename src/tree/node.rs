//! Node types: NodeId, NodeKind, NodeAttrs, MenuNode.

use slotmap::new_key_type;

use crate::keys::KeyEquivalent;
use crate::toolkit::NativeHandle;

new_key_type! {
    /// Arena key of a live menu node. Stable for the node's whole lifetime.
    pub struct NodeId;
}

/// Whether a node is a leaf item or a (sub)menu container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Item,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Item => "item",
        }
    }
}

/// Transient activation state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemState {
    #[default]
    Idle,
    Activated,
}

/// Scalar attributes of a node. Everything except identity and structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeAttrs {
    /// Component that declared the node.
    pub compo_id: String,
    /// Element (handler context) inside that component.
    pub elem_id: String,
    pub label: String,
    /// Handler name forwarded on activation.
    pub on_click: Option<String>,
    pub separator: bool,
    pub disabled: bool,
    /// Raw shortcut spec, as received.
    pub keys: Option<String>,
}

impl NodeAttrs {
    /// Create empty attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
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

    /// Mark as separator (builder).
    pub fn separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    /// Mark as disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Return the first invariant these attributes break for a node of
    /// `kind`, if any.
    pub fn violation(&self, kind: NodeKind) -> Option<&'static str> {
        if !self.separator {
            return None;
        }
        if kind == NodeKind::Container {
            Some("a container cannot be a separator")
        } else if self.on_click.is_some() {
            Some("a separator cannot have a click handler")
        } else if !self.label.is_empty() {
            Some("a separator cannot have a label")
        } else {
            None
        }
    }
}

/// One live node of a menu tree.
///
/// The node owns its native handle; the handle is released when the node
/// leaves the tree.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub(crate) id: String,
    pub(crate) kind: NodeKind,
    pub(crate) attrs: NodeAttrs,
    pub(crate) shortcut: Option<KeyEquivalent>,
    pub(crate) state: ItemState,
    pub(crate) handle: NativeHandle,
}

impl MenuNode {
    pub(crate) fn new(id: impl Into<String>, kind: NodeKind, attrs: NodeAttrs, handle: NativeHandle) -> Self {
        Self {
            id: id.into(),
            kind,
            attrs,
            shortcut: None,
            state: ItemState::Idle,
            handle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    pub fn attrs(&self) -> &NodeAttrs {
        &self.attrs
    }

    pub fn label(&self) -> &str {
        &self.attrs.label
    }

    pub fn on_click(&self) -> Option<&str> {
        self.attrs.on_click.as_deref()
    }

    pub fn compo_id(&self) -> &str {
        &self.attrs.compo_id
    }

    pub fn elem_id(&self) -> &str {
        &self.attrs.elem_id
    }

    pub fn is_separator(&self) -> bool {
        self.attrs.separator
    }

    pub fn is_disabled(&self) -> bool {
        self.attrs.disabled
    }

    /// The parsed key equivalent. `None` when unset or malformed.
    pub fn shortcut(&self) -> Option<KeyEquivalent> {
        self.shortcut
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    /// The toolkit object backing this node.
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }
}
