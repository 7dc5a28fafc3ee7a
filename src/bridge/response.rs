//! Structured bridge results and the element description payload.

use serde::Serialize;

use crate::error::{ErrorKind, MenuError};
use crate::tree::{MenuNode, MenuTree, NodeId};

/// Error half of a [`BridgeResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Reply to one bridge request: either an optional payload or an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BridgeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BridgeError>,
}

impl BridgeResult {
    /// Success without a body.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Success with a body.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    /// Serialize the whole reply for the transport.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<MenuError> for BridgeResult {
    fn from(err: MenuError) -> Self {
        Self {
            payload: None,
            error: Some(BridgeError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }
}

impl From<Result<Option<String>, MenuError>> for BridgeResult {
    fn from(result: Result<Option<String>, MenuError>) -> Self {
        match result {
            Ok(payload) => Self { payload, error: None },
            Err(err) => err.into(),
        }
    }
}

/// JSON description of a live node, returned by the `element` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementInfo {
    #[serde(rename = "ID")]
    pub id: String,
    pub kind: &'static str,
    #[serde(rename = "compoID", skip_serializing_if = "String::is_empty")]
    pub compo_id: String,
    #[serde(rename = "elemID", skip_serializing_if = "String::is_empty")]
    pub elem_id: String,
    pub label: String,
    #[serde(rename = "onClick", skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
    pub separator: bool,
    pub disabled: bool,
    /// Parsed key equivalent in canonical form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    /// Child IDs in display order. Absent for items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

impl ElementInfo {
    /// Describe `node`, which must live in `tree` under `id`.
    pub fn describe(tree: &MenuTree, id: NodeId, node: &MenuNode) -> Self {
        let children = node.is_container().then(|| {
            tree.children(id)
                .iter()
                .filter_map(|&child| tree.get(child))
                .map(|child| child.id().to_owned())
                .collect()
        });
        Self {
            id: node.id().to_owned(),
            kind: node.kind().as_str(),
            compo_id: node.compo_id().to_owned(),
            elem_id: node.elem_id().to_owned(),
            label: node.label().to_owned(),
            on_click: node.on_click().map(str::to_owned),
            separator: node.is_separator(),
            disabled: node.is_disabled(),
            keys: node.shortcut().map(|k| k.to_string()),
            children,
        }
    }
}
