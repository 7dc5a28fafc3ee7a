//! Engine error type and the bridge-facing error taxonomy.

use serde::Serialize;

/// Errors returned by every engine operation.
///
/// None of these abort the process; they travel back across the bridge as a
/// structured [`BridgeResult`](crate::bridge::BridgeResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("menu {0:?} not found")]
    MenuNotFound(String),

    #[error("element {id:?} not found in menu {menu:?}")]
    ElementNotFound { menu: String, id: String },

    #[error("menu {0:?} already exists")]
    DuplicateId(String),

    #[error("payload decode error: {0}")]
    Decode(String),

    #[error("schema error at {id:?}: {reason}")]
    Schema { id: String, reason: String },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("UI thread is not running")]
    Unavailable,

    #[error("blocking UI call issued from the UI thread")]
    Reentrant,
}

impl MenuError {
    pub(crate) fn schema(id: impl Into<String>, reason: impl Into<String>) -> Self {
        MenuError::Schema {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Bridge taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MenuError::MenuNotFound(_) | MenuError::ElementNotFound { .. } => ErrorKind::NotFound,
            MenuError::DuplicateId(_) => ErrorKind::DuplicateId,
            MenuError::Decode(_) => ErrorKind::DecodeError,
            MenuError::Schema { .. } => ErrorKind::SchemaError,
            MenuError::BadRequest(_) => ErrorKind::BadRequest,
            MenuError::Unavailable | MenuError::Reentrant => ErrorKind::Unavailable,
        }
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        MenuError::Decode(err.to_string())
    }
}

/// Error categories reported across the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NotFound,
    #[serde(rename = "DuplicateID")]
    DuplicateId,
    DecodeError,
    SchemaError,
    BadRequest,
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::DuplicateId => "DuplicateID",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::SchemaError => "SchemaError",
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::Unavailable => "Unavailable",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = MenuError> = std::result::Result<T, E>;
