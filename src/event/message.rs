//! Outbound event sent to the application when an item is activated.

use serde::{Deserialize, Serialize};

/// One-way notification: "run handler `handler` of element `elem_id` in
/// component `compo_id`". The engine never resolves the handler itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuEvent {
    #[serde(rename = "menuID")]
    pub menu_id: String,
    #[serde(rename = "compoID")]
    pub compo_id: String,
    #[serde(rename = "elemID")]
    pub elem_id: String,
    #[serde(rename = "onClick")]
    pub handler: String,
}

impl MenuEvent {
    /// Create a new event.
    pub fn new(
        menu_id: impl Into<String>,
        compo_id: impl Into<String>,
        elem_id: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            menu_id: menu_id.into(),
            compo_id: compo_id.into(),
            elem_id: elem_id.into(),
            handler: handler.into(),
        }
    }
}
