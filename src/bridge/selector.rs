//! Request selectors: `path?key=value&key=value` → [`Operation`].

use crate::error::{MenuError, Result};

/// One bridge request, decoded from its selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `/menu/new?id=M`
    NewMenu { menu: String },
    /// `/menu/load?id=M`
    Load { menu: String },
    /// `/menu/render?id=M`
    Render { menu: String },
    /// `/menu/render/attributes?id=M&target=N`
    RenderAttributes { menu: String, target: String },
    /// `/menu/element?id=M&target=N`
    Element { menu: String, target: String },
    /// `/menu/delete?id=M`
    Delete { menu: String },
}

impl Operation {
    /// Parse a selector. Unknown paths and missing query keys are
    /// `BadRequest`.
    pub fn parse(selector: &str) -> Result<Self> {
        let (path, query) = selector.split_once('?').unwrap_or((selector, ""));
        let query = Query::parse(query);

        let op = match path.trim_end_matches('/') {
            "/menu/new" => Operation::NewMenu { menu: query.require("id")? },
            "/menu/load" => Operation::Load { menu: query.require("id")? },
            "/menu/render" => Operation::Render { menu: query.require("id")? },
            "/menu/render/attributes" => Operation::RenderAttributes {
                menu: query.require("id")?,
                target: query.require("target")?,
            },
            "/menu/element" => Operation::Element {
                menu: query.require("id")?,
                target: query.require("target")?,
            },
            "/menu/delete" => Operation::Delete { menu: query.require("id")? },
            other => return Err(MenuError::BadRequest(format!("unknown selector path {other:?}"))),
        };
        Ok(op)
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::NewMenu { .. } => "newMenu",
            Operation::Load { .. } => "load",
            Operation::Render { .. } => "render",
            Operation::RenderAttributes { .. } => "renderAttributes",
            Operation::Element { .. } => "element",
            Operation::Delete { .. } => "delete",
        }
    }
}

/// Decoded query string. Later duplicates override earlier ones.
struct Query<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Query<'a> {
    fn parse(query: &'a str) -> Self {
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect();
        Self { pairs }
    }

    fn require(&self, key: &str) -> Result<String> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| MenuError::BadRequest(format!("missing query key {key:?}")))
    }
}
