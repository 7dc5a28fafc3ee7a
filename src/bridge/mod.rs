//! Bridge surface: selectors in, structured results out.
//!
//! The transport itself lives outside this crate. A host hands each request
//! to [`Engine::handle`](crate::engine::Engine::handle) (on the UI thread) or
//! [`UiHandle::call`](crate::ui::UiHandle::call) (from anywhere) and ships the
//! returned [`BridgeResult`] back.

pub mod response;
pub mod selector;

pub use response::{BridgeError, BridgeResult, ElementInfo};
pub use selector::Operation;
