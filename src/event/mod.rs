//! Event system: outbound menu events, routing, shortcut dispatch.

pub mod binding;
pub mod message;
pub mod router;

pub use binding::ShortcutTable;
pub use message::MenuEvent;
pub use router::{Activation, DeliveryError, EventRouter, EventSink, IgnoreReason};
