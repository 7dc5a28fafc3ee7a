//! Event routing: turn an item activation into an outbound [`MenuEvent`].
//!
//! [`EventRouter`] decides whether an activated node produces an event and
//! hands it to an [`EventSink`] without waiting for the other side. A sink
//! failure is logged and counted; it never touches menu state.

use std::fmt;

use tokio::sync::mpsc::UnboundedSender;

use super::message::MenuEvent;
use crate::tree::node::MenuNode;

// ---------------------------------------------------------------------------
// EventSink
// ---------------------------------------------------------------------------

/// Why an event could not be handed over.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("event sink is closed")]
    Closed,
}

/// Fire-and-forget destination of menu events (the bridge's outbound side).
///
/// `deliver` must not block.
pub trait EventSink: Send {
    fn deliver(&self, event: MenuEvent) -> Result<(), DeliveryError>;
}

impl EventSink for UnboundedSender<MenuEvent> {
    fn deliver(&self, event: MenuEvent) -> Result<(), DeliveryError> {
        self.send(event).map_err(|_| DeliveryError::Closed)
    }
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// Why an activation produced no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Separator,
    Disabled,
    Container,
    NoHandler,
}

/// Outcome of activating a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The event was handed to the sink.
    Forwarded(MenuEvent),
    /// The sink refused the event. The menu is unaffected.
    Undelivered(MenuEvent),
    /// Nothing to forward.
    Ignored(IgnoreReason),
}

impl Activation {
    /// The event built for this activation, delivered or not.
    pub fn event(&self) -> Option<&MenuEvent> {
        match self {
            Activation::Forwarded(event) | Activation::Undelivered(event) => Some(event),
            Activation::Ignored(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EventRouter
// ---------------------------------------------------------------------------

/// Builds events from activated nodes and forwards them to the sink.
pub struct EventRouter {
    sink: Box<dyn EventSink>,
    delivered: u64,
    failed: u64,
}

impl EventRouter {
    /// Create a router forwarding to `sink`.
    pub fn new(sink: impl EventSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            delivered: 0,
            failed: 0,
        }
    }

    /// Route an activation of `node` in menu `menu_id`.
    pub fn route(&mut self, menu_id: &str, node: &MenuNode) -> Activation {
        let reason = if node.is_container() {
            Some(IgnoreReason::Container)
        } else if node.is_separator() {
            Some(IgnoreReason::Separator)
        } else if node.is_disabled() {
            Some(IgnoreReason::Disabled)
        } else {
            None
        };
        if let Some(reason) = reason {
            tracing::trace!(menu = menu_id, id = node.id(), ?reason, "activation ignored");
            return Activation::Ignored(reason);
        }
        let Some(handler) = node.on_click() else {
            tracing::trace!(menu = menu_id, id = node.id(), "activation without handler");
            return Activation::Ignored(IgnoreReason::NoHandler);
        };

        let event = MenuEvent::new(menu_id, node.compo_id(), node.elem_id(), handler);
        match self.sink.deliver(event.clone()) {
            Ok(()) => {
                self.delivered += 1;
                tracing::debug!(menu = menu_id, id = node.id(), handler, "event forwarded");
                Activation::Forwarded(event)
            }
            Err(err) => {
                self.failed += 1;
                tracing::warn!(menu = menu_id, id = node.id(), handler, %err, "event not delivered");
                Activation::Undelivered(event)
            }
        }
    }

    /// Number of events handed to the sink.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Number of events the sink refused.
    pub fn failed(&self) -> u64 {
        self.failed
    }
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("delivered", &self.delivered)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::NativeHandle;
    use crate::tree::node::{NodeAttrs, NodeKind};
    use tokio::sync::mpsc;

    fn item(attrs: NodeAttrs) -> MenuNode {
        let attrs = NodeAttrs {
            compo_id: "compo".into(),
            elem_id: "elem".into(),
            ..attrs
        };
        MenuNode::new("open", NodeKind::Item, attrs, NativeHandle::from_raw(1))
    }

    #[test]
    fn forwards_click() {
        let (tx, mut rx) = mpsc::unbounded_channel::<MenuEvent>();
        let mut router = EventRouter::new(tx);
        let node = item(NodeAttrs::new().with_label("Open").with_on_click("doOpen"));

        let outcome = router.route("main", &node);
        let expected = MenuEvent::new("main", "compo", "elem", "doOpen");
        assert_eq!(outcome, Activation::Forwarded(expected.clone()));
        assert_eq!(rx.try_recv().unwrap(), expected);
        assert_eq!(router.delivered(), 1);
    }

    #[test]
    fn separator_produces_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel::<MenuEvent>();
        let mut router = EventRouter::new(tx);
        let node = item(NodeAttrs::new().separator(true));
        assert_eq!(router.route("main", &node), Activation::Ignored(IgnoreReason::Separator));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn disabled_produces_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel::<MenuEvent>();
        let mut router = EventRouter::new(tx);
        let node = item(NodeAttrs::new().with_on_click("doOpen").disabled(true));
        assert_eq!(router.route("main", &node), Activation::Ignored(IgnoreReason::Disabled));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn no_handler_produces_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel::<MenuEvent>();
        let mut router = EventRouter::new(tx);
        let node = item(NodeAttrs::new().with_label("Inert"));
        assert_eq!(router.route("main", &node), Activation::Ignored(IgnoreReason::NoHandler));
        assert_eq!(router.delivered(), 0);
    }

    #[test]
    fn container_produces_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel::<MenuEvent>();
        let mut router = EventRouter::new(tx);
        let node = MenuNode::new("file", NodeKind::Container, NodeAttrs::new(), NativeHandle::from_raw(1));
        assert_eq!(router.route("main", &node), Activation::Ignored(IgnoreReason::Container));
    }

    #[test]
    fn closed_sink_is_counted_not_fatal() {
        let (tx, rx) = mpsc::unbounded_channel::<MenuEvent>();
        drop(rx);
        let mut router = EventRouter::new(tx);
        let node = item(NodeAttrs::new().with_on_click("doOpen"));

        let outcome = router.route("main", &node);
        assert!(matches!(outcome, Activation::Undelivered(_)));
        assert_eq!(outcome.event().unwrap().handler, "doOpen");
        assert_eq!(router.failed(), 1);

        // The router keeps working.
        assert!(matches!(router.route("main", &node), Activation::Undelivered(_)));
        assert_eq!(router.failed(), 2);
    }
}
