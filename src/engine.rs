//! Engine: the menu registry, the toolkit and the event router in one place.
//!
//! [`Engine`] is what lives on the UI thread. Every bridge operation is a
//! method here; [`Engine::handle`] dispatches a raw selector and payload to
//! the right one and folds the outcome into a [`BridgeResult`].

use crate::bridge::{BridgeResult, ElementInfo, Operation};
use crate::config::EngineConfig;
use crate::descriptor::{decode_attributes, decode_tree, AttributeSet, MenuDescriptor};
use crate::error::{MenuError, Result};
use crate::event::{Activation, EventRouter, EventSink};
use crate::keys::KeyEquivalent;
use crate::menu::{Menu, RenderScope};
use crate::registry::MenuRegistry;
use crate::toolkit::MenuToolkit;
use crate::tree::MenuNode;

/// The menu engine.
///
/// Owns every live menu, the toolkit their native objects belong to, and the
/// router that forwards activations. Not `Send` unless the toolkit is; the
/// [`UiThread`](crate::ui::UiThread) keeps it on one thread.
pub struct Engine<T: MenuToolkit> {
    registry: MenuRegistry,
    toolkit: T,
    router: EventRouter,
    config: EngineConfig,
}

impl<T: MenuToolkit> Engine<T> {
    /// Create an engine over `toolkit`, forwarding events to `sink`.
    pub fn new(config: EngineConfig, toolkit: T, sink: impl EventSink + 'static) -> Self {
        Self {
            registry: MenuRegistry::new(),
            toolkit,
            router: EventRouter::new(sink),
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Look up a menu.
    pub fn menu(&self, id: &str) -> Result<&Menu> {
        self.registry.get(id)
    }

    // -----------------------------------------------------------------------
    // Menu operations
    // -----------------------------------------------------------------------

    /// `newMenu`: decode `payload` and register a menu built from it.
    pub fn new_menu(&mut self, id: &str, payload: &str) -> Result<()> {
        if self.registry.contains(id) {
            return Err(MenuError::DuplicateId(id.to_owned()));
        }
        let desc = decode_tree(payload)?;
        self.create(id, &desc)
    }

    /// Register a menu built from an already decoded descriptor.
    pub fn create(&mut self, id: &str, desc: &MenuDescriptor) -> Result<()> {
        if self.registry.contains(id) {
            return Err(MenuError::DuplicateId(id.to_owned()));
        }
        let menu = Menu::create(id, desc, &self.config, &mut self.toolkit)?;
        tracing::debug!(menu = id, nodes = menu.len(), "menu created");
        self.registry.insert(menu)
    }

    /// `load`: install the menu as the displayed one.
    pub fn load(&mut self, id: &str) -> Result<()> {
        let root = self.registry.get(id)?.root_handle();
        self.registry.set_active(id)?;
        if let Some(root) = root {
            self.toolkit.install(root);
        }
        tracing::debug!(menu = id, "menu installed");
        Ok(())
    }

    /// `render`: decode `payload` and reconcile the menu against it.
    pub fn render(&mut self, id: &str, payload: &str) -> Result<RenderScope> {
        // Missing menu wins over a bad payload.
        self.registry.get(id)?;
        let desc = decode_tree(payload)?;
        self.render_tree(id, &desc)
    }

    /// Reconcile the menu against an already decoded descriptor.
    pub fn render_tree(&mut self, id: &str, desc: &MenuDescriptor) -> Result<RenderScope> {
        let menu = self.registry.get_mut(id)?;
        let scope = menu.render(desc, &self.config, &mut self.toolkit)?;
        let root = menu.root_handle();
        if scope == RenderScope::Replaced && self.registry.active_id() == Some(id) {
            if let Some(root) = root {
                self.toolkit.install(root);
            }
        }
        Ok(scope)
    }

    /// `renderAttributes`: decode `payload` and patch the node `target`.
    pub fn render_attributes(&mut self, id: &str, target: &str, payload: &str) -> Result<bool> {
        self.registry.get(id)?;
        let set = decode_attributes(payload)?;
        self.patch(id, target, &set)
    }

    /// Patch the node `target` with an already decoded attribute set.
    pub fn patch(&mut self, id: &str, target: &str, set: &AttributeSet) -> Result<bool> {
        let menu = self.registry.get_mut(id)?;
        menu.patch(target, set, &self.config, &mut self.toolkit)
    }

    /// `elementByID`: look up a live node.
    pub fn element_by_id(&self, id: &str, target: &str) -> Result<&MenuNode> {
        self.registry.get(id)?.element_by_id(target)
    }

    /// Describe a live node for the bridge.
    pub fn element_info(&self, id: &str, target: &str) -> Result<ElementInfo> {
        let menu = self.registry.get(id)?;
        let node = menu.element_by_id(target)?;
        let node_id = menu.node_id(target).ok_or_else(|| MenuError::ElementNotFound {
            menu: id.to_owned(),
            id: target.to_owned(),
        })?;
        Ok(ElementInfo::describe(menu.tree(), node_id, node))
    }

    /// Unregister a menu and release its native objects.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let menu = self.registry.remove(id)?;
        menu.teardown(&mut self.toolkit);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    /// The host reports a click on item `item` of menu `id`.
    pub fn activate(&mut self, id: &str, item: &str) -> Result<Activation> {
        let menu = self.registry.get_mut(id)?;
        menu.activate(item, &mut self.router)
    }

    /// Match `keys` against the installed menu's shortcuts.
    pub fn key_press(&mut self, keys: &KeyEquivalent) -> Option<Activation> {
        let menu = self.registry.active_mut()?;
        menu.key_press(keys, &mut self.router)
    }

    /// Convert a crossterm key event and dispatch it as a shortcut.
    pub fn handle_key_event(&mut self, event: crossterm::event::KeyEvent) -> Option<Activation> {
        if event.kind == crossterm::event::KeyEventKind::Release {
            return None;
        }
        let keys = KeyEquivalent::from_crossterm(event)?;
        self.key_press(&keys)
    }

    pub fn will_open(&mut self, id: &str) -> Result<()> {
        self.registry.get_mut(id)?.will_open();
        Ok(())
    }

    pub fn did_close(&mut self, id: &str) -> Result<()> {
        self.registry.get_mut(id)?.did_close();
        Ok(())
    }

    pub fn will_highlight(&mut self, id: &str, item: Option<&str>) -> Result<()> {
        self.registry.get_mut(id)?.will_highlight(item)
    }

    // -----------------------------------------------------------------------
    // Bridge
    // -----------------------------------------------------------------------

    /// Run one bridge request.
    ///
    /// Never panics on bad input; every failure becomes a structured error.
    pub fn handle(&mut self, selector: &str, payload: &str) -> BridgeResult {
        let result = Operation::parse(selector).and_then(|op| {
            let name = op.name();
            let outcome = self.dispatch(op, payload);
            if let Err(err) = &outcome {
                tracing::debug!(op = name, selector, %err, "request failed");
            }
            outcome
        });
        result.into()
    }

    fn dispatch(&mut self, op: Operation, payload: &str) -> Result<Option<String>> {
        match op {
            Operation::NewMenu { menu } => self.new_menu(&menu, payload).map(|_| None),
            Operation::Load { menu } => self.load(&menu).map(|_| None),
            Operation::Render { menu } => self.render(&menu, payload).map(|_| None),
            Operation::RenderAttributes { menu, target } => {
                self.render_attributes(&menu, &target, payload).map(|_| None)
            }
            Operation::Element { menu, target } => {
                let info = self.element_info(&menu, &target)?;
                Ok(Some(serde_json::to_string(&info)?))
            }
            Operation::Delete { menu } => self.delete(&menu).map(|_| None),
        }
    }
}

impl<T: MenuToolkit> Drop for Engine<T> {
    fn drop(&mut self) {
        let menus: Vec<Menu> = self.registry.drain().collect();
        for menu in menus {
            menu.teardown(&mut self.toolkit);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
