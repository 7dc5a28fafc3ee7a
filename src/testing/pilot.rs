//! Pilot: programmatic interaction with a headless engine.
//!
//! The `Pilot` owns an [`Engine`] over a [`HeadlessToolkit`] and the
//! receiving end of its event channel. It offers the bridge operations with
//! typed descriptors, simulated clicks and key presses, and access to the
//! events they produced.

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::config::EngineConfig;
use crate::descriptor::{AttributeSet, MenuDescriptor};
use crate::engine::Engine;
use crate::error::Result;
use crate::event::{Activation, MenuEvent};
use crate::keys::{KeyEquivalent, Modifiers};
use crate::menu::{Menu, RenderScope};
use crate::toolkit::{HeadlessToolkit, ToolkitOp};

use super::snapshot::{menu_to_string, toolkit_to_string};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless engine driver for testing.
///
/// `cmdorctrl` resolves to `cmd` so shortcut tests read the same on every
/// platform.
///
/// # Examples
///
/// ```ignore
/// use gilt_menu::descriptor::MenuDescriptor;
/// use gilt_menu::testing::Pilot;
///
/// let mut pilot = Pilot::new();
/// let desc = MenuDescriptor::container("main")
///     .with_child(MenuDescriptor::item("open").with_on_click("doOpen"));
/// pilot.new_menu("main", &desc).unwrap();
/// pilot.click("main", "open").unwrap();
/// assert_eq!(pilot.events()[0].handler, "doOpen");
/// ```
pub struct Pilot {
    engine: Engine<HeadlessToolkit>,
    events: UnboundedReceiver<MenuEvent>,
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pilot {
    /// Create a pilot with the default config.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default().with_primary_modifier(Modifiers::CMD))
    }

    /// Create a pilot from an explicit [`EngineConfig`].
    pub fn with_config(config: EngineConfig) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            engine: Engine::new(config, HeadlessToolkit::new(), tx),
            events,
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Register a menu built from `desc`.
    pub fn new_menu(&mut self, id: &str, desc: &MenuDescriptor) -> Result<()> {
        self.engine.create(id, desc)
    }

    /// Install a menu.
    pub fn load(&mut self, id: &str) -> Result<()> {
        self.engine.load(id)
    }

    /// Reconcile a menu against `desc`.
    pub fn render(&mut self, id: &str, desc: &MenuDescriptor) -> Result<RenderScope> {
        self.engine.render_tree(id, desc)
    }

    /// Patch one node.
    pub fn render_attributes(&mut self, id: &str, target: &str, set: &AttributeSet) -> Result<bool> {
        self.engine.patch(id, target, set)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a click on `item` of menu `id`.
    pub fn click(&mut self, id: &str, item: &str) -> Result<Activation> {
        self.engine.activate(id, item)
    }

    /// Simulate a key chord given as a shortcut spec, e.g. `"cmd+o"`.
    ///
    /// Returns `None` when the spec does not parse or nothing is bound.
    pub fn press(&mut self, spec: &str) -> Option<Activation> {
        let keys = KeyEquivalent::parse_with(spec, self.engine.config().primary_modifier).ok()?;
        self.engine.key_press(&keys)
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Drain every event emitted so far.
    pub fn events(&mut self) -> Vec<MenuEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Drain the toolkit call log.
    pub fn take_ops(&mut self) -> Vec<ToolkitOp> {
        self.engine.toolkit_mut().take_ops()
    }

    pub fn menu(&self, id: &str) -> Result<&Menu> {
        self.engine.menu(id)
    }

    pub fn engine(&self) -> &Engine<HeadlessToolkit> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<HeadlessToolkit> {
        &mut self.engine
    }

    pub fn toolkit(&self) -> &HeadlessToolkit {
        self.engine.toolkit()
    }

    /// Outline of the engine's tree for menu `id` (empty if unknown).
    pub fn outline(&self, id: &str) -> String {
        self.engine.menu(id).map(menu_to_string).unwrap_or_default()
    }

    /// Outline of the native objects for menu `id` (empty if unknown).
    pub fn native_outline(&self, id: &str) -> String {
        self.engine
            .menu(id)
            .map(|menu| toolkit_to_string(self.engine.toolkit(), menu))
            .unwrap_or_default()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
