//! Engine configuration.

use crate::keys::Modifiers;

/// Default maximum nesting of a descriptor tree below its root.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Configuration for the menu engine and its UI thread.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Name given to the UI-affinity thread.
    pub thread_name: String,
    /// Deepest nesting accepted in a descriptor tree.
    pub max_depth: usize,
    /// Whether a render whose root ID matches nothing replaces the whole
    /// tree. When `false` such a render fails with `NotFound`.
    pub replace_unmatched_root: bool,
    /// What `cmdorctrl` means in shortcut specs.
    pub primary_modifier: Modifiers,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_name: "menu-ui".to_owned(),
            max_depth: DEFAULT_MAX_DEPTH,
            replace_unmatched_root: true,
            primary_modifier: Modifiers::platform_primary(),
        }
    }
}

impl EngineConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the UI thread name (builder).
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Set the maximum descriptor depth (builder).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Choose how an unmatched render root is handled (builder).
    pub fn with_replace_unmatched_root(mut self, replace: bool) -> Self {
        self.replace_unmatched_root = replace;
        self
    }

    /// Set the modifier `cmdorctrl` resolves to (builder).
    pub fn with_primary_modifier(mut self, modifier: Modifiers) -> Self {
        self.primary_modifier = modifier;
        self
    }
}
