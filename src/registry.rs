//! Menu registry: menu ID → live [`Menu`], plus the installed menu.

use std::collections::HashMap;

use crate::error::{MenuError, Result};
use crate::menu::Menu;

/// Every live menu of the process, keyed by menu ID.
///
/// Only reachable from the UI thread, so it carries no locking.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: HashMap<String, Menu>,
    active: Option<String>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a menu under its own ID.
    pub fn insert(&mut self, menu: Menu) -> Result<()> {
        if self.menus.contains_key(menu.id()) {
            return Err(MenuError::DuplicateId(menu.id().to_owned()));
        }
        self.menus.insert(menu.id().to_owned(), menu);
        Ok(())
    }

    /// Unregister a menu. Clears the active menu if it was this one.
    pub fn remove(&mut self, id: &str) -> Result<Menu> {
        let menu = self
            .menus
            .remove(id)
            .ok_or_else(|| MenuError::MenuNotFound(id.to_owned()))?;
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(menu)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.menus.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<&Menu> {
        self.menus
            .get(id)
            .ok_or_else(|| MenuError::MenuNotFound(id.to_owned()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Menu> {
        self.menus
            .get_mut(id)
            .ok_or_else(|| MenuError::MenuNotFound(id.to_owned()))
    }

    /// Mark `id` as the installed menu.
    pub fn set_active(&mut self, id: &str) -> Result<()> {
        if !self.menus.contains_key(id) {
            return Err(MenuError::MenuNotFound(id.to_owned()));
        }
        self.active = Some(id.to_owned());
        Ok(())
    }

    /// ID of the installed menu.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_mut(&mut self) -> Option<&mut Menu> {
        let id = self.active.as_deref()?;
        self.menus.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Remove every menu, in no particular order.
    pub fn drain(&mut self) -> impl Iterator<Item = Menu> + '_ {
        self.active = None;
        self.menus.drain().map(|(_, menu)| menu)
    }
}
