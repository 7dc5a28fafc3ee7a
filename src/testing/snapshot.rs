//! Snapshot helpers.
//!
//! Turn a live menu (or the headless toolkit's view of it) into plain text
//! suitable for `insta` snapshots and string assertions.

use std::fmt::Write;

use crate::menu::Menu;
use crate::toolkit::HeadlessToolkit;
use crate::tree::{MenuNode, NodeId};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a menu's tree as an indented outline, one node per line.
///
/// Each line starts with the node ID. Containers add their `[label]`,
/// separators print `---`, items add their quoted label followed by the key
/// equivalent, handler and disabled flag when present. Lines are separated
/// by `'\n'` with no trailing newline.
///
/// ```ignore
/// main
///   file [File]
///     open "Open" cmd+o -> doOpen
///     sep ---
/// ```
pub fn menu_to_string(menu: &Menu) -> String {
    let mut out = String::new();
    if let Some(root) = menu.tree().root() {
        write_node(menu, root, 0, &mut out);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Outline of the native objects backing `menu`, as the toolkit sees them.
///
/// Empty when the menu has no root.
pub fn toolkit_to_string(toolkit: &HeadlessToolkit, menu: &Menu) -> String {
    menu.root_handle()
        .map(|root| toolkit.outline(root))
        .unwrap_or_default()
}

fn write_node(menu: &Menu, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = menu.get(id) else {
        return;
    };
    let _ = writeln!(out, "{}{}", "  ".repeat(depth), describe(node, depth == 0));
    for &child in menu.tree().children(id) {
        write_node(menu, child, depth + 1, out);
    }
}

fn describe(node: &MenuNode, is_root: bool) -> String {
    let mut line = node.id().to_owned();
    if node.is_container() {
        if !is_root || !node.label().is_empty() {
            let _ = write!(line, " [{}]", node.label());
        }
    } else if node.is_separator() {
        line.push_str(" ---");
    } else {
        let _ = write!(line, " {:?}", node.label());
        if let Some(keys) = node.shortcut() {
            let _ = write!(line, " {keys}");
        }
        if let Some(handler) = node.on_click() {
            let _ = write!(line, " -> {handler}");
        }
    }
    if node.is_disabled() {
        line.push_str(" (disabled)");
    }
    line
}

// ===========================================================================
// Tests
// ===========================================================================
