//! Headless testing support: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive an [`Engine`](crate::engine::Engine) over a
//! [`HeadlessToolkit`](crate::toolkit::HeadlessToolkit) and collect the
//! events it emits. Use [`menu_to_string`] to capture a menu tree as plain
//! text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{menu_to_string, toolkit_to_string};
