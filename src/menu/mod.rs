//! Menu lifecycle: build, reconcile and patch a live menu tree.
//!
//! [`Menu`] is the aggregate the engine stores per menu ID. The builder,
//! reconciler and patcher share one editor over the menu's tree, identity
//! index and toolkit, so arena and native state change together.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod menu;
pub mod patch;
pub mod reconcile;

pub use builder::build_tree;
pub use menu::{Menu, RenderScope};
pub use reconcile::ReconcileStats;
