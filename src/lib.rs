//! # gilt-menu
//!
//! A declarative native menu engine.
//!
//! A host describes a menu as a JSON tree of containers and items. gilt-menu
//! builds native menu objects from it through a [`toolkit::MenuToolkit`],
//! keeps them in step with later descriptions by reconciling on stable IDs,
//! patches single nodes in place, and turns clicks and key equivalents into
//! [`event::MenuEvent`]s for the host's handlers. All toolkit work runs on one
//! UI thread; other threads reach it through [`ui::UiHandle`].
//!
//! ## Core Systems
//!
//! - **[`tree`]**: Slotmap-backed menu tree and the ID → node identity index
//! - **[`descriptor`]**: Wire records for trees and attribute patches, decode and validation
//! - **[`menu`]**: Tree builder, reconciler, attribute patcher, and the `Menu` itself
//! - **[`toolkit`]**: Native toolkit seam, with a headless recording implementation
//! - **[`keys`]**: Shortcut strings (`cmdorctrl+shift+o`) as typed key equivalents
//! - **[`event`]**: Activation routing, shortcut tables, outgoing events
//! - **[`registry`]**: Menus by ID and the one active menu
//! - **[`engine`]**: The operations: new, load, render, render attributes, element, delete
//! - **[`bridge`]**: Selector parsing and JSON responses for the host bridge
//! - **[`ui`]**: UI-thread executor and cross-thread handles
//! - **[`config`]** / **[`logging`]**: Engine options and tracing setup
//! - **[`testing`]**: Pilot and outline snapshots over the headless toolkit

// Foundation
pub mod error;
pub mod tree;

// Wire format
pub mod descriptor;
pub mod keys;

// Engine
pub mod config;
pub mod event;
pub mod menu;
pub mod registry;
pub mod toolkit;

pub mod engine;

// Host surface
pub mod bridge;
pub mod logging;
pub mod ui;

// Test support
pub mod testing;

pub use engine::Engine;
pub use error::{ErrorKind, MenuError, Result};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use gilt_menu_macros::menu;
