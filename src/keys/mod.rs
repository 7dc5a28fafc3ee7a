//! Key equivalents: shortcut spec tokenizer and parser.

pub mod shortcut;
pub mod tokenizer;

pub use shortcut::{Key, KeyEquivalent, Modifiers, ShortcutError};
