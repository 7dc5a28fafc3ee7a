//! Key equivalents: modifier set plus a single key.
//!
//! [`KeyEquivalent::parse`] turns a spec string such as `cmd+shift+o` into a
//! [`Modifiers`] bitmask and a [`Key`]. Host key events from crossterm
//! convert into the same type so they can be matched against menu shortcuts.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use super::tokenizer::{tokenize, Token};

// ---------------------------------------------------------------------------
// ShortcutError
// ---------------------------------------------------------------------------

/// Errors from shortcut spec parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
    #[error("empty shortcut spec")]
    Empty,
    #[error("unexpected character at byte {0}")]
    UnexpectedChar(usize),
    #[error("shortcut {0:?} has no key")]
    MissingKey(String),
    #[error("shortcut {0:?} names more than one key")]
    MultipleKeys(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("dangling `+` in {0:?}")]
    DanglingSeparator(String),
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key of a menu shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, stored lowercase.
    Char(char),
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    fn from_name(name: &str) -> Option<Key> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "plus" => Key::Char('+'),
            _ => {
                if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=24).contains(&n) {
                        return Some(Key::F(n));
                    }
                    return None;
                }
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char('+') => write!(f, "plus"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => write!(f, "enter"),
            Key::Escape => write!(f, "esc"),
            Key::Tab => write!(f, "tab"),
            Key::Space => write!(f, "space"),
            Key::Backspace => write!(f, "backspace"),
            Key::Delete => write!(f, "delete"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
            Key::PageUp => write!(f, "pageup"),
            Key::PageDown => write!(f, "pagedown"),
            Key::F(n) => write!(f, "f{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    pub const CMD: Modifiers = Modifiers(8);
    pub const FN: Modifiers = Modifiers(16);

    /// The modifier `cmdorctrl` resolves to on the current platform.
    pub fn platform_primary() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::CMD
        } else {
            Modifiers::CTRL
        }
    }

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn from_name(name: &str, primary: Modifiers) -> Option<Modifiers> {
        let modifier = match name.to_ascii_lowercase().as_str() {
            "cmd" | "command" | "super" | "meta" => Modifiers::CMD,
            "ctrl" | "control" => Modifiers::CTRL,
            "alt" | "option" | "opt" => Modifiers::ALT,
            "shift" => Modifiers::SHIFT,
            "fn" => Modifiers::FN,
            "cmdorctrl" | "commandorcontrol" => primary,
            _ => return None,
        };
        Some(modifier)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEquivalent
// ---------------------------------------------------------------------------

/// A parsed shortcut: key + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEquivalent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEquivalent {
    /// Create a new key equivalent.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parse a spec, resolving `cmdorctrl` for the current platform.
    pub fn parse(spec: &str) -> Result<Self, ShortcutError> {
        Self::parse_with(spec, Modifiers::platform_primary())
    }

    /// Parse a spec, resolving `cmdorctrl` to `primary`.
    pub fn parse_with(spec: &str, primary: Modifiers) -> Result<Self, ShortcutError> {
        let tokens = tokenize(spec).map_err(ShortcutError::UnexpectedChar)?;
        if tokens.is_empty() {
            return Err(ShortcutError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut key = None;
        let mut expect_part = true;

        for (token, text) in tokens {
            match token {
                Token::Plus => {
                    if expect_part {
                        // `plus` spelled as a symbol: `cmd++`.
                        if key.is_none() && !modifiers.is_empty() {
                            key = Some(Key::Char('+'));
                            expect_part = false;
                            continue;
                        }
                        return Err(ShortcutError::DanglingSeparator(spec.to_owned()));
                    }
                    expect_part = true;
                }
                Token::Word | Token::Symbol => {
                    if !expect_part {
                        return Err(ShortcutError::MultipleKeys(spec.to_owned()));
                    }
                    expect_part = false;
                    if token == Token::Word {
                        if let Some(m) = Modifiers::from_name(text, primary) {
                            modifiers = modifiers | m;
                            continue;
                        }
                    }
                    let parsed = Key::from_name(text)
                        .ok_or_else(|| ShortcutError::UnknownKey(text.to_owned()))?;
                    if key.replace(parsed).is_some() {
                        return Err(ShortcutError::MultipleKeys(spec.to_owned()));
                    }
                }
            }
        }

        if expect_part {
            return Err(ShortcutError::DanglingSeparator(spec.to_owned()));
        }
        key.map(|key| KeyEquivalent { key, modifiers })
            .ok_or_else(|| ShortcutError::MissingKey(spec.to_owned()))
    }

    /// Convert a crossterm key event. Returns `None` for keys a menu
    /// shortcut cannot express.
    pub fn from_crossterm(event: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut modifiers = Modifiers::NONE;
        if event.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers = modifiers | Modifiers::SHIFT;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers = modifiers | Modifiers::CTRL;
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            modifiers = modifiers | Modifiers::ALT;
        }
        if event.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            modifiers = modifiers | Modifiers::CMD;
        }

        let key = match event.code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => {
                modifiers = modifiers | Modifiers::SHIFT;
                Key::Tab
            }
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(KeyEquivalent { key, modifiers })
    }
}

impl fmt::Display for KeyEquivalent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Modifiers::CMD, "cmd"),
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::FN, "fn"),
        ];
        for (modifier, name) in names {
            if self.modifiers.contains(modifier) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(spec: &str) -> Result<KeyEquivalent, ShortcutError> {
        KeyEquivalent::parse_with(spec, Modifiers::CMD)
    }

    // ── Parsing ──────────────────────────────────────────────────────

    #[test]
    fn single_modifier_and_char() {
        let keys = parse("cmd+o").unwrap();
        assert_eq!(keys.key, Key::Char('o'));
        assert_eq!(keys.modifiers, Modifiers::CMD);
    }

    #[test]
    fn multiple_modifiers() {
        let keys = parse("ctrl+alt+shift+delete").unwrap();
        assert_eq!(keys.key, Key::Delete);
        assert!(keys.modifiers.contains(Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT));
        assert!(!keys.modifiers.contains(Modifiers::CMD));
    }

    #[test]
    fn char_is_lowercased() {
        assert_eq!(parse("cmd+O").unwrap().key, Key::Char('o'));
    }

    #[test]
    fn modifier_names_are_case_insensitive() {
        assert_eq!(parse("Shift+Cmd+n").unwrap().modifiers, Modifiers::SHIFT | Modifiers::CMD);
    }

    #[test]
    fn cmdorctrl_uses_primary() {
        let mac = KeyEquivalent::parse_with("cmdorctrl+s", Modifiers::CMD).unwrap();
        let other = KeyEquivalent::parse_with("cmdorctrl+s", Modifiers::CTRL).unwrap();
        assert_eq!(mac.modifiers, Modifiers::CMD);
        assert_eq!(other.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn function_keys() {
        assert_eq!(parse("f5").unwrap().key, Key::F(5));
        assert_eq!(parse("shift+F12").unwrap().key, Key::F(12));
        assert!(matches!(parse("f30"), Err(ShortcutError::UnknownKey(_))));
    }

    #[test]
    fn punctuation_key() {
        assert_eq!(parse("cmd+,").unwrap().key, Key::Char(','));
    }

    #[test]
    fn plus_key_spelled_two_ways() {
        assert_eq!(parse("cmd+plus").unwrap().key, Key::Char('+'));
        assert_eq!(parse("cmd++").unwrap().key, Key::Char('+'));
    }

    #[test]
    fn bare_key_without_modifiers() {
        let keys = parse("enter").unwrap();
        assert_eq!(keys.key, Key::Enter);
        assert!(keys.modifiers.is_empty());
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn empty_spec() {
        assert_eq!(parse(""), Err(ShortcutError::Empty));
        assert_eq!(parse("   "), Err(ShortcutError::Empty));
    }

    #[test]
    fn modifiers_only() {
        assert!(matches!(parse("cmd+shift"), Err(ShortcutError::MissingKey(_))));
    }

    #[test]
    fn two_keys() {
        assert!(matches!(parse("cmd+a+b"), Err(ShortcutError::MultipleKeys(_))));
    }

    #[test]
    fn unknown_word() {
        assert_eq!(parse("cmd+banana"), Err(ShortcutError::UnknownKey("banana".into())));
    }

    #[test]
    fn dangling_separator() {
        assert!(matches!(parse("cmd+"), Err(ShortcutError::DanglingSeparator(_))));
        assert!(matches!(parse("+o"), Err(ShortcutError::DanglingSeparator(_))));
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn display_is_canonical() {
        let keys = parse("shift+o+cmd").unwrap();
        assert_eq!(keys.to_string(), "cmd+shift+o");
        assert_eq!(parse("alt+f4").unwrap().to_string(), "alt+f4");
        assert_eq!(parse("cmd+plus").unwrap().to_string(), "cmd+plus");
    }

    // ── crossterm ────────────────────────────────────────────────────

    #[test]
    fn from_crossterm_char_with_control() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let event = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        let keys = KeyEquivalent::from_crossterm(event).unwrap();
        assert_eq!(keys, KeyEquivalent::new(Key::Char('s'), Modifiers::CTRL | Modifiers::SHIFT));
    }

    #[test]
    fn from_crossterm_super_is_cmd() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::SUPER);
        assert_eq!(
            KeyEquivalent::from_crossterm(event),
            Some(KeyEquivalent::new(Key::Char('q'), Modifiers::CMD))
        );
    }

    #[test]
    fn from_crossterm_backtab() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(
            KeyEquivalent::from_crossterm(event),
            Some(KeyEquivalent::new(Key::Tab, Modifiers::SHIFT))
        );
    }

    #[test]
    fn from_crossterm_unsupported() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let event = KeyEvent::new(KeyCode::CapsLock, KeyModifiers::NONE);
        assert!(KeyEquivalent::from_crossterm(event).is_none());
    }
}
