#![forbid(unsafe_code)]

//! Canonical input types for typeahead widgets.
//!
//! Hosts translate their native events (DOM `KeyboardEvent`, terminal key
//! presses, toolkit callbacks) into these types before handing them to a
//! controller. All types derive `Clone`, `PartialEq`, and `Eq` for use in
//! tests and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot tell
//! - `Modifiers` use bitflags for easy combination
//! - Focus destinations are described by [`FocusTarget`], never by element
//!   handles, so controllers stay host-agnostic

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Whether the event is a press or an auto-repeat (not a release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// The character this key would type into a text field, if any.
    ///
    /// Returns `None` for navigation keys, control characters, zero-width
    /// characters, and chords involving Ctrl, Alt, or Super (those are
    /// shortcuts, not text).
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        if self
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
        {
            return None;
        }
        match self.code {
            KeyCode::Char(c) if c.width().is_some_and(|w| w > 0) => Some(c),
            _ => None,
        }
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key. The space bar is `Char(' ')`.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` / `key` name onto a key code.
    ///
    /// Single-character names map to [`KeyCode::Char`]; `"Space"` maps to
    /// `Char(' ')`. Unknown names return `None`.
    #[must_use]
    pub fn from_dom_name(name: &str) -> Option<Self> {
        let code = match name {
            "Enter" | "NumpadEnter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Delete" => Self::Delete,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Space" | " " => Self::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => {
                        // DOM codes such as "KeyA" / "Digit1".
                        let rest = other
                            .strip_prefix("Key")
                            .or_else(|| other.strip_prefix("Digit"))?;
                        let mut chars = rest.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Self::Char(c.to_ascii_lowercase()),
                            _ => return None,
                        }
                    }
                }
            }
        };
        Some(code)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Where focus is, or where it is going.
///
/// Used both for the target of a key event and for the `relatedTarget` of a
/// blur: the element receiving focus when another loses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The widget's text input.
    TextInput,
    /// The option element at this index in the current result list.
    OptionAt(usize),
    /// Anything outside the widget (or nothing at all).
    Outside,
}

impl FocusTarget {
    /// Whether the target lies inside the widget.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        !matches!(self, Self::Outside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_defaults_to_press() {
        let event = KeyEvent::new(KeyCode::Enter);
        assert_eq!(event.kind, KeyEventKind::Press);
        assert_eq!(event.modifiers, Modifiers::NONE);
        assert!(event.is_press());
    }

    #[test]
    fn release_is_not_a_press() {
        let event = KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Release);
        assert!(!event.is_press());
        let repeat = KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Repeat);
        assert!(repeat.is_press());
    }

    #[test]
    fn printable_chars() {
        assert_eq!(KeyEvent::new(KeyCode::Char('a')).printable_char(), Some('a'));
        assert_eq!(KeyEvent::new(KeyCode::Char('é')).printable_char(), Some('é'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('A'))
                .with_modifiers(Modifiers::SHIFT)
                .printable_char(),
            Some('A')
        );
    }

    #[test]
    fn shortcuts_and_controls_are_not_printable() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL);
        assert_eq!(ctrl_a.printable_char(), None);
        assert_eq!(KeyEvent::new(KeyCode::Char('\u{7}')).printable_char(), None);
        assert_eq!(KeyEvent::new(KeyCode::Enter).printable_char(), None);
        // Combining acute accent has zero width.
        assert_eq!(KeyEvent::new(KeyCode::Char('\u{301}')).printable_char(), None);
    }

    #[test]
    fn dom_names_map_to_codes() {
        assert_eq!(KeyCode::from_dom_name("ArrowDown"), Some(KeyCode::Down));
        assert_eq!(KeyCode::from_dom_name("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(KeyCode::from_dom_name("KeyA"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_dom_name("Digit7"), Some(KeyCode::Char('7')));
        assert_eq!(KeyCode::from_dom_name("x"), Some(KeyCode::Char('x')));
        assert_eq!(KeyCode::from_dom_name("F13"), None);
    }

    #[test]
    fn focus_target_internal() {
        assert!(FocusTarget::TextInput.is_internal());
        assert!(FocusTarget::OptionAt(3).is_internal());
        assert!(!FocusTarget::Outside.is_internal());
    }
}
