//! Keys as the chord syntax names them, and the event a fired chord carries

use std::fmt;

/// Held modifier keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(1);
    pub const SHIFT: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    pub const META: Modifiers = Modifiers(1 << 3);

    /// Display order, with the macOS glyph and the label used elsewhere
    const LABELS: [(Modifiers, char, &'static str); 4] = [
        (Modifiers::CTRL, '⌃', "Ctrl"),
        (Modifiers::ALT, '⌥', "Alt"),
        (Modifiers::SHIFT, '⇧', "Shift"),
        (Modifiers::META, '⌘', "Win"),
    ];

    /// Whether every modifier in `other` is held
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.contains(Self::META)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// What `cmd` means in a chord: Meta on macOS, Ctrl elsewhere
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }

    pub fn has_cmd(self) -> bool {
        self.contains(Self::cmd())
    }

    /// Prefix shown before the key name, e.g. `Ctrl+Shift+` or `⌃⇧`
    fn prefix(self) -> String {
        let held = Self::LABELS
            .into_iter()
            .filter(|(flag, _, _)| self.contains(*flag));
        if cfg!(target_os = "macos") {
            held.map(|(_, glyph, _)| glyph).collect()
        } else {
            held.map(|(_, _, label)| format!("{}+", label)).collect()
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// A key the chord syntax can name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable key, stored lowercase
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    /// Function key, 1 to 12
    F(u8),
}

impl KeyCode {
    /// Fixed label for keys that are not characters or function keys
    fn label(self) -> Option<&'static str> {
        Some(match self {
            KeyCode::Enter => "Enter",
            KeyCode::Escape => "Escape",
            KeyCode::Tab => "Tab",
            KeyCode::Backspace => "Backspace",
            KeyCode::Delete => "Delete",
            KeyCode::Space => "Space",
            KeyCode::Up => "↑",
            KeyCode::Down => "↓",
            KeyCode::Left => "←",
            KeyCode::Right => "→",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Insert => "Insert",
            KeyCode::Char(_) | KeyCode::F(_) => return None,
        })
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.label()) {
            (_, Some(label)) => f.write_str(label),
            (KeyCode::F(n), None) => write!(f, "F{}", n),
            (KeyCode::Char(c), None) => write!(f, "{}", c.to_uppercase()),
            _ => Ok(()),
        }
    }
}

/// One key press: a key plus the modifiers held with it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Unmodified press of `key`
    pub const fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::char_with_mods(c, Modifiers::NONE)
    }

    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_lowercase()), mods)
    }

    /// `Ctrl+Z` style, or `⌃Z` on macOS
    pub fn display_string(&self) -> String {
        format!("{}{}", self.mods.prefix(), self.key)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// What a trigger handler receives when one of its chords fires
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The keystroke that completed the chord
    pub keystroke: Keystroke,
    /// The chord string as it was registered
    pub chord: String,
}

impl KeyEvent {
    pub fn new(keystroke: Keystroke, chord: impl Into<String>) -> Self {
        Self {
            keystroke,
            chord: chord.into(),
        }
    }
}
