//! Chord strings in the host hotkey syntax
//!
//! A chord is one or more keystrokes separated by whitespace (`"g i"`), each
//! keystroke being `+`-joined modifiers and a key (`"cmd+shift+s"`).

use std::slice;

use serde::{Deserialize, Serialize};

use super::config::KeymapError;
use super::types::{KeyCode, Keystroke, Modifiers};

/// One chord, or an ordered set of equivalent chords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    One(String),
    Many(Vec<String>),
}

impl KeySpec {
    /// The chord strings in declaration order
    pub fn chords(&self) -> &[String] {
        match self {
            KeySpec::One(chord) => slice::from_ref(chord),
            KeySpec::Many(chords) => chords,
        }
    }

    /// Parse every chord, failing on the first invalid one
    pub fn parse(&self) -> Result<Vec<Vec<Keystroke>>, KeymapError> {
        self.chords().iter().map(|c| parse_chord(c)).collect()
    }

    /// Human-readable form, e.g. `Ctrl+Z / Ctrl+Shift+Z`
    ///
    /// Chords that do not parse are shown verbatim.
    pub fn display_string(&self) -> String {
        self.chords()
            .iter()
            .map(|chord| match parse_chord(chord) {
                Ok(strokes) => strokes
                    .iter()
                    .map(Keystroke::display_string)
                    .collect::<Vec<_>>()
                    .join(" "),
                Err(_) => chord.clone(),
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl From<&str> for KeySpec {
    fn from(chord: &str) -> Self {
        KeySpec::One(chord.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(chord: String) -> Self {
        KeySpec::One(chord)
    }
}

impl From<Vec<&str>> for KeySpec {
    fn from(chords: Vec<&str>) -> Self {
        KeySpec::Many(chords.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySpec {
    fn from(chords: [&str; N]) -> Self {
        KeySpec::Many(chords.iter().map(|c| c.to_string()).collect())
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(chords: Vec<String>) -> Self {
        KeySpec::Many(chords)
    }
}

/// Parse a whitespace-separated keystroke sequence like `"ctrl+k ctrl+c"`
pub fn parse_chord(chord: &str) -> Result<Vec<Keystroke>, KeymapError> {
    let strokes = chord
        .split_whitespace()
        .map(parse_key_string)
        .collect::<Result<Vec<_>, _>>()?;

    if strokes.is_empty() {
        return Err(KeymapError::InvalidKey(format!("Empty chord: {:?}", chord)));
    }
    Ok(strokes)
}

/// Parse a key string like "cmd+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "cmd" | "command" | "mod" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),
        "insert" | "ins" => Ok(KeyCode::Insert),

        _ => key
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}
