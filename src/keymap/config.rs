//! YAML configuration for user key overrides
//!
//! A keymap file remaps the chords of named commands:
//!
//! ```yaml
//! overrides:
//!   - command: delete
//!     key: ["del", "backspace"]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::chord::KeySpec;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub overrides: Vec<OverrideConfig>,
}

/// A single override entry from YAML
#[derive(Debug, Deserialize)]
pub struct OverrideConfig {
    pub command: String,
    pub key: KeySpec,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Chord replacements keyed by command name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOverrides {
    entries: Vec<(String, KeySpec)>,
}

impl KeyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from the user keymap, or return empty overrides
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::keymap_file() else {
            tracing::debug!("No config directory available, no key overrides");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Keymap not found at {}, no key overrides", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(overrides) => {
                tracing::info!(
                    "Loaded {} key override(s) from {}",
                    overrides.len(),
                    path.display()
                );
                overrides
            }
            Err(e) => {
                tracing::warn!("Failed to load keymap at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load overrides from a YAML file
    pub fn load_from(path: &Path) -> Result<Self, KeymapError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

        parse_keymap_yaml(&content)
    }

    /// Set the chords for `command`, replacing any earlier entry
    pub fn insert(&mut self, command: impl Into<String>, keys: impl Into<KeySpec>) {
        let command = command.into();
        let keys = keys.into();
        match self.entries.iter_mut().find(|(c, _)| *c == command) {
            Some(entry) => entry.1 = keys,
            None => self.entries.push((command, keys)),
        }
    }

    pub fn get(&self, command: &str) -> Option<&KeySpec> {
        self.entries
            .iter()
            .find(|(c, _)| c == command)
            .map(|(_, keys)| keys)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeySpec)> {
        self.entries.iter().map(|(c, k)| (c.as_str(), k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse key overrides from a YAML string
///
/// Entries for other platforms are skipped; a later entry for the same
/// command wins. Every entry needs at least one chord and every chord must
/// parse.
pub fn parse_keymap_yaml(yaml: &str) -> Result<KeyOverrides, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = current_platform();
    let mut overrides = KeyOverrides::new();

    for entry in config.overrides {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        if entry.command.is_empty() {
            return Err(KeymapError::InvalidCommand(
                "override without a command".to_string(),
            ));
        }

        if entry.key.chords().is_empty() {
            return Err(KeymapError::InvalidKey(format!(
                "no chords for command: {}",
                entry.command
            )));
        }
        entry.key.parse()?;
        overrides.insert(entry.command, entry.key);
    }

    Ok(overrides)
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when loading keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}
