//! Keybinding registry for low-code editor plugins
//!
//! This module provides a command registry that:
//! - Binds named commands to key chords through a host hotkey subsystem
//! - Runs a command only against selected nodes of the component kinds it applies to
//! - Invokes the same commands directly, bypassing chords
//! - Lets users remap chords via a YAML keymap
//!
//! # Architecture
//!
//! ```text
//! HotkeyPort ─ KeyEvent ─→ KeybindingService ─ current_node() ─→ callback
//! caller ─ exec_command ─→ KeybindingService ──────────────────→ callback
//! ```
//!
//! # Wiring
//!
//! ```ignore
//! let hotkeys = Rc::new(LocalHotkeys::new());
//! let document = Rc::new(DocumentSelection::new());
//! let service = KeybindingService::new(hotkeys.clone(), document.clone())
//!     .with_overrides(KeyOverrides::load());
//!
//! service.bind(Binding::new("delete", "del", |node, _| remove(node)).components(["Button"]));
//! ```

mod binding;
mod chord;
mod config;
mod local;
mod ports;
mod selection;
mod service;
mod target;
mod types;

pub use binding::{Binding, Callback, Trigger};
pub use chord::{parse_chord, parse_key_string, KeySpec};
pub use config::{parse_keymap_yaml, KeyOverrides, KeymapError};
pub use local::{KeyAction, LocalHotkeys};
pub use ports::{HotkeyPort, SelectionPort, TriggerHandler};
pub use selection::DocumentSelection;
pub use service::{CommandInfo, KeybindingError, KeybindingService};
pub use target::{Applicability, Node};
pub use types::{KeyCode, KeyEvent, Keystroke, Modifiers};
