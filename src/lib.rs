//! lowcode-keys - keybinding registry for low-code editor plugins
//!
//! This crate provides the command registry that binds named commands to key
//! chords, checks them against the selected node and dispatches them.

pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{Binding, KeybindingService, Node, Trigger};
