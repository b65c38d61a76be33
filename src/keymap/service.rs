//! The keybinding registry: binds commands to chords and dispatches them
//!
//! ```text
//! chord → HotkeyPort → handler → current node → applicability → callback
//! exec_command(name, node, args) ───────────→ applicability → callback
//! ```
//!
//! Every failure is a no-op reported through `tracing`. The `try_*` variants
//! return the same failure as a [`KeybindingError`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::binding::{Binding, Trigger};
use super::chord::KeySpec;
use super::config::KeyOverrides;
use super::ports::{HotkeyPort, SelectionPort, TriggerHandler};
use super::target::{Applicability, Node};
use super::types::KeyEvent;

/// Why a bind or a dispatch did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeybindingError {
    /// `bind` with a command name that is already registered
    DuplicateCommand(String),
    /// A chord fired while nothing was selected
    NoSelection { chord: String },
    /// A chord fired on a node the binding does not apply to
    NotApplicable { chord: String, component: String },
    /// `exec_command` with a name nobody bound
    UnknownCommand(String),
    /// `exec_command` without a node, or with one the binding does not apply to
    InvalidTarget {
        command: String,
        node: Option<String>,
    },
}

impl fmt::Display for KeybindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeybindingError::DuplicateCommand(c) => write!(f, "Duplicated command: {}", c),
            KeybindingError::NoSelection { chord } => {
                write!(f, "No node selected on keydown: {}", chord)
            }
            KeybindingError::NotApplicable { chord, component } => write!(
                f,
                "Not a valid node for keydown target: {} ({})",
                chord, component
            ),
            KeybindingError::UnknownCommand(c) => write!(f, "No command found: {}", c),
            KeybindingError::InvalidTarget { command, node } => match node {
                Some(id) => write!(f, "Not a valid node target for command: {} {}", command, id),
                None => write!(f, "No node target for command: {}", command),
            },
        }
    }
}

impl std::error::Error for KeybindingError {}

/// Summary of a named command, for palettes and help screens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandInfo {
    pub command: String,
    pub keys: KeySpec,
    pub display: String,
    pub components: Applicability,
    pub description: Option<String>,
}

/// Registry of command bindings over a host's hotkey and selection ports
///
/// Create one per process and share it by `Rc`. Bindings are only ever
/// appended; the first binding with a given command name wins lookups.
pub struct KeybindingService {
    hotkey: Rc<dyn HotkeyPort>,
    selection: Rc<dyn SelectionPort>,
    bindings: RefCell<Vec<Rc<Binding>>>,
    overrides: KeyOverrides,
}

impl KeybindingService {
    pub fn new(hotkey: Rc<dyn HotkeyPort>, selection: Rc<dyn SelectionPort>) -> Self {
        Self {
            hotkey,
            selection,
            bindings: RefCell::new(Vec::new()),
            overrides: KeyOverrides::default(),
        }
    }

    /// Apply user chord overrides to every named command bound later
    pub fn with_overrides(mut self, overrides: KeyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Register a binding; failures are logged and otherwise ignored
    pub fn bind(&self, binding: Binding) {
        if let Err(e) = self.try_bind(binding) {
            tracing::warn!("KeybindingService: {}", e);
        }
    }

    /// Register a binding and wire its chords into the hotkey port
    ///
    /// A named binding whose command is already present is rejected and its
    /// chords are never registered.
    pub fn try_bind(&self, mut binding: Binding) -> Result<(), KeybindingError> {
        if binding.is_named() && self.binding_for(&binding.command).is_some() {
            return Err(KeybindingError::DuplicateCommand(binding.command));
        }

        if binding.is_named() {
            if let Some(keys) = self.overrides.get(&binding.command) {
                tracing::debug!(
                    "Overriding keys for {}: {} -> {}",
                    binding.command,
                    binding.keybinding.display_string(),
                    keys.display_string()
                );
                binding.keybinding = keys.clone();
            }
        }

        let binding = Rc::new(binding);
        self.bindings.borrow_mut().push(Rc::clone(&binding));

        let keys = binding.keybinding.clone();
        let selection = Rc::clone(&self.selection);
        let handler: TriggerHandler = Rc::new(move |event: &KeyEvent| {
            if let Err(e) = dispatch_key(&binding, selection.as_ref(), event) {
                tracing::warn!("KeybindingService: {}", e);
            }
        });
        self.hotkey.register(&keys, handler);

        Ok(())
    }

    /// Run a command directly against `node`; failures are logged and ignored
    pub fn exec_command(&self, command: &str, node: Option<&Node>, args: Vec<Value>) {
        if let Err(e) = self.try_exec_command(command, node, args) {
            tracing::warn!("KeybindingService: {}", e);
        }
    }

    /// Run the first binding named `command` against `node`, bypassing chords
    pub fn try_exec_command(
        &self,
        command: &str,
        node: Option<&Node>,
        args: Vec<Value>,
    ) -> Result<(), KeybindingError> {
        let binding = self
            .binding_for(command)
            .ok_or_else(|| KeybindingError::UnknownCommand(command.to_string()))?;

        let node = match node {
            Some(node) if binding.applies_to(node) => node,
            other => {
                return Err(KeybindingError::InvalidTarget {
                    command: command.to_string(),
                    node: other.map(|n| n.id.clone()),
                })
            }
        };

        tracing::debug!("exec {} on {} ({})", command, node.id, node.component_name);
        // The table borrow is released; the callback may bind or exec again
        binding.run(node, &Trigger::Invoke(args));
        Ok(())
    }

    /// First binding with this command name; unnamed bindings never match
    pub fn binding_for(&self, command: &str) -> Option<Rc<Binding>> {
        if command.is_empty() {
            return None;
        }
        self.bindings
            .borrow()
            .iter()
            .find(|b| b.command == command)
            .cloned()
    }

    /// All bindings in insertion order
    pub fn bindings(&self) -> Vec<Rc<Binding>> {
        self.bindings.borrow().clone()
    }

    /// Display string for a command's chords
    pub fn display_for(&self, command: &str) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }

    /// Every named command in insertion order
    pub fn commands(&self) -> Vec<CommandInfo> {
        self.bindings
            .borrow()
            .iter()
            .filter(|b| b.is_named())
            .map(|b| CommandInfo {
                command: b.command.clone(),
                keys: b.keybinding.clone(),
                display: b.display_string(),
                components: b.components.clone(),
                description: b.description.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

impl fmt::Debug for KeybindingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeybindingService")
            .field("bindings", &self.bindings.borrow())
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

/// Chord path: resolve the selected node, check it, run the callback
fn dispatch_key(
    binding: &Binding,
    selection: &dyn SelectionPort,
    event: &KeyEvent,
) -> Result<(), KeybindingError> {
    let node = selection
        .current_node()
        .ok_or_else(|| KeybindingError::NoSelection {
            chord: event.chord.clone(),
        })?;

    if !binding.applies_to(&node) {
        return Err(KeybindingError::NotApplicable {
            chord: event.chord.clone(),
            component: node.component_name,
        });
    }

    tracing::debug!(
        "keydown {} -> {} on {} ({})",
        event.chord,
        if binding.is_named() {
            binding.command.as_str()
        } else {
            "<unnamed>"
        },
        node.id,
        node.component_name
    );
    binding.run(&node, &Trigger::Key(event.clone()));
    Ok(())
}
