//! Binding struct: a named command, its chords, where it applies and what it runs

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::chord::KeySpec;
use super::target::{Applicability, Node};
use super::types::KeyEvent;

/// What caused a callback to run
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// A bound chord fired; carries the originating key event
    Key(KeyEvent),
    /// Direct invocation; carries the caller's arguments verbatim
    Invoke(Vec<Value>),
}

impl Trigger {
    pub fn key_event(&self) -> Option<&KeyEvent> {
        match self {
            Trigger::Key(event) => Some(event),
            Trigger::Invoke(_) => None,
        }
    }

    pub fn args(&self) -> &[Value] {
        match self {
            Trigger::Key(_) => &[],
            Trigger::Invoke(args) => args,
        }
    }
}

/// Command callback, run as `(target, trigger)`
pub type Callback = Rc<dyn Fn(&Node, &Trigger)>;

/// A registered command
#[derive(Clone)]
pub struct Binding {
    /// Unique command name; empty means unnamed (chord-only)
    pub command: String,
    pub keybinding: KeySpec,
    pub components: Applicability,
    pub callback: Callback,
    pub description: Option<String>,
}

impl Binding {
    /// Create a binding that applies to any component
    pub fn new(
        command: impl Into<String>,
        keybinding: impl Into<KeySpec>,
        callback: impl Fn(&Node, &Trigger) + 'static,
    ) -> Self {
        Self {
            command: command.into(),
            keybinding: keybinding.into(),
            components: Applicability::Any,
            callback: Rc::new(callback),
            description: None,
        }
    }

    /// Restrict the binding to the given component names (builder pattern)
    pub fn components<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = Applicability::components(names);
        self
    }

    pub fn applicability(mut self, components: Applicability) -> Self {
        self.components = components;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_named(&self) -> bool {
        !self.command.is_empty()
    }

    pub fn applies_to(&self, node: &Node) -> bool {
        self.components.applies_to(node)
    }

    pub(crate) fn run(&self, node: &Node, trigger: &Trigger) {
        (self.callback)(node, trigger);
    }

    pub fn display_string(&self) -> String {
        self.keybinding.display_string()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("command", &self.command)
            .field("keybinding", &self.keybinding)
            .field("components", &self.components)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_builder_defaults_to_any() {
        let binding = Binding::new("delete", "del", |_, _| {});
        assert_eq!(binding.components, Applicability::Any);
        assert!(binding.is_named());
        assert!(binding.description.is_none());
    }

    #[test]
    fn test_unnamed_binding() {
        let binding = Binding::new("", "ctrl+d", |_, _| {});
        assert!(!binding.is_named());
    }

    #[test]
    fn test_components_restrict() {
        let binding = Binding::new("delete", "del", |_, _| {}).components(["Button"]);
        assert!(binding.applies_to(&Node::new("n1", "Button")));
        assert!(!binding.applies_to(&Node::new("n2", "Image")));
    }

    #[test]
    fn test_run_passes_target_and_trigger() {
        let seen = Rc::new(Cell::new(0));
        let seen_in = seen.clone();
        let binding = Binding::new("count", "c", move |node, trigger| {
            assert_eq!(node.id, "n1");
            seen_in.set(seen_in.get() + trigger.args().len());
        });

        binding.run(
            &Node::new("n1", "Button"),
            &Trigger::Invoke(vec![Value::from(1), Value::from("x")]),
        );
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_trigger_accessors() {
        let event = KeyEvent::new(crate::keymap::Keystroke::char('a'), "a");
        let key = Trigger::Key(event.clone());
        assert_eq!(key.key_event(), Some(&event));
        assert!(key.args().is_empty());

        let invoke = Trigger::Invoke(vec![Value::Bool(true)]);
        assert!(invoke.key_event().is_none());
        assert_eq!(invoke.args(), &[Value::Bool(true)]);
    }

    #[test]
    fn test_debug_omits_callback() {
        let binding = Binding::new("delete", "del", |_, _| {}).description("Delete node");
        let debug = format!("{:?}", binding);
        assert!(debug.contains("delete"));
        assert!(debug.contains("Delete node"));
    }
}
