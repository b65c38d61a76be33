//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use lowcode_keys::keymap::{
    DocumentSelection, HotkeyPort, KeySpec, KeyEvent, KeybindingService, Keystroke, Node,
    Trigger, TriggerHandler,
};

/// Hotkey port that records every registration and fires them by chord string
#[derive(Default)]
pub struct FakeHotkeys {
    registered: RefCell<Vec<(KeySpec, TriggerHandler)>>,
}

impl HotkeyPort for FakeHotkeys {
    fn register(&self, keys: &KeySpec, handler: TriggerHandler) {
        self.registered.borrow_mut().push((keys.clone(), handler));
    }
}

impl FakeHotkeys {
    /// Fire every handler registered for `chord`, returning how many ran
    pub fn trigger(&self, chord: &str) -> usize {
        let handlers: Vec<TriggerHandler> = self
            .registered
            .borrow()
            .iter()
            .filter(|(keys, _)| keys.chords().iter().any(|c| c == chord))
            .map(|(_, h)| Rc::clone(h))
            .collect();

        let event = KeyEvent::new(Keystroke::char('x'), chord);
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Every chord string that reached the port
    pub fn chords(&self) -> Vec<String> {
        self.registered
            .borrow()
            .iter()
            .flat_map(|(keys, _)| keys.chords().to_vec())
            .collect()
    }
}

/// A callback invocation: node id plus what triggered it
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub node: String,
    pub trigger: Trigger,
}

pub type Calls = Rc<RefCell<Vec<Call>>>;

/// Callback that records each call into `calls`
pub fn recorder(calls: &Calls) -> impl Fn(&Node, &Trigger) + 'static {
    let calls = Rc::clone(calls);
    move |node: &Node, trigger: &Trigger| {
        calls.borrow_mut().push(Call {
            node: node.id.clone(),
            trigger: trigger.clone(),
        })
    }
}

pub struct Harness {
    pub hotkeys: Rc<FakeHotkeys>,
    pub document: Rc<DocumentSelection>,
    pub service: KeybindingService,
    pub calls: Calls,
}

/// Service over fake ports with nodes `n1` (Image) and `btn` (Button)
pub fn harness() -> Harness {
    let hotkeys = Rc::new(FakeHotkeys::default());
    let document = Rc::new(DocumentSelection::new());
    document.insert(Node::new("n1", "Image"));
    document.insert(Node::new("btn", "Button"));
    let service = KeybindingService::new(hotkeys.clone(), document.clone());
    Harness {
        hotkeys,
        document,
        service,
        calls: Rc::new(RefCell::new(Vec::new())),
    }
}
