//! In-process hotkey subsystem
//!
//! Parses chord strings and matches incoming keystrokes against them, so the
//! registry can run (and be tested) without a host editor. Multi-keystroke
//! chords such as `"g i"` wait for the rest of the sequence.

use std::cell::RefCell;
use std::collections::HashMap;

use super::chord::{parse_chord, KeySpec};
use super::ports::{HotkeyPort, TriggerHandler};
use super::types::{KeyEvent, Keystroke};

/// Result of feeding a keystroke to [`LocalHotkeys`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// This many handlers ran
    Fired(usize),
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    /// No chord matches this keystroke
    NoMatch,
}

struct Entry {
    chord: String,
    keystrokes: Vec<Keystroke>,
    handler: TriggerHandler,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    /// Single-keystroke chords (indices into entries)
    single_lookup: HashMap<Keystroke, Vec<usize>>,
    /// Keystrokes that start a multi-keystroke chord
    chord_prefixes: HashMap<Keystroke, Vec<usize>>,
    pending_chord: Vec<Keystroke>,
}

/// Handlers that must run for a keystroke, resolved while the state is borrowed
enum Resolution {
    Fire(Vec<(TriggerHandler, KeyEvent)>),
    AwaitMore,
    NoMatch,
}

impl State {
    fn add(&mut self, chord: &str, keystrokes: Vec<Keystroke>, handler: TriggerHandler) {
        let idx = self.entries.len();
        let first = keystrokes[0];
        if keystrokes.len() > 1 {
            self.chord_prefixes.entry(first).or_default().push(idx);
        } else {
            self.single_lookup.entry(first).or_default().push(idx);
        }
        self.entries.push(Entry {
            chord: chord.to_string(),
            keystrokes,
            handler,
        });
    }

    fn fire(&self, indices: &[usize], keystroke: Keystroke) -> Resolution {
        Resolution::Fire(
            indices
                .iter()
                .map(|&idx| {
                    let entry = &self.entries[idx];
                    (
                        entry.handler.clone(),
                        KeyEvent::new(keystroke, entry.chord.clone()),
                    )
                })
                .collect(),
        )
    }

    fn resolve(&mut self, keystroke: Keystroke) -> Resolution {
        if !self.pending_chord.is_empty() {
            self.pending_chord.push(keystroke);
            return self.try_complete_chord(keystroke);
        }

        if let Some(indices) = self.single_lookup.get(&keystroke) {
            return self.fire(indices, keystroke);
        }

        if self.chord_prefixes.contains_key(&keystroke) {
            self.pending_chord.push(keystroke);
            return Resolution::AwaitMore;
        }

        Resolution::NoMatch
    }

    fn try_complete_chord(&mut self, keystroke: Keystroke) -> Resolution {
        let first = self.pending_chord[0];
        let Some(indices) = self.chord_prefixes.get(&first) else {
            self.pending_chord.clear();
            return Resolution::NoMatch;
        };

        let complete: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&idx| self.entries[idx].keystrokes == self.pending_chord)
            .collect();
        if !complete.is_empty() {
            self.pending_chord.clear();
            return self.fire(&complete, keystroke);
        }

        let pending = &self.pending_chord;
        let could_match = indices.iter().any(|&idx| {
            let strokes = &self.entries[idx].keystrokes;
            strokes.len() > pending.len() && strokes[..pending.len()] == pending[..]
        });

        if could_match {
            Resolution::AwaitMore
        } else {
            self.pending_chord.clear();
            Resolution::NoMatch
        }
    }
}

/// A [`HotkeyPort`] that dispatches keystrokes fed to it with [`LocalHotkeys::press`]
///
/// When several registrations share a chord, all of them fire in
/// registration order.
#[derive(Default)]
pub struct LocalHotkeys {
    state: RefCell<State>,
}

impl LocalHotkeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one keystroke, running every handler whose chord it completes
    pub fn press(&self, keystroke: Keystroke) -> KeyAction {
        // Resolve first so handlers run without the state borrowed
        let resolution = self.state.borrow_mut().resolve(keystroke);
        match resolution {
            Resolution::Fire(handlers) => {
                for (handler, event) in &handlers {
                    handler(event);
                }
                KeyAction::Fired(handlers.len())
            }
            Resolution::AwaitMore => KeyAction::AwaitMore,
            Resolution::NoMatch => KeyAction::NoMatch,
        }
    }

    /// Clear pending chord state
    pub fn reset(&self) {
        self.state.borrow_mut().pending_chord.clear();
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.state.borrow().pending_chord.is_empty()
    }

    /// The pending chord keystrokes, for status display
    pub fn pending_chord_display(&self) -> Option<String> {
        let state = self.state.borrow();
        if state.pending_chord.is_empty() {
            None
        } else {
            Some(
                state
                    .pending_chord
                    .iter()
                    .map(Keystroke::display_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }
    }

    /// Number of registered chords
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }
}

impl HotkeyPort for LocalHotkeys {
    fn register(&self, keys: &KeySpec, handler: TriggerHandler) {
        let mut state = self.state.borrow_mut();
        for chord in keys.chords() {
            match parse_chord(chord) {
                Ok(keystrokes) => state.add(chord, keystrokes, handler.clone()),
                Err(e) => tracing::warn!("Skipping chord {:?}: {}", chord, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};
    use std::cell::Cell;
    use std::rc::Rc;

    fn ctrl(c: char) -> Keystroke {
        Keystroke::char_with_mods(c, Modifiers::CTRL)
    }

    fn counting_handler() -> (Rc<Cell<usize>>, TriggerHandler) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        let handler: TriggerHandler = Rc::new(move |_: &KeyEvent| inner.set(inner.get() + 1));
        (count, handler)
    }

    #[test]
    fn test_single_keystroke_fires() {
        let hotkeys = LocalHotkeys::new();
        let (count, handler) = counting_handler();
        hotkeys.register(&KeySpec::from("ctrl+s"), handler);

        assert_eq!(hotkeys.press(ctrl('s')), KeyAction::Fired(1));
        assert_eq!(hotkeys.press(ctrl('k')), KeyAction::NoMatch);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_equivalent_chords_share_handler() {
        let hotkeys = LocalHotkeys::new();
        let (count, handler) = counting_handler();
        hotkeys.register(&KeySpec::from(["del", "backspace"]), handler);

        assert_eq!(hotkeys.len(), 2);
        hotkeys.press(Keystroke::key(KeyCode::Delete));
        hotkeys.press(Keystroke::key(KeyCode::Backspace));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_event_carries_matching_chord() {
        let hotkeys = LocalHotkeys::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = Rc::clone(&seen);
        hotkeys.register(
            &KeySpec::from(["del", "backspace"]),
            Rc::new(move |e: &KeyEvent| seen_in.borrow_mut().push(e.chord.clone())),
        );

        hotkeys.press(Keystroke::key(KeyCode::Backspace));
        assert_eq!(*seen.borrow(), vec!["backspace".to_string()]);
    }

    #[test]
    fn test_shared_chord_fans_out() {
        let hotkeys = LocalHotkeys::new();
        let (first, h1) = counting_handler();
        let (second, h2) = counting_handler();
        hotkeys.register(&KeySpec::from("ctrl+d"), h1);
        hotkeys.register(&KeySpec::from("ctrl+d"), h2);

        assert_eq!(hotkeys.press(ctrl('d')), KeyAction::Fired(2));
        assert_eq!((first.get(), second.get()), (1, 1));
    }

    #[test]
    fn test_sequence_await_more() {
        let hotkeys = LocalHotkeys::new();
        let (count, handler) = counting_handler();
        hotkeys.register(&KeySpec::from("ctrl+k ctrl+c"), handler);

        assert_eq!(hotkeys.press(ctrl('k')), KeyAction::AwaitMore);
        assert!(hotkeys.has_pending_chord());
        assert!(hotkeys.pending_chord_display().is_some());

        assert_eq!(hotkeys.press(ctrl('c')), KeyAction::Fired(1));
        assert!(!hotkeys.has_pending_chord());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_sequence_mismatch_resets() {
        let hotkeys = LocalHotkeys::new();
        let (count, handler) = counting_handler();
        hotkeys.register(&KeySpec::from("g i"), handler);

        assert_eq!(hotkeys.press(Keystroke::char('g')), KeyAction::AwaitMore);
        assert_eq!(hotkeys.press(Keystroke::char('x')), KeyAction::NoMatch);
        assert!(!hotkeys.has_pending_chord());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_three_stroke_sequence() {
        let hotkeys = LocalHotkeys::new();
        let (count, handler) = counting_handler();
        hotkeys.register(&KeySpec::from("g g i"), handler);

        assert_eq!(hotkeys.press(Keystroke::char('g')), KeyAction::AwaitMore);
        assert_eq!(hotkeys.press(Keystroke::char('g')), KeyAction::AwaitMore);
        assert_eq!(hotkeys.press(Keystroke::char('i')), KeyAction::Fired(1));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reset_clears_pending() {
        let hotkeys = LocalHotkeys::new();
        let (_, handler) = counting_handler();
        hotkeys.register(&KeySpec::from("g i"), handler);

        hotkeys.press(Keystroke::char('g'));
        hotkeys.reset();
        assert!(!hotkeys.has_pending_chord());
        assert!(hotkeys.pending_chord_display().is_none());
    }

    #[test]
    fn test_invalid_chord_skipped() {
        let hotkeys = LocalHotkeys::new();
        let (count, handler) = counting_handler();
        hotkeys.register(&KeySpec::from(["ctrl+bogus", "f1"]), handler);

        assert_eq!(hotkeys.len(), 1);
        hotkeys.press(Keystroke::key(KeyCode::F(1)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_may_register_more() {
        let hotkeys = Rc::new(LocalHotkeys::new());
        let weak = Rc::downgrade(&hotkeys);
        hotkeys.register(
            &KeySpec::from("a"),
            Rc::new(move |_: &KeyEvent| {
                if let Some(hotkeys) = weak.upgrade() {
                    hotkeys.register(&KeySpec::from("b"), Rc::new(|_: &KeyEvent| {}));
                }
            }),
        );

        hotkeys.press(Keystroke::char('a'));
        assert_eq!(hotkeys.len(), 2);
        assert_eq!(hotkeys.press(Keystroke::char('b')), KeyAction::Fired(1));
    }
}
