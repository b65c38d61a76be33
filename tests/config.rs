//! Keymap override loading and its effect on binding

mod common;

use std::fs;

use common::harness;
use lowcode_keys::keymap::{Binding, KeyOverrides, KeySpec, KeymapError};

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(
        &path,
        r#"
overrides:
  - command: delete
    key: ["shift+del", "ctrl+backspace"]
  - command: inspect
    key: "g p"
"#,
    )
    .unwrap();

    let overrides = KeyOverrides::load_from(&path).unwrap();
    assert_eq!(overrides.len(), 2);
    assert_eq!(
        overrides.get("delete"),
        Some(&KeySpec::from(["shift+del", "ctrl+backspace"]))
    );
    assert_eq!(overrides.get("inspect"), Some(&KeySpec::from("g p")));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = KeyOverrides::load_from(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(KeymapError::IoError(_))));
}

#[test]
fn test_load_invalid_chord() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(
        &path,
        "overrides:\n  - command: delete\n    key: \"ctrl+shift\"\n",
    )
    .unwrap();

    let err = KeyOverrides::load_from(&path).unwrap_err();
    assert!(matches!(err, KeymapError::InvalidKey(_)));
    assert!(err.to_string().starts_with("Invalid key"));
}

#[test]
fn test_load_empty_key_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(&path, "overrides:\n  - command: delete\n    key: []\n").unwrap();

    let err = KeyOverrides::load_from(&path).unwrap_err();
    assert!(matches!(err, KeymapError::InvalidKey(_)));
}

#[test]
fn test_overrides_applied_at_bind() {
    let h = harness();
    let mut overrides = KeyOverrides::new();
    overrides.insert("delete", "shift+del");
    let service = h.service.with_overrides(overrides);

    service.bind(Binding::new("delete", "del", |_, _| {}));
    service.bind(Binding::new("copy", "ctrl+c", |_, _| {}));

    assert_eq!(h.hotkeys.chords(), vec!["shift+del", "ctrl+c"]);
    assert_eq!(
        service.binding_for("delete").unwrap().keybinding,
        KeySpec::from("shift+del")
    );
}

#[test]
fn test_override_does_not_bypass_duplicate_check() {
    let h = harness();
    let mut overrides = KeyOverrides::new();
    overrides.insert("delete", "shift+del");
    let service = h.service.with_overrides(overrides);

    service.bind(Binding::new("delete", "del", |_, _| {}));
    service.bind(Binding::new("delete", "backspace", |_, _| {}));

    assert_eq!(h.hotkeys.chords(), vec!["shift+del"]);
}
