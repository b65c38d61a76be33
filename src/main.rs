//! lowcode-keys - keybinding registry tools

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::Value;

use lowcode_keys::keymap::{
    parse_chord, Binding, DocumentSelection, KeyAction, KeyOverrides, KeybindingService,
    LocalHotkeys, Node, SelectionPort, Trigger,
};

mod cli;

use cli::{CliArgs, CliCommand};

fn main() -> Result<()> {
    lowcode_keys::tracing::init();

    let args = CliArgs::parse();
    match args.command {
        CliCommand::Check { path } => check(path),
        CliCommand::Demo {
            select,
            list,
            no_user_keymap,
            exec,
            chords,
        } => demo(DemoOptions {
            select,
            list,
            no_user_keymap,
            exec,
            chords,
        }),
    }
}

fn check(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => lowcode_keys::config_paths::keymap_file()
            .ok_or_else(|| anyhow!("No config directory available"))?,
    };

    let overrides = KeyOverrides::load_from(&path)
        .with_context(|| format!("Invalid keymap {}", path.display()))?;

    println!("{}: {} override(s)", path.display(), overrides.len());
    for (command, keys) in overrides.iter() {
        println!("  {:<20} {}", command, keys.display_string());
    }
    Ok(())
}

struct DemoOptions {
    select: Vec<String>,
    list: bool,
    no_user_keymap: bool,
    exec: Option<String>,
    chords: Vec<String>,
}

fn demo(opts: DemoOptions) -> Result<()> {
    let hotkeys = Rc::new(LocalHotkeys::new());
    let document = Rc::new(sample_document());
    let overrides = if opts.no_user_keymap {
        KeyOverrides::default()
    } else {
        KeyOverrides::load()
    };
    let service =
        KeybindingService::new(hotkeys.clone(), document.clone()).with_overrides(overrides);

    for binding in sample_bindings() {
        service.bind(binding);
    }

    if opts.list {
        println!("{}", serde_json::to_string_pretty(&service.commands())?);
        return Ok(());
    }

    document.select(opts.select);
    for chord in &opts.chords {
        let keystrokes =
            parse_chord(chord).with_context(|| format!("Invalid chord {:?}", chord))?;
        let mut action = KeyAction::NoMatch;
        for keystroke in keystrokes {
            action = hotkeys.press(keystroke);
        }
        match action {
            KeyAction::Fired(n) => tracing::debug!("{}: {} handler(s)", chord, n),
            KeyAction::AwaitMore => println!("{}: incomplete chord", chord),
            KeyAction::NoMatch => println!("{}: not bound", chord),
        }
        hotkeys.reset();
    }

    if let Some(command) = opts.exec {
        let node = document.current_node();
        service.exec_command(&command, node.as_ref(), vec![Value::from("demo")]);
    }
    Ok(())
}

fn sample_document() -> DocumentSelection {
    let document = DocumentSelection::new();
    document.insert(Node::new("page", "Page"));
    document.insert(
        Node::new("btn", "Button").with_props(serde_json::json!({"children": "Submit"})),
    );
    document.insert(Node::new("img", "Image").with_props(serde_json::json!({"src": "logo.png"})));
    document
}

fn report(command: &'static str) -> impl Fn(&Node, &Trigger) + 'static {
    move |node: &Node, trigger: &Trigger| {
        let via = match trigger {
            Trigger::Key(event) => format!("key {}", event.chord),
            Trigger::Invoke(args) => format!("exec {}", Value::from(args.clone())),
        };
        println!("{} {} ({}) via {}", command, node.id, node.component_name, via);
    }
}

fn sample_bindings() -> Vec<Binding> {
    vec![
        Binding::new("delete", ["del", "backspace"], report("delete")).description("Remove node"),
        Binding::new("duplicate", "cmd+d", report("duplicate")).description("Duplicate node"),
        Binding::new("toggle-visible", "ctrl+h", report("toggle-visible"))
            .components(["Button", "Image"])
            .description("Show or hide node"),
        Binding::new("inspect", "g i", report("inspect")).description("Open props panel"),
        Binding::new("", "esc", report("select-parent")),
    ]
}
