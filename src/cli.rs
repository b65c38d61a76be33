//! Command-line argument parsing
//!
//! Supports:
//! - Validating a keymap override file
//! - Replaying key chords against a sample document

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keybinding registry tools
#[derive(Parser, Debug)]
#[command(name = "lowcode-keys", version, about = "Keybinding registry tools")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Validate a keymap file and print its overrides
    Check {
        /// Keymap file (defaults to the user keymap)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Bind the sample commands and replay chords against a sample document
    Demo {
        /// Node ids to select before replaying, first one is the target
        #[arg(short, long, value_delimiter = ',', default_value = "btn")]
        select: Vec<String>,

        /// Print the bound commands as JSON instead of replaying
        #[arg(long)]
        list: bool,

        /// Ignore the user keymap
        #[arg(long)]
        no_user_keymap: bool,

        /// Run this command directly against the first selected node
        #[arg(long, value_name = "COMMAND")]
        exec: Option<String>,

        /// Chords to press, e.g. "del" "g i" "ctrl+h"
        #[arg(value_name = "CHORDS")]
        chords: Vec<String>,
    },
}
