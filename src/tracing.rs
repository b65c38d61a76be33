//! Diagnostics output
//!
//! Every rejected bind or dispatch is reported with `tracing::warn!`; this
//! module installs the subscriber that makes those visible.
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - every dispatch
//! - `RUST_LOG=lowcode_keys::keymap=debug` - module-level filtering
//!
//! Logs are also written to `~/.config/lowcode-keys/logs/lowcode-keys.log`
//! with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing with console and file logging
///
/// Console output respects RUST_LOG (default `warn`); the file layer always
/// records debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "lowcode-keys.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
