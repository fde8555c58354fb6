#![deny(missing_docs)]
//! Shared logging utilities for the fetchbind workspace.
//!
//! This crate provides the `bind_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use log::LevelFilter;

/// Log target shared by every message emitted through the `bind_*` macros.
pub const LOG_TARGET: &str = "fetchbind";

/// Environment variable consulted by [`level_from_env`].
pub const LEVEL_ENV: &str = "FETCHBIND_LOG";

/// Logs a trace-level message under the [`LOG_TARGET`] target.
#[macro_export]
macro_rules! bind_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the [`LOG_TARGET`] target.
#[macro_export]
macro_rules! bind_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the [`LOG_TARGET`] target.
#[macro_export]
macro_rules! bind_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the [`LOG_TARGET`] target.
#[macro_export]
macro_rules! bind_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the [`LOG_TARGET`] target.
#[macro_export]
macro_rules! bind_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Reads the level filter from [`LEVEL_ENV`], falling back to `default`
/// when the variable is unset or not a valid level name.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level_from_env(fallback),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
