//! # edlink-launch - Editor Process Management
//!
//! Runs editors and helper tools as blocking child processes, optionally
//! inside a terminal emulator, and delivers desktop notifications.
//!
//! Depends on [`edlink_core`] for error handling.
//!
//! ## Public API
//!
//! ### Process Launching
//! - [`ProcessLauncher`] - Launch interface (direct, in-terminal, PATH lookup)
//! - [`SystemLauncher`] - Implementation backed by `std::process::Command`
//! - [`TerminalWrapper`] - Terminal emulator invocation with shell quoting
//! - [`LaunchCommand`] - Argument vector plus terminal flag
//!
//! ### Notifications
//! - [`Notifier`] - User-facing message sink
//! - [`DesktopNotifier`] - `notify-send` implementation

pub mod command;
pub mod launcher;
pub mod notify;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use command::LaunchCommand;
pub use launcher::{
    ProcessLauncher, SystemLauncher, TerminalWrapper, DEFAULT_TERMINAL,
    DEFAULT_TERMINAL_EXEC_FLAG,
};
pub use notify::{DesktopNotifier, Notifier, NOTIFY_SEND};
