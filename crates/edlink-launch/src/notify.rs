//! User-facing desktop notifications
//!
//! edlink usually runs without a visible terminal (it is started by the
//! desktop's URI handling), so problems are surfaced with `notify-send`.

use std::process::{Command, Stdio};

use edlink_core::prelude::*;

/// Program used to show desktop notifications
pub const NOTIFY_SEND: &str = "notify-send";

/// Sink for messages the user should see.
pub trait Notifier {
    /// Show `message` to the user. Delivery failures are logged, never returned.
    fn notify(&self, message: &str);
}

/// [`Notifier`] that shells out to `notify-send`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    enabled: bool,
    program: String,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DesktopNotifier {
    /// Create a notifier; a disabled one only logs.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            program: NOTIFY_SEND.to_string(),
        }
    }

    /// Use a different notification program (same CLI as `notify-send`).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        info!("Notification: {}", message);
        if !self.enabled {
            return;
        }

        let result = Command::new(&self.program)
            .arg(message)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("{} exited with {}", self.program, status),
            Err(e) => warn!("Failed to run {}: {}", self.program, e),
        }
    }
}
