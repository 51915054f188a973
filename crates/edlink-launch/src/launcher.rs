//! Blocking process execution for editors and helper tools
//!
//! Every launch is attempted exactly once and waited on. For GUI and
//! client/server editors only the launcher command itself is awaited; the
//! editor may detach afterwards.

use std::path::PathBuf;
use std::process::Command;

use edlink_core::prelude::*;

use crate::command::LaunchCommand;

/// Terminal emulator used to host terminal-based editors
pub const DEFAULT_TERMINAL: &str = "x-terminal-emulator";

/// Flag that makes [`DEFAULT_TERMINAL`] execute a command line
pub const DEFAULT_TERMINAL_EXEC_FLAG: &str = "-e";

// ─────────────────────────────────────────────────────────────────────────────
// Launcher Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Process-launch interface the dispatcher and registrar run commands through.
pub trait ProcessLauncher {
    /// Run `argv` directly and wait for it.
    ///
    /// A missing binary or a non-zero exit is reported as
    /// [`Error::LaunchFailed`].
    fn run(&self, argv: &[String]) -> Result<()>;

    /// Run `argv` inside an interactive terminal emulator and wait for it.
    fn run_in_terminal(&self, argv: &[String]) -> Result<()>;

    /// Locate `name` on `PATH`.
    fn find_program(&self, name: &str) -> Option<PathBuf>;

    /// Run a [`LaunchCommand`], honouring its terminal flag.
    fn launch(&self, command: &LaunchCommand) -> Result<()> {
        info!("Launching {}", command);
        if command.terminal {
            self.run_in_terminal(&command.argv)
        } else {
            self.run(&command.argv)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal Wrapping
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal emulator invocation used by [`ProcessLauncher::run_in_terminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalWrapper {
    /// Terminal emulator binary
    pub command: String,
    /// Flag preceding the command line (may be empty)
    pub exec_flag: String,
}

impl Default for TerminalWrapper {
    fn default() -> Self {
        Self {
            command: DEFAULT_TERMINAL.to_string(),
            exec_flag: DEFAULT_TERMINAL_EXEC_FLAG.to_string(),
        }
    }
}

impl TerminalWrapper {
    pub fn new(command: impl Into<String>, exec_flag: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            exec_flag: exec_flag.into(),
        }
    }

    /// Build the terminal's own argv for running `argv` inside it.
    ///
    /// Each argument is shell-quoted and the result joined into a single
    /// command-line argument, e.g. `["x-terminal-emulator", "-e", "vim +3 '/a b'"]`.
    pub fn wrap(&self, argv: &[String]) -> Vec<String> {
        let mut wrapped = vec![self.command.clone()];
        if !self.exec_flag.is_empty() {
            wrapped.push(self.exec_flag.clone());
        }
        wrapped.push(shell_words::join(argv));
        wrapped
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System Launcher
// ─────────────────────────────────────────────────────────────────────────────

/// [`ProcessLauncher`] backed by real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    terminal: TerminalWrapper,
}

impl SystemLauncher {
    pub fn new(terminal: TerminalWrapper) -> Self {
        Self { terminal }
    }
}

impl ProcessLauncher for SystemLauncher {
    fn run(&self, argv: &[String]) -> Result<()> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::launch_failed("<empty>", "empty command line"))?;

        debug!("Spawning {} with {} argument(s)", program, args.len());

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| Error::launch_failed(program.as_str(), e.to_string()))?;

        if !status.success() {
            warn!("{} exited with {}", program, status);
            return Err(Error::launch_failed(program.as_str(), status.to_string()));
        }

        Ok(())
    }

    fn run_in_terminal(&self, argv: &[String]) -> Result<()> {
        self.run(&self.terminal.wrap(argv))
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name)
            .inspect_err(|e| debug!("{} not found on PATH: {}", name, e))
            .ok()
    }
}
