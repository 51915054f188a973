//! Test doubles for the launcher and notifier traits

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

use edlink_core::prelude::*;

use crate::command::LaunchCommand;
use crate::launcher::ProcessLauncher;
use crate::notify::Notifier;

/// Launcher that records every command instead of spawning it.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    /// Programs reported as present by `find_program`
    pub available: HashSet<String>,
    /// Programs whose launch fails
    pub failing: HashSet<String>,
    commands: RefCell<Vec<LaunchCommand>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_available(mut self, program: &str) -> Self {
        self.available.insert(program.to_string());
        self
    }

    pub fn with_failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    /// Commands launched so far, in order
    pub fn commands(&self) -> Vec<LaunchCommand> {
        self.commands.borrow().clone()
    }

    fn record(&self, command: LaunchCommand) -> Result<()> {
        let program = command.program().to_string();
        self.commands.borrow_mut().push(command);
        if self.failing.contains(&program) {
            return Err(Error::launch_failed(program, "exit status: 1"));
        }
        Ok(())
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn run(&self, argv: &[String]) -> Result<()> {
        self.record(LaunchCommand::direct(argv.iter().cloned()))
    }

    fn run_in_terminal(&self, argv: &[String]) -> Result<()> {
        self.record(LaunchCommand::in_terminal(argv.iter().cloned()))
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        self.available
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }
}

/// Notifier that keeps messages in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
