//! Launch commands handed to a [`crate::ProcessLauncher`]

use std::fmt;

/// An argument vector plus whether it needs an interactive terminal around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Program followed by its arguments
    pub argv: Vec<String>,
    /// Run inside a terminal emulator instead of directly
    pub terminal: bool,
}

impl LaunchCommand {
    /// A command launched directly (GUI editors, client/server clients, openers).
    pub fn direct<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            terminal: false,
        }
    }

    /// A command that must run inside an interactive terminal emulator.
    pub fn in_terminal<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            terminal: true,
        }
    }

    /// Program name (first argument), or `""` for an empty command.
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_words::join(&self.argv))?;
        if self.terminal {
            write!(f, " (in terminal)")?;
        }
        Ok(())
    }
}
