//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // URI Decoding Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unexpected protocol {uri}")]
    InvalidScheme { uri: String },

    #[error("Invalid line number '{value}' in {uri}")]
    InvalidLineNumber { uri: String, value: String },

    #[error("No URI provided. Try `edlink 'editor:///path/to/file:10'`.")]
    MissingUri,

    // ─────────────────────────────────────────────────────────────
    // Editor/Launch Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unexpected editor {name}! Falling back to vim")]
    UnknownEditor { name: String },

    #[error("No {candidates} found, can't figure out default editor. Fallback to vim!")]
    NoDefaultOpenerFound { candidates: String },

    #[error("Failed to launch {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Registration / Self-test Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to install desktop entry: {message}")]
    Install { message: String },

    #[error("Self-test failed: {failures} check(s) did not pass")]
    SelfTestFailed { failures: usize },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_scheme(uri: impl Into<String>) -> Self {
        Self::InvalidScheme { uri: uri.into() }
    }

    pub fn invalid_line_number(uri: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidLineNumber {
            uri: uri.into(),
            value: value.into(),
        }
    }

    pub fn unknown_editor(name: impl Into<String>) -> Self {
        Self::UnknownEditor { name: name.into() }
    }

    /// Build a [`Error::NoDefaultOpenerFound`] listing the candidates that were tried.
    pub fn no_default_opener<S: AsRef<str>>(candidates: &[S]) -> Self {
        let candidates = candidates
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        Self::NoDefaultOpenerFound { candidates }
    }

    pub fn launch_failed(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error is handled by falling back to another editor
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnknownEditor { .. } | Error::NoDefaultOpenerFound { .. }
        )
    }

    /// Check if this error should abort the current invocation
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
