//! Configuration types for edlink
//!
//! Defines:
//! - `Settings` - Global application settings (`config.toml`)
//! - `EditorEntry` / `EditorKind` - User-defined editors

use edlink_launch::{DEFAULT_TERMINAL, DEFAULT_TERMINAL_EXEC_FLAG};
use serde::{Deserialize, Serialize};

/// Application settings (`~/.config/edlink/config.toml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub terminal: TerminalSettings,

    #[serde(default)]
    pub opener: OpenerSettings,

    /// Additional editors, or overrides of built-in ones by name
    #[serde(default)]
    pub editors: Vec<EditorEntry>,
}

/// Behavior settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Editor used when `--editor` is not given
    #[serde(default = "default_editor")]
    pub default_editor: String,

    /// Show desktop notifications for errors and fallbacks
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            default_editor: default_editor(),
            notifications: true,
        }
    }
}

fn default_editor() -> String {
    "vim".to_string()
}

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal emulator hosting terminal-based editors
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TerminalSettings {
    /// Terminal emulator command (e.g. "x-terminal-emulator", "xdg-terminal", "kitty")
    #[serde(default = "default_terminal")]
    pub command: String,

    /// Flag that precedes the command line to run (empty for none)
    #[serde(default = "default_exec_flag")]
    pub exec_flag: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            command: default_terminal(),
            exec_flag: default_exec_flag(),
        }
    }
}

fn default_terminal() -> String {
    DEFAULT_TERMINAL.to_string()
}

fn default_exec_flag() -> String {
    DEFAULT_TERMINAL_EXEC_FLAG.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Opener Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Generic "open with the default application" commands, tried in order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenerSettings {
    #[serde(default = "default_opener_candidates")]
    pub candidates: Vec<String>,
}

impl Default for OpenerSettings {
    fn default() -> Self {
        Self {
            candidates: default_opener_candidates(),
        }
    }
}

fn default_opener_candidates() -> Vec<String> {
    vec!["xdg-open".to_string(), "open".to_string()]
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Entries
// ─────────────────────────────────────────────────────────────────────────────

/// How an editor is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    /// Needs an interactive terminal (vim, nvim, ...)
    Terminal,
    /// GUI editor started directly (gvim, ...)
    Direct,
    /// Client of a long-running editor server (emacsclient, ...)
    ClientServer,
    /// The desktop's generic opener; line numbers are dropped
    SystemDefault,
}

impl std::fmt::Display for EditorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorKind::Terminal => write!(f, "terminal"),
            EditorKind::Direct => write!(f, "direct"),
            EditorKind::ClientServer => write!(f, "client-server"),
            EditorKind::SystemDefault => write!(f, "system-default"),
        }
    }
}

/// A user-defined editor (`[[editors]]` table)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditorEntry {
    /// Identifier passed to `--editor`
    pub name: String,

    pub kind: EditorKind,

    /// Binary to run; required for every kind except `system-default`
    #[serde(default)]
    pub command: Option<String>,

    /// For `client-server`: run the client in the terminal (`--tty`)
    #[serde(default)]
    pub tty: bool,
}
