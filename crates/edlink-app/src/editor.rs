//! Editor registry and dispatch for opening decoded targets.
//!
//! Each editor identifier (`vim`, `emacs`, `default`, ...) maps to a launch
//! strategy that knows how to turn a [`DecodedTarget`] into a [`LaunchCommand`].
//! The registry is built once from [`Settings`] and handed to a [`Dispatcher`],
//! which runs the command through a [`ProcessLauncher`].

use std::collections::BTreeMap;
use std::iter;

use edlink_core::prelude::*;
use edlink_core::{parse_uri, DecodedTarget};
use edlink_launch::{LaunchCommand, Notifier, ProcessLauncher};

use crate::config::{EditorEntry, EditorKind, Settings};

/// Editor used when the requested one is unknown or unusable
pub const FALLBACK_EDITOR: &str = "vim";

/// Makes emacsclient start a server when none is running
const ALTERNATE_EDITOR_ARG: &str = "--alternate-editor=";

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// How an editor is launched, with the rule for building its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStrategy {
    /// `[binary, +line, path]` inside a terminal emulator
    Terminal { binary: String },
    /// `[binary, +line, path]` started directly
    Direct { binary: String },
    /// `[client, --create-frame|--tty, --alternate-editor=, +line, path]`
    ClientServer { client: String, tty: bool },
    /// `[opener, path]` with the first opener found on `PATH`
    SystemDefault { openers: Vec<String> },
}

impl EditorStrategy {
    /// Build the command that opens `target`.
    ///
    /// Only [`EditorStrategy::SystemDefault`] consults the launcher (for the
    /// `PATH` lookup) and can fail, with [`Error::NoDefaultOpenerFound`].
    pub fn build_command<L>(&self, target: &DecodedTarget, launcher: &L) -> Result<LaunchCommand>
    where
        L: ProcessLauncher + ?Sized,
    {
        match self {
            EditorStrategy::Terminal { binary } => Ok(LaunchCommand::in_terminal(
                iter::once(binary.clone()).chain(target.line_args()),
            )),
            EditorStrategy::Direct { binary } => Ok(LaunchCommand::direct(
                iter::once(binary.clone()).chain(target.line_args()),
            )),
            EditorStrategy::ClientServer { client, tty } => {
                let frame_arg = if *tty { "--tty" } else { "--create-frame" };
                let argv = [client.clone(), frame_arg.to_string(), ALTERNATE_EDITOR_ARG.to_string()]
                    .into_iter()
                    .chain(target.line_args());
                Ok(if *tty {
                    LaunchCommand::in_terminal(argv)
                } else {
                    LaunchCommand::direct(argv)
                })
            }
            EditorStrategy::SystemDefault { openers } => {
                let opener = openers
                    .iter()
                    .find(|name| launcher.find_program(name).is_some())
                    .ok_or_else(|| Error::no_default_opener(openers.as_slice()))?;
                if let Some(line) = target.line {
                    // No generic way to pass a line through xdg-open/open
                    debug!("Dropping line {} for {}", line, opener);
                }
                Ok(LaunchCommand::direct([opener.clone(), target.path.clone()]))
            }
        }
    }

    /// Whether [`EditorStrategy::build_command`] can fail for this strategy.
    fn can_fail(&self) -> bool {
        matches!(self, EditorStrategy::SystemDefault { .. })
    }

    /// Build a strategy from a `[[editors]]` config entry.
    ///
    /// Returns `None` when the entry lacks the command its kind needs.
    fn from_entry(entry: &EditorEntry, openers: &[String]) -> Option<Self> {
        let command = entry.command.clone().filter(|c| !c.trim().is_empty());
        match entry.kind {
            EditorKind::Terminal => command.map(|binary| Self::Terminal { binary }),
            EditorKind::Direct => command.map(|binary| Self::Direct { binary }),
            EditorKind::ClientServer => command.map(|client| Self::ClientServer {
                client,
                tty: entry.tty,
            }),
            EditorKind::SystemDefault => Some(Self::SystemDefault {
                openers: command.map(|c| vec![c]).unwrap_or_else(|| openers.to_vec()),
            }),
        }
    }
}

/// A named editor and its launch strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSpec {
    pub name: String,
    pub strategy: EditorStrategy,
}

impl EditorSpec {
    pub fn new(name: impl Into<String>, strategy: EditorStrategy) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    fn vim() -> Self {
        Self::new(
            FALLBACK_EDITOR,
            EditorStrategy::Terminal {
                binary: "vim".to_string(),
            },
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only table of editor identifiers, built once at startup.
#[derive(Debug, Clone)]
pub struct EditorRegistry {
    editors: BTreeMap<String, EditorSpec>,
    fallback: EditorSpec,
}

impl EditorRegistry {
    /// Built-in editors: `emacs`, `emacs-tty`, `vim`, `nvim`, `gvim`, `default`.
    pub fn builtin(openers: Vec<String>) -> Self {
        let specs = [
            EditorSpec::new(
                "emacs",
                EditorStrategy::ClientServer {
                    client: "emacsclient".to_string(),
                    tty: false,
                },
            ),
            EditorSpec::new(
                "emacs-tty",
                EditorStrategy::ClientServer {
                    client: "emacsclient".to_string(),
                    tty: true,
                },
            ),
            EditorSpec::vim(),
            EditorSpec::new(
                "nvim",
                EditorStrategy::Terminal {
                    binary: "nvim".to_string(),
                },
            ),
            EditorSpec::new(
                "gvim",
                EditorStrategy::Direct {
                    binary: "gvim".to_string(),
                },
            ),
            EditorSpec::new("default", EditorStrategy::SystemDefault { openers }),
        ];

        Self {
            editors: specs
                .into_iter()
                .map(|spec| (spec.name.clone(), spec))
                .collect(),
            fallback: EditorSpec::vim(),
        }
    }

    /// Built-in editors plus the `[[editors]]` entries from `settings`.
    ///
    /// Entries replace built-ins of the same name. Overriding `vim` also
    /// changes the fallback editor, so a `vim` entry must be a kind that
    /// cannot itself need a fallback (`system-default` is rejected).
    pub fn from_settings(settings: &Settings) -> Self {
        let openers = &settings.opener.candidates;
        let mut registry = Self::builtin(openers.clone());

        for entry in &settings.editors {
            match EditorStrategy::from_entry(entry, openers) {
                Some(strategy) if entry.name == FALLBACK_EDITOR && strategy.can_fail() => warn!(
                    "Ignoring editor {}: the fallback editor cannot be of kind {}",
                    entry.name, entry.kind
                ),
                Some(strategy) => {
                    debug!("Registered editor {} ({})", entry.name, entry.kind);
                    registry
                        .editors
                        .insert(entry.name.clone(), EditorSpec::new(&entry.name, strategy));
                }
                None => warn!(
                    "Ignoring editor {}: kind {} needs a command",
                    entry.name, entry.kind
                ),
            }
        }

        if let Some(vim) = registry.editors.get(FALLBACK_EDITOR) {
            registry.fallback = vim.clone();
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&EditorSpec> {
        self.editors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.editors.contains_key(name)
    }

    /// The vim entry used for every fallback.
    pub fn fallback(&self) -> &EditorSpec {
        &self.fallback
    }

    /// Registered identifiers, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.editors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditorSpec> {
        self.editors.values()
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

impl Default for EditorRegistry {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Result of opening a target in an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenResult {
    /// Editor whose strategy was actually used
    pub editor: String,
    /// Command that was launched
    pub command: LaunchCommand,
    /// Whether the requested editor was replaced by the fallback
    pub fell_back: bool,
}

/// Maps editor identifiers to strategies and launches them.
pub struct Dispatcher<'a, L: ?Sized, N: ?Sized> {
    registry: &'a EditorRegistry,
    launcher: &'a L,
    notifier: &'a N,
}

impl<'a, L, N> Dispatcher<'a, L, N>
where
    L: ProcessLauncher + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(registry: &'a EditorRegistry, launcher: &'a L, notifier: &'a N) -> Self {
        Self {
            registry,
            launcher,
            notifier,
        }
    }

    /// Decode `uri` and open it with `editor_id`.
    pub fn open_uri(&self, uri: &str, editor_id: &str) -> Result<OpenResult> {
        let target = parse_uri(uri)?;
        info!("Opening {} with {}", target, editor_id);
        self.dispatch(&target, editor_id)
    }

    /// Open `target` with the editor registered as `editor_id`.
    ///
    /// An unknown identifier, or a `default` editor with no opener on `PATH`,
    /// is reported to the user and replaced by the vim strategy. Launch
    /// failures are returned as [`Error::LaunchFailed`]; nothing is retried.
    pub fn dispatch(&self, target: &DecodedTarget, editor_id: &str) -> Result<OpenResult> {
        let mut fell_back = false;

        let spec = match self.registry.get(editor_id) {
            Some(spec) => spec,
            None => {
                self.report(&Error::unknown_editor(editor_id));
                fell_back = true;
                self.registry.fallback()
            }
        };

        let (spec, command) = match spec.strategy.build_command(target, self.launcher) {
            Ok(command) => (spec, command),
            Err(err) if err.is_recoverable() => {
                self.report(&err);
                fell_back = true;
                let fallback = self.registry.fallback();
                (fallback, fallback.strategy.build_command(target, self.launcher)?)
            }
            Err(err) => return Err(err),
        };

        self.launcher.launch(&command)?;

        Ok(OpenResult {
            editor: spec.name.clone(),
            command,
            fell_back,
        })
    }

    fn report(&self, err: &Error) {
        warn!("{}", err);
        self.notifier.notify(&err.to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
