//! Desktop registration of edlink as the `editor:` URI scheme handler.
//!
//! Writes a desktop entry declaring `x-scheme-handler/editor`, validates it
//! with `desktop-file-validate`, and installs it into the user's
//! applications directory with `desktop-file-install`, which also rebuilds
//! the MIME cache.

use std::path::{Path, PathBuf};

use edlink_core::prelude::*;
use edlink_core::PROTOCOL_NAME;
use edlink_launch::ProcessLauncher;

use crate::editor::EditorRegistry;

/// File name of the installed desktop entry
pub const DESKTOP_FILE_NAME: &str = "edlink.desktop";

const DESKTOP_FILE_VALIDATE: &str = "desktop-file-validate";
const DESKTOP_FILE_INSTALL: &str = "desktop-file-install";

/// Characters that force an `Exec` argument to be quoted
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

/// What to register and where.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Editor passed to `--editor` when the desktop opens a URI
    pub editor: String,
    /// Program the desktop entry runs
    pub executable: PathBuf,
    /// Settings file passed via `--config`, if one was used at install time
    pub config: Option<PathBuf>,
    /// Directory receiving the desktop entry
    pub applications_dir: PathBuf,
}

impl InstallRequest {
    /// Register the running binary into `~/.local/share/applications`.
    pub fn for_current_exe(editor: impl Into<String>, config: Option<PathBuf>) -> Result<Self> {
        let executable = std::env::current_exe()
            .map_err(|e| Error::install(format!("cannot locate own executable: {}", e)))?;
        Ok(Self {
            editor: editor.into(),
            executable,
            config,
            applications_dir: applications_dir()?,
        })
    }

    /// The `Exec=` value: `<executable> --editor <editor> [--config <file>] %u`.
    pub fn exec_line(&self) -> String {
        let mut args = vec![
            self.executable.to_string_lossy().into_owned(),
            "--editor".to_string(),
            self.editor.clone(),
        ];
        if let Some(config) = &self.config {
            args.push("--config".to_string());
            args.push(config.to_string_lossy().into_owned());
        }

        let mut line = args
            .iter()
            .map(|arg| quote_exec_arg(arg))
            .collect::<Vec<_>>()
            .join(" ");
        line.push_str(" %u");
        line
    }
}

/// `$XDG_DATA_HOME/applications` (usually `~/.local/share/applications`)
pub fn applications_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("applications"))
        .ok_or_else(|| Error::install("could not determine the user data directory"))
}

/// Render the desktop entry for `exec_line`.
pub fn desktop_entry(exec_line: &str) -> String {
    format!(
        "[Desktop Entry]\n\
         Name=Open file in your text editor\n\
         Exec={exec_line}\n\
         Type=Application\n\
         Terminal=false\n\
         MimeType=x-scheme-handler/{PROTOCOL_NAME};\n"
    )
}

/// Quote one `Exec` argument following the desktop entry spec.
///
/// Quoting escapes are applied first, then the string-level escape doubles
/// every backslash. Literal `%` becomes `%%` so it is not read as a field code.
fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    if !arg.contains(EXEC_RESERVED) {
        return arg;
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted.replace('\\', "\\\\")
}

/// Validate and install the desktop entry described by `request`.
///
/// Returns the path of the installed entry.
pub fn install<L>(request: &InstallRequest, registry: &EditorRegistry, launcher: &L) -> Result<PathBuf>
where
    L: ProcessLauncher + ?Sized,
{
    if !registry.contains(&request.editor) {
        let known = registry.names().collect::<Vec<_>>().join(", ");
        return Err(Error::install(format!(
            "unknown editor '{}', expected one of: {}",
            request.editor, known
        )));
    }

    let staging = tempfile::Builder::new()
        .prefix("edlink-install")
        .tempdir()
        .context("Failed to create staging directory")?;
    let entry_path = staging.path().join(DESKTOP_FILE_NAME);
    std::fs::write(&entry_path, desktop_entry(&request.exec_line()))
        .with_context(|| format!("Failed to write {}", entry_path.display()))?;
    debug!("Staged desktop entry at {:?}", entry_path);

    run_tool(
        launcher,
        &[DESKTOP_FILE_VALIDATE.to_string(), path_arg(&entry_path)],
    )?;
    run_tool(
        launcher,
        &[
            DESKTOP_FILE_INSTALL.to_string(),
            "--dir".to_string(),
            path_arg(&request.applications_dir),
            "--rebuild-mime-info-cache".to_string(),
            path_arg(&entry_path),
        ],
    )?;

    let installed = request.applications_dir.join(DESKTOP_FILE_NAME);
    info!("Installed {} for editor {}", installed.display(), request.editor);
    Ok(installed)
}

fn run_tool<L: ProcessLauncher + ?Sized>(launcher: &L, argv: &[String]) -> Result<()> {
    launcher.run(argv).map_err(|e| match e {
        Error::LaunchFailed { program, reason } => {
            Error::install(format!("{} failed: {}", program, reason))
        }
        other => other,
    })
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
