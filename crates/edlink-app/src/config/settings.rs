//! Settings parser for ~/.config/edlink/config.toml

use super::types::Settings;
use edlink_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const EDLINK_DIR: &str = "edlink";

/// Location of the user's settings file, if a config directory is known.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(EDLINK_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load settings for this invocation.
///
/// An explicitly requested file (`--config`) must exist and parse. Otherwise
/// the user's settings file is read leniently, as in [`load_settings`].
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    let Some(path) = explicit else {
        return Ok(settings_path()
            .map(|path| load_settings(&path))
            .unwrap_or_default());
    };

    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a commented default `config.toml` at `config_path` if none exists.
///
/// Returns `true` when a file was created. Existing files are never touched.
pub fn init_config(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    std::fs::write(config_path, generate_default_config())
        .map_err(|e| Error::config(format!("Failed to write {}: {}", config_path.display(), e)))?;

    info!("Created default config at {:?}", config_path);
    Ok(true)
}

fn generate_default_config() -> String {
    r#"# edlink Configuration

[behavior]
default_editor = "vim"   # Used when --editor is not given
notifications = true     # Report errors with notify-send

[terminal]
# Hosts terminal editors (vim, nvim, emacs-tty)
command = "x-terminal-emulator"
exec_flag = "-e"

[opener]
# Tried in order by the "default" editor
candidates = ["xdg-open", "open"]

# Extra editors, or overrides of the built-in ones by name.
# kind: "terminal", "direct", "client-server" or "system-default"
# [[editors]]
# name = "nvim-qt"
# kind = "direct"
# command = "nvim-qt"
"#
    .to_string()
}
