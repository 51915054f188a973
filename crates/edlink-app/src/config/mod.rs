//! Configuration file parsing for edlink
//!
//! Supports:
//! - `~/.config/edlink/config.toml` - Global settings
//! - `--config <path>` - Explicit settings file

pub mod settings;
pub mod types;

pub use settings::{init_config, load_settings, resolve_settings, settings_path};
pub use types::*;
