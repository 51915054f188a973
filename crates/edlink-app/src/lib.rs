//! edlink-app - Configuration, editor dispatch and desktop registration
//!
//! Turns a decoded `editor:` URI into a running editor: loads settings,
//! builds the editor registry, and dispatches through the launcher from
//! [`edlink_launch`]. Also hosts the `--install` registrar and the
//! `--run-tests` self-test.

pub mod config;
pub mod editor;
pub mod install;
pub mod selftest;

// Re-export primary types
pub use config::Settings;
pub use editor::{Dispatcher, EditorRegistry, EditorSpec, EditorStrategy, OpenResult, FALLBACK_EDITOR};
pub use install::{install, InstallRequest};
pub use selftest::{check_parse_cases, run_self_test};
