//! Command-line arguments and mode selection

use std::path::PathBuf;

use clap::Parser;

/// edlink - open editor:// links in your text editor
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "edlink", version)]
#[command(
    about = "Open editor:// links in your text editor",
    long_about = "Open editor:// links in your text editor.\n\n\
                  Handles URIs like editor:///path/to/file:123 and \
                  editor:///path/to/file?line=456.\n\
                  Register the handler once with `edlink --install --editor emacs`, \
                  then check it with `xdg-open 'editor:///path/to/some/file'`."
)]
pub struct Args {
    /// URI to open, with an optional line number
    #[arg(value_name = "URI")]
    pub uri: Option<String>,

    /// Editor to use: emacs, emacs-tty, vim, nvim, gvim, default, or one from
    /// the config file. 'default' means your default GUI editor (discovered
    /// with xdg-open/open). Unknown names fall back to vim.
    #[arg(long, value_name = "NAME")]
    pub editor: Option<String>,

    /// Register edlink as the editor:// handler for your desktop
    #[arg(long)]
    pub install: bool,

    /// Run the built-in self-test
    #[arg(long)]
    pub run_tests: bool,

    /// Settings file to use instead of ~/.config/edlink/config.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What a single invocation does. Exactly one mode runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    SelfTest,
    Install,
    Open(Option<String>),
}

impl Args {
    /// Select the mode, in priority order: tests, install, open.
    pub fn mode(&self) -> Mode {
        if self.run_tests {
            Mode::SelfTest
        } else if self.install {
            Mode::Install
        } else {
            Mode::Open(self.uri.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("edlink").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_open_mode_with_uri() {
        let args = parse(&["editor:///etc/hosts:3"]);
        assert_eq!(args.mode(), Mode::Open(Some("editor:///etc/hosts:3".into())));
        assert!(args.editor.is_none());
    }

    #[test]
    fn test_editor_flag() {
        let args = parse(&["--editor", "emacs", "editor:///a"]);
        assert_eq!(args.editor.as_deref(), Some("emacs"));
    }

    #[test]
    fn test_unknown_editor_accepted() {
        let args = parse(&["--editor", "nano", "editor:///a"]);
        assert_eq!(args.editor.as_deref(), Some("nano"));
    }

    #[test]
    fn test_tests_beat_install() {
        let args = parse(&["--install", "--run-tests"]);
        assert_eq!(args.mode(), Mode::SelfTest);
    }

    #[test]
    fn test_install_beats_open() {
        let args = parse(&["--install", "--editor", "gvim", "editor:///a"]);
        assert_eq!(args.mode(), Mode::Install);
    }

    #[test]
    fn test_open_without_uri() {
        assert_eq!(parse(&[]).mode(), Mode::Open(None));
    }

    #[test]
    fn test_config_flag() {
        let args = parse(&["--config", "/tmp/edlink.toml", "editor:///a"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/edlink.toml")));
    }
}
