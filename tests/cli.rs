//! Integration tests for the `edlink` binary
//!
//! Every external program (terminal, editors, openers, notify-send, the
//! desktop-file tools) is replaced by a shell script on a private `PATH` that
//! records its argv into a log file.
//!
//! Run with: cargo test --test cli

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serial_test::serial;
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────
// Test Harness
// ─────────────────────────────────────────────────────────

/// Scratch environment with a fake `PATH` and isolated XDG directories.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["bin", "home", "config", "data"] {
            fs::create_dir_all(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    fn log_path(&self) -> PathBuf {
        self.root.path().join("calls.log")
    }

    fn config_home(&self) -> PathBuf {
        self.root.path().join("config")
    }

    fn data_home(&self) -> PathBuf {
        self.root.path().join("data")
    }

    /// Install a fake program that logs `name|arg1|arg2...` and exits with `code`.
    fn fake(&self, name: &str, code: i32) -> &Self {
        let script = format!(
            "#!/bin/sh\n\
             {{ printf '%s' '{name}'; for a in \"$@\"; do printf '|%s' \"$a\"; done; printf '\\n'; }} >> \"$EDLINK_TEST_LOG\"\n\
             exit {code}\n"
        );
        let path = self.bin_dir().join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_edlink"));
        cmd.env_clear()
            .env("PATH", self.bin_dir())
            .env("HOME", self.root.path().join("home"))
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env("TMPDIR", self.root.path())
            .env("EDLINK_TEST_LOG", self.log_path())
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    /// Recorded calls, one `prog|arg|arg` line each.
    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn calls_to(&self, program: &str) -> Vec<String> {
        let prefix = format!("{}|", program);
        self.calls()
            .into_iter()
            .filter(|line| line.starts_with(&prefix))
            .collect()
    }
}

fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

// ─────────────────────────────────────────────────────────
// Open Mode
// ─────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_vim_opens_in_terminal_with_line() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);

    let output = sandbox.run(&["editor:///tmp/my%20file.txt:12"]);

    assert!(output.status.success());
    assert_eq!(
        sandbox.calls_to("x-terminal-emulator"),
        vec!["x-terminal-emulator|-e|vim +12 '/tmp/my file.txt'"]
    );
    assert!(sandbox.calls_to("notify-send").is_empty());
}

#[test]
#[serial]
fn test_bad_scheme_fails_and_notifies() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);

    let output = sandbox.run(&["badmime://whatever"]);

    assert!(!output.status.success());
    assert!(sandbox.calls_to("x-terminal-emulator").is_empty());
    assert_eq!(
        sandbox.calls_to("notify-send"),
        vec!["notify-send|Unexpected protocol badmime://whatever"]
    );
}

#[test]
#[serial]
fn test_unknown_editor_falls_back_to_vim() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);

    let output = sandbox.run(&["--editor", "nano", "editor:///etc/hosts"]);

    assert!(output.status.success());
    assert_eq!(
        sandbox.calls_to("x-terminal-emulator"),
        vec!["x-terminal-emulator|-e|vim /etc/hosts"]
    );
    let notes = sandbox.calls_to("notify-send");
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("Unexpected editor nano"));
}

#[test]
#[serial]
fn test_default_without_opener_falls_back_to_vim() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);

    let output = sandbox.run(&["--editor", "default", "editor:///etc/hosts:4"]);

    assert!(output.status.success());
    assert_eq!(
        sandbox.calls_to("x-terminal-emulator"),
        vec!["x-terminal-emulator|-e|vim +4 /etc/hosts"]
    );
    let notes = sandbox.calls_to("notify-send");
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("No xdg-open/open found"));
}

#[test]
#[serial]
fn test_default_opener_ignores_line() {
    let sandbox = Sandbox::new();
    sandbox.fake("xdg-open", 0).fake("notify-send", 0);

    let output = sandbox.run(&["--editor", "default", "editor:///etc/hosts:4"]);

    assert!(output.status.success());
    assert_eq!(sandbox.calls(), vec!["xdg-open|/etc/hosts"]);
}

#[test]
#[serial]
fn test_gvim_launched_directly() {
    let sandbox = Sandbox::new();
    sandbox.fake("gvim", 0).fake("x-terminal-emulator", 0);

    let output = sandbox.run(&["--editor", "gvim", "editor:///src/main.rs?line=30"]);

    assert!(output.status.success());
    assert_eq!(sandbox.calls(), vec!["gvim|+30|/src/main.rs"]);
}

#[test]
#[serial]
fn test_launch_failure_exits_non_zero() {
    let sandbox = Sandbox::new();
    sandbox.fake("gvim", 1).fake("notify-send", 0);

    let output = sandbox.run(&["--editor", "gvim", "editor:///src/main.rs"]);

    assert!(!output.status.success());
    assert_eq!(sandbox.calls_to("gvim"), vec!["gvim|/src/main.rs"]);
    let notes = sandbox.calls_to("notify-send");
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("gvim"));
}

#[test]
#[serial]
fn test_emacs_client_arguments() {
    let sandbox = Sandbox::new();
    sandbox.fake("emacsclient", 0);

    let output = sandbox.run(&["--editor", "emacs", "editor:///a/b.txt:99?line=7"]);

    assert!(output.status.success());
    assert_eq!(
        sandbox.calls(),
        vec!["emacsclient|--create-frame|--alternate-editor=|+7|/a/b.txt:99"]
    );
}

#[test]
#[serial]
fn test_missing_uri_fails() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);

    let output = sandbox.run(&[]);

    assert!(!output.status.success());
    assert!(sandbox.calls_to("x-terminal-emulator").is_empty());
    assert_eq!(sandbox.calls_to("notify-send").len(), 1);
}

// ─────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_config_flag_sets_default_editor() {
    let sandbox = Sandbox::new();
    sandbox.fake("gvim", 0);
    let config = sandbox.root.path().join("custom.toml");
    write_config(&config, "[behavior]\ndefault_editor = \"gvim\"\n");

    let output = sandbox.run(&["--config", config.to_str().unwrap(), "editor:///x"]);

    assert!(output.status.success());
    assert_eq!(sandbox.calls(), vec!["gvim|/x"]);
}

#[test]
#[serial]
fn test_config_terminal_and_custom_editor() {
    let sandbox = Sandbox::new();
    sandbox.fake("kitty", 0);
    let dir = sandbox.config_home().join("edlink");
    fs::create_dir_all(&dir).unwrap();
    write_config(
        &dir.join("config.toml"),
        r#"
[terminal]
command = "kitty"
exec_flag = ""

[[editors]]
name = "hx"
kind = "terminal"
command = "hx"
"#,
    );

    let output = sandbox.run(&["--editor", "hx", "editor:///notes.md:2"]);

    assert!(output.status.success());
    assert_eq!(sandbox.calls(), vec!["kitty|hx +2 /notes.md"]);
}

#[test]
#[serial]
fn test_missing_explicit_config_fails() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);

    let output = sandbox.run(&["--config", "/nonexistent/edlink.toml", "editor:///x"]);

    assert!(!output.status.success());
    assert!(sandbox.calls_to("x-terminal-emulator").is_empty());
    assert_eq!(sandbox.calls_to("notify-send").len(), 1);
}

#[test]
#[serial]
fn test_notifications_can_be_disabled() {
    let sandbox = Sandbox::new();
    sandbox.fake("x-terminal-emulator", 0).fake("notify-send", 0);
    let config = sandbox.root.path().join("quiet.toml");
    write_config(&config, "[behavior]\nnotifications = false\n");

    let output = sandbox.run(&["--config", config.to_str().unwrap(), "badmime://x"]);

    assert!(!output.status.success());
    assert!(sandbox.calls().is_empty());
}

// ─────────────────────────────────────────────────────────
// Install and Self-Test Modes
// ─────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_install_runs_desktop_tools() {
    let sandbox = Sandbox::new();
    sandbox
        .fake("desktop-file-validate", 0)
        .fake("desktop-file-install", 0);

    let output = sandbox.run(&["--install", "--editor", "emacs"]);

    assert!(output.status.success());
    let calls = sandbox.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("desktop-file-validate|"));
    assert!(calls[0].ends_with("edlink.desktop"));

    let apps = sandbox.data_home().join("applications");
    assert!(calls[1].starts_with(&format!(
        "desktop-file-install|--dir|{}|--rebuild-mime-info-cache|",
        apps.display()
    )));

    assert!(sandbox.config_home().join("edlink/config.toml").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xdg-open 'editor:///path/to/some/file'"));
}

#[test]
#[serial]
fn test_install_rejects_unknown_editor() {
    let sandbox = Sandbox::new();
    sandbox
        .fake("desktop-file-validate", 0)
        .fake("desktop-file-install", 0)
        .fake("notify-send", 0);

    let output = sandbox.run(&["--install", "--editor", "nano"]);

    assert!(!output.status.success());
    assert!(sandbox.calls_to("desktop-file-validate").is_empty());
    assert!(sandbox.calls_to("desktop-file-install").is_empty());
}

#[test]
#[serial]
fn test_install_validation_failure() {
    let sandbox = Sandbox::new();
    sandbox
        .fake("desktop-file-validate", 1)
        .fake("desktop-file-install", 0)
        .fake("notify-send", 0);

    let output = sandbox.run(&["--install"]);

    assert!(!output.status.success());
    assert!(sandbox.calls_to("desktop-file-install").is_empty());
    assert_eq!(sandbox.calls_to("notify-send").len(), 1);
}

#[test]
#[serial]
fn test_run_tests_opens_every_editor() {
    let sandbox = Sandbox::new();
    for program in ["x-terminal-emulator", "emacsclient", "gvim", "xdg-open"] {
        sandbox.fake(program, 0);
    }

    let mut child = sandbox
        .command()
        .args(["--run-tests", "--install", "editor:///ignored"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Press enter when ready"));
    assert!(!stdout.contains("FAIL"));

    // emacs-tty goes through the terminal
    assert_eq!(sandbox.calls_to("emacsclient").len(), 1);
    assert_eq!(sandbox.calls_to("gvim").len(), 1);
    assert_eq!(sandbox.calls_to("xdg-open").len(), 1);
    // emacs-tty, nvim, vim
    assert_eq!(sandbox.calls_to("x-terminal-emulator").len(), 3);
    assert!(sandbox.calls_to("desktop-file-install").is_empty());

    let gvim = &sandbox.calls_to("gvim")[0];
    assert!(gvim.starts_with("gvim|+3|"));
    assert!(gvim.ends_with("some file.org"));
}
