//! edlink Library
//!
//! Opens `editor:` URIs in the user's text editor. The binary parses
//! [`cli::Args`] and hands them to [`run`].

pub mod cli;

use std::io;

use edlink_app::config::{init_config, resolve_settings, settings_path};
use edlink_app::{install, run_self_test, Dispatcher, EditorRegistry, InstallRequest, Settings};
use edlink_core::prelude::*;
use edlink_core::{logging, PROTOCOL_NAME};
use edlink_launch::{DesktopNotifier, Notifier, SystemLauncher, TerminalWrapper};

use crate::cli::{Args, Mode};

/// Main application entry point
///
/// Runs the selected mode once. Any error is logged and shown as a desktop
/// notification before being returned.
pub fn run(args: Args) -> Result<()> {
    // File logging only; a failure here must not stop the editor from opening
    if let Err(e) = logging::init() {
        eprintln!("edlink: logging disabled: {}", e);
    }

    info!("edlink {} starting: {:?}", env!("CARGO_PKG_VERSION"), args);

    let settings = match resolve_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report_fatal(&DesktopNotifier::default(), &e);
            return Err(e);
        }
    };

    let notifier = DesktopNotifier::new(settings.behavior.notifications);
    let result = run_mode(&args, &settings, &notifier);

    if let Err(ref e) = result {
        report_fatal(&notifier, e);
    }

    info!("edlink exiting");
    result
}

fn run_mode<N: Notifier>(args: &Args, settings: &Settings, notifier: &N) -> Result<()> {
    let registry = EditorRegistry::from_settings(settings);
    let launcher = SystemLauncher::new(TerminalWrapper::new(
        &settings.terminal.command,
        &settings.terminal.exec_flag,
    ));
    let editor = args
        .editor
        .clone()
        .unwrap_or_else(|| settings.behavior.default_editor.clone());

    match args.mode() {
        Mode::SelfTest => run_self_test(
            &registry,
            &launcher,
            notifier,
            &mut io::stdin().lock(),
            &mut io::stdout().lock(),
        ),
        Mode::Install => {
            let request = InstallRequest::for_current_exe(editor, args.config.clone())?;
            let installed = install(&request, &registry, &launcher)?;

            if args.config.is_none() {
                if let Some(path) = settings_path() {
                    if init_config(&path)? {
                        eprintln!("Created default config at {}", path.display());
                    }
                }
            }

            eprintln!("Installed {}", installed.display());
            eprintln!(
                "You might want to check if it works with \"xdg-open '{}:///path/to/some/file'\"",
                PROTOCOL_NAME
            );
            Ok(())
        }
        Mode::Open(uri) => {
            let uri = uri.ok_or(Error::MissingUri)?;
            let result = Dispatcher::new(&registry, &launcher, notifier).open_uri(&uri, &editor)?;
            info!(
                "Opened with {}{}: {}",
                result.editor,
                if result.fell_back { " (fallback)" } else { "" },
                result.command
            );
            Ok(())
        }
    }
}

fn report_fatal<N: Notifier + ?Sized>(notifier: &N, err: &Error) {
    error!("Fatal: {:?}", err);
    notifier.notify(&err.to_string());
}
