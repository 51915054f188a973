//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "edlink.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/edlink/logs/edlink.log.YYYY-MM-DD`,
/// never to the terminal: stdout and stderr belong to the user (and to
/// `--install` hints).
/// Log level is controlled by the `EDLINK_LOG` environment variable.
///
/// # Examples
/// ```bash
/// EDLINK_LOG=debug edlink 'editor:///etc/hosts:3'
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(&log_dir)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    // Default to info for all edlink* targets, allow override via EDLINK_LOG
    let env_filter = EnvFilter::try_from_env("EDLINK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("edlink=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    tracing::debug!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("edlink").join("logs")
}
