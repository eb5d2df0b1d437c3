//! Logging Module
//!
//! Sets up `tracing` for the client:
//! - human-readable output on stderr (stdout stays free for command output)
//! - optional JSON log file with daily rotation (tracing-appender)
//! - `log` crate records forwarded into tracing

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::AppConfig;

const LOG_FILE_PREFIX: &str = "lancer-reserves.log";

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `logging.filter`. Returns the file
/// writer's `WorkerGuard` when file logging is enabled; keep it alive for the
/// duration of the application so buffered lines are flushed on shutdown.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init(config: &AppConfig) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(build_filter(&config.logging.filter));

    let (file_layer, guard) = if config.logging.file {
        let log_dir = config.log_dir();
        match prepare_log_dir(&log_dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_target(true)
                    .with_filter(build_filter(&config.logging.filter));
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Failed to create logs directory {}: {e}", log_dir.display());
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let installed = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(file_logging = guard.is_some(), "Logging initialized");
    }

    guard
}

fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn prepare_log_dir(log_dir: &Path) -> io::Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
    }
    Ok(())
}
