//! Rolling Logger
//!
//! Sends `tracing` events (and `log` records, through the bridge installed by
//! `tracing-subscriber`) to stderr and to one log file per day.
//! Only the newest `MAX_LOG_FILES` files are kept in the log directory.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Number of daily files retained on disk
pub const MAX_LOG_FILES: usize = 7;

/// Daily file appender writing `{app_name}.{date}.log` into `log_dir`
pub fn file_appender(log_dir: impl AsRef<Path>, app_name: &str) -> Result<RollingFileAppender, String> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir.as_ref())
        .map_err(|e| format!("Failed to open log file: {}", e))
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. The returned
/// guard flushes the file writer when dropped; hold it for the life of the
/// process. Fails if a global subscriber is already set.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<WorkerGuard, String> {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_dir, app_name)?);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    Ok(guard)
}

pub fn info(msg: &str) {
    tracing::info!("{}", msg);
}

pub fn error(msg: &str) {
    tracing::error!("{}", msg);
}
