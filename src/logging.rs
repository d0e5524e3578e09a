//! File logging
//!
//! The terminal belongs to the UI, so logs only go to daily rolling files.
//! Old files are removed by a background task.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::task;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Keeps the non-blocking writer flushing; hold it until exit
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Default log directory (platform state dir, falling back to local data dir)
pub fn log_dir() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .context("Could not determine log directory")?;
    Ok(base.join("isstrack").join("logs"))
}

/// Install the global subscriber. Must run inside a tokio runtime context.
pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
    retention: Duration,
) -> Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let level = normalize_level(level);
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse::<Directive>()
                .with_context(|| format!("Invalid log level '{}'", level))?,
        )
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    start_log_cleanup_task(log_dir, prefix.to_string(), retention);

    Ok(LoggerGuard(guard))
}

/// Map unknown level names to `info`
fn normalize_level(level: &str) -> &str {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info",
    }
}

fn start_log_cleanup_task(log_dir: PathBuf, prefix: String, max_age: Duration) {
    const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

    task::spawn(async move {
        loop {
            if let Err(e) = cleanup_old_logs(&log_dir, &prefix, max_age) {
                tracing::warn!("Failed to delete old log file: {}", e);
            }
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(prefix) && file_name.ends_with(".log") {
                let modified = fs::metadata(&path)?.modified()?;
                if now.duration_since(modified).unwrap_or_default() > max_age {
                    fs::remove_file(&path)?;
                    tracing::info!("Old log file deleted: {}", file_name);
                    removed += 1;
                }
            }
        }
    }
    Ok(removed)
}
