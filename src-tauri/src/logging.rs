use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_DIR: &str = "net.pokerogue.desktop";
const LOG_FILE: &str = "pokerogue-desktop.log";
const KEEP_LOG_DAYS: u64 = 7;

/// Installs console and daily-rolling file output. Keep the guard alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init_logging() -> WorkerGuard {
    let log_dir = log_directory();

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tao=warn,wry=warn"));

    let console_layer = fmt::layer().with_target(true).with_thread_ids(false);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized, log directory: {}", log_dir.display());
    tracing::info!("PokeRogue Desktop version: {}", env!("CARGO_PKG_VERSION"));

    let cutoff = SystemTime::now() - Duration::from_secs(KEEP_LOG_DAYS * 24 * 60 * 60);
    let removed = cleanup_old_logs(&log_dir, LOG_FILE, cutoff);
    if removed > 0 {
        tracing::debug!("Removed {} old log files", removed);
    }

    guard
}

fn log_directory() -> PathBuf {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs");

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    log_dir
}

/// Removes rotated `<prefix>.<date>` files last modified before `cutoff`.
/// Returns how many were removed.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, cutoff: SystemTime) -> usize {
    let entries = match std::fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to read log directory for cleanup: {}", e);
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();

        let is_rotated = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(prefix) && name != prefix);
        if !is_rotated {
            continue;
        }

        let Some(modified) = entry.metadata().and_then(|m| m.modified()).ok() else {
            continue;
        };

        if modified < cutoff {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to remove old log file {:?}: {}", path, e),
            }
        }
    }

    removed
}
