use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".coffer/logs")
}

/// Install the global tracing subscriber for a binary using this crate.
///
/// Logs roll daily under `$COFFER_LOG_DIR` (default `~/.coffer/logs`) with
/// the component name as the file prefix; `to_stderr` adds a human-readable
/// stderr layer. The library itself only emits events and never installs a
/// subscriber, so embedders keep full control of their logging setup.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = std::env::var("COFFER_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_log_dir());
    let _ = std::fs::create_dir_all(&log_dir);

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, component));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(false),
            )
            .init();
    } else {
        registry.init();
    }

    guard
}
