//! File logging. The terminal UI owns stdout and stderr, so records go to
//! `<log_dir>/pathviz.log` only.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "pathviz.log";

/// Non-blocking writer appending to the log file in `log_dir`, created if
/// missing. Records are flushed when the guard is dropped.
pub fn file_writer(log_dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Install the global subscriber, filtered by `RUST_LOG` (default `info`).
///
/// `init` also installs the `log` bridge, so records from the search crates
/// end up in the same file. Keep the returned guard alive until exit.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    let (writer, guard) = file_writer(log_dir)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_guard_flushes_records() {
        let dir = tempfile::tempdir().unwrap();
        let (writer, guard) = file_writer(dir.path()).unwrap();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("visualizer closed");
        });
        drop(guard);

        let text = std::fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        assert!(text.contains("visualizer closed"), "{text}");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let (_writer, _guard) = file_writer(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
