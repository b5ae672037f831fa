use std::io;
use std::path::Path;

use anyhow::Context;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

pub(crate) const LOG_FILE_PREFIX: &str = "phishguard-chat.log";

/// Where log lines go besides the rolling file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LogMirror {
    FileOnly,
    Stderr,
}

impl LogMirror {
    /// The TUI owns the terminal, so stderr is only mirrored in headless runs.
    pub(crate) fn for_run(log_to_stderr: bool, headless: bool) -> Self {
        if log_to_stderr && headless {
            LogMirror::Stderr
        } else {
            LogMirror::FileOnly
        }
    }
}

pub(crate) fn init_tracing(log_dir: &Path, mirror: LogMirror) -> anyhow::Result<WorkerGuard> {
    let (file_writer, file_guard) = file_writer(log_dir)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer(file_writer));

    match mirror {
        LogMirror::Stderr => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false);
            registry.with(stderr_layer).init();
        }
        LogMirror::FileOnly => registry.init(),
    }

    Ok(file_guard)
}

fn file_writer(log_dir: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

fn file_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn stderr_is_mirrored_only_in_headless_runs() {
        assert_eq!(LogMirror::for_run(true, true), LogMirror::Stderr);
        assert_eq!(LogMirror::for_run(true, false), LogMirror::FileOnly);
        assert_eq!(LogMirror::for_run(false, true), LogMirror::FileOnly);
    }

    #[test]
    fn events_land_in_prefixed_json_file() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let (writer, guard) = file_writer(&log_dir).unwrap();
        let subscriber = tracing_subscriber::registry().with(file_layer(writer));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(url = "paypal.tk", "prediction submitted");
        });
        drop(guard);

        let entry = std::fs::read_dir(&log_dir)
            .unwrap()
            .map(|entry| entry.unwrap())
            .find(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .expect("log file");
        let contents = std::fs::read_to_string(entry.path()).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["fields"]["message"], "prediction submitted");
        assert_eq!(line["fields"]["url"], "paypal.tk");
    }

    #[test]
    fn unusable_log_dir_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = file_writer(&blocker).unwrap_err();

        assert!(err.to_string().contains("failed to create log directory"));
    }
}
