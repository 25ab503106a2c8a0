//! Two-phase logging setup.
//!
//! The console subscriber goes up before the settings are read so that
//! config directory and settings file events are not lost. Once the global
//! settings are loaded, [`LogHandle::apply_settings`] swaps in the configured
//! level and attaches the rolling JSON file layer.

use std::fs;
use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Layer, Registry};

use crate::domain::DomainError;

/// Base name of the rolling log file.
const LOG_FILE_PREFIX: &str = "comparer.log";

/// Level used until the global settings are read.
const STARTUP_LEVEL: &str = "info";

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type FileLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Filter directive for the crate at `level`, everything else at warn.
fn default_directive(level: &str) -> String {
    format!("comparer_lib={},comparer={},warn", level, level)
}

/// Handles into the installed subscriber for the settings-dependent parts.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    file: reload::Handle<Option<FileLayer>, FilteredRegistry>,
    /// `RUST_LOG` was set; it keeps precedence over the settings level.
    env_override: bool,
}

impl LogHandle {
    /// Apply the `logging` section of the global settings.
    ///
    /// Returns a guard that must be kept alive for the duration of the application.
    /// When the guard is dropped, any remaining file logs are flushed.
    pub fn apply_settings(
        &self,
        logs_dir: &Path,
        level: &str,
        file_logging: bool,
    ) -> Result<Option<WorkerGuard>, DomainError> {
        if !self.env_override {
            let filter = EnvFilter::try_new(default_directive(level))
                .map_err(|e| DomainError::Config(format!("invalid log level {:?}: {}", level, e)))?;
            self.filter
                .reload(filter)
                .map_err(|e| DomainError::Config(e.to_string()))?;
        }

        if !file_logging {
            tracing::info!(level = level, "Logging configured (console only)");
            return Ok(None);
        }

        fs::create_dir_all(logs_dir)?;
        let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE_PREFIX);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer: FileLayer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .boxed();
        self.file
            .reload(Some(file_layer))
            .map_err(|e| DomainError::Config(e.to_string()))?;

        tracing::info!(logs_dir = ?logs_dir, level = level, "Logging configured with file output");
        Ok(Some(guard))
    }
}

/// Build the subscriber: reloadable filter, empty file slot, console output.
fn build_subscriber(filter: EnvFilter, env_override: bool) -> (impl Subscriber + Send + Sync + 'static, LogHandle) {
    let (filter_layer, filter) = reload::Layer::new(filter);
    let (file_slot, file) = reload::Layer::new(None::<FileLayer>);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE);

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(file_slot)
        .with(console_layer);

    (
        subscriber,
        LogHandle {
            filter,
            file,
            env_override,
        },
    )
}

/// Install the console subscriber at the startup level (or `RUST_LOG`).
///
/// Returns `None` when a global subscriber is already set, in which case
/// settings are not applied to logging.
pub fn init_logging() -> Option<LogHandle> {
    let (filter, env_override) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directive(STARTUP_LEVEL)), false),
    };

    let (subscriber, handle) = build_subscriber(filter, env_override);
    subscriber.try_init().ok()?;
    Some(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "comparer_lib=debug,comparer=debug,warn");
        assert!(EnvFilter::try_new(default_directive("trace")).is_ok());
    }

    #[test]
    fn test_file_layer_attached_after_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let logs_dir = temp_dir.path().join("logs");
        let (subscriber, handle) = build_subscriber(EnvFilter::new(default_directive("info")), false);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("before settings");

            let guard = handle.apply_settings(&logs_dir, "debug", true).unwrap();
            assert!(guard.is_some());
            tracing::debug!(marker = "after-settings", "after settings");
            drop(guard);
        });

        let log_file = fs::read_dir(&logs_dir)
            .unwrap()
            .filter_map(Result::ok)
            .find(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .expect("rolling log file");
        let contents = fs::read_to_string(log_file.path()).unwrap();

        assert!(contents.contains("after-settings"));
        assert!(!contents.contains("before settings"));
    }

    #[test]
    fn test_console_only_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let logs_dir = temp_dir.path().join("logs");
        let (subscriber, handle) = build_subscriber(EnvFilter::new(default_directive("info")), false);

        tracing::subscriber::with_default(subscriber, || {
            let guard = handle.apply_settings(&logs_dir, "warn", false).unwrap();
            assert!(guard.is_none());
        });
        assert!(!logs_dir.exists());
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let (_subscriber, handle) = build_subscriber(EnvFilter::new(default_directive("info")), false);
        let temp_dir = tempfile::tempdir().unwrap();

        let err = handle
            .apply_settings(temp_dir.path(), "verbose", false)
            .unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
