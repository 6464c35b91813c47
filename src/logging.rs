//! Logging utilities wrapping `tracing` initialisation
//!
//! Log records go to stderr; stdout is reserved for the per-card progress lines.
//! Environment overrides (`CARDGEN_LOG_*`) are folded into [`LoggingOptions`]
//! by [`crate::config::CardConfig::load`] before this module sees them.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the global tracing subscriber described by `options`.
///
/// A no-op when a subscriber is already installed.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = EnvFilter::try_new(&options.level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;
    let file = match &options.file {
        Some(path) => Some(file_layer::<FilteredRegistry>(path, options.rotation)?),
        None => None,
    };

    Registry::default()
        .with(filter)
        .with(file)
        .with(stderr_layer(options.color))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Non-blocking writer for the log file, appending or rolling per `rotation`.
fn file_writer(path: &Path, rotation: Option<LogRotation>) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!("Failed to create log directory {}: {e}", dir.display()))
    })?;

    let builder = NonBlockingBuilder::default().lossy(false);
    let Some(rotation) = rotation else {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| Error::Config(format!("Failed to open log file {}: {e}", path.display())))?;
        return Ok(builder.finish(file));
    };

    let file_name = path.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Log file path '{}' needs a file name for {rotation:?} rotation",
            path.display()
        ))
    })?;
    let appender = match rotation {
        LogRotation::Hourly => rolling::hourly(dir, file_name),
        LogRotation::Daily => rolling::daily(dir, file_name),
    };
    Ok(builder.finish(appender))
}

fn file_layer<S>(path: &Path, rotation: Option<LogRotation>) -> Result<BoxedLayer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let (writer, guard) = file_writer(path, rotation)?;
    // Dropping the guard would stop the writer thread.
    let _ = FILE_GUARD.set(guard);

    Ok(fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_writer(writer)
        .boxed())
}

fn stderr_layer<S>(color: bool) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .with_ansi(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_init_with_file_sink_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("cardgen.log");
        let options = LoggingOptions {
            level: "debug".to_string(),
            file: Some(path.clone()),
            color: false,
            rotation: None,
        };

        init(&options).unwrap();
        tracing::info!("file sink ready");

        assert!(path.is_file());
        // Second call leaves the installed subscriber alone.
        assert!(init(&options).is_ok());
    }

    #[test]
    fn test_rolling_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("rolling");
        let result = file_writer(&nested.join("cardgen.log"), Some(LogRotation::Daily));

        assert!(result.is_ok());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_rotation_requires_file_name() {
        let err = file_writer(&PathBuf::from("/"), Some(LogRotation::Hourly)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
