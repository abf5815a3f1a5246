use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Sets up logging to stderr, and to `log_file` as well when one is given.
///
/// Standard output is reserved for the result table. The level defaults to `info`
/// and can be changed with `RUST_LOG`. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn setup_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
