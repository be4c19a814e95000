//! Tracing subscriber setup

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogFormat;

/// Returns the default filter directive for the given verbosity.
///
/// Output on stdout is the report itself, so logs stay at `warn` unless asked.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize tracing on stderr, plus `log_file` when given.
///
/// `RUST_LOG` takes precedence over the verbosity flags. The returned guard
/// must be kept alive until exit so buffered file output is flushed.
pub fn init(
    verbose: u8,
    quiet: bool,
    format: LogFormat,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let stderr_layer = match format {
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("log path {:?} has no file name", path))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
