use std::env;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE_PATH: &str = "./logs/audit.log";
const DEFAULT_FILE_NAME: &str = "audit.log";

/// Install the stdout and file layers. Stdout follows `TRACING_LEVEL`
/// (default `info`), the file follows `FILE_TRACING_LEVEL` (default `debug`).
pub fn init_logger() -> impl Drop {
    let stdout_filter = env_filter("TRACING_LEVEL", "info");
    let file_filter = env_filter("FILE_TRACING_LEVEL", "debug");

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
    let (directory, file_name) = split_log_path(&log_file_path);

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true)
                .with_filter(stdout_filter),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false)
                .with_filter(file_filter),
        )
        .init();

    info!("Logging to stdout and {}", log_file_path);

    guard
}

fn env_filter(variable: &str, default: &str) -> EnvFilter {
    let directives = env::var(variable).unwrap_or_else(|_| default.to_string());
    EnvFilter::new(directives)
}

/// Split a log file path into the directory the appender writes into and
/// the file name inside it. A bare file name logs to the working directory.
fn split_log_path(raw: &str) -> (PathBuf, String) {
    let path = Path::new(raw);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (directory, file_name)
}
