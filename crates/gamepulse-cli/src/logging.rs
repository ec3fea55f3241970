//! Logging setup for the CLI
//!
//! Console output goes to stderr so stdout stays clean for JSON and query
//! strings. Passing a log directory adds a daily rolling file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,gamepulse_core=debug,gamepulse_cli=debug";

/// Initialize console logging, plus a rolling file under `log_dir` if given.
///
/// The returned guard must be held until exit so buffered file output is
/// flushed.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let (file_layer, guard) = match log_dir.and_then(file_writer) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::CLOSE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn file_writer(log_dir: &Path) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Warning: Failed to create log directory {}: {}", log_dir.display(), e);
        return None;
    }
    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "gamepulse.log");
    Some(tracing_appender::non_blocking(appender))
}
