use std::env;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "VIDSCOUT_LOG";
const LOG_FILE: &str = "vidscout.log";

/// Installs the global subscriber. The TUI owns the terminal, so events go to
/// `<log_dir>/vidscout.log`; `verbose` adds a stderr layer for headless runs.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logger(log_dir: &Path, verbose: bool) -> WorkerGuard {
    let filter = env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(false)
            .without_time()
            .with_target(false)
    });

    let registry = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(stderr_layer);

    // A second init (tests, embedding) keeps the first subscriber.
    if registry.try_init().is_ok() {
        info!(dir = %log_dir.display(), "logging initialised");
    }

    guard
}
