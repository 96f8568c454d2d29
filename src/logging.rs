// src/logging.rs
use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Console plus a daily rolling file in `log_dir`. `RUST_LOG` overrides `level`.
///
/// The console layer is installed even when `log_dir` cannot be created; the
/// directory error is returned afterwards.
pub fn init_logging(log_dir: &Path, level: &str) -> Result<()> {
    let dir_ready = std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()));

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = dir_ready.as_ref().ok().map(|_| {
        fmt::layer()
            .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, "a11y-insights.log"))
            .with_ansi(false)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    // A second init (tests, re-entry) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    dir_ready
}
