//! Logging initialization for fundamentals.
//!
//! Logs go to stderr unless `logging.to_file` is set, in which case they are
//! written to `<state>/logs/fundamentals-{datetime}.log`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the file writer flushing until dropped
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

/// Level filter to use: `--debug` wins over the configured level
fn effective_level(config: &Config, debug_override: bool) -> String {
    if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    }
}

/// A non-empty `RUST_LOG` replaces the level entirely
fn filter_directive(level: String, rust_log: Option<String>) -> String {
    rust_log.filter(|value| !value.trim().is_empty()).unwrap_or(level)
}

fn log_file_name(timestamp: DateTime<Utc>) -> String {
    format!("fundamentals-{}.log", timestamp.format("%Y%m%dT%H%M%SZ"))
}

/// Install the global subscriber. Keep the returned handle alive until exit.
pub fn init_logging(config: &Config, debug_override: bool) -> Result<LoggingHandle> {
    let directive = filter_directive(
        effective_level(config, debug_override),
        std::env::var("RUST_LOG").ok(),
    );
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;

    let mut handle = LoggingHandle {
        _guard: None,
        log_file_path: None,
    };

    let file_layer = if config.logging.to_file {
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

        let file_name = log_file_name(Utc::now());
        let appender = tracing_appender::rolling::never(&logs_dir, &file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        handle._guard = Some(guard);
        handle.log_file_path = Some(logs_dir.join(file_name));

        Some(fmt::layer().with_target(false).with_ansi(false).with_writer(writer))
    } else {
        None
    };
    let stderr_layer = file_layer
        .is_none()
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Logging was already initialized")?;

    Ok(handle)
}
