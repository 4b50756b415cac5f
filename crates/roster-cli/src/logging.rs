//! Logging setup for the roster binary
//!
//! Console output goes to stderr so that exported CSV on stdout stays clean.
//! An optional directory receives daily-rotated JSON logs.

use anyhow::Context;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable read for the log filter
pub const LOG_ENV: &str = "ROSTER_LOG";

const LOG_FILE_PREFIX: &str = "roster.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives, in `EnvFilter` syntax
    pub filter: String,

    /// Whether to include file/line information in console logs
    pub include_location: bool,

    /// Directory for JSON log files; no file logging when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn,roster=info".to_string(),
            include_location: cfg!(debug_assertions),
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Replace the filter when one is given
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            self.filter = filter;
        }
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }
}

/// Install the global subscriber. The returned guard flushes file logs when
/// dropped and must be kept alive until exit.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter: {:?}", config.filter))?;

    let mut layers = Vec::new();

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_writer(std::io::stderr)
        .with_filter(env_filter.clone())
        .boxed();
    layers.push(console_layer);

    let mut guard = None;
    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .json()
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();
        layers.push(json_layer);
    }

    tracing_subscriber::registry().with(layers).init();

    tracing::debug!(
        filter = %config.filter,
        log_dir = ?config.log_dir,
        "logging initialized"
    );
    Ok(guard)
}
