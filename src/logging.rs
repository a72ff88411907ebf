//! Log sinks
//!
//! heapwatch never writes log output on its own. Every usage line and alert is
//! handed to a caller-supplied [`LogSink`]; when none is configured the line is
//! dropped. Ready-made sinks forward to `tracing` or to `log`.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::memory::constants::{CRITICAL_MESSAGE, WARNING_MESSAGE};

/// Structured payload attached to every log line
pub type LogData = serde_json::Map<String, Value>;

/// Callback receiving `(message, data)` for every emitted line
pub type LogSink = Arc<dyn Fn(&str, &LogData) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Warning,
    Critical,
}

fn severity(message: &str) -> Severity {
    if message.starts_with(CRITICAL_MESSAGE) {
        Severity::Critical
    } else if message.starts_with(WARNING_MESSAGE) {
        Severity::Warning
    } else {
        Severity::Info
    }
}

fn render(data: &LogData) -> String {
    serde_json::to_string(data).unwrap_or_default()
}

/// Sink that forwards lines to `tracing` under the `heapwatch` target.
///
/// Usage lines are emitted at `INFO`, high-usage alerts at `WARN` and
/// critical alerts at `ERROR`.
pub fn tracing_sink() -> LogSink {
    Arc::new(|message: &str, data: &LogData| {
        let message = message.trim_end();
        let data = render(data);
        match severity(message) {
            Severity::Critical => tracing::error!(target: "heapwatch", data = %data, "{message}"),
            Severity::Warning => tracing::warn!(target: "heapwatch", data = %data, "{message}"),
            Severity::Info => tracing::info!(target: "heapwatch", data = %data, "{message}"),
        }
    })
}

/// Sink that forwards lines to the `log` facade, with the same levels as [`tracing_sink`]
pub fn log_sink() -> LogSink {
    Arc::new(|message: &str, data: &LogData| {
        let level = match severity(message) {
            Severity::Critical => log::Level::Error,
            Severity::Warning => log::Level::Warn,
            Severity::Info => log::Level::Info,
        };
        log::log!(target: "heapwatch", level, "{}{}", message, render(data));
    })
}

/// Install a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call more than once;
/// an already-installed global subscriber is left in place.
pub fn init_tracing() {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}
