use serde_json::Value;
use tracing::trace;

use super::MemoryObserver;
use crate::logging::LogData;
use crate::memory::constants::{
    CRITICAL_MESSAGE, EXTERNAL_KEY, HEAP_TOTAL_KEY, HEAP_USED_KEY, OPERATION_KEY, RSS_KEY, USAGE_MESSAGE_PREFIX,
    WARNING_MESSAGE,
};
use crate::memory::MemorySample;
use crate::units::format_mb;

impl MemoryObserver {
    /// Sample memory and log it under `operation`.
    ///
    /// The sink receives `"Memory Usage - {operation}: "` with the four
    /// counters as megabyte strings, overlaid by `context` (caller keys win).
    /// If the raw heap usage is above the critical threshold a
    /// `"Critical memory usage detected: "` line follows; otherwise, above the
    /// warning threshold, a `"High memory usage detected: "` line follows.
    pub fn log_usage(&self, operation: &str, context: Option<LogData>) {
        let sample = self.sample();
        self.log_sample(operation, &sample, context);
    }

    pub(crate) fn log_sample(&self, operation: &str, sample: &MemorySample, context: Option<LogData>) {
        if self.sink.is_none() {
            trace!(operation, "No log sink configured; skipping memory usage line");
            return;
        }

        let mut data = usage_payload(sample);
        if let Some(context) = context {
            data.extend(context);
        }
        self.emit(&format!("{USAGE_MESSAGE_PREFIX}{operation}: "), &data);

        let alert = if self.thresholds.is_critical(sample.heap_used) {
            Some(CRITICAL_MESSAGE)
        } else if self.thresholds.is_warning(sample.heap_used) {
            Some(WARNING_MESSAGE)
        } else {
            None
        };
        if let Some(message) = alert {
            self.emit(message, &alert_payload(sample, operation));
        }
    }
}

fn usage_payload(sample: &MemorySample) -> LogData {
    let mut data = LogData::new();
    data.insert(HEAP_USED_KEY.into(), Value::from(format_mb(sample.heap_used_mb())));
    data.insert(HEAP_TOTAL_KEY.into(), Value::from(format_mb(sample.heap_total_mb())));
    data.insert(RSS_KEY.into(), Value::from(format_mb(sample.rss_mb())));
    data.insert(EXTERNAL_KEY.into(), Value::from(format_mb(sample.external_mb())));
    data
}

fn alert_payload(sample: &MemorySample, operation: &str) -> LogData {
    let mut data = LogData::new();
    data.insert(HEAP_USED_KEY.into(), Value::from(sample.heap_used));
    data.insert(HEAP_TOTAL_KEY.into(), Value::from(sample.heap_total));
    data.insert(RSS_KEY.into(), Value::from(sample.rss));
    data.insert(EXTERNAL_KEY.into(), Value::from(sample.external));
    data.insert(OPERATION_KEY.into(), Value::from(operation));
    data
}
