use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "async")]
use futures::FutureExt;
#[cfg(feature = "async")]
use std::future::Future;

use serde_json::Value;
use tracing::debug;

use super::MemoryObserver;
use crate::logging::LogData;
use crate::memory::constants::{END_SUFFIX, ERROR_SUFFIX, HEAP_TOTAL_DELTA_KEY, HEAP_USED_DELTA_KEY, START_SUFFIX};
use crate::memory::MemorySample;
use crate::units::format_signed_mb;

impl MemoryObserver {
    /// Run `operation` and log memory before and after it.
    ///
    /// Logs `"{label} - Start"`, runs `operation`, then logs either
    /// `"{label} - End"` with `heapUsedDelta`/`heapTotalDelta`, or
    /// `"{label} - Error"` when it returns `Err` or panics. The result is
    /// returned as-is and a panic is resumed with its original payload.
    pub fn monitor<T, E, F>(&self, label: &str, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let start = self.begin(label);
        match panic::catch_unwind(AssertUnwindSafe(operation)) {
            Ok(Ok(value)) => {
                self.finish(label, start);
                Ok(value)
            }
            Ok(Err(err)) => {
                self.fail(label);
                Err(err)
            }
            Err(payload) => {
                self.fail(label);
                panic::resume_unwind(payload)
            }
        }
    }

    /// Await `operation` and log memory before and after it.
    ///
    /// Same contract as [`monitor`](Self::monitor). The only suspension point
    /// is the await on `operation`; dropping the returned future cancels it
    /// without a terminal log line.
    #[cfg(feature = "async")]
    pub async fn monitor_async<T, E, Fut>(&self, label: &str, operation: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let start = self.begin(label);
        match AssertUnwindSafe(operation).catch_unwind().await {
            Ok(Ok(value)) => {
                self.finish(label, start);
                Ok(value)
            }
            Ok(Err(err)) => {
                self.fail(label);
                Err(err)
            }
            Err(payload) => {
                self.fail(label);
                panic::resume_unwind(payload)
            }
        }
    }

    fn begin(&self, label: &str) -> MemorySample {
        let start = self.sample();
        self.log_sample(&format!("{label}{START_SUFFIX}"), &start, None);
        start
    }

    fn finish(&self, label: &str, start: MemorySample) {
        let end = self.sample();
        let delta = end - start;
        debug!(
            operation = label,
            heap_used_delta = delta.heap_used,
            heap_total_delta = delta.heap_total,
            "Monitored operation completed"
        );

        let mut data = LogData::new();
        data.insert(HEAP_USED_DELTA_KEY.into(), Value::from(format_signed_mb(delta.heap_used_mb())));
        data.insert(HEAP_TOTAL_DELTA_KEY.into(), Value::from(format_signed_mb(delta.heap_total_mb())));
        self.log_sample(&format!("{label}{END_SUFFIX}"), &end, Some(data));
    }

    fn fail(&self, label: &str) {
        debug!(operation = label, "Monitored operation failed");
        let sample = self.sample();
        self.log_sample(&format!("{label}{ERROR_SUFFIX}"), &sample, None);
    }
}
