//! Memory observation
//!
//! [`MemoryObserver`] bundles the three capabilities every observation needs:
//! a [`MemoryProvider`], the [`Thresholds`] to classify against and an
//! optional [`LogSink`]. Each method captures fresh samples and keeps no
//! state between calls, so an observer can be cloned and shared freely
//! across threads and tasks.
//!
//! # Examples
//!
//! ```no_run
//! use heapwatch::monitor::MemoryObserver;
//!
//! let observer = MemoryObserver::new().with_tracing();
//!
//! observer.log_usage("startup", None);
//!
//! let rows: Result<Vec<u32>, std::io::Error> = observer.monitor("load rows", || Ok(vec![1, 2, 3]));
//!
//! let status = observer.status();
//! if status.is_warning {
//!     observer.force_collection("after load");
//! }
//! ```

mod collection;
mod operation;
mod usage;

use std::fmt;
use std::sync::Arc;

use crate::logging::{self, LogData, LogSink};
use crate::memory::{MemoryProvider, MemorySample, MemoryStatus, ProcessMemory, Thresholds};

/// Samples, logs and classifies process memory usage
#[derive(Clone)]
pub struct MemoryObserver {
    provider: Arc<dyn MemoryProvider>,
    thresholds: Thresholds,
    sink: Option<LogSink>,
}

impl fmt::Debug for MemoryObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryObserver")
            .field("provider", &self.provider)
            .field("thresholds", &self.thresholds)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Default for MemoryObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryObserver {
    /// Observer over the current process with default thresholds and no sink
    pub fn new() -> Self {
        Self {
            provider: Arc::new(ProcessMemory::new()),
            thresholds: Thresholds::default(),
            sink: None,
        }
    }

    /// Replace the memory statistics source
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: MemoryProvider + 'static,
    {
        self.provider = Arc::new(provider);
        self
    }

    /// Share an existing memory statistics source
    pub fn with_shared_provider(mut self, provider: Arc<dyn MemoryProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use a closure as the log sink
    pub fn with_log_fn<F>(self, log: F) -> Self
    where
        F: Fn(&str, &LogData) + Send + Sync + 'static,
    {
        self.with_sink(Arc::new(log))
    }

    /// Forward log lines to `tracing`
    pub fn with_tracing(self) -> Self {
        self.with_sink(logging::tracing_sink())
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Capture the current memory counters
    pub fn sample(&self) -> MemorySample {
        self.provider.sample()
    }

    /// Classify current heap usage against the configured thresholds.
    ///
    /// Never logs.
    pub fn status(&self) -> MemoryStatus {
        MemoryStatus::from_sample(&self.sample(), &self.thresholds)
    }

    fn emit(&self, message: &str, data: &LogData) {
        if let Some(sink) = &self.sink {
            sink(message, data);
        }
    }
}
