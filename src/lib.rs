//! heapwatch - In-process memory usage observation
//!
//! This crate samples the memory counters of the running process, logs them
//! with contextual labels, wraps synchronous and asynchronous operations to
//! report before/after deltas, classifies heap usage against warning and
//! critical thresholds, and can force an allocator collection cycle for
//! debugging.
//!
//! # Features
//!
//! - **Sampling**: heap used, heap total, resident set size and external bytes
//! - **Usage logging**: megabyte-formatted log lines with caller context and
//!   threshold alerts
//! - **Operation monitoring**: Start/End/Error lines around closures and futures
//! - **Forced collection**: returns free allocator memory to the OS where supported
//! - **Status queries**: warning/critical classification without logging
//!
//! # Examples
//!
//! ```rust
//! use heapwatch::prelude::{MemoryObserver, Thresholds};
//!
//! let observer = MemoryObserver::new()
//!     .with_thresholds(Thresholds::new(256 * 1024 * 1024, 512 * 1024 * 1024))
//!     .with_log_fn(|message, data| println!("{message}{data:?}"));
//!
//! let total: Result<u64, std::num::ParseIntError> =
//!     observer.monitor("parse", || Ok("12".parse::<u64>()? + 30));
//! assert_eq!(total.unwrap(), 42);
//!
//! let status = observer.status();
//! println!("heap: {} MB ({})", status.heap_used_mb, status.level());
//! ```
//!
//! # Logging
//!
//! Nothing is logged unless a sink is configured. [`logging::tracing_sink`]
//! and [`logging::log_sink`] forward lines to the `tracing` and `log`
//! facades; any `Fn(&str, &LogData)` closure works as well.
//!
//! # Error Handling
//!
//! Observation itself never fails. Errors and panics from monitored
//! operations are passed back to the caller unchanged. The crate [`Error`]
//! type only covers configuration loading:
//!
//! ```rust
//! use heapwatch::{memory::Thresholds, Error};
//!
//! assert!(matches!(Thresholds::from_megabytes(-1.0, 10.0), Err(Error::InvalidData(_))));
//! ```
//!
//! # Thread Safety
//!
//! [`MemoryObserver`](monitor::MemoryObserver) is `Send + Sync + Clone`.
//! Every call works on freshly captured samples, so concurrent calls are
//! independent; their log lines may interleave.

#![doc(html_root_url = "https://docs.rs/heapwatch/0.1.0")]

pub mod error;
pub mod logging;
pub mod memory;
pub mod monitor;
pub mod units;

pub use error::{Error, Result};
pub use logging::{LogData, LogSink};
pub use memory::{MemoryProvider, MemorySample, MemoryStatus, ProcessMemory, Thresholds};
pub use monitor::MemoryObserver;

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::logging::{LogData, LogSink};
    pub use crate::memory::{
        CountingAllocator, MemoryDelta, MemoryProvider, MemorySample, MemoryStatus, PressureLevel, ProcessMemory,
        Thresholds,
    };
    pub use crate::monitor::MemoryObserver;
    pub use crate::Error;
    pub use crate::Result;
}
