//! Memory sampling module
//!
//! This module provides the memory-statistics primitive every other part of
//! the crate is built on: a [`MemoryProvider`] that captures a
//! [`MemorySample`] of the current process, plus the data types used to
//! classify it against [`Thresholds`].
//!
//! # Features
//!
//! - Heap used / heap total / external counters from the allocator
//! - Resident set size of the whole process
//! - Optional forced collection (allocator trim) for debugging
//! - Warning/critical classification of heap usage
//!
//! # Examples
//!
//! ```no_run
//! use heapwatch::memory::{MemoryProvider, MemoryStatus, ProcessMemory, Thresholds};
//!
//! let memory = ProcessMemory::new();
//! let sample = memory.sample();
//!
//! println!("Heap used: {} MB", sample.heap_used_mb());
//! println!("Heap total: {} MB", sample.heap_total_mb());
//! println!("Resident: {} MB", sample.rss_mb());
//!
//! let status = MemoryStatus::from_sample(&sample, &Thresholds::default());
//! println!("Heap pressure: {}", status.level());
//! ```
//!
//! Tests and embedders can supply their own [`MemoryProvider`] to replace the
//! live process counters with fixed samples.

/// Counting global allocator
pub mod allocator;

/// Memory monitoring constants
pub mod constants;

/// Memory data types
pub mod types;

mod platform;

pub use allocator::CountingAllocator;
pub use types::*;

#[cfg(test)]
use mockall::automock;

/// Source of process memory statistics
///
/// Implementations must answer synchronously and without failing.
#[cfg_attr(test, automock)]
pub trait MemoryProvider: Send + Sync + std::fmt::Debug {
    /// Capture the current memory counters
    fn sample(&self) -> MemorySample;

    /// Whether [`collect`](MemoryProvider::collect) is available
    fn supports_collection(&self) -> bool {
        false
    }

    /// Run a forced collection cycle; a no-op when unsupported
    fn collect(&self) {}
}

/// [`MemoryProvider`] backed by the live counters of the current process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMemory {
    collection: bool,
}

impl ProcessMemory {
    /// Creates a provider for the current process.
    ///
    /// Forced collection is available when the platform supports allocator
    /// trimming (glibc targets).
    pub fn new() -> Self {
        Self {
            collection: platform::TRIM_SUPPORTED,
        }
    }

    /// Creates a provider that never exposes forced collection
    pub fn without_collection() -> Self {
        Self { collection: false }
    }

    /// Whether heap counters are real on this platform.
    ///
    /// True on glibc and macOS, or anywhere a [`CountingAllocator`] is the
    /// global allocator. Otherwise samples report zero heap usage, so
    /// threshold alerts never fire.
    pub fn has_heap_statistics(&self) -> bool {
        platform::HEAP_STATS_SUPPORTED || allocator::is_active()
    }
}

impl Default for ProcessMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider for ProcessMemory {
    fn sample(&self) -> MemorySample {
        let heap = platform::heap_counters();
        MemorySample {
            heap_used: heap.used,
            heap_total: heap.total,
            rss: platform::resident_bytes(),
            external: heap.external,
        }
    }

    fn supports_collection(&self) -> bool {
        self.collection
    }

    fn collect(&self) {
        if self.collection {
            platform::trim();
        }
    }
}
