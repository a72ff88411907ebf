//! Platform memory statistics.
//!
//! glibc targets read heap counters from `mallinfo2` and can return free
//! arena pages to the OS with `malloc_trim`. macOS sums the statistics of all
//! malloc zones. Other targets (musl, Windows, the BSDs) have no allocator
//! statistics and report zero heap usage unless
//! [`CountingAllocator`](super::CountingAllocator) is installed, which also
//! takes precedence on every platform. Resident set size comes from the
//! `memory-stats` crate.

use tracing::{debug, trace};

use super::allocator;

/// Whether this build reads heap counters without a counting allocator
pub(crate) const HEAP_STATS_SUPPORTED: bool =
    cfg!(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos"));

/// Whether this build can trim the allocator on demand
pub(crate) const TRIM_SUPPORTED: bool = cfg!(all(target_os = "linux", target_env = "gnu"));

/// Heap counters as reported by the platform, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct HeapCounters {
    pub used: u64,
    pub total: u64,
    pub external: u64,
}

/// Read heap counters, preferring an installed counting allocator.
pub(crate) fn heap_counters() -> HeapCounters {
    if allocator::is_active() {
        return HeapCounters {
            used: allocator::live_bytes(),
            total: allocator::peak_bytes(),
            external: 0,
        };
    }
    malloc_counters()
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn malloc_counters() -> HeapCounters {
    // SAFETY: mallinfo2 only reads allocator state and returns it by value.
    let info = unsafe { libc::mallinfo2() };
    HeapCounters {
        used: info.uordblks as u64,
        total: info.arena as u64,
        external: info.hblkhd as u64,
    }
}

#[cfg(target_os = "macos")]
fn malloc_counters() -> HeapCounters {
    // SAFETY: malloc_statistics_t is plain integers, so all-zero is valid.
    let mut stats: libc::malloc_statistics_t = unsafe { std::mem::zeroed() };
    // SAFETY: a null zone asks for the sum over every registered zone; `stats` is a valid out pointer.
    unsafe { libc::malloc_zone_statistics(std::ptr::null_mut(), &mut stats) };
    HeapCounters {
        used: stats.size_in_use as u64,
        total: stats.size_allocated as u64,
        external: 0,
    }
}

#[cfg(not(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos")))]
fn malloc_counters() -> HeapCounters {
    trace!("No allocator statistics on this platform; reporting zero heap usage");
    HeapCounters::default()
}

/// Resident set size of the current process, or 0 if the platform cannot tell.
pub(crate) fn resident_bytes() -> u64 {
    match memory_stats::memory_stats() {
        Some(usage) => usage.physical_mem as u64,
        None => {
            trace!("Resident set size unavailable");
            0
        }
    }
}

/// Return free heap memory to the OS. Returns whether anything was released.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub(crate) fn trim() -> bool {
    // SAFETY: malloc_trim is thread-safe and takes no pointers.
    let released = unsafe { libc::malloc_trim(0) } != 0;
    debug!(released, "malloc_trim completed");
    released
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub(crate) fn trim() -> bool {
    debug!("Allocator trimming is not supported on this platform");
    false
}
