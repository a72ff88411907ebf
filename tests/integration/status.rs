use std::sync::Arc;

use heapwatch::memory::{MemoryProvider, PressureLevel, ProcessMemory, Thresholds};
use heapwatch::MemoryObserver;

use crate::common::{CaptureSink, TestMemoryBuilder, MIB};

#[test]
fn test_status_example() {
    let memory = TestMemoryBuilder::new()
        .with_sample(heapwatch::MemorySample::new(150 * MIB, 190 * MIB + MIB / 3, 0, 0))
        .build();
    let observer = MemoryObserver::new()
        .with_provider(memory)
        .with_thresholds(Thresholds::new(100 * MIB, 200 * MIB));

    let status = observer.status();
    assert!(status.is_warning);
    assert!(!status.is_critical);
    assert_eq!(status.heap_used_mb, 150.0);
    assert_eq!(status.heap_total_mb, 190.33);
    assert_eq!(status.level(), PressureLevel::Warning);
}

#[test]
fn test_status_never_logs() {
    let capture = CaptureSink::new();
    let observer = MemoryObserver::new()
        .with_provider(TestMemoryBuilder::new().with_heap_used(800 * MIB).build())
        .with_sink(capture.sink());

    let status = observer.status();
    assert!(status.is_critical);
    assert!(capture.is_empty());
}

#[test]
fn test_status_is_idempotent() {
    let observer = MemoryObserver::new().with_provider(TestMemoryBuilder::new().with_heap_used(42 * MIB).build());

    let first = serde_json::to_string(&observer.status()).unwrap();
    let second = serde_json::to_string(&observer.status()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_threshold_properties() {
    let pairs = [(100, 200), (200, 100), (0, 0), (u64::MAX, u64::MAX)];
    let heaps = [0, 1, 99, 100, 101, 150, 199, 200, 201, u64::MAX];

    for (warning, critical) in pairs {
        for heap in heaps {
            let observer = MemoryObserver::new()
                .with_provider(TestMemoryBuilder::new().with_heap_used(heap).build())
                .with_thresholds(Thresholds::new(warning, critical));

            let status = observer.status();
            assert_eq!(status.is_warning, heap > warning, "heap {heap} warning {warning}");
            assert_eq!(status.is_critical, heap > critical, "heap {heap} critical {critical}");
            assert_eq!(status.heap_used_mb, ((heap as f64 / 1024.0 / 1024.0) * 100.0).round() / 100.0);
        }
    }
}

#[test]
fn test_live_process_status() {
    let observer = MemoryObserver::new();
    let measured = ProcessMemory::new().has_heap_statistics();
    let sample = observer.sample();

    if measured {
        assert!(sample.heap_used > 0, "{sample:?}");
        assert!(sample.heap_total >= sample.heap_used, "{sample:?}");
    } else {
        assert_eq!(sample.heap_used, 0);
    }

    // Any measured heap is over a zero-byte warning limit
    let status = observer.with_thresholds(Thresholds::new(0, u64::MAX)).status();
    assert_eq!(status.is_warning, measured);
    assert!(!status.is_critical);
}

#[test]
fn test_observers_share_one_provider() {
    let memory = TestMemoryBuilder::new()
        .with_heap_used(10 * MIB)
        .with_heap_used(300 * MIB)
        .build();
    let shared: Arc<dyn MemoryProvider> = Arc::new(memory.clone());

    let relaxed = MemoryObserver::new().with_shared_provider(Arc::clone(&shared));
    let strict = MemoryObserver::new()
        .with_shared_provider(shared)
        .with_thresholds(Thresholds::new(MIB, 2 * MIB));

    assert!(!relaxed.status().is_warning);
    let status = strict.status();
    assert!(status.is_critical);
    assert_eq!(status.heap_used_mb, 300.0);
    assert_eq!(memory.reads(), 2);
}
