use heapwatch::memory::{MemoryProvider, ProcessMemory};
use heapwatch::MemoryObserver;

use crate::common::{CaptureSink, TestMemoryBuilder, MIB};

#[test]
fn test_collection_unavailable() {
    let capture = CaptureSink::new();
    let memory = TestMemoryBuilder::new().with_heap_used(600 * MIB).build();
    let observer = MemoryObserver::new().with_provider(memory.clone()).with_sink(capture.sink());

    observer.force_collection("manual");

    assert!(capture.is_empty());
    assert_eq!(memory.reads(), 0);
    assert_eq!(memory.collections(), 0);
}

#[test]
fn test_collection_reports_freed_heap() {
    let capture = CaptureSink::new();
    let memory = TestMemoryBuilder::new()
        .with_heap_used(20 * MIB)
        .with_heap_used(15 * MIB)
        .with_collection(true)
        .build();
    let observer = MemoryObserver::new().with_provider(memory.clone()).with_sink(capture.sink());

    observer.force_collection("manual");

    assert_eq!(memory.collections(), 1);
    assert_eq!(memory.reads(), 2);
    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].message, "Memory Usage - Forced Garbage Collection: ");
    assert_eq!(lines[0].data["heapFreed"], "+5MB");
    assert_eq!(lines[0].data["context"], "manual");
}

#[test]
fn test_collection_above_threshold_alerts() {
    let capture = CaptureSink::new();
    let memory = TestMemoryBuilder::new()
        .with_heap_used(700 * MIB)
        .with_heap_used(600 * MIB)
        .with_collection(true)
        .build();
    let observer = MemoryObserver::new().with_provider(memory).with_sink(capture.sink());

    observer.force_collection("still high");

    assert_eq!(
        capture.messages(),
        ["Memory Usage - Forced Garbage Collection: ", "Critical memory usage detected: "]
    );
}

#[test]
fn test_process_collection_never_fails() {
    let capture = CaptureSink::new();
    let observer = MemoryObserver::new().with_sink(capture.sink());
    observer.force_collection("live");

    let expected = usize::from(ProcessMemory::new().supports_collection());
    assert_eq!(capture.count("Memory Usage - Forced Garbage Collection: "), expected);

    let disabled = CaptureSink::new();
    MemoryObserver::new()
        .with_provider(ProcessMemory::without_collection())
        .with_sink(disabled.sink())
        .force_collection("live");
    assert!(disabled.is_empty());
}
