use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use heapwatch::memory::{MemoryProvider, MemorySample};
use parking_lot::Mutex;

/// Builder for scripted memory providers
pub struct TestMemoryBuilder {
    samples: Vec<MemorySample>,
    collection: bool,
}

impl TestMemoryBuilder {
    /// Create a new TestMemoryBuilder with no samples and no collection primitive
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            collection: false,
        }
    }

    /// Queue a full sample
    pub fn with_sample(mut self, sample: MemorySample) -> Self {
        self.samples.push(sample);
        self
    }

    /// Queue a sample with the given heap usage; heap total matches it
    pub fn with_heap_used(self, bytes: u64) -> Self {
        self.with_sample(MemorySample::new(bytes, bytes, bytes, 0))
    }

    /// Expose a forced-collection primitive
    pub fn with_collection(mut self, enabled: bool) -> Self {
        self.collection = enabled;
        self
    }

    pub fn build(self) -> ScriptedMemory {
        ScriptedMemory {
            samples: Arc::new(Mutex::new(self.samples.into())),
            last: Arc::new(Mutex::new(MemorySample::default())),
            collection: self.collection,
            reads: Arc::new(AtomicUsize::new(0)),
            collections: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Default for TestMemoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider returning queued samples in order, then repeating the last one.
///
/// Clones share their queue and counters.
#[derive(Debug, Clone)]
pub struct ScriptedMemory {
    samples: Arc<Mutex<VecDeque<MemorySample>>>,
    last: Arc<Mutex<MemorySample>>,
    collection: bool,
    reads: Arc<AtomicUsize>,
    collections: Arc<AtomicUsize>,
}

impl ScriptedMemory {
    /// Number of samples taken so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of forced collections run so far
    pub fn collections(&self) -> usize {
        self.collections.load(Ordering::SeqCst)
    }
}

impl MemoryProvider for ScriptedMemory {
    fn sample(&self) -> MemorySample {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock();
        if let Some(next) = self.samples.lock().pop_front() {
            *last = next;
        }
        *last
    }

    fn supports_collection(&self) -> bool {
        self.collection
    }

    fn collect(&self) {
        self.collections.fetch_add(1, Ordering::SeqCst);
    }
}
