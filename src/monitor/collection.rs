use serde_json::Value;
use tracing::{debug, trace};

use super::MemoryObserver;
use crate::logging::LogData;
use crate::memory::constants::{COLLECTION_OPERATION, CONTEXT_KEY, HEAP_FREED_KEY};
use crate::units::{delta_megabytes, format_signed_mb};

impl MemoryObserver {
    /// Force a collection cycle and log how much heap it released.
    ///
    /// Logs once under `"Forced Garbage Collection"` with `heapFreed`
    /// (before minus after; negative when the heap grew) and `context`.
    /// When the provider has no collection primitive nothing happens and
    /// nothing is logged.
    pub fn force_collection(&self, context: &str) {
        if !self.provider.supports_collection() {
            trace!(context, "Forced collection unavailable; skipping");
            return;
        }

        let before = self.sample();
        self.provider.collect();
        let after = self.sample();

        let freed = (before - after).heap_used;
        debug!(context, freed_bytes = freed, "Forced collection completed");

        let mut data = LogData::new();
        data.insert(HEAP_FREED_KEY.into(), Value::from(format_signed_mb(delta_megabytes(freed))));
        data.insert(CONTEXT_KEY.into(), Value::from(context));
        self.log_sample(COLLECTION_OPERATION, &after, Some(data));
    }
}
