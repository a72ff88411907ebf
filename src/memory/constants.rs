/// Bytes in one megabyte (MiB), the unit used for every reported value
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Default warning threshold for heap usage (bytes)
pub const DEFAULT_WARNING_THRESHOLD: u64 = 256 * 1024 * 1024;

/// Default critical threshold for heap usage (bytes)
pub const DEFAULT_CRITICAL_THRESHOLD: u64 = 512 * 1024 * 1024;

/// Prefix of the primary usage log line; the operation label and `": "` follow
pub const USAGE_MESSAGE_PREFIX: &str = "Memory Usage - ";

/// Alert line emitted when heap usage exceeds the critical threshold
pub const CRITICAL_MESSAGE: &str = "Critical memory usage detected: ";

/// Alert line emitted when heap usage exceeds the warning threshold
pub const WARNING_MESSAGE: &str = "High memory usage detected: ";

/// Operation label used when logging a forced collection
pub const COLLECTION_OPERATION: &str = "Forced Garbage Collection";

/// Label suffixes appended by the operation monitors
pub const START_SUFFIX: &str = " - Start";
pub const END_SUFFIX: &str = " - End";
pub const ERROR_SUFFIX: &str = " - Error";

// Payload keys
pub const HEAP_USED_KEY: &str = "heapUsed";
pub const HEAP_TOTAL_KEY: &str = "heapTotal";
pub const RSS_KEY: &str = "rss";
pub const EXTERNAL_KEY: &str = "external";
pub const OPERATION_KEY: &str = "operation";
pub const HEAP_USED_DELTA_KEY: &str = "heapUsedDelta";
pub const HEAP_TOTAL_DELTA_KEY: &str = "heapTotalDelta";
pub const HEAP_FREED_KEY: &str = "heapFreed";
pub const CONTEXT_KEY: &str = "context";
