use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::memory::constants::{BYTES_PER_MB, DEFAULT_CRITICAL_THRESHOLD, DEFAULT_WARNING_THRESHOLD};
use crate::units;

/// Heap usage classification derived from a [`MemoryStatus`]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PressureLevel {
    /// Heap usage is at or below the warning threshold
    Normal,
    /// Heap usage is above the warning threshold
    Warning,
    /// Heap usage is above the critical threshold
    Critical,
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Point-in-time snapshot of the process memory counters, in bytes
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySample {
    /// Bytes currently allocated on the heap
    pub heap_used: u64,
    /// Bytes reserved for the heap
    pub heap_total: u64,
    /// Resident set size of the whole process
    pub rss: u64,
    /// Bytes held in allocations made outside the main heap arenas
    pub external: u64,
}

impl MemorySample {
    pub fn new(heap_used: u64, heap_total: u64, rss: u64, external: u64) -> Self {
        Self {
            heap_used,
            heap_total,
            rss,
            external,
        }
    }

    pub fn heap_used_mb(&self) -> f64 {
        units::to_megabytes(self.heap_used)
    }

    pub fn heap_total_mb(&self) -> f64 {
        units::to_megabytes(self.heap_total)
    }

    pub fn rss_mb(&self) -> f64 {
        units::to_megabytes(self.rss)
    }

    pub fn external_mb(&self) -> f64 {
        units::to_megabytes(self.external)
    }
}

/// Signed difference between two samples (`later - earlier`)
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct MemoryDelta {
    pub heap_used: i64,
    pub heap_total: i64,
    pub rss: i64,
    pub external: i64,
}

impl MemoryDelta {
    pub fn heap_used_mb(&self) -> f64 {
        units::delta_megabytes(self.heap_used)
    }

    pub fn heap_total_mb(&self) -> f64 {
        units::delta_megabytes(self.heap_total)
    }
}

impl Sub for MemorySample {
    type Output = MemoryDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        // Saturates instead of wrapping when counters are further apart than i64 allows.
        fn diff(a: u64, b: u64) -> i64 {
            (i128::from(a) - i128::from(b)).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
        }

        MemoryDelta {
            heap_used: diff(self.heap_used, rhs.heap_used),
            heap_total: diff(self.heap_total, rhs.heap_total),
            rss: diff(self.rss, rhs.rss),
            external: diff(self.external, rhs.external),
        }
    }
}

/// Warning and critical heap thresholds, in bytes
///
/// The two limits are evaluated independently and their ordering is never
/// checked: a critical limit below the warning limit is accepted as-is.
///
/// # Examples
///
/// ```rust
/// use heapwatch::memory::Thresholds;
///
/// let thresholds = Thresholds::from_json(r#"{ "warningThreshold": 1048576 }"#).unwrap();
/// assert_eq!(thresholds.warning, 1024 * 1024);
/// assert_eq!(thresholds.critical, 512 * 1024 * 1024);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    #[serde(rename = "warningThreshold")]
    pub warning: u64,
    #[serde(rename = "criticalThreshold")]
    pub critical: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: DEFAULT_WARNING_THRESHOLD,
            critical: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(warning: u64, critical: u64) -> Self {
        Self { warning, critical }
    }

    /// Build thresholds from megabyte values.
    ///
    /// Fails only for negative or non-finite inputs.
    pub fn from_megabytes(warning_mb: f64, critical_mb: f64) -> Result<Self> {
        Ok(Self {
            warning: megabytes_to_bytes(warning_mb)?,
            critical: megabytes_to_bytes(critical_mb)?,
        })
    }

    /// Load thresholds from a JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_warning(&self, heap_used: u64) -> bool {
        heap_used > self.warning
    }

    pub fn is_critical(&self, heap_used: u64) -> bool {
        heap_used > self.critical
    }
}

fn megabytes_to_bytes(megabytes: f64) -> Result<u64> {
    if !megabytes.is_finite() || megabytes < 0.0 {
        return Err(Error::invalid_data(format!("threshold must be a non-negative number of megabytes, got {megabytes}")));
    }
    Ok((megabytes * BYTES_PER_MB).round() as u64)
}

/// Threshold classification of a single sample
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct MemoryStatus {
    #[serde(rename = "isWarning")]
    pub is_warning: bool,
    #[serde(rename = "isCritical")]
    pub is_critical: bool,
    #[serde(rename = "heapUsedMB")]
    pub heap_used_mb: f64,
    #[serde(rename = "heapTotalMB")]
    pub heap_total_mb: f64,
}

impl MemoryStatus {
    /// Classify a sample; the raw byte count is compared, not the rounded megabytes.
    pub fn from_sample(sample: &MemorySample, thresholds: &Thresholds) -> Self {
        Self {
            is_warning: thresholds.is_warning(sample.heap_used),
            is_critical: thresholds.is_critical(sample.heap_used),
            heap_used_mb: sample.heap_used_mb(),
            heap_total_mb: sample.heap_total_mb(),
        }
    }

    /// Most severe level reached; critical wins over warning.
    pub fn level(&self) -> PressureLevel {
        if self.is_critical {
            PressureLevel::Critical
        } else if self.is_warning {
            PressureLevel::Warning
        } else {
            PressureLevel::Normal
        }
    }
}
