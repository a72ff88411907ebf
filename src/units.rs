//! Byte to megabyte conversions used in log payloads and status reports.
//!
//! Every conversion divides by 1024 twice and rounds to two decimal places,
//! so `300 * 1024 * 1024` bytes becomes `300.0` and renders as `"300MB"`.

use crate::memory::constants::BYTES_PER_MB;

/// Convert a byte count to megabytes, rounded to two decimals.
pub fn to_megabytes(bytes: u64) -> f64 {
    round_hundredths(bytes as f64 / BYTES_PER_MB)
}

/// Convert a signed byte difference to megabytes, rounded to two decimals.
///
/// A difference that rounds to zero is always `+0.0`, never `-0.0`.
pub fn delta_megabytes(bytes: i64) -> f64 {
    round_hundredths(bytes as f64 / BYTES_PER_MB) + 0.0
}

/// Render a megabyte value as `"{value}MB"`.
pub fn format_mb(megabytes: f64) -> String {
    format!("{megabytes}MB")
}

/// Render a megabyte difference with an explicit sign, e.g. `"+1.5MB"` or `"-2MB"`.
pub fn format_signed_mb(megabytes: f64) -> String {
    format!("{:+}MB", megabytes + 0.0)
}

// Halves round toward positive infinity, so -0.125 becomes -0.12.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
