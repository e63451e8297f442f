//! Server tick conversion
//!
//! The media server measures time in ticks of 100 nanoseconds. Converting
//! ticks to seconds rounds fractional remainders up; converting seconds to
//! ticks multiplies and truncates. The asymmetry keeps integral durations
//! stable across a round trip.

/// Number of server ticks in one second
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Convert server ticks to whole seconds, rounding any remainder up
pub fn ticks_to_seconds(ticks: u64) -> u64 {
    ticks.div_ceil(TICKS_PER_SECOND)
}

/// Convert seconds to server ticks, truncating sub-tick precision
///
/// Negative and non-finite inputs clamp to zero.
pub fn seconds_to_ticks(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * TICKS_PER_SECOND as f64).trunc() as u64
}
