//! Time-Related Constants
//!
//! Intervals used by the sampling timer.

// ===== SAMPLING INTERVALS =====

/// Default sensor sampling interval (milliseconds).
///
/// Filter contamination builds up over days; one reading per second is
/// plenty for a live console and keeps the LED duty predictable.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;

/// Slow sampling interval for telemetry-only deployments (milliseconds).
///
/// Matches the refresh period of the IoT channel the score is reported on.
pub const TELEMETRY_SAMPLE_INTERVAL_MS: u64 = 10_000;
