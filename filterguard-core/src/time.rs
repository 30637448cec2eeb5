//! Time management for the sampling loop
//!
//! Clock abstraction for interval gating:
//! - Monotonic clock since start-up (host builds)
//! - Fixed clock (for tests and replay)
//!
//! and the [`SampleTimer`] that decides when the next reading is due.

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Source of time for the sampling loop
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Monotonic milliseconds since construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Interval gate for periodic readings
///
/// Non-blocking: [`SampleTimer::is_due`] only compares timestamps. The first
/// check is always due. A clock that jumps backwards makes the next check
/// due rather than stalling until it catches up.
#[derive(Debug, Clone)]
pub struct SampleTimer {
    interval_ms: u64,
    last: Option<Timestamp>,
}

impl SampleTimer {
    /// Timer firing every `interval_ms`
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Configured interval
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Whether a reading is due at `now`
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.last {
            None => true,
            Some(last) if now < last => true,
            Some(last) => now - last >= self.interval_ms,
        }
    }

    /// Record that a reading was taken at `now`
    pub fn mark(&mut self, now: Timestamp) {
        self.last = Some(now);
    }

    /// Check and mark in one step; `true` if a reading should be taken now
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if self.is_due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }
}
