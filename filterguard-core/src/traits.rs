//! Collaborator traits
//!
//! The engine owns the scoring logic and nothing else. Hardware and
//! transport live behind these traits so the same core runs on a
//! microcontroller, on a host with a simulated sensor, and in tests.
//! Keep them simple - embedded drivers don't need complex abstractions.

use core::convert::Infallible;

use crate::{color::RawColorSample, sensor::Measurement};

/// Color sensor driver
pub trait ColorDriver {
    /// Bring the sensor up (pin setup, frequency scaling, ...)
    fn initialize(&mut self) {}

    /// Capture one raw sample
    ///
    /// Infallible by contract: a failed read is reported as whatever the
    /// hardware returned (often all zeros) and scored as-is.
    fn capture_raw_sample(&mut self) -> RawColorSample;

    /// Switch the illumination LED
    ///
    /// Scoring and calibration assume constant illumination.
    fn set_illumination(&mut self, on: bool);
}

/// Blocking wait used before calibration captures
pub trait SettleDelay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Thread-sleep delay for hosted targets
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl SettleDelay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// Non-blocking source of single-character operator commands
///
/// Returns `Err(nb::Error::WouldBlock)` when no input is pending, which is
/// the normal case on almost every poll.
pub trait CommandSource {
    /// Transport error (UART framing, closed stdin, ...)
    type Error: core::fmt::Debug;

    /// Take the next pending character, if any
    fn poll_command(&mut self) -> nb::Result<char, Self::Error>;
}

/// Push-side telemetry sink for the latest score
pub trait ScorePublisher {
    /// Transport error
    type Error: core::fmt::Debug;

    /// Publish one score, `[0, 100]`
    fn publish(&mut self, score: f64) -> Result<(), Self::Error>;

    /// Publish a full measurement
    ///
    /// Defaults to the bare score. Transports that can carry more (status
    /// label, strategy name) override this.
    fn publish_measurement(&mut self, measurement: &Measurement) -> Result<(), Self::Error> {
        self.publish(measurement.score.value() as f64)
    }
}

/// Publisher that drops every score
///
/// Default for deployments without an IoT layer; the pull accessor
/// `current_score()` still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl ScorePublisher for NoopPublisher {
    type Error = Infallible;

    fn publish(&mut self, _score: f64) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<P: ScorePublisher + ?Sized> ScorePublisher for &mut P {
    type Error = P::Error;

    fn publish(&mut self, score: f64) -> Result<(), Self::Error> {
        (**self).publish(score)
    }

    fn publish_measurement(&mut self, measurement: &Measurement) -> Result<(), Self::Error> {
        (**self).publish_measurement(measurement)
    }
}
