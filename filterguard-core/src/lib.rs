//! Core scoring engine for FilterGuard
//!
//! Turns a single raw color-sensor sample into a 0-100% contamination
//! ("saturation") score for a physical filter. Designed for the same
//! small targets that drive the sensor: no heap, no floating-point
//! surprises, no panics in the scoring path.
//!
//! Key pieces:
//! - [`color`]: raw sample plus eagerly derived HSV/chroma metrics
//! - [`calibration`]: clean/dirty reference endpoints and their capture
//! - [`strategies`]: five single-metric scorers plus a weighted ensemble
//! - [`selector`]: cyclic switch between strategies at runtime
//! - [`status`] and [`report`]: severity labels and the console block
//! - [`monitor`]: the poll-driven control loop tying it together
//!
//! ```no_run
//! use filterguard_core::{CalibrationProfile, ColorReading, RawColorSample, Strategy};
//!
//! let profile = CalibrationProfile::default();
//! let reading = ColorReading::new(RawColorSample::new(200, 150, 40));
//!
//! let score = Strategy::BrownScore.evaluate(&reading, &profile);
//! assert!(score.value() > 50.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod calibration;
pub mod color;
pub mod constants;
pub mod errors;
pub mod monitor;
pub mod report;
pub mod selector;
pub mod sensor;
pub mod status;
pub mod strategies;
pub mod time;
pub mod traits;

// Public API
pub use calibration::{
    CalibrationCapture, CalibrationPoint, CalibrationProfile, Endpoint, EndpointValues, Metric,
};
pub use color::{ColorReading, DerivedMetrics, RawColorSample};
pub use errors::{ScoreError, ScoreResult};
pub use monitor::{Command, Monitor, MonitorConfig, PollOutcome, SamplingMode};
pub use selector::StrategySelector;
pub use sensor::{Measurement, SaturationSensor};
pub use status::SaturationStatus;
pub use strategies::{MixWeights, Score, Strategy, StrategyKind, Validity};
pub use traits::{ColorDriver, CommandSource, NoopPublisher, ScorePublisher, SettleDelay};

/// Crate version, for startup banners and telemetry
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
