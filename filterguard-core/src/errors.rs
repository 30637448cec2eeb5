//! Error Types for Scoring and Calibration
//!
//! ## Design Philosophy
//!
//! The error surface is deliberately narrow. Most "bad" inputs are not
//! errors at all:
//!
//! - A black sample (all channels zero) has well-defined metrics (all zero)
//!   and scores `0`.
//! - A corrupt sample is scored as-is; the control loop re-samples on its own
//!   schedule, nothing retries.
//!
//! What remains are the cases where returning a number would be misleading:
//!
//! ### Degenerate Calibration
//! `DegenerateCalibration`: a metric's clean and dirty endpoints coincide,
//! so linear interpolation between them would divide by zero. Strategies
//! never surface `NaN`/`inf`; they turn this error into a flagged
//! [`Score`](crate::strategies::Score) with value `0`.
//!
//! ### Missing Strategy
//! `NoActiveStrategy`: the sensor wrapper was asked to score before any
//! strategy was assigned. The cycle is skipped entirely (no report, no
//! publish) rather than returning a silent `0`.
//!
//! `NoReading`: a checked pull of the latest score before anything has been
//! measured.
//!
//! ### Configuration
//! `InvalidWeights`: ensemble weights that are negative, non-finite or
//! all zero.
//!
//! Like the rest of the crate, errors are `Copy` and carry only
//! `&'static str` context so they can be returned from the scoring path
//! without allocation.

use thiserror_no_std::Error;

use crate::calibration::Metric;

/// Result type for scoring operations
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Scoring errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ScoreError {
    /// Scoring requested before a strategy was assigned
    #[error("No active strategy assigned")]
    NoActiveStrategy,

    /// Latest score requested before the first measurement
    #[error("No reading taken yet")]
    NoReading,

    /// Clean and dirty references for a metric are equal (or non-finite)
    #[error("Degenerate calibration for {metric}: clean and dirty references coincide")]
    DegenerateCalibration {
        /// Metric whose calibration span is unusable
        metric: Metric,
    },

    /// Ensemble weights rejected
    #[error("Invalid mix weights: {reason}")]
    InvalidWeights {
        /// Which constraint the weights violated
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScoreError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoActiveStrategy => defmt::write!(fmt, "No active strategy"),
            Self::NoReading => defmt::write!(fmt, "No reading yet"),
            Self::DegenerateCalibration { metric } => {
                defmt::write!(fmt, "Degenerate calibration: {}", metric.name())
            }
            Self::InvalidWeights { reason } => defmt::write!(fmt, "Invalid weights: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_small() {
        assert!(core::mem::size_of::<ScoreError>() <= 24);
    }

    #[cfg(feature = "std")]
    #[test]
    fn messages_name_the_metric() {
        let err = ScoreError::DegenerateCalibration { metric: Metric::BlueRatio };
        assert!(err.to_string().contains("blue ratio"));
    }
}
