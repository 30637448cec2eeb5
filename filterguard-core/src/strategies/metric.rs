//! Single-metric interpolating strategies
//!
//! Each maps one derived metric between its calibrated clean and dirty
//! references:
//!
//! - HSV saturation: deposits tint a white filter, saturation rises
//! - chroma: same effect without normalizing by brightness
//! - brightness (HSV value): deposits darken the filter, value falls
//! - blue ratio: brown deposits absorb blue, its share of intensity falls
//!
//! A degenerate reference pair produces a flagged zero, never `NaN`.

use crate::{
    calibration::{CalibrationProfile, Metric},
    color::ColorReading,
};

use super::{utils::interpolate, Score};

/// Score a reading on one calibrated metric
pub fn score(metric: Metric, reading: &ColorReading, profile: &CalibrationProfile) -> Score {
    match interpolate(metric, metric.observe(reading), profile.point(metric)) {
        Ok(value) => Score::valid(value),
        Err(_) => Score::degenerate(metric),
    }
}
