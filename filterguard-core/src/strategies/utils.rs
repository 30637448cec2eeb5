//! Shared scoring helpers
//!
//! Pure functions, no allocation, no panics. Every strategy funnels its
//! raw number through [`clamp_score`] so nothing outside `[0, 100]` (and
//! nothing non-finite) ever leaves the module.

use crate::{
    calibration::{CalibrationPoint, Metric},
    constants::scoring::{SCORE_MAX, SCORE_MIN},
    errors::{ScoreError, ScoreResult},
};

/// Clamp to the score range; `NaN` becomes `SCORE_MIN`
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        SCORE_MIN
    } else {
        score.clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// Map `observed` linearly from `point.clean` (0) to `point.dirty` (100)
///
/// `(observed - clean) / (dirty - clean)` is the same expression as the
/// "inverted" `(clean - observed) / (clean - dirty)` used for metrics that
/// fall with contamination; the pair's own ordering carries the direction.
pub fn interpolate(metric: Metric, observed: f32, point: &CalibrationPoint) -> ScoreResult<f32> {
    if point.is_degenerate() {
        return Err(ScoreError::DegenerateCalibration { metric });
    }

    let fraction = (observed - point.clean) / point.span();
    Ok(clamp_score(fraction * SCORE_MAX))
}
