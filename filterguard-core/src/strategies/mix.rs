//! Weighted ensemble
//!
//! Combines the five single-metric scores into one:
//!
//! ```text
//! score = clamp(Σ weight_i * score_i)
//! ```
//!
//! Weights are not normalized. The defaults sum to 1.0, which keeps the
//! ensemble on the 0-100 scale; a set summing to more simply saturates
//! sooner. A component whose calibration is degenerate contributes 0 and
//! the ensemble carries the flag of the first such component.

use crate::{
    calibration::CalibrationProfile,
    color::ColorReading,
    constants::scoring::*,
    errors::{ScoreError, ScoreResult},
};

use super::{utils::clamp_score, Score, Strategy, StrategyKind, Validity};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ensemble weights, one per component strategy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MixWeights {
    chroma: f32,
    brightness: f32,
    blue_ratio: f32,
    hsv_saturation: f32,
    brown: f32,
}

impl Default for MixWeights {
    fn default() -> Self {
        Self {
            chroma: DEFAULT_CHROMA_WEIGHT,
            brightness: DEFAULT_BRIGHTNESS_WEIGHT,
            blue_ratio: DEFAULT_BLUE_RATIO_WEIGHT,
            hsv_saturation: DEFAULT_HSV_SATURATION_WEIGHT,
            brown: DEFAULT_BROWN_WEIGHT,
        }
    }
}

impl MixWeights {
    /// Create weights; each must be finite and non-negative, and at least
    /// one must be positive
    pub fn new(
        chroma: f32,
        brightness: f32,
        blue_ratio: f32,
        hsv_saturation: f32,
        brown: f32,
    ) -> ScoreResult<Self> {
        let weights = Self {
            chroma,
            brightness,
            blue_ratio,
            hsv_saturation,
            brown,
        };
        let all = weights.as_array();

        if all.iter().any(|w| !w.is_finite()) {
            return Err(ScoreError::InvalidWeights { reason: "weight is not finite" });
        }
        if all.iter().any(|w| *w < 0.0) {
            return Err(ScoreError::InvalidWeights { reason: "weight is negative" });
        }
        if all.iter().all(|w| *w == 0.0) {
            return Err(ScoreError::InvalidWeights { reason: "all weights are zero" });
        }

        Ok(weights)
    }

    /// Weight of one component
    pub fn weight(&self, kind: StrategyKind) -> f32 {
        match kind {
            StrategyKind::Chroma => self.chroma,
            StrategyKind::Brightness => self.brightness,
            StrategyKind::BlueRatio => self.blue_ratio,
            StrategyKind::HsvSaturation => self.hsv_saturation,
            StrategyKind::BrownScore => self.brown,
            StrategyKind::WeightedMix => 0.0,
        }
    }

    /// Sum of all weights
    pub fn total(&self) -> f32 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f32; 5] {
        [
            self.chroma,
            self.brightness,
            self.blue_ratio,
            self.hsv_saturation,
            self.brown,
        ]
    }
}

/// Components in weight order
pub const COMPONENTS: [Strategy; 5] = [
    Strategy::Chroma,
    Strategy::Brightness,
    Strategy::BlueRatio,
    Strategy::HsvSaturation,
    Strategy::BrownScore,
];

/// Weighted ensemble score
pub fn score(weights: &MixWeights, reading: &ColorReading, profile: &CalibrationProfile) -> Score {
    let mut total = 0.0;
    let mut validity = Validity::Valid;

    for component in COMPONENTS {
        let part = component.evaluate(reading, profile);
        if validity.is_valid() {
            validity = part.validity();
        }
        total += part.value() * weights.weight(component.kind());
    }

    Score::new(clamp_score(total), validity)
}
