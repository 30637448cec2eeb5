//! Saturation Strategies
//!
//! ## Overview
//!
//! A strategy turns one [`ColorReading`] into a contamination score in
//! `[0, 100]`, consulting the [`CalibrationProfile`] where it needs to.
//! Six are available:
//!
//! | Strategy        | Input metric          | Calibrated |
//! |-----------------|-----------------------|------------|
//! | Weighted Mix    | all five below        | yes        |
//! | Brown Score     | raw r, g, b           | no         |
//! | HSV Saturation  | HSV saturation        | yes        |
//! | Chroma          | chroma                | yes        |
//! | Brightness      | HSV value             | yes        |
//! | Blue Ratio      | b / (r + g + b)       | yes        |
//!
//! ## Why an enum?
//!
//! The set is closed and each variant's state is tiny: only the ensemble
//! carries anything (its [`MixWeights`]). A `Copy` enum lets the selector
//! hold the whole list inline, hand the active one to the sensor by value,
//! and dispatch without a vtable.
//!
//! ## Validity
//!
//! Scores are always in range. When an interpolating strategy cannot
//! interpolate because clean and dirty references coincide, it returns
//! `0` with [`Validity::DegenerateCalibration`] instead of `NaN`, and
//! callers decide whether to publish it.

mod brown;
mod metric;
mod mix;
mod utils;

pub use mix::{MixWeights, COMPONENTS};
pub use utils::{clamp_score, interpolate};

use crate::{
    calibration::{CalibrationProfile, Metric},
    color::ColorReading,
    status::SaturationStatus,
};

/// Number of strategies in the selector's list
pub const STRATEGY_COUNT: usize = 6;

/// Strategy identity without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Weighted ensemble of the five below
    WeightedMix,
    /// Brown/yellow cast heuristic
    BrownScore,
    /// Calibrated HSV saturation
    HsvSaturation,
    /// Calibrated chroma
    Chroma,
    /// Calibrated HSV value (inverted)
    Brightness,
    /// Calibrated blue share (inverted)
    BlueRatio,
}

impl StrategyKind {
    /// Display name
    pub const fn name(&self) -> &'static str {
        match self {
            StrategyKind::WeightedMix => "Weighted Mix",
            StrategyKind::BrownScore => "Brown Score",
            StrategyKind::HsvSaturation => "HSV Saturation",
            StrategyKind::Chroma => "Chroma",
            StrategyKind::Brightness => "Brightness",
            StrategyKind::BlueRatio => "Blue Ratio",
        }
    }
}

/// A scoring strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Weighted ensemble with its weights
    WeightedMix(MixWeights),
    /// Brown/yellow cast heuristic
    BrownScore,
    /// Calibrated HSV saturation
    HsvSaturation,
    /// Calibrated chroma
    Chroma,
    /// Calibrated HSV value
    Brightness,
    /// Calibrated blue share
    BlueRatio,
}

impl Strategy {
    /// Canonical selector order, ensemble first
    pub fn canonical(weights: MixWeights) -> [Strategy; STRATEGY_COUNT] {
        [
            Strategy::WeightedMix(weights),
            Strategy::BrownScore,
            Strategy::HsvSaturation,
            Strategy::Chroma,
            Strategy::Brightness,
            Strategy::BlueRatio,
        ]
    }

    /// Identity without parameters
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Strategy::WeightedMix(_) => StrategyKind::WeightedMix,
            Strategy::BrownScore => StrategyKind::BrownScore,
            Strategy::HsvSaturation => StrategyKind::HsvSaturation,
            Strategy::Chroma => StrategyKind::Chroma,
            Strategy::Brightness => StrategyKind::Brightness,
            Strategy::BlueRatio => StrategyKind::BlueRatio,
        }
    }

    /// Display name
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Score a reading against a calibration snapshot
    pub fn evaluate(&self, reading: &ColorReading, profile: &CalibrationProfile) -> Score {
        match self {
            Strategy::WeightedMix(weights) => mix::score(weights, reading, profile),
            Strategy::BrownScore => brown::score(reading),
            Strategy::HsvSaturation => metric::score(Metric::HsvSaturation, reading, profile),
            Strategy::Chroma => metric::score(Metric::Chroma, reading, profile),
            Strategy::Brightness => metric::score(Metric::Value, reading, profile),
            Strategy::BlueRatio => metric::score(Metric::BlueRatio, reading, profile),
        }
    }
}

/// Whether a score can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Computed from a usable calibration
    Valid,
    /// A metric's clean and dirty references coincide
    DegenerateCalibration(Metric),
}

impl Validity {
    /// `true` for [`Validity::Valid`]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// A saturation score with its validity flag
///
/// The value is always finite and within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    value: f32,
    validity: Validity,
}

impl Score {
    /// Score with an explicit validity; the value is clamped
    pub fn new(value: f32, validity: Validity) -> Self {
        Self {
            value: clamp_score(value),
            validity,
        }
    }

    /// Valid score; the value is clamped
    pub fn valid(value: f32) -> Self {
        Self::new(value, Validity::Valid)
    }

    /// Zero score flagged as degenerate for `metric`
    pub fn degenerate(metric: Metric) -> Self {
        Self::new(0.0, Validity::DegenerateCalibration(metric))
    }

    /// Score percentage
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Validity flag
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// `true` when computed from a usable calibration
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Severity bucket of this score
    pub fn status(&self) -> SaturationStatus {
        SaturationStatus::from_score(self.value)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::valid(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RawColorSample;

    fn extremes() -> [ColorReading; 4] {
        [
            ColorReading::new(RawColorSample::new(0, 0, 0)),
            ColorReading::new(RawColorSample::new(255, 255, 255)),
            ColorReading::new(RawColorSample::new(255, 255, 0)),
            ColorReading::with_channel_max(RawColorSample::new(u16::MAX, 0, u16::MAX), 255),
        ]
    }

    #[test]
    fn canonical_order_starts_with_ensemble() {
        let list = Strategy::canonical(MixWeights::default());
        assert_eq!(list[0].kind(), StrategyKind::WeightedMix);
        assert_eq!(list[1].name(), "Brown Score");
        assert_eq!(list.len(), STRATEGY_COUNT);
    }

    #[test]
    fn scores_stay_in_range_at_extremes() {
        let profile = CalibrationProfile::default();
        for strategy in Strategy::canonical(MixWeights::default()) {
            for reading in extremes() {
                let score = strategy.evaluate(&reading, &profile).value();
                assert!((0.0..=100.0).contains(&score), "{} gave {}", strategy.name(), score);
            }
        }
    }

    #[test]
    fn chroma_scenario() {
        let mut profile = CalibrationProfile::default();
        profile.chroma = crate::calibration::CalibrationPoint::new(0.5, 1.0);
        let reading = ColorReading::with_channel_max(RawColorSample::new(4, 1, 1), 4);

        assert_eq!(reading.metrics().chroma, 0.75);
        assert_eq!(Strategy::Chroma.evaluate(&reading, &profile).value(), 50.0);
    }

    #[test]
    fn score_constructor_clamps() {
        assert_eq!(Score::valid(250.0).value(), 100.0);
        assert_eq!(Score::valid(f32::NAN).value(), 0.0);
        assert!(!Score::degenerate(Metric::Chroma).is_valid());
    }
}
