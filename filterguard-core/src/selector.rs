//! Strategy selector
//!
//! Holds the fixed, ordered list of strategies and the index of the active
//! one. The index only moves forward and wraps, so after
//! [`STRATEGY_COUNT`] switches the original strategy is active again.
//!
//! The selector is plain owned state. Whoever scores borrows it; there is
//! no global "current strategy".

use heapless::Vec;

use crate::{
    calibration::CalibrationProfile,
    color::ColorReading,
    strategies::{MixWeights, Score, Strategy, StrategyKind, STRATEGY_COUNT},
};

/// One row of the all-strategies comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyScore {
    /// Which strategy
    pub kind: StrategyKind,
    /// What it scored
    pub score: Score,
}

/// Cyclic switch over the canonical strategy list
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySelector {
    strategies: [Strategy; STRATEGY_COUNT],
    index: usize,
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new(MixWeights::default())
    }
}

impl StrategySelector {
    /// Canonical list with the given ensemble weights, ensemble active
    pub fn new(weights: MixWeights) -> Self {
        Self {
            strategies: Strategy::canonical(weights),
            index: 0,
        }
    }

    /// Active strategy
    pub fn active(&self) -> &Strategy {
        &self.strategies[self.index]
    }

    /// Position of the active strategy in the list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Always `false`; the list is fixed
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Advance to the next strategy, wrapping, and return it
    pub fn switch_strategy(&mut self) -> &Strategy {
        self.index = (self.index + 1) % self.strategies.len();
        log_info!("Strategy switched to {}", self.strategies[self.index].name());
        &self.strategies[self.index]
    }

    /// Make `kind` active and return it
    pub fn select(&mut self, kind: StrategyKind) -> &Strategy {
        if let Some(index) = self.strategies.iter().position(|s| s.kind() == kind) {
            self.index = index;
        }
        &self.strategies[self.index]
    }

    /// Current ensemble weights
    pub fn weights(&self) -> MixWeights {
        self.strategies
            .iter()
            .find_map(|s| match s {
                Strategy::WeightedMix(weights) => Some(*weights),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Replace all five ensemble weights at once
    pub fn set_weights(&mut self, weights: MixWeights) {
        for strategy in self.strategies.iter_mut() {
            if let Strategy::WeightedMix(current) = strategy {
                *current = weights;
            }
        }
        log_info!("Mix weights updated (total {})", weights.total());
    }

    /// Strategies in list order
    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }

    /// Score a reading with every strategy
    pub fn compare(
        &self,
        reading: &ColorReading,
        profile: &CalibrationProfile,
    ) -> Vec<StrategyScore, STRATEGY_COUNT> {
        self.strategies
            .iter()
            .map(|strategy| StrategyScore {
                kind: strategy.kind(),
                score: strategy.evaluate(reading, profile),
            })
            .collect()
    }
}
