//! Severity classification
//!
//! Five ordinal buckets over the score range. Lower bounds are inclusive,
//! upper bounds exclusive, except SATURATED which also takes 100:
//!
//! ```text
//! [0,20) CLEAN  [20,40) LIGHT  [40,60) MODERATE  [60,80) HEAVY  [80,100] SATURATED
//! ```

use core::fmt;

use crate::constants::scoring::{
    STATUS_HEAVY_MIN, STATUS_LIGHT_MIN, STATUS_MODERATE_MIN, STATUS_SATURATED_MIN,
};

/// Contamination severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SaturationStatus {
    /// Good condition
    Clean,
    /// Minor contamination
    Light,
    /// Needs attention
    Moderate,
    /// Replace soon
    Heavy,
    /// Replace immediately
    Saturated,
}

impl SaturationStatus {
    /// Classify a score
    ///
    /// Non-finite input lands in [`SaturationStatus::Saturated`]; an unknown
    /// reading should prompt a look at the filter, not reassure.
    pub fn from_score(score: f32) -> Self {
        if score < STATUS_LIGHT_MIN {
            SaturationStatus::Clean
        } else if score < STATUS_MODERATE_MIN {
            SaturationStatus::Light
        } else if score < STATUS_HEAVY_MIN {
            SaturationStatus::Moderate
        } else if score < STATUS_SATURATED_MIN {
            SaturationStatus::Heavy
        } else {
            SaturationStatus::Saturated
        }
    }

    /// Upper-case label
    pub const fn label(&self) -> &'static str {
        match self {
            SaturationStatus::Clean => "CLEAN",
            SaturationStatus::Light => "LIGHT",
            SaturationStatus::Moderate => "MODERATE",
            SaturationStatus::Heavy => "HEAVY",
            SaturationStatus::Saturated => "SATURATED",
        }
    }

    /// Operator advice
    pub const fn advice(&self) -> &'static str {
        match self {
            SaturationStatus::Clean => "Good condition",
            SaturationStatus::Light => "Minor contamination",
            SaturationStatus::Moderate => "Needs attention",
            SaturationStatus::Heavy => "Replace soon",
            SaturationStatus::Saturated => "Replace immediately",
        }
    }
}

impl fmt::Display for SaturationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.advice())
    }
}
