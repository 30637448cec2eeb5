//! Two-Point Calibration
//!
//! ## Overview
//!
//! Every interpolating strategy maps one metric linearly from a *clean*
//! reference (score 0) to a *dirty* reference (score 100). The four pairs
//! of references together form a [`CalibrationProfile`]:
//!
//! | Metric          | Clean seed | Dirty seed | Contamination makes it |
//! |-----------------|-----------:|-----------:|------------------------|
//! | chroma          | 0.50       | 1.00       | rise                   |
//! | value           | 0.80       | 0.40       | fall (filter darkens)  |
//! | blue ratio      | 0.34       | 0.10       | fall (brown absorbs)   |
//! | HSV saturation  | 0.10       | 0.95       | rise                   |
//!
//! No ordering is enforced between `clean` and `dirty`. The direction is
//! implied by the pair itself, which is why a single interpolation serves
//! all four metrics.
//!
//! ## Ownership
//!
//! The profile is a small `Copy` value. Strategies receive it as an
//! immutable `&CalibrationProfile` per scoring call; the only writers are
//! [`CalibrationCapture`] (one endpoint at a time) and a wholesale reload by
//! whoever persists it. An endpoint is replaced by building the next profile
//! and assigning it in one step, so a half-written endpoint is never
//! observable.

mod capture;

pub use capture::{CalibrationCapture, CapturedEndpoint};

use core::fmt;

use crate::color::ColorReading;
use crate::constants::calibration::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calibrated metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Metric {
    /// Normalized channel spread
    Chroma,
    /// HSV value (brightness)
    Value,
    /// Blue share of total intensity
    BlueRatio,
    /// HSV saturation
    HsvSaturation,
}

impl Metric {
    /// All calibrated metrics, in profile order
    pub const ALL: [Metric; 4] = [
        Metric::Chroma,
        Metric::Value,
        Metric::BlueRatio,
        Metric::HsvSaturation,
    ];

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Metric::Chroma => "chroma",
            Metric::Value => "value",
            Metric::BlueRatio => "blue ratio",
            Metric::HsvSaturation => "HSV saturation",
        }
    }

    /// Read this metric off a reading
    pub fn observe(&self, reading: &ColorReading) -> f32 {
        match self {
            Metric::Chroma => reading.metrics().chroma,
            Metric::Value => reading.metrics().value,
            Metric::BlueRatio => reading.blue_ratio(),
            Metric::HsvSaturation => reading.metrics().saturation,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which reference a capture writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Endpoint {
    /// Known-clean filter (score 0)
    Clean,
    /// Known-dirty filter (score 100)
    Dirty,
}

impl Endpoint {
    /// Upper-case name for console banners
    pub const fn label(&self) -> &'static str {
        match self {
            Endpoint::Clean => "CLEAN",
            Endpoint::Dirty => "DIRTY",
        }
    }
}

/// Clean/dirty references for one metric
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationPoint {
    /// Reference value of a clean filter
    pub clean: f32,
    /// Reference value of a dirty filter
    pub dirty: f32,
}

impl CalibrationPoint {
    /// Create a point from its two references
    pub const fn new(clean: f32, dirty: f32) -> Self {
        Self { clean, dirty }
    }

    /// Signed distance from clean to dirty
    pub fn span(&self) -> f32 {
        self.dirty - self.clean
    }

    /// Span too small (or non-finite) to interpolate over
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !span.is_finite() || libm::fabsf(span) < DEGENERATE_SPAN_EPSILON
    }

    /// Reference for an endpoint
    pub fn get(&self, endpoint: Endpoint) -> f32 {
        match endpoint {
            Endpoint::Clean => self.clean,
            Endpoint::Dirty => self.dirty,
        }
    }

    fn with(self, endpoint: Endpoint, value: f32) -> Self {
        match endpoint {
            Endpoint::Clean => Self { clean: value, ..self },
            Endpoint::Dirty => Self { dirty: value, ..self },
        }
    }
}

/// One endpoint's references for all four metrics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EndpointValues {
    /// Chroma reference
    pub chroma: f32,
    /// HSV value reference
    pub value: f32,
    /// Blue ratio reference
    pub blue_ratio: f32,
    /// HSV saturation reference
    pub hsv_saturation: f32,
}

impl EndpointValues {
    /// Take all four references from a live reading
    pub fn from_reading(reading: &ColorReading) -> Self {
        Self {
            chroma: Metric::Chroma.observe(reading),
            value: Metric::Value.observe(reading),
            blue_ratio: Metric::BlueRatio.observe(reading),
            hsv_saturation: Metric::HsvSaturation.observe(reading),
        }
    }

    /// Reference for one metric
    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Chroma => self.chroma,
            Metric::Value => self.value,
            Metric::BlueRatio => self.blue_ratio,
            Metric::HsvSaturation => self.hsv_saturation,
        }
    }
}

/// Clean/dirty references for every calibrated metric
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationProfile {
    /// Chroma references
    pub chroma: CalibrationPoint,
    /// HSV value references
    pub value: CalibrationPoint,
    /// Blue ratio references
    pub blue_ratio: CalibrationPoint,
    /// HSV saturation references
    pub hsv_saturation: CalibrationPoint,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            chroma: CalibrationPoint::new(SEED_CLEAN_CHROMA, SEED_DIRTY_CHROMA),
            value: CalibrationPoint::new(SEED_CLEAN_VALUE, SEED_DIRTY_VALUE),
            blue_ratio: CalibrationPoint::new(SEED_CLEAN_BLUE_RATIO, SEED_DIRTY_BLUE_RATIO),
            hsv_saturation: CalibrationPoint::new(
                SEED_CLEAN_HSV_SATURATION,
                SEED_DIRTY_HSV_SATURATION,
            ),
        }
    }
}

impl CalibrationProfile {
    /// References for one metric
    pub fn point(&self, metric: Metric) -> &CalibrationPoint {
        match metric {
            Metric::Chroma => &self.chroma,
            Metric::Value => &self.value,
            Metric::BlueRatio => &self.blue_ratio,
            Metric::HsvSaturation => &self.hsv_saturation,
        }
    }

    /// All four references of one endpoint
    pub fn endpoint(&self, endpoint: Endpoint) -> EndpointValues {
        EndpointValues {
            chroma: self.chroma.get(endpoint),
            value: self.value.get(endpoint),
            blue_ratio: self.blue_ratio.get(endpoint),
            hsv_saturation: self.hsv_saturation.get(endpoint),
        }
    }

    /// Replace all four references of one endpoint at once
    pub fn set_endpoint(&mut self, endpoint: Endpoint, values: EndpointValues) {
        *self = Self {
            chroma: self.chroma.with(endpoint, values.chroma),
            value: self.value.with(endpoint, values.value),
            blue_ratio: self.blue_ratio.with(endpoint, values.blue_ratio),
            hsv_saturation: self.hsv_saturation.with(endpoint, values.hsv_saturation),
        };
    }

    /// Metrics whose references are too close to interpolate
    pub fn degenerate_metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL
            .into_iter()
            .filter(move |metric| self.point(*metric).is_degenerate())
    }
}
