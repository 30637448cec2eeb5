//! Color Sample and Derived Metrics
//!
//! ## Overview
//!
//! A [`RawColorSample`] is what the sensor driver hands over: three channel
//! intensities on the device scale. Every strategy needs the same handful
//! of derived quantities, so [`ColorReading`] computes them once, eagerly,
//! when the sample is wrapped:
//!
//! ```text
//! value      = max(r,g,b) / channel_max
//! chroma     = (max(r,g,b) - min(r,g,b)) / channel_max
//! saturation = chroma / value            (0 when value == 0)
//! hue        = six-sector RGB→hue        (0 when chroma == 0)
//! ```
//!
//! The derivation is total: a black sample produces all zeros rather than a
//! division by zero. Channels above `channel_max` are saturated to it, so
//! every metric stays in `[0, 1]` even when a driver overshoots its nominal
//! range.
//!
//! `ColorReading` keeps its fields private. Metrics can only come from the
//! sample they were derived from; there is no way to patch one afterwards.

use crate::constants::color::{DEFAULT_CHANNEL_MAX, HUE_FULL_CIRCLE_DEG, HUE_SECTORS, HUE_SECTOR_DEG};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One raw RGB sample on the sensor scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawColorSample {
    /// Red channel intensity
    pub red: u16,
    /// Green channel intensity
    pub green: u16,
    /// Blue channel intensity
    pub blue: u16,
}

impl RawColorSample {
    /// Create a sample from channel intensities
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Brightest channel
    pub fn max_channel(&self) -> u16 {
        self.red.max(self.green).max(self.blue)
    }

    /// Dimmest channel
    pub fn min_channel(&self) -> u16 {
        self.red.min(self.green).min(self.blue)
    }

    /// Sum of all channels
    pub fn total(&self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32
    }

    /// All channels zero (sensor covered, LED off, or driver failure)
    pub fn is_black(&self) -> bool {
        self.total() == 0
    }
}

/// HSV and chroma derived from a [`RawColorSample`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedMetrics {
    /// Hue in degrees, `[0, 360)`
    pub hue: f32,
    /// HSV saturation, `[0, 1]`
    pub saturation: f32,
    /// HSV value (brightness), `[0, 1]`
    pub value: f32,
    /// Normalized max-min channel spread, `[0, 1]`
    pub chroma: f32,
}

impl DerivedMetrics {
    /// Derive metrics from a sample on a `channel_max` scale
    pub fn from_sample(sample: &RawColorSample, channel_max: u16) -> Self {
        let scale = channel_max.max(1);
        let normalize = |channel: u16| channel.min(scale) as f32 / scale as f32;

        let r = normalize(sample.red);
        let g = normalize(sample.green);
        let b = normalize(sample.blue);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let value = max;
        let chroma = max - min;
        let saturation = if value > 0.0 { chroma / value } else { 0.0 };

        Self {
            hue: hue_degrees(r, g, b, max, chroma),
            saturation,
            value,
            chroma,
        }
    }
}

/// Standard six-sector hue. `max` and `chroma` are passed in since the
/// caller already has them.
fn hue_degrees(r: f32, g: f32, b: f32, max: f32, chroma: f32) -> f32 {
    if chroma <= 0.0 {
        return 0.0;
    }

    let sector = if max == r {
        let h = (g - b) / chroma;
        if h < 0.0 { h + HUE_SECTORS } else { h }
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };

    let hue = sector * HUE_SECTOR_DEG;
    // h + 6 can round up to exactly 6.0 for tiny negative h
    if hue >= HUE_FULL_CIRCLE_DEG { hue - HUE_FULL_CIRCLE_DEG } else { hue }
}

/// A raw sample together with its derived metrics
///
/// This is the unit every strategy scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorReading {
    sample: RawColorSample,
    metrics: DerivedMetrics,
    channel_max: u16,
}

impl ColorReading {
    /// Wrap a sample on the default 0-255 scale
    pub fn new(sample: RawColorSample) -> Self {
        Self::with_channel_max(sample, DEFAULT_CHANNEL_MAX)
    }

    /// Wrap a sample on a device-specific scale
    pub fn with_channel_max(sample: RawColorSample, channel_max: u16) -> Self {
        let channel_max = channel_max.max(1);
        Self {
            sample,
            metrics: DerivedMetrics::from_sample(&sample, channel_max),
            channel_max,
        }
    }

    /// The raw sample
    pub fn sample(&self) -> &RawColorSample {
        &self.sample
    }

    /// Metrics derived at construction
    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    /// Full-scale channel intensity used for normalization
    pub fn channel_max(&self) -> u16 {
        self.channel_max
    }

    /// Blue share of total intensity, `b / (r + g + b)`, or `0` for black
    pub fn blue_ratio(&self) -> f32 {
        let total = self.sample.total();
        if total == 0 {
            0.0
        } else {
            self.sample.blue as f32 / total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(r: u16, g: u16, b: u16) -> DerivedMetrics {
        *ColorReading::new(RawColorSample::new(r, g, b)).metrics()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn black_sample_is_all_zero() {
        let m = metrics(0, 0, 0);
        assert_eq!(m, DerivedMetrics::default());
        assert_eq!(ColorReading::new(RawColorSample::default()).blue_ratio(), 0.0);
    }

    #[test]
    fn white_sample_has_no_chroma() {
        let m = metrics(255, 255, 255);
        assert_eq!(m.value, 1.0);
        assert_eq!(m.chroma, 0.0);
        assert_eq!(m.saturation, 0.0);
        assert_eq!(m.hue, 0.0);
    }

    #[test]
    fn primary_hues() {
        assert!(close(metrics(255, 0, 0).hue, 0.0));
        assert!(close(metrics(0, 255, 0).hue, 120.0));
        assert!(close(metrics(0, 0, 255).hue, 240.0));
        assert!(close(metrics(255, 255, 0).hue, 60.0));
        assert!(close(metrics(255, 0, 255).hue, 300.0));
    }

    #[test]
    fn brownish_sample() {
        let m = metrics(200, 150, 40);
        assert!(close(m.value, 200.0 / 255.0));
        assert!(close(m.chroma, 160.0 / 255.0));
        assert!(close(m.saturation, 0.8));
        // (g - b) / c = 110 / 160 → 41.25°
        assert!(close(m.hue, 41.25));
    }

    #[test]
    fn hue_wraps_below_full_circle() {
        // Red max with a hair more blue than green lands just under 360°
        let m = metrics(255, 0, 1);
        assert!(m.hue < 360.0);
        assert!(m.hue > 359.0);
    }

    #[test]
    fn overshooting_channels_saturate() {
        let m = *ColorReading::with_channel_max(RawColorSample::new(1023, 0, 0), 255).metrics();
        assert_eq!(m.value, 1.0);
        assert_eq!(m.chroma, 1.0);
    }

    #[test]
    fn custom_scale() {
        let reading = ColorReading::with_channel_max(RawColorSample::new(512, 512, 0), 1024);
        assert!(close(reading.metrics().value, 0.5));
        assert_eq!(reading.channel_max(), 1024);
    }

    #[test]
    fn derivation_is_pure() {
        let sample = RawColorSample::new(12, 200, 77);
        assert_eq!(ColorReading::new(sample), ColorReading::new(sample));
    }

    #[test]
    fn blue_ratio() {
        let reading = ColorReading::new(RawColorSample::new(100, 100, 100));
        assert!(close(reading.blue_ratio(), 1.0 / 3.0));
    }
}
