//! Brown-cast heuristic
//!
//! Grease and dust deposits turn a filter brown/yellow: red and green stay
//! strong while blue is absorbed. The score is how far the red/green mean
//! rises above blue, on the channel scale:
//!
//! ```text
//! r > b and g > b:  ((r + g) / 2 - b) / channel_max * 100
//! otherwise:        0
//! ```
//!
//! Independent of calibration, so it still gives a usable number on a
//! fresh install before any endpoint has been captured.

use crate::{color::ColorReading, constants::scoring::SCORE_MAX};

use super::{utils::clamp_score, Score};

/// Score a reading by its brown/yellow cast
pub fn score(reading: &ColorReading) -> Score {
    let sample = reading.sample();
    if sample.red <= sample.blue || sample.green <= sample.blue {
        return Score::valid(0.0);
    }

    let red_green_mean = (sample.red as f32 + sample.green as f32) / 2.0;
    let excess = red_green_mean - sample.blue as f32;
    Score::valid(clamp_score(excess / reading.channel_max() as f32 * SCORE_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RawColorSample;

    fn brown(r: u16, g: u16, b: u16) -> f32 {
        score(&ColorReading::new(RawColorSample::new(r, g, b))).value()
    }

    #[test]
    fn brownish_sample() {
        let expected = (175.0 - 40.0) / 255.0 * 100.0;
        let actual = brown(200, 150, 40);
        assert!((actual - expected).abs() < 1e-3);
        assert!((actual - 52.5).abs() < 0.5);
    }

    #[test]
    fn needs_both_red_and_green_above_blue() {
        assert_eq!(brown(200, 30, 40), 0.0);
        assert_eq!(brown(30, 200, 40), 0.0);
        assert_eq!(brown(100, 100, 100), 0.0);
        assert_eq!(brown(0, 0, 0), 0.0);
    }

    #[test]
    fn clamps_on_overscaled_channels() {
        let reading = ColorReading::with_channel_max(RawColorSample::new(1000, 1000, 0), 255);
        assert_eq!(score(&reading).value(), 100.0);
    }
}
