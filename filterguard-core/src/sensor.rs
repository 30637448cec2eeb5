//! IoT-facing saturation sensor
//!
//! Wraps a [`ColorDriver`] and an assigned [`Strategy`] into the thing a
//! telemetry layer reads: every [`measure`](SaturationSensor::measure)
//! captures one sample, scores it, and remembers the result so
//! [`current_score`](SaturationSensor::current_score) can be pulled at any
//! time. [`current_score_checked`](SaturationSensor::current_score_checked)
//! pairs that value with its [`Validity`].
//!
//! Until a strategy is assigned the sensor refuses to score
//! ([`ScoreError::NoActiveStrategy`]) instead of reporting a misleading 0.

use crate::{
    calibration::CalibrationProfile,
    color::{ColorReading, DerivedMetrics, RawColorSample},
    constants::color::DEFAULT_CHANNEL_MAX,
    errors::{ScoreError, ScoreResult},
    status::SaturationStatus,
    strategies::{Score, Strategy, StrategyKind, Validity},
    traits::ColorDriver,
};

/// One scored reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Sample and its metrics
    pub reading: ColorReading,
    /// Strategy that produced the score
    pub strategy: StrategyKind,
    /// Score and validity
    pub score: Score,
}

impl Measurement {
    /// Severity bucket of the score
    pub fn status(&self) -> SaturationStatus {
        self.score.status()
    }
}

/// Color sensor plus active strategy
#[derive(Debug)]
pub struct SaturationSensor<D> {
    driver: D,
    strategy: Option<Strategy>,
    channel_max: u16,
    last: Option<Measurement>,
}

impl<D: ColorDriver> SaturationSensor<D> {
    /// Sensor on the default 0-255 scale, no strategy assigned
    pub fn new(driver: D) -> Self {
        Self::with_channel_max(driver, DEFAULT_CHANNEL_MAX)
    }

    /// Sensor on a device-specific scale, no strategy assigned
    pub fn with_channel_max(driver: D, channel_max: u16) -> Self {
        Self {
            driver,
            strategy: None,
            channel_max,
            last: None,
        }
    }

    /// Builder-style strategy assignment
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Initialize the driver and switch the illumination on
    pub fn initialize(&mut self) {
        self.driver.initialize();
        self.driver.set_illumination(true);
    }

    /// Assign the strategy used by subsequent measurements
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = Some(strategy);
    }

    /// Assigned strategy, if any
    pub fn strategy(&self) -> Option<&Strategy> {
        self.strategy.as_ref()
    }

    /// Capture and score one sample
    pub fn measure(&mut self, profile: &CalibrationProfile) -> ScoreResult<Measurement> {
        let strategy = match self.strategy {
            Some(strategy) => strategy,
            None => {
                log_error!("No strategy set, skipping measurement");
                return Err(ScoreError::NoActiveStrategy);
            }
        };

        let sample = self.driver.capture_raw_sample();
        let reading = ColorReading::with_channel_max(sample, self.channel_max);
        let score = strategy.evaluate(&reading, profile);

        if let Validity::DegenerateCalibration(_metric) = score.validity() {
            log_warn!("{} scored on degenerate {} calibration", strategy.name(), _metric);
        }

        let measurement = Measurement {
            reading,
            strategy: strategy.kind(),
            score,
        };
        self.last = Some(measurement);
        Ok(measurement)
    }

    /// Latest score as a double, `0.0` before the first measurement
    pub fn current_score(&self) -> f64 {
        self.last.map(|m| m.score.value() as f64).unwrap_or(0.0)
    }

    /// Latest score with its validity flag
    ///
    /// Fails with [`ScoreError::NoActiveStrategy`] while no strategy is
    /// assigned and [`ScoreError::NoReading`] before the first measurement.
    pub fn current_score_checked(&self) -> ScoreResult<(f64, Validity)> {
        if self.strategy.is_none() {
            return Err(ScoreError::NoActiveStrategy);
        }
        self.last
            .map(|m| (m.score.value() as f64, m.score.validity()))
            .ok_or(ScoreError::NoReading)
    }

    /// Latest measurement
    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.last.as_ref()
    }

    /// Latest raw sample
    pub fn last_sample(&self) -> Option<RawColorSample> {
        self.last.map(|m| *m.reading.sample())
    }

    /// Latest derived metrics
    pub fn last_metrics(&self) -> Option<DerivedMetrics> {
        self.last.map(|m| *m.reading.metrics())
    }

    /// Latest chroma
    pub fn last_chroma(&self) -> Option<f32> {
        self.last_metrics().map(|m| m.chroma)
    }

    /// Channel scale readings are normalized against
    pub fn channel_max(&self) -> u16 {
        self.channel_max
    }

    /// Underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Underlying driver, for calibration captures
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        calibration::{CalibrationPoint, Metric},
        strategies::MixWeights,
    };

    #[derive(Default)]
    struct StubDriver {
        sample: RawColorSample,
        captures: usize,
        initialized: bool,
        lit: bool,
    }

    impl ColorDriver for StubDriver {
        fn initialize(&mut self) {
            self.initialized = true;
        }

        fn capture_raw_sample(&mut self) -> RawColorSample {
            self.captures += 1;
            self.sample
        }

        fn set_illumination(&mut self, on: bool) {
            self.lit = on;
        }
    }

    #[test]
    fn refuses_without_strategy() {
        let mut sensor = SaturationSensor::new(StubDriver::default());

        let result = sensor.measure(&CalibrationProfile::default());

        assert_eq!(result, Err(ScoreError::NoActiveStrategy));
        assert_eq!(sensor.driver().captures, 0);
        assert!(sensor.last_measurement().is_none());
    }

    #[test]
    fn initialize_lights_led() {
        let mut sensor = SaturationSensor::new(StubDriver::default());
        sensor.initialize();

        assert!(sensor.driver().initialized);
        assert!(sensor.driver().lit);
    }

    #[test]
    fn measure_updates_pull_accessor() {
        let driver = StubDriver {
            sample: RawColorSample::new(200, 150, 40),
            ..Default::default()
        };
        let mut sensor = SaturationSensor::new(driver).with_strategy(Strategy::BrownScore);
        assert_eq!(sensor.current_score(), 0.0);

        let measurement = sensor.measure(&CalibrationProfile::default()).unwrap();

        assert_eq!(measurement.strategy, StrategyKind::BrownScore);
        assert_eq!(sensor.current_score(), measurement.score.value() as f64);
        assert_eq!(sensor.last_sample(), Some(RawColorSample::new(200, 150, 40)));
        assert!(sensor.last_chroma().is_some());
    }

    #[test]
    fn checked_score_reports_why_it_is_missing() {
        let mut sensor = SaturationSensor::new(StubDriver::default());
        assert_eq!(sensor.current_score_checked(), Err(ScoreError::NoActiveStrategy));

        sensor.set_strategy(Strategy::BrownScore);
        assert_eq!(sensor.current_score_checked(), Err(ScoreError::NoReading));
    }

    #[test]
    fn checked_score_carries_degenerate_flag() {
        let driver = StubDriver {
            sample: RawColorSample::new(200, 150, 40),
            ..Default::default()
        };
        let mut sensor = SaturationSensor::new(driver).with_strategy(Strategy::Chroma);
        let mut profile = CalibrationProfile::default();
        profile.chroma = CalibrationPoint::new(0.5, 0.5);

        sensor.measure(&profile).unwrap();

        assert_eq!(
            sensor.current_score_checked(),
            Ok((0.0, Validity::DegenerateCalibration(Metric::Chroma)))
        );
        assert_eq!(sensor.current_score(), 0.0);
    }

    #[test]
    fn checked_score_after_valid_reading() {
        let driver = StubDriver {
            sample: RawColorSample::new(200, 150, 40),
            ..Default::default()
        };
        let mut sensor = SaturationSensor::new(driver).with_strategy(Strategy::BrownScore);

        let measurement = sensor.measure(&CalibrationProfile::default()).unwrap();

        assert_eq!(
            sensor.current_score_checked(),
            Ok((measurement.score.value() as f64, Validity::Valid))
        );
    }

    #[test]
    fn strategy_can_be_reassigned() {
        let mut sensor = SaturationSensor::new(StubDriver::default());
        sensor.set_strategy(Strategy::WeightedMix(MixWeights::default()));
        sensor.set_strategy(Strategy::Chroma);

        assert_eq!(sensor.strategy(), Some(&Strategy::Chroma));
    }
}
