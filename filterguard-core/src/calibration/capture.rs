//! Calibration capture
//!
//! Snapshots a live sample into the clean or dirty slot of a profile:
//!
//! 1. wait the settle delay (the operator has just swapped the reference
//!    filter in, the LED and sensor need a moment)
//! 2. take one fresh sample from the driver
//! 3. derive metrics
//! 4. overwrite all four references of the endpoint in one assignment
//!
//! Nothing is checked against the opposite endpoint. Capturing the same
//! filter twice gives a degenerate profile, which the strategies report
//! rather than reject.

use crate::{
    calibration::{CalibrationProfile, Endpoint, EndpointValues},
    color::ColorReading,
    constants::{color::DEFAULT_CHANNEL_MAX, calibration::DEFAULT_SETTLE_DELAY_MS},
    traits::{ColorDriver, SettleDelay},
};

/// Result of one capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturedEndpoint {
    /// Endpoint that was written
    pub endpoint: Endpoint,
    /// Reading the references were taken from
    pub reading: ColorReading,
    /// References now stored for the endpoint
    pub values: EndpointValues,
}

/// Capture settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationCapture {
    settle_delay_ms: u32,
    channel_max: u16,
}

impl Default for CalibrationCapture {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            channel_max: DEFAULT_CHANNEL_MAX,
        }
    }
}

impl CalibrationCapture {
    /// Create capture settings
    pub fn new(settle_delay_ms: u32, channel_max: u16) -> Self {
        Self {
            settle_delay_ms,
            channel_max,
        }
    }

    /// Configured settle delay in milliseconds
    pub fn settle_delay_ms(&self) -> u32 {
        self.settle_delay_ms
    }

    /// Capture one endpoint into `profile`
    pub fn capture<D, W>(
        &self,
        endpoint: Endpoint,
        driver: &mut D,
        delay: &mut W,
        profile: &mut CalibrationProfile,
    ) -> CapturedEndpoint
    where
        D: ColorDriver + ?Sized,
        W: SettleDelay + ?Sized,
    {
        delay.delay_ms(self.settle_delay_ms);

        let sample = driver.capture_raw_sample();
        let reading = ColorReading::with_channel_max(sample, self.channel_max);
        let values = EndpointValues::from_reading(&reading);

        profile.set_endpoint(endpoint, values);

        log_info!(
            "Calibrated {} endpoint: chroma={} value={} hsv_sat={} blue_ratio={}",
            endpoint.label(),
            values.chroma,
            values.value,
            values.hsv_saturation,
            values.blue_ratio
        );

        if let Some(metric) = profile.degenerate_metrics().next() {
            log_warn!("Calibration now degenerate for {}: clean == dirty", metric);
        }

        CapturedEndpoint {
            endpoint,
            reading,
            values,
        }
    }

    /// Capture the clean endpoint
    pub fn capture_clean<D, W>(
        &self,
        driver: &mut D,
        delay: &mut W,
        profile: &mut CalibrationProfile,
    ) -> CapturedEndpoint
    where
        D: ColorDriver + ?Sized,
        W: SettleDelay + ?Sized,
    {
        self.capture(Endpoint::Clean, driver, delay, profile)
    }

    /// Capture the dirty endpoint
    pub fn capture_dirty<D, W>(
        &self,
        driver: &mut D,
        delay: &mut W,
        profile: &mut CalibrationProfile,
    ) -> CapturedEndpoint
    where
        D: ColorDriver + ?Sized,
        W: SettleDelay + ?Sized,
    {
        self.capture(Endpoint::Dirty, driver, delay, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RawColorSample;

    struct FixedDriver(RawColorSample);

    impl ColorDriver for FixedDriver {
        fn capture_raw_sample(&mut self) -> RawColorSample {
            self.0
        }

        fn set_illumination(&mut self, _on: bool) {}
    }

    #[derive(Default)]
    struct RecordingDelay {
        waited_ms: u32,
    }

    impl SettleDelay for RecordingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.waited_ms += ms;
        }
    }

    #[test]
    fn waits_before_sampling() {
        let mut driver = FixedDriver(RawColorSample::new(250, 250, 245));
        let mut delay = RecordingDelay::default();
        let mut profile = CalibrationProfile::default();

        CalibrationCapture::default().capture_clean(&mut driver, &mut delay, &mut profile);

        assert_eq!(delay.waited_ms, DEFAULT_SETTLE_DELAY_MS);
    }

    #[test]
    fn clean_capture_overwrites_clean_side() {
        let sample = RawColorSample::new(250, 250, 245);
        let mut driver = FixedDriver(sample);
        let mut delay = RecordingDelay::default();
        let mut profile = CalibrationProfile::default();
        let dirty_before = profile.endpoint(Endpoint::Dirty);

        let captured =
            CalibrationCapture::default().capture_clean(&mut driver, &mut delay, &mut profile);

        let expected = EndpointValues::from_reading(&ColorReading::new(sample));
        assert_eq!(captured.endpoint, Endpoint::Clean);
        assert_eq!(captured.values, expected);
        assert_eq!(profile.endpoint(Endpoint::Clean), expected);
        assert_eq!(profile.endpoint(Endpoint::Dirty), dirty_before);
    }

    #[test]
    fn same_sample_twice_is_degenerate_not_fatal() {
        let mut driver = FixedDriver(RawColorSample::new(180, 140, 60));
        let mut delay = RecordingDelay::default();
        let mut profile = CalibrationProfile::default();
        let capture = CalibrationCapture::new(0, 255);

        capture.capture_clean(&mut driver, &mut delay, &mut profile);
        capture.capture_dirty(&mut driver, &mut delay, &mut profile);

        assert_eq!(profile.endpoint(Endpoint::Clean), profile.endpoint(Endpoint::Dirty));
        assert_eq!(profile.degenerate_metrics().count(), 4);
        assert_eq!(delay.waited_ms, 0);
    }
}
