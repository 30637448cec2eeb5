//! Poll-driven control loop
//!
//! [`Monitor`] owns every piece of mutable state (sensor, selector,
//! calibration profile) and is advanced by calling [`Monitor::poll`] from
//! the application's main loop. One poll does at most one thing:
//!
//! 1. if a command character is pending, handle it and return
//! 2. otherwise, if a reading is due, measure, report and publish
//!
//! Nothing blocks except calibration capture, which waits out the settle
//! delay before sampling.
//!
//! ```no_run
//! # use filterguard_core::*;
//! # struct Led;
//! # impl ColorDriver for Led {
//! #     fn capture_raw_sample(&mut self) -> RawColorSample { RawColorSample::new(200, 150, 40) }
//! #     fn set_illumination(&mut self, _on: bool) {}
//! # }
//! # struct Wait;
//! # impl SettleDelay for Wait { fn delay_ms(&mut self, _ms: u32) {} }
//! # struct Keys;
//! # impl CommandSource for Keys {
//! #     type Error = ();
//! #     fn poll_command(&mut self) -> nb::Result<char, ()> { Err(nb::Error::WouldBlock) }
//! # }
//! let mut monitor = Monitor::new(Led, Wait, MonitorConfig::default());
//! let mut console = String::new();
//!
//! monitor.initialize();
//! monitor.write_help(&mut console).unwrap();
//! monitor.poll(0, &mut Keys, &mut console).unwrap();
//! ```

use core::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    calibration::{CalibrationCapture, CalibrationProfile, CapturedEndpoint, Endpoint},
    constants::{
        calibration::DEFAULT_SETTLE_DELAY_MS,
        color::DEFAULT_CHANNEL_MAX,
        time::{DEFAULT_SAMPLE_INTERVAL_MS, TELEMETRY_SAMPLE_INTERVAL_MS},
    },
    errors::{ScoreError, ScoreResult},
    report,
    selector::StrategySelector,
    sensor::{Measurement, SaturationSensor},
    strategies::{MixWeights, Strategy, StrategyKind, Validity},
    time::{SampleTimer, Timestamp},
    traits::{ColorDriver, CommandSource, NoopPublisher, ScorePublisher, SettleDelay},
};

/// When the monitor takes readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SamplingMode {
    /// On every poll without a pending command
    Continuous,
    /// Once `interval_ms` has elapsed since the previous reading
    Interval {
        /// Minimum gap between readings
        interval_ms: u64,
    },
}

/// Monitor settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonitorConfig {
    /// Reading cadence
    pub sampling: SamplingMode,
    /// Wait before a calibration sample is taken
    pub settle_delay_ms: u32,
    /// Full-scale channel value of the sensor
    pub channel_max: u16,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::with_interval(DEFAULT_SAMPLE_INTERVAL_MS)
    }
}

impl MonitorConfig {
    /// Read on every idle poll
    pub fn continuous() -> Self {
        Self {
            sampling: SamplingMode::Continuous,
            ..Self::with_interval(DEFAULT_SAMPLE_INTERVAL_MS)
        }
    }

    /// Read every `interval_ms`
    pub fn with_interval(interval_ms: u64) -> Self {
        Self {
            sampling: SamplingMode::Interval { interval_ms },
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            channel_max: DEFAULT_CHANNEL_MAX,
        }
    }

    /// Slow cadence for deployments that only feed telemetry
    pub fn telemetry() -> Self {
        Self::with_interval(TELEMETRY_SAMPLE_INTERVAL_MS)
    }
}

/// Operator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `c`: capture the clean reference
    CaptureClean,
    /// `d`: capture the dirty reference
    CaptureDirty,
    /// `s`: advance to the next strategy
    SwitchStrategy,
    /// `a`: toggle the all-strategies comparison
    ToggleComparison,
    /// `p`: re-print the last reading
    PrintCurrent,
}

impl Command {
    /// Decode a command character, either case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'c' => Some(Command::CaptureClean),
            'd' => Some(Command::CaptureDirty),
            's' => Some(Command::SwitchStrategy),
            'a' => Some(Command::ToggleComparison),
            'p' => Some(Command::PrintCurrent),
            _ => None,
        }
    }

    /// Lower-case command character
    pub const fn as_char(&self) -> char {
        match self {
            Command::CaptureClean => 'c',
            Command::CaptureDirty => 'd',
            Command::SwitchStrategy => 's',
            Command::ToggleComparison => 'a',
            Command::PrintCurrent => 'p',
        }
    }
}

/// What one [`Monitor::poll`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollOutcome {
    /// No command pending and no reading due
    Idle,
    /// A command was handled
    Command(Command),
    /// A reading was taken and reported
    Measured(Measurement),
    /// A reading was due but could not be scored
    Skipped(ScoreError),
}

/// Filter saturation monitor
pub struct Monitor<D, W, P = NoopPublisher> {
    sensor: SaturationSensor<D>,
    selector: StrategySelector,
    profile: CalibrationProfile,
    capture: CalibrationCapture,
    delay: W,
    publisher: P,
    sampling: SamplingMode,
    timer: SampleTimer,
    show_comparison: bool,
}

impl<D, W> Monitor<D, W, NoopPublisher>
where
    D: ColorDriver,
    W: SettleDelay,
{
    /// Monitor with seed calibration, the ensemble active, no publisher
    pub fn new(driver: D, delay: W, config: MonitorConfig) -> Self {
        let selector = StrategySelector::default();
        let sensor = SaturationSensor::with_channel_max(driver, config.channel_max)
            .with_strategy(*selector.active());
        Self::assemble(sensor, selector, delay, config)
    }

    /// Monitor around an existing sensor
    ///
    /// The selector is moved onto the sensor's strategy, ensemble weights
    /// included. An unassigned sensor stays unassigned until the first
    /// switch or selection.
    pub fn from_sensor(sensor: SaturationSensor<D>, delay: W, config: MonitorConfig) -> Self {
        let mut selector = StrategySelector::default();
        if let Some(strategy) = sensor.strategy() {
            if let Strategy::WeightedMix(weights) = strategy {
                selector.set_weights(*weights);
            }
            selector.select(strategy.kind());
        }
        Self::assemble(sensor, selector, delay, config)
    }

    fn assemble(
        sensor: SaturationSensor<D>,
        selector: StrategySelector,
        delay: W,
        config: MonitorConfig,
    ) -> Self {
        let interval_ms = match config.sampling {
            SamplingMode::Interval { interval_ms } => interval_ms,
            SamplingMode::Continuous => 0,
        };

        Self {
            sensor,
            selector,
            profile: CalibrationProfile::default(),
            capture: CalibrationCapture::new(config.settle_delay_ms, config.channel_max),
            delay,
            publisher: NoopPublisher,
            sampling: config.sampling,
            timer: SampleTimer::new(interval_ms),
            show_comparison: false,
        }
    }
}

impl<D, W, P> Monitor<D, W, P>
where
    D: ColorDriver,
    W: SettleDelay,
    P: ScorePublisher,
{
    /// Swap in a telemetry publisher
    pub fn with_publisher<Q: ScorePublisher>(self, publisher: Q) -> Monitor<D, W, Q> {
        Monitor {
            sensor: self.sensor,
            selector: self.selector,
            profile: self.profile,
            capture: self.capture,
            delay: self.delay,
            publisher,
            sampling: self.sampling,
            timer: self.timer,
            show_comparison: self.show_comparison,
        }
    }

    /// Bring up the sensor and its illumination
    pub fn initialize(&mut self) {
        self.sensor.initialize();
        match self.sensor.strategy() {
            Some(_strategy) => {
                log_info!("Monitor started, active strategy {}", _strategy.name());
            }
            None => {
                log_warn!("Monitor started without a strategy");
            }
        }
    }

    /// Startup banner with commands and the active strategy
    pub fn write_help<O: Write + ?Sized>(&self, out: &mut O) -> fmt::Result {
        report::write_help(out, self.sensor.strategy())
    }

    /// Advance the loop by one step
    pub fn poll<C, O>(&mut self, now: Timestamp, commands: &mut C, out: &mut O) -> Result<PollOutcome, fmt::Error>
    where
        C: CommandSource + ?Sized,
        O: Write + ?Sized,
    {
        match commands.poll_command() {
            Ok(c) => {
                if let Some(command) = Command::from_char(c) {
                    self.handle_command(command, out)?;
                    return Ok(PollOutcome::Command(command));
                }
                log_debug!("Ignoring unknown command {:?}", c);
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_err)) => {
                log_warn!("Command source error: {:?}", _err);
            }
        }

        if !self.reading_due(now) {
            return Ok(PollOutcome::Idle);
        }
        self.measure_now(out)
    }

    fn reading_due(&mut self, now: Timestamp) -> bool {
        match self.sampling {
            SamplingMode::Continuous => true,
            SamplingMode::Interval { .. } => self.timer.poll(now),
        }
    }

    /// Run one operator command, rendering its output
    pub fn handle_command<O: Write + ?Sized>(&mut self, command: Command, out: &mut O) -> fmt::Result {
        match command {
            Command::CaptureClean => self.write_capture(Endpoint::Clean, out),
            Command::CaptureDirty => self.write_capture(Endpoint::Dirty, out),
            Command::SwitchStrategy => {
                let active = *self.switch_strategy();
                report::write_strategy_switched(out, &active)
            }
            Command::ToggleComparison => {
                self.show_comparison = !self.show_comparison;
                report::write_comparison_toggled(out, self.show_comparison)
            }
            Command::PrintCurrent => self.write_current(out),
        }
    }

    fn write_capture<O: Write + ?Sized>(&mut self, endpoint: Endpoint, out: &mut O) -> fmt::Result {
        report::write_calibrating(out, endpoint)?;
        let captured = self.capture(endpoint);
        report::write_calibrated(out, &captured)
    }

    fn write_current<O: Write + ?Sized>(&self, out: &mut O) -> fmt::Result {
        let measurement = match self.sensor.last_measurement() {
            Some(measurement) => measurement,
            None => return report::write_no_reading(out),
        };

        report::write_reading(out, measurement)?;
        if self.show_comparison {
            let rows = self.selector.compare(&measurement.reading, &self.profile);
            report::write_comparison(out, &rows)?;
        }
        Ok(())
    }

    /// Take, report and publish one reading regardless of the timer
    pub fn measure_now<O: Write + ?Sized>(&mut self, out: &mut O) -> Result<PollOutcome, fmt::Error> {
        match self.sensor.measure(&self.profile) {
            Ok(measurement) => {
                report::write_reading(out, &measurement)?;
                self.publish(&measurement);
                Ok(PollOutcome::Measured(measurement))
            }
            Err(err) => {
                report::write_no_strategy(out)?;
                Ok(PollOutcome::Skipped(err))
            }
        }
    }

    fn publish(&mut self, measurement: &Measurement) {
        if !measurement.score.is_valid() {
            log_warn!(
                "Not publishing {} score: {:?}",
                measurement.strategy.name(),
                measurement.score.validity()
            );
            return;
        }

        if let Err(_err) = self.publisher.publish_measurement(measurement) {
            log_warn!("Failed to publish score: {:?}", _err);
        }
    }

    /// Capture the clean reference from a fresh sample
    pub fn capture_clean(&mut self) -> CapturedEndpoint {
        self.capture(Endpoint::Clean)
    }

    /// Capture the dirty reference from a fresh sample
    pub fn capture_dirty(&mut self) -> CapturedEndpoint {
        self.capture(Endpoint::Dirty)
    }

    fn capture(&mut self, endpoint: Endpoint) -> CapturedEndpoint {
        self.capture.capture(
            endpoint,
            self.sensor.driver_mut(),
            &mut self.delay,
            &mut self.profile,
        )
    }

    /// Advance the selector and hand the new strategy to the sensor
    pub fn switch_strategy(&mut self) -> &Strategy {
        let active = *self.selector.switch_strategy();
        self.sensor.set_strategy(active);
        self.selector.active()
    }

    /// Make `kind` active
    pub fn select_strategy(&mut self, kind: StrategyKind) -> &Strategy {
        let active = *self.selector.select(kind);
        self.sensor.set_strategy(active);
        self.selector.active()
    }

    /// Replace the ensemble weights; later readings use them
    ///
    /// The sensor only picks them up if it is already scoring with the
    /// ensemble.
    pub fn set_weights(&mut self, weights: MixWeights) {
        self.selector.set_weights(weights);
        if let Some(Strategy::WeightedMix(_)) = self.sensor.strategy() {
            self.sensor.set_strategy(Strategy::WeightedMix(weights));
        }
    }

    /// Replace the whole calibration profile, e.g. from persisted storage
    pub fn load_calibration(&mut self, profile: CalibrationProfile) {
        self.profile = profile;
        log_info!("Calibration profile loaded");
        for _metric in self.profile.degenerate_metrics() {
            log_warn!("Loaded {} calibration is degenerate", _metric);
        }
    }

    /// Show or hide the comparison table on `p`
    pub fn set_comparison(&mut self, enabled: bool) {
        self.show_comparison = enabled;
    }

    /// Whether `p` also prints the comparison table
    pub fn comparison_enabled(&self) -> bool {
        self.show_comparison
    }

    /// Latest score for pull-style telemetry, `0.0` before the first reading
    pub fn current_score(&self) -> f64 {
        self.sensor.current_score()
    }

    /// Latest score with its validity flag, see
    /// [`SaturationSensor::current_score_checked`]
    pub fn current_score_checked(&self) -> ScoreResult<(f64, Validity)> {
        self.sensor.current_score_checked()
    }

    /// Latest measurement
    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.sensor.last_measurement()
    }

    /// Strategy scoring the next reading, `None` until one is assigned
    pub fn active_strategy(&self) -> Option<&Strategy> {
        self.sensor.strategy()
    }

    /// Current calibration
    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// Strategy selector
    pub fn selector(&self) -> &StrategySelector {
        &self.selector
    }

    /// Sensor wrapper
    pub fn sensor(&self) -> &SaturationSensor<D> {
        &self.sensor
    }

    /// Settle delay collaborator
    pub fn delay(&self) -> &W {
        &self.delay
    }

    /// Telemetry publisher
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Telemetry publisher, mutably
    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Reading cadence
    pub fn sampling(&self) -> SamplingMode {
        self.sampling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RawColorSample;

    struct Fixed(RawColorSample);

    impl ColorDriver for Fixed {
        fn capture_raw_sample(&mut self) -> RawColorSample {
            self.0
        }

        fn set_illumination(&mut self, _on: bool) {}
    }

    struct NoWait;

    impl SettleDelay for NoWait {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    struct Keys(Option<char>);

    impl CommandSource for Keys {
        type Error = ();

        fn poll_command(&mut self) -> nb::Result<char, ()> {
            self.0.take().ok_or(nb::Error::WouldBlock)
        }
    }

    type Sink = heapless::String<2048>;

    fn monitor(config: MonitorConfig) -> Monitor<Fixed, NoWait> {
        Monitor::new(Fixed(RawColorSample::new(200, 150, 40)), NoWait, config)
    }

    #[test]
    fn command_chars_either_case() {
        assert_eq!(Command::from_char('c'), Some(Command::CaptureClean));
        assert_eq!(Command::from_char('D'), Some(Command::CaptureDirty));
        assert_eq!(Command::from_char('S'), Some(Command::SwitchStrategy));
        assert_eq!(Command::from_char('a'), Some(Command::ToggleComparison));
        assert_eq!(Command::from_char('P'), Some(Command::PrintCurrent));
        assert_eq!(Command::from_char('x'), None);
        assert_eq!(Command::from_char('\n'), None);
    }

    #[test]
    fn config_presets() {
        assert_eq!(
            MonitorConfig::default().sampling,
            SamplingMode::Interval { interval_ms: 1000 }
        );
        assert_eq!(MonitorConfig::continuous().sampling, SamplingMode::Continuous);
        assert_eq!(MonitorConfig::default().settle_delay_ms, 2000);
        assert_eq!(MonitorConfig::telemetry().channel_max, 255);
    }

    #[test]
    fn starts_on_ensemble() {
        let monitor = monitor(MonitorConfig::default());
        assert_eq!(
            monitor.active_strategy().map(Strategy::kind),
            Some(StrategyKind::WeightedMix)
        );
        assert_eq!(monitor.sensor().strategy(), Some(monitor.selector().active()));
    }

    #[test]
    fn command_takes_the_whole_poll() {
        let mut monitor = monitor(MonitorConfig::continuous());
        let mut out = Sink::new();

        let outcome = monitor.poll(0, &mut Keys(Some('s')), &mut out).unwrap();

        assert_eq!(outcome, PollOutcome::Command(Command::SwitchStrategy));
        assert!(monitor.last_measurement().is_none());
        assert_eq!(monitor.active_strategy(), Some(&Strategy::BrownScore));
    }

    #[test]
    fn unknown_command_falls_through_to_reading() {
        let mut monitor = monitor(MonitorConfig::continuous());
        let mut out = Sink::new();

        let outcome = monitor.poll(0, &mut Keys(Some('?')), &mut out).unwrap();

        assert!(matches!(outcome, PollOutcome::Measured(_)));
    }

    #[test]
    fn switch_keeps_sensor_in_step() {
        let mut monitor = monitor(MonitorConfig::default());
        monitor.switch_strategy();
        monitor.switch_strategy();

        assert_eq!(monitor.sensor().strategy(), Some(&Strategy::HsvSaturation));
    }

    #[test]
    fn weights_reach_active_ensemble() {
        let mut monitor = monitor(MonitorConfig::default());
        let weights = MixWeights::new(0.0, 0.0, 0.0, 0.0, 1.0).unwrap();

        monitor.set_weights(weights);

        assert_eq!(monitor.sensor().strategy(), Some(&Strategy::WeightedMix(weights)));
    }

    #[test]
    fn adopted_sensor_strategy_drives_selector() {
        let sensor = SaturationSensor::new(Fixed(RawColorSample::new(200, 150, 40)))
            .with_strategy(Strategy::Chroma);
        let mut monitor = Monitor::from_sensor(sensor, NoWait, MonitorConfig::default());
        let mut out = Sink::new();

        monitor.write_help(&mut out).unwrap();
        assert!(out.contains("Active Strategy: Chroma"));
        assert_eq!(monitor.selector().active(), &Strategy::Chroma);

        monitor.set_weights(MixWeights::default());
        assert_eq!(monitor.active_strategy(), Some(&Strategy::Chroma));

        assert_eq!(monitor.switch_strategy().kind(), StrategyKind::Brightness);
    }

    #[test]
    fn adopted_ensemble_keeps_its_weights() {
        let weights = MixWeights::new(0.0, 0.0, 0.0, 0.0, 1.0).unwrap();
        let sensor = SaturationSensor::new(Fixed(RawColorSample::new(200, 150, 40)))
            .with_strategy(Strategy::WeightedMix(weights));

        let monitor = Monitor::from_sensor(sensor, NoWait, MonitorConfig::default());

        assert_eq!(monitor.selector().weights(), weights);
        assert_eq!(monitor.selector().index(), 0);
    }

    #[test]
    fn unassigned_sensor_reports_no_strategy() {
        let sensor = SaturationSensor::new(Fixed(RawColorSample::new(200, 150, 40)));
        let mut monitor = Monitor::from_sensor(sensor, NoWait, MonitorConfig::continuous());
        let mut out = Sink::new();

        monitor.write_help(&mut out).unwrap();
        let outcome = monitor.poll(0, &mut Keys(None), &mut out).unwrap();

        assert_eq!(outcome, PollOutcome::Skipped(ScoreError::NoActiveStrategy));
        assert!(monitor.active_strategy().is_none());
        assert!(out.contains("Active Strategy: none"));
        assert_eq!(monitor.current_score_checked(), Err(ScoreError::NoActiveStrategy));
    }

    #[test]
    fn print_before_first_reading() {
        let mut monitor = monitor(MonitorConfig::default());
        let mut out = Sink::new();

        monitor.handle_command(Command::PrintCurrent, &mut out).unwrap();

        assert!(out.contains("No reading yet."));
    }
}
