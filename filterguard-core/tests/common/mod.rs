//! Shared fixtures for integration tests
//!
//! Scripted stand-ins for every collaborator the monitor consumes:
//! - [`ScriptedDriver`]: replays a fixed list of samples
//! - [`RecordingDelay`]: records settle delays instead of sleeping
//! - [`ScriptedCommands`]: feeds queued command characters
//! - [`RecordingPublisher`]: keeps everything published, can be told to fail

#![allow(dead_code)]

use std::collections::VecDeque;

use filterguard_core::{
    ColorDriver, CommandSource, RawColorSample, ScorePublisher, SettleDelay,
};

/// Clean white reference under the LED
pub const WHITE: RawColorSample = RawColorSample::new(230, 230, 225);

/// Brown, heavily loaded filter
pub const BROWN: RawColorSample = RawColorSample::new(200, 150, 40);

/// Driver that replays samples in order, repeating the last one
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    samples: VecDeque<RawColorSample>,
    last: RawColorSample,
    pub captures: usize,
    pub initialized: bool,
    pub illuminated: bool,
}

impl ScriptedDriver {
    pub fn new(samples: &[RawColorSample]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn constant(sample: RawColorSample) -> Self {
        Self::new(&[sample])
    }

    pub fn push(&mut self, sample: RawColorSample) {
        self.samples.push_back(sample);
    }
}

impl ColorDriver for ScriptedDriver {
    fn initialize(&mut self) {
        self.initialized = true;
    }

    fn capture_raw_sample(&mut self) -> RawColorSample {
        self.captures += 1;
        if let Some(next) = self.samples.pop_front() {
            self.last = next;
        }
        self.last
    }

    fn set_illumination(&mut self, on: bool) {
        self.illuminated = on;
    }
}

/// Delay that only records what it was asked to wait
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits: Vec<u32>,
}

impl SettleDelay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms);
    }
}

/// Command source fed from a string, one character per poll
#[derive(Debug, Default)]
pub struct ScriptedCommands {
    pending: VecDeque<char>,
}

impl ScriptedCommands {
    pub fn new(script: &str) -> Self {
        Self {
            pending: script.chars().collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn type_char(&mut self, c: char) {
        self.pending.push_back(c);
    }
}

impl CommandSource for ScriptedCommands {
    type Error = ();

    fn poll_command(&mut self) -> nb::Result<char, Self::Error> {
        self.pending.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

/// Command source whose transport is broken
#[derive(Debug, Default)]
pub struct BrokenCommands;

impl CommandSource for BrokenCommands {
    type Error = &'static str;

    fn poll_command(&mut self) -> nb::Result<char, Self::Error> {
        Err(nb::Error::Other("uart framing error"))
    }
}

/// Publisher that records every score
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub published: Vec<f64>,
    pub fail: bool,
}

impl ScorePublisher for RecordingPublisher {
    type Error = &'static str;

    fn publish(&mut self, score: f64) -> Result<(), Self::Error> {
        if self.fail {
            return Err("link down");
        }
        self.published.push(score);
        Ok(())
    }
}
