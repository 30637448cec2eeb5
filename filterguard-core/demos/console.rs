//! Interactive Console Example
//!
//! Runs the filter monitor on a host against a simulated color sensor that
//! slowly browns over time, with operator commands read from stdin.
//!
//! ## What You'll Learn
//!
//! - Wiring a driver, a settle delay and a command source into a `Monitor`
//! - Calibrating clean and dirty references at runtime
//! - Switching strategies and comparing them on the same reading
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example console
//! ```
//!
//! Type a command letter and press enter: `c`, `d`, `s`, `a` or `p`.
//! Calibrate clean right away (the simulated filter starts white), wait for
//! it to brown, then calibrate dirty.

use std::io::{self, BufRead, Write as _};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use filterguard_core::{
    time::{MonotonicClock, TimeSource},
    traits::StdDelay,
    ColorDriver, CommandSource, Monitor, MonitorConfig, RawColorSample, VERSION,
};

/// Filter that picks up a brown cast a little more with every sample
struct BrowningFilter {
    samples: u32,
}

impl BrowningFilter {
    const CLEAN: (f32, f32, f32) = (235.0, 232.0, 228.0);
    const DIRTY: (f32, f32, f32) = (150.0, 105.0, 25.0);
    const SAMPLES_TO_DIRTY: u32 = 60;
}

impl ColorDriver for BrowningFilter {
    fn initialize(&mut self) {
        println!("[sim] color sensor ready");
    }

    fn capture_raw_sample(&mut self) -> RawColorSample {
        let t = (self.samples as f32 / Self::SAMPLES_TO_DIRTY as f32).min(1.0);
        self.samples += 1;

        let mix = |clean: f32, dirty: f32| (clean + (dirty - clean) * t).round() as u16;
        RawColorSample::new(
            mix(Self::CLEAN.0, Self::DIRTY.0),
            mix(Self::CLEAN.1, Self::DIRTY.1),
            mix(Self::CLEAN.2, Self::DIRTY.2),
        )
    }

    fn set_illumination(&mut self, on: bool) {
        println!("[sim] illumination {}", if on { "on" } else { "off" });
    }
}

/// Characters typed on stdin, forwarded by a reader thread
///
/// Once stdin closes the channel disconnects and the source goes quiet.
struct StdinCommands {
    rx: Option<Receiver<char>>,
}

impl StdinCommands {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines().map_while(Result::ok) {
                for c in line.chars().filter(|c| !c.is_whitespace()) {
                    if tx.send(c).is_err() {
                        return;
                    }
                }
            }
        });
        Self { rx: Some(rx) }
    }
}

impl CommandSource for StdinCommands {
    type Error = TryRecvError;

    fn poll_command(&mut self) -> nb::Result<char, Self::Error> {
        let rx = self.rx.as_ref().ok_or(nb::Error::WouldBlock)?;
        match rx.try_recv() {
            Ok(c) => Ok(c),
            Err(TryRecvError::Empty) => Err(nb::Error::WouldBlock),
            Err(err) => {
                println!("[sim] stdin closed, commands disabled");
                self.rx = None;
                Err(nb::Error::Other(err))
            }
        }
    }
}

fn main() {
    println!("FilterGuard {} - Filter Saturation Monitor", VERSION);
    println!("==========================================\n");

    let driver = BrowningFilter { samples: 0 };
    let mut monitor = Monitor::new(driver, StdDelay, MonitorConfig::with_interval(2000));
    let mut commands = StdinCommands::spawn();
    let clock = MonotonicClock::new();
    let mut console = String::new();

    monitor.initialize();
    if monitor.write_help(&mut console).is_ok() {
        print!("{}", console);
    }

    loop {
        console.clear();
        if monitor.poll(clock.now(), &mut commands, &mut console).is_err() {
            eprintln!("console formatting failed");
            break;
        }

        if !console.is_empty() {
            print!("{}", console);
            let _ = io::stdout().flush();
        }

        thread::sleep(Duration::from_millis(20));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_stdin_goes_quiet() {
        let (tx, rx) = mpsc::channel::<char>();
        drop(tx);
        let mut commands = StdinCommands { rx: Some(rx) };

        assert!(matches!(
            commands.poll_command(),
            Err(nb::Error::Other(TryRecvError::Disconnected))
        ));
        assert!(matches!(commands.poll_command(), Err(nb::Error::WouldBlock)));
        assert!(matches!(commands.poll_command(), Err(nb::Error::WouldBlock)));
    }
}
