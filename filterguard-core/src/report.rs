//! Console rendering
//!
//! Everything the operator sees goes through a [`core::fmt::Write`] sink, so
//! the same blocks render to a UART, a `String`, or a fixed-capacity
//! `heapless::String` in tests. Nothing here reads hardware or mutates
//! state.

use core::fmt::{self, Write};

use crate::{
    calibration::{CapturedEndpoint, Endpoint},
    constants::scoring::{PROGRESS_BAR_CELLS, PROGRESS_PERCENT_PER_CELL},
    selector::StrategyScore,
    sensor::Measurement,
    strategies::{Strategy, Validity},
};

const SEPARATOR: &str = "===================================";

/// Number of filled progress cells for a score
///
/// `floor(score / 5)`, never more than the bar holds.
pub fn filled_cells(score: f32) -> usize {
    if !score.is_finite() || score <= 0.0 {
        return 0;
    }
    let cells = libm::floorf(score / PROGRESS_PERCENT_PER_CELL) as usize;
    cells.min(PROGRESS_BAR_CELLS)
}

/// Diagnostic block for one measurement
pub fn write_reading<W: Write + ?Sized>(out: &mut W, measurement: &Measurement) -> fmt::Result {
    let sample = measurement.reading.sample();
    let metrics = measurement.reading.metrics();
    let score = measurement.score;

    writeln!(out, "--- Color Sensor Reading ---")?;
    writeln!(out, "RGB: ({}, {}, {})", sample.red, sample.green, sample.blue)?;
    writeln!(
        out,
        "HSV: (H:{:.2}, S:{:.2}, V:{:.2})",
        metrics.hue, metrics.saturation, metrics.value
    )?;
    writeln!(out, "Chroma: {:.2}", metrics.chroma)?;
    writeln!(out, "*** FILTER SATURATION ANALYSIS ***")?;
    writeln!(out, "Strategy: {}", measurement.strategy.name())?;
    writeln!(out, "Saturation Level: {:.1}%", score.value())?;
    writeln!(out, "Status: {}", score.status())?;
    if let Validity::DegenerateCalibration(metric) = score.validity() {
        writeln!(
            out,
            "WARNING: {} calibration is degenerate (clean == dirty), recalibrate",
            metric
        )?;
    }
    write_progress_bar(out, score.value())?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out)
}

/// `Progress: [====      ]` line
pub fn write_progress_bar<W: Write + ?Sized>(out: &mut W, score: f32) -> fmt::Result {
    let filled = filled_cells(score);

    out.write_str("Progress: [")?;
    for cell in 0..PROGRESS_BAR_CELLS {
        out.write_char(if cell < filled { '=' } else { ' ' })?;
    }
    out.write_str("]\n")
}

/// Every strategy's score for the same reading
pub fn write_comparison<W: Write + ?Sized>(out: &mut W, rows: &[StrategyScore]) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "=== ALL STRATEGIES COMPARISON ===")?;
    for row in rows {
        write!(out, "{}: {:.1}%", row.kind.name(), row.score.value())?;
        if !row.score.is_valid() {
            out.write_str(" (degenerate calibration)")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "================================")?;
    writeln!(out)
}

/// Banner after a strategy switch
pub fn write_strategy_switched<W: Write + ?Sized>(out: &mut W, active: &Strategy) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "*** STRATEGY SWITCHED ***")?;
    writeln!(out, "Active Strategy: {}", active.name())?;
    writeln!(out, "************************")?;
    writeln!(out)
}

/// Banner printed before the settle delay of a capture
pub fn write_calibrating<W: Write + ?Sized>(out: &mut W, endpoint: Endpoint) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "=== CALIBRATING {} FILTER ===", endpoint.label())
}

/// Echo of the references just captured
pub fn write_calibrated<W: Write + ?Sized>(out: &mut W, captured: &CapturedEndpoint) -> fmt::Result {
    let heading = match captured.endpoint {
        Endpoint::Clean => "Clean",
        Endpoint::Dirty => "Dirty",
    };
    let values = &captured.values;

    writeln!(out, "{} filter calibrated:", heading)?;
    writeln!(out, "  Chroma: {:.2}", values.chroma)?;
    writeln!(out, "  Value: {:.2}", values.value)?;
    writeln!(out, "  HSV Saturation: {:.2}", values.hsv_saturation)?;
    writeln!(out, "  Blue Ratio: {:.2}", values.blue_ratio)
}

/// Comparison view toggled on or off
pub fn write_comparison_toggled<W: Write + ?Sized>(out: &mut W, enabled: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "All strategies comparison: {}",
        if enabled { "ENABLED" } else { "DISABLED" }
    )?;
    writeln!(out)
}

/// Measurement skipped because no strategy is assigned
pub fn write_no_strategy<W: Write + ?Sized>(out: &mut W) -> fmt::Result {
    writeln!(out, "No strategy set! Measurement skipped.")
}

/// `p` pressed before the first measurement
pub fn write_no_reading<W: Write + ?Sized>(out: &mut W) -> fmt::Result {
    writeln!(out, "No reading yet.")
}

/// Startup banner with the command list
pub fn write_help<W: Write + ?Sized>(out: &mut W, active: Option<&Strategy>) -> fmt::Result {
    writeln!(out, "COMMANDS:")?;
    writeln!(out, "  'c' - Calibrate with CLEAN filter")?;
    writeln!(out, "  'd' - Calibrate with DIRTY filter")?;
    writeln!(out, "  's' - Switch calculation strategy")?;
    writeln!(out, "  'a' - Show all strategies comparison")?;
    writeln!(out, "  'p' - Print current sensor values")?;
    writeln!(out)?;
    writeln!(out, "Active Strategy: {}", active.map_or("none", Strategy::name))?;
    writeln!(out)
}
