//! Constants for FilterGuard Core
//!
//! Centralized numeric values used by the scoring engine. Every magic number
//! that shapes a score, a label or a timing lives here with a note on where
//! it comes from.
//!
//! ## Organization
//!
//! - **Color**: sensor channel scale and hue geometry
//! - **Calibration**: seed endpoints, degenerate-span tolerance, settle delay
//! - **Scoring**: score range, status thresholds, ensemble weights, report layout
//! - **Time**: sampling intervals

/// Sensor channel scale and HSV geometry.
pub mod color;

/// Seed calibration endpoints and capture timing.
pub mod calibration;

/// Score range, severity thresholds, default weights.
pub mod scoring;

/// Sampling intervals.
pub mod time;

// Re-export commonly used constants for convenience
pub use color::{DEFAULT_CHANNEL_MAX, HUE_FULL_CIRCLE_DEG, HUE_SECTOR_DEG};

pub use calibration::{DEFAULT_SETTLE_DELAY_MS, DEGENERATE_SPAN_EPSILON};

pub use scoring::{
    PROGRESS_BAR_CELLS, PROGRESS_PERCENT_PER_CELL, SCORE_MAX, SCORE_MIN,
    STATUS_HEAVY_MIN, STATUS_LIGHT_MIN, STATUS_MODERATE_MIN, STATUS_SATURATED_MIN,
};

pub use time::{DEFAULT_SAMPLE_INTERVAL_MS, TELEMETRY_SAMPLE_INTERVAL_MS};
