//! Calibration Seeds and Capture Timing
//!
//! Seed endpoints are the values the reference build shipped with, measured
//! against a white surface (clean) and a used filter (dirty) under the
//! on-board LED. They are a starting point only; capture real endpoints
//! for every installation.

// ===== CHROMA =====

/// Clean filter chroma. White surface reads low chroma.
pub const SEED_CLEAN_CHROMA: f32 = 0.5;

/// Dirty filter chroma.
///
/// Raised from 0.92 after the sensor was observed reading 0.96-0.97 on
/// saturated filters.
pub const SEED_DIRTY_CHROMA: f32 = 1.0;

// ===== VALUE (BRIGHTNESS) =====

/// Clean filter HSV value.
pub const SEED_CLEAN_VALUE: f32 = 0.80;

/// Dirty filter HSV value. Contamination darkens the filter.
pub const SEED_DIRTY_VALUE: f32 = 0.40;

// ===== BLUE RATIO =====

/// Clean filter blue fraction `b / (r + g + b)`. Roughly a neutral third.
pub const SEED_CLEAN_BLUE_RATIO: f32 = 0.34;

/// Dirty filter blue fraction. Brown/yellow deposits absorb blue.
pub const SEED_DIRTY_BLUE_RATIO: f32 = 0.10;

// ===== HSV SATURATION =====

/// Clean filter HSV saturation. Nearly white.
pub const SEED_CLEAN_HSV_SATURATION: f32 = 0.10;

/// Dirty filter HSV saturation.
///
/// Raised from 0.80 after field readings of 0.90 and above.
pub const SEED_DIRTY_HSV_SATURATION: f32 = 0.95;

// ===== CAPTURE =====

/// Wait before sampling a calibration endpoint (milliseconds).
///
/// Lets the illumination LED and the sensor's frequency output settle after
/// the operator has swapped the reference filter in.
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 2000;

/// Smallest usable distance between clean and dirty endpoints.
///
/// Metrics live in `[0, 1]` and the sensor quantizes to 1/255 ≈ 0.004, so a
/// span below this is the same reading captured twice.
pub const DEGENERATE_SPAN_EPSILON: f32 = 1e-6;
