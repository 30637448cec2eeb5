//! Score Range, Severity Thresholds and Ensemble Weights

// ===== SCORE RANGE =====

/// Lowest saturation score (clean filter).
pub const SCORE_MIN: f32 = 0.0;

/// Highest saturation score (fully saturated filter).
pub const SCORE_MAX: f32 = 100.0;

// ===== STATUS THRESHOLDS =====
//
// Buckets are inclusive-lower / exclusive-upper, except SATURATED which
// also includes SCORE_MAX.

/// Lower bound of LIGHT contamination (%).
pub const STATUS_LIGHT_MIN: f32 = 20.0;

/// Lower bound of MODERATE contamination (%).
pub const STATUS_MODERATE_MIN: f32 = 40.0;

/// Lower bound of HEAVY contamination (%).
pub const STATUS_HEAVY_MIN: f32 = 60.0;

/// Lower bound of SATURATED (%).
pub const STATUS_SATURATED_MIN: f32 = 80.0;

// ===== ENSEMBLE WEIGHTS =====
//
// Defaults sum to 1.0 so the ensemble stays on the same 0-100 scale as its
// components. Chroma gets the largest share: it tracked field contamination
// most closely; the brown heuristic ignores calibration and gets the least.

/// Default weight of the chroma score.
pub const DEFAULT_CHROMA_WEIGHT: f32 = 0.25;

/// Default weight of the brightness score.
pub const DEFAULT_BRIGHTNESS_WEIGHT: f32 = 0.20;

/// Default weight of the blue-ratio score.
pub const DEFAULT_BLUE_RATIO_WEIGHT: f32 = 0.20;

/// Default weight of the HSV saturation score.
pub const DEFAULT_HSV_SATURATION_WEIGHT: f32 = 0.20;

/// Default weight of the brown-cast score.
pub const DEFAULT_BROWN_WEIGHT: f32 = 0.15;

// ===== REPORT LAYOUT =====

/// Cells in the console progress bar.
pub const PROGRESS_BAR_CELLS: usize = 20;

/// Score percentage represented by one filled cell.
pub const PROGRESS_PERCENT_PER_CELL: f32 = SCORE_MAX / PROGRESS_BAR_CELLS as f32;
