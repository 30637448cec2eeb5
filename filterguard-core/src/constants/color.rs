//! Color Sensor Scale and Hue Geometry
//!
//! The sensor reports each channel as an unsigned intensity. The upper end
//! of that range is device dependent; the TCS3200 library used on the
//! reference hardware maps its frequency counts onto 0-255.

/// Default full-scale channel intensity.
///
/// Used to normalize `value` and `chroma` to `[0, 1]` and to scale the
/// brown-cast score. Override per device through
/// [`MonitorConfig::channel_max`](crate::monitor::MonitorConfig).
pub const DEFAULT_CHANNEL_MAX: u16 = 255;

/// Width of one hue sector (degrees).
///
/// The RGB→hue formula splits the circle into six sectors depending on
/// which channel is the maximum.
pub const HUE_SECTOR_DEG: f32 = 60.0;

/// Full hue circle (degrees). Hue is reported in `[0, HUE_FULL_CIRCLE_DEG)`.
pub const HUE_FULL_CIRCLE_DEG: f32 = 360.0;

/// Number of hue sectors.
pub const HUE_SECTORS: f32 = 6.0;
