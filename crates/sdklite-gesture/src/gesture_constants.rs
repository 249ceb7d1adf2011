//! Shared gesture constants.
//!
//! Values are unitless ratios or logical pixels and apply to every
//! detector that reads them.

/// Minimum ratio of current to baseline pressure for a scale update.
///
/// When a finger starts to lift, the platform reports a sharp pressure drop
/// together with jittery positions. Frames whose summed pressure of the two
/// tracked fingers falls to this fraction of the baseline (or below) are
/// not reported to the scale listener and never become the new baseline.
pub const PRESSURE_THRESHOLD: f32 = 0.67;

/// Pressure assigned to samples whose source does not report one.
pub const DEFAULT_PRESSURE: f32 = 1.0;

/// Pointer count kept inline in a frame before spilling to the heap.
///
/// Ten covers every common touch screen; the detectors look at two.
pub const INLINE_POINTERS: usize = 10;

/// Scale factor reported when the baseline span is degenerate.
pub const NEUTRAL_SCALE_FACTOR: f32 = 1.0;
