//! Scare episode curves
//!
//! The size curve is two linear segments meeting at `peak_at`:
//! base → peak over `[0, peak_at]`, then peak → base over `[peak_at, 1]`.
//! The path law goes out to the target during the first half and back
//! to the origin during the second half.

use serde::{Deserialize, Serialize};

use crate::lerp;

/// Two-segment piecewise-linear rise/fall curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScareCurve {
    /// Progress at which the curve reaches its peak, in (0, 1)
    pub peak_at: f32,
}

impl Default for ScareCurve {
    fn default() -> Self {
        Self {
            peak_at: crate::consts::SCARE_PEAK_AT,
        }
    }
}

impl ScareCurve {
    pub fn new(peak_at: f32) -> Self {
        Self { peak_at }
    }

    /// Weight in [0, 1]: 0 at both ends, 1 at `peak_at`
    pub fn weight(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        if t < self.peak_at {
            t / self.peak_at
        } else {
            1.0 - (t - self.peak_at) / (1.0 - self.peak_at)
        }
    }

    /// Sprite size at `progress`, between `base` and `peak`
    pub fn size(&self, progress: f32, base: f32, peak: f32) -> f32 {
        lerp(base, peak, self.weight(progress))
    }
}

/// Fraction of the way from origin to target: 0 → 1 over the first half, 1 → 0 over the second
pub fn there_and_back(progress: f32) -> f32 {
    let segment = progress.clamp(0.0, 1.0) * 2.0;
    if segment <= 1.0 { segment } else { 2.0 - segment }
}
