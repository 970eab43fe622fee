//! Decorative bubbles drifting up from the floor
//!
//! A bubble's appearance is a pure function of the scene clock, so bubbles
//! carry no per-tick state beyond their fixed parameters.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::consts::*;
use crate::lerp;

/// Opacity keyframes over one rise: (progress, opacity)
const OPACITY_KEYS: [(f32, f32); 4] = [(0.0, 0.0), (0.1, 0.2), (0.9, 0.1), (1.0, 0.0)];
const START_SCALE: f32 = 0.3;
const END_SCALE: f32 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    /// Horizontal position as a fraction of viewport width
    pub x_fraction: f32,
    pub diameter: f32,
    /// Seconds for one rise
    pub duration: f32,
    /// Seconds before the first rise
    pub delay: f32,
}

/// Where and how a bubble is drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleFrame {
    pub pos: Vec2,
    pub diameter: f32,
    pub opacity: f32,
}

impl Bubble {
    pub fn spawn<R: Rng + ?Sized>(id: u32, rng: &mut R) -> Self {
        Self {
            id,
            x_fraction: rng.random::<f32>(),
            diameter: lerp(BUBBLE_MIN_DIAMETER, BUBBLE_MAX_DIAMETER, rng.random::<f32>()),
            duration: lerp(BUBBLE_MIN_RISE_SECS, BUBBLE_MAX_RISE_SECS, rng.random::<f32>()),
            delay: rng.random::<f32>() * BUBBLE_MAX_DELAY_SECS,
        }
    }

    /// Progress through the current rise, or None before the first one starts
    pub fn progress(&self, now: f32) -> Option<f32> {
        let age = now - self.delay;
        if age < 0.0 {
            return None;
        }
        Some(age.rem_euclid(self.duration) / self.duration)
    }

    pub fn frame(&self, now: f32, viewport: &Viewport) -> Option<BubbleFrame> {
        let progress = self.progress(now)?;
        let diameter = self.diameter * lerp(START_SCALE, END_SCALE, progress);
        // Starts resting on the floor, ends just above the top edge
        Some(BubbleFrame {
            pos: Vec2::new(
                self.x_fraction * viewport.width,
                viewport.height - diameter - progress * viewport.height,
            ),
            diameter,
            opacity: opacity_at(progress),
        })
    }
}

/// Piecewise-linear opacity over one rise
pub fn opacity_at(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    for pair in OPACITY_KEYS.windows(2) {
        let (t0, a0) = pair[0];
        let (t1, a1) = pair[1];
        if t <= t1 {
            return lerp(a0, a1, (t - t0) / (t1 - t0));
        }
    }
    0.0
}
