//! Aquarium - A decorative animated fish tank for the browser
//!
//! Core modules:
//! - `sim`: Deterministic scene simulation (sprite state machines, clock, spawn timers)
//! - `view`: Renderable sprite descriptions derived from scene state
//! - `tuning`: Data-driven scene configuration
//! - `frame`: Frame loop timing and page lifecycle for the browser driver

pub mod frame;
pub mod sim;
pub mod tuning;
pub mod view;

pub use frame::FrameClock;
pub use tuning::{Tuning, TuningError};
pub use view::{SpriteKind, SpriteView, describe};

/// Scene configuration defaults
pub mod consts {
    /// Frame rate that per-frame speeds are expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// One reference frame in seconds
    pub const FRAME_DT: f32 = 1.0 / REFERENCE_FPS;
    /// Longest elapsed time a single tick will simulate (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Fish defaults (pixels per reference frame, pixels)
    pub const FISH_BASE_SPEED: f32 = 2.0;
    pub const FISH_DEFAULT_SIZE: f32 = 200.0;
    /// Slowest velocity component, as a fraction of base speed, after a respawn
    pub const FISH_MIN_SPEED_FRACTION: f32 = 0.25;

    /// Scare episode: grow, swim to the middle, come back
    pub const SCARE_DURATION_SECS: f32 = 2.0;
    /// Peak size relative to the smaller viewport dimension
    pub const MAX_SCARE_SIZE_RATIO: f32 = 0.9;
    /// Fraction of the episode spent growing
    pub const SCARE_PEAK_AT: f32 = 0.2;

    /// Shark
    pub const SHARK_SPEED: f32 = 3.0;
    pub const SHARK_SIZE: f32 = 300.0;
    pub const SHARK_SPAWN_INTERVAL_SECS: f32 = 20.0;

    /// Jellyfish
    pub const JELLY_COUNT: usize = 4;
    pub const JELLY_SIZE: f32 = 120.0;
    pub const JELLY_RISE_SPEED: f32 = 1.0;
    pub const JELLY_FALL_SPEED: f32 = 1.5;
    pub const JELLY_FLOAT_SECS: f32 = 4.0;
    pub const JELLY_HIDDEN_SECS: f32 = 3.0;
    /// Upper bound of the random initial phase offset
    pub const JELLY_STAGGER_SECS: f32 = 6.0;

    /// Anchor
    pub const ANCHOR_DISPLAY_SECS: f32 = 5.0;
    pub const ANCHOR_HIDDEN_SECS: f32 = 12.0;
    pub const ANCHOR_DROP_SPEED: f32 = 2.0;
    pub const ANCHOR_SIZE: f32 = 150.0;
    /// Horizontal margin kept clear on both sides, as a fraction of width
    pub const ANCHOR_INSET: f32 = 0.1;

    /// Decorative bubbles
    pub const BUBBLE_COUNT: usize = 20;
    pub const BUBBLE_MIN_DIAMETER: f32 = 4.0;
    pub const BUBBLE_MAX_DIAMETER: f32 = 12.0;
    pub const BUBBLE_MIN_RISE_SECS: f32 = 40.0;
    pub const BUBBLE_MAX_RISE_SECS: f32 = 100.0;
    pub const BUBBLE_MAX_DELAY_SECS: f32 = 30.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Upper bound for a sprite's top-left coordinate along an axis (never negative)
#[inline]
pub fn max_offset(dimension: f32, size: f32) -> f32 {
    (dimension - size).max(0.0)
}
