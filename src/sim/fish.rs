//! Fish: wall-bouncing drift plus the click-triggered scare episode

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::curve::{ScareCurve, there_and_back};
use super::viewport::Viewport;
use crate::consts::FISH_MIN_SPEED_FRACTION;
use crate::tuning::Tuning;
use crate::{lerp, max_offset};

/// Scare episode state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scare {
    pub active: bool,
    /// 0 at the click, 1 when the episode ends
    pub progress: f32,
    /// Where the fish was when clicked; it returns here afterwards
    pub origin: Vec2,
}

/// A drifting fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    pub image: String,
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub original_size: f32,
    pub current_size: f32,
    /// Image mirrored (swimming left)
    pub flipped: bool,
    pub scare: Scare,
}

/// Random velocity with both components non-zero
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, base_speed: f32) -> Vec2 {
    let mut component = || {
        let magnitude = lerp(FISH_MIN_SPEED_FRACTION * base_speed, base_speed, rng.random::<f32>());
        if rng.random_bool(0.5) { magnitude } else { -magnitude }
    };
    let x = component();
    let y = component();
    Vec2::new(x, y)
}

impl Fish {
    /// Place a fish at a random spot inside the viewport
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        image: String,
        viewport: &Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let size = tuning.fish_size;
        let pos = Vec2::new(
            rng.random::<f32>() * max_offset(viewport.width, size),
            rng.random::<f32>() * max_offset(viewport.height, size),
        );
        let vel = random_velocity(rng, tuning.fish_speed);

        Self {
            id,
            image,
            pos,
            vel,
            original_size: size,
            current_size: size,
            flipped: vel.x < 0.0,
            scare: Scare {
                active: false,
                progress: 0.0,
                origin: pos,
            },
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scare.active
    }

    /// Start (or restart) a scare episode from the current position
    pub fn scare(&mut self) {
        self.scare = Scare {
            active: true,
            progress: 0.0,
            origin: self.pos,
        };
        self.vel = Vec2::ZERO;
    }

    /// Advance one tick: `frames` reference frames, `dt` seconds
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        frames: f32,
        dt: f32,
        viewport: &Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        if self.scare.active {
            self.update_scared(dt, viewport, tuning, rng);
        } else {
            self.update_cruising(frames, viewport);
        }
    }

    fn update_cruising(&mut self, frames: f32, viewport: &Viewport) {
        let next = self.pos + self.vel * frames;

        // An axis that would leave the tank bounces and keeps its old coordinate
        if next.x < 0.0 || next.x + self.current_size > viewport.width {
            self.vel.x = -self.vel.x;
            self.flipped = self.vel.x < 0.0;
        } else {
            self.pos.x = next.x;
        }

        if next.y < 0.0 || next.y + self.current_size > viewport.height {
            self.vel.y = -self.vel.y;
        } else {
            self.pos.y = next.y;
        }
    }

    fn update_scared<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        viewport: &Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        let progress = (self.scare.progress + dt / tuning.scare_duration).min(1.0);
        self.scare.progress = progress;

        if progress >= 1.0 {
            self.scare.active = false;
            self.current_size = self.original_size;
            self.pos = self.scare.origin;
            self.vel = random_velocity(rng, tuning.fish_speed);
            self.flipped = self.vel.x < 0.0;
            log::debug!("Fish {} calmed down", self.id);
            return;
        }

        let peak = viewport.min_dimension() * tuning.max_scare_size_ratio;
        let curve = ScareCurve::new(tuning.scare_peak_at);
        self.current_size = curve.size(progress, self.original_size, peak);

        let target = viewport.center() - Vec2::splat(self.current_size / 2.0);
        let origin = self.scare.origin;
        self.pos = origin + (target - origin) * there_and_back(progress);
    }

    /// Pull the fish back inside a (resized) viewport
    pub fn clamp_into(&mut self, viewport: &Viewport) {
        if self.scare.active {
            self.scare.origin = viewport.clamp_sprite(self.scare.origin, self.original_size);
        } else {
            self.pos = viewport.clamp_sprite(self.pos, self.current_size);
        }
    }
}
