//! Shark: an occasional full-width pass across the tank

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::max_offset;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharkPhase {
    /// Off screen, waiting for the spawn timer
    Idle,
    /// Swimming across
    Crossing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shark {
    pub pos: Vec2,
    pub phase: SharkPhase,
    /// +1 swimming right, -1 swimming left
    pub direction: f32,
    pub flipped: bool,
    /// Pixels per reference frame
    pub speed: f32,
    pub size: f32,
}

impl Shark {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(-tuning.shark_size, 0.0),
            phase: SharkPhase::Idle,
            direction: 1.0,
            flipped: false,
            speed: tuning.shark_speed,
            size: tuning.shark_size,
        }
    }

    pub fn visible(&self) -> bool {
        self.phase == SharkPhase::Crossing
    }

    /// Begin a pass from a random side. No-op while a pass is in progress.
    pub fn try_spawn<R: Rng + ?Sized>(&mut self, viewport: &Viewport, rng: &mut R) -> bool {
        if self.phase == SharkPhase::Crossing {
            return false;
        }

        let from_left = rng.random_bool(0.5);
        self.direction = if from_left { 1.0 } else { -1.0 };
        self.flipped = !from_left;
        let x = if from_left { -self.size } else { viewport.width };
        let y = rng.random::<f32>() * max_offset(viewport.height, self.size);
        self.pos = Vec2::new(x, y);
        self.phase = SharkPhase::Crossing;

        log::debug!(
            "Shark entering from the {}",
            if from_left { "left" } else { "right" }
        );
        true
    }

    pub fn update(&mut self, frames: f32, viewport: &Viewport) {
        if self.phase != SharkPhase::Crossing {
            return;
        }

        self.pos.x += self.direction * self.speed * frames;

        let exited = if self.direction > 0.0 {
            self.pos.x > viewport.width
        } else {
            self.pos.x < -self.size
        };
        if exited {
            self.phase = SharkPhase::Idle;
            log::debug!("Shark left the tank");
        }
    }

    /// Keep the swimming depth inside a (resized) viewport
    pub fn clamp_into(&mut self, viewport: &Viewport) {
        self.pos.y = self.pos.y.clamp(0.0, max_offset(viewport.height, self.size));
    }
}
