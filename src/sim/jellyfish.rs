//! Jellyfish: rise to mid-tank, float, sink, rest out of sight, repeat

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::max_offset;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JellyPhase {
    Hidden,
    Rising,
    Floating,
    Falling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jellyfish {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub phase: JellyPhase,
    /// Scene clock (seconds) when the current phase began
    pub phase_start: f32,
}

impl Jellyfish {
    /// New hidden jellyfish with a random start offset so the set is staggered
    pub fn spawn<R: Rng + ?Sized>(id: u32, viewport: &Viewport, tuning: &Tuning, rng: &mut R) -> Self {
        let size = tuning.jelly_size;
        Self {
            id,
            pos: Vec2::new(
                rng.random::<f32>() * max_offset(viewport.width, size),
                viewport.height,
            ),
            size,
            phase: JellyPhase::Hidden,
            phase_start: rng.random::<f32>() * tuning.jelly_stagger,
        }
    }

    pub fn visible(&self) -> bool {
        self.phase != JellyPhase::Hidden
    }

    /// Vertical resting line: centred in the viewport
    pub fn float_line(&self, viewport: &Viewport) -> f32 {
        viewport.height / 2.0 - self.size / 2.0
    }

    pub fn update(&mut self, now: f32, frames: f32, viewport: &Viewport, tuning: &Tuning) {
        let in_phase = now - self.phase_start;

        match self.phase {
            JellyPhase::Hidden => {
                if in_phase >= tuning.jelly_hidden_duration {
                    self.pos.y = viewport.height;
                    self.enter(JellyPhase::Rising, now);
                }
            }
            JellyPhase::Rising => {
                let line = self.float_line(viewport);
                self.pos.y -= tuning.jelly_rise_speed * frames;
                if self.pos.y <= line {
                    self.pos.y = line;
                    self.enter(JellyPhase::Floating, now);
                }
            }
            JellyPhase::Floating => {
                if in_phase >= tuning.jelly_float_duration {
                    self.enter(JellyPhase::Falling, now);
                }
            }
            JellyPhase::Falling => {
                self.pos.y += tuning.jelly_fall_speed * frames;
                if self.pos.y >= viewport.height {
                    self.pos.y = viewport.height;
                    self.enter(JellyPhase::Hidden, now);
                }
            }
        }
    }

    fn enter(&mut self, phase: JellyPhase, now: f32) {
        log::debug!("Jellyfish {}: {:?} -> {:?}", self.id, self.phase, phase);
        self.phase = phase;
        self.phase_start = now;
    }

    /// Re-fit to a resized viewport
    pub fn clamp_into(&mut self, viewport: &Viewport) {
        self.pos.x = self.pos.x.clamp(0.0, max_offset(viewport.width, self.size));
        match self.phase {
            JellyPhase::Floating => self.pos.y = self.float_line(viewport),
            JellyPhase::Hidden => self.pos.y = viewport.height,
            JellyPhase::Rising | JellyPhase::Falling => {
                self.pos.y = self.pos.y.clamp(-self.size, viewport.height);
            }
        }
    }
}
