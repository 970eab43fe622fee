//! Scene state
//!
//! Everything the frame loop mutates lives in one struct, owned by the loop
//! and passed into each sprite update.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anchor::Anchor;
use super::bubble::Bubble;
use super::fish::Fish;
use super::jellyfish::Jellyfish;
use super::shark::Shark;
use super::timer::SpawnTimer;
use super::viewport::Viewport;
use crate::tuning::Tuning;

/// Identifies one sprite across the simulation and the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    Fish(u32),
    Shark,
    Jellyfish(u32),
    Anchor,
    Bubble(u32),
}

/// Complete scene state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct SceneState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Seconds of animation so far (only advances while the viewport is ready)
    pub clock: f32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Sprites have been created for a ready viewport
    pub populated: bool,
    /// Fish (sorted by id)
    pub fish: Vec<Fish>,
    pub shark: Shark,
    pub shark_timer: SpawnTimer,
    /// Jellyfish (sorted by id)
    pub jellyfish: Vec<Jellyfish>,
    pub anchor: Anchor,
    pub bubbles: Vec<Bubble>,
    /// Sprites whose image failed to load; they keep animating but are never drawn
    pub broken_assets: BTreeSet<SpriteKey>,
    /// Clicks received while the viewport was not ready
    pub pending_clicks: Vec<u32>,
    #[serde(skip)]
    pub rng: Pcg32,
    next_id: u32,
}

impl SceneState {
    /// Empty scene waiting for a viewport
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            viewport: Viewport::default(),
            clock: 0.0,
            ticks: 0,
            populated: false,
            fish: Vec::new(),
            shark: Shark::new(&tuning),
            shark_timer: SpawnTimer::new(tuning.shark_spawn_interval),
            jellyfish: Vec::new(),
            anchor: Anchor::new(&tuning),
            bubbles: Vec::new(),
            broken_assets: BTreeSet::new(),
            pending_clicks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create the sprite sets. Needs a ready viewport; runs once.
    pub fn populate(&mut self) {
        if self.populated || !self.viewport.is_ready() {
            return;
        }

        let images = self.tuning.fish_images.clone();
        for image in images {
            let id = self.next_entity_id();
            let fish = Fish::spawn(id, image, &self.viewport, &self.tuning, &mut self.rng);
            self.fish.push(fish);
        }

        for _ in 0..self.tuning.jelly_count {
            let id = self.next_entity_id();
            let jelly = Jellyfish::spawn(id, &self.viewport, &self.tuning, &mut self.rng);
            self.jellyfish.push(jelly);
        }

        for _ in 0..self.tuning.bubble_count {
            let id = self.next_entity_id();
            let bubble = Bubble::spawn(id, &mut self.rng);
            self.bubbles.push(bubble);
        }

        self.populated = true;
        self.normalize_order();
        log::info!(
            "Aquarium populated: {} fish, {} jellyfish, {} bubbles ({}x{})",
            self.fish.len(),
            self.jellyfish.len(),
            self.bubbles.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Replace the viewport, pulling sprites inside the new bounds
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;

        if !self.populated || !viewport.is_ready() {
            return;
        }
        for fish in &mut self.fish {
            fish.clamp_into(&viewport);
        }
        for jelly in &mut self.jellyfish {
            jelly.clamp_into(&viewport);
        }
        self.shark.clamp_into(&viewport);
        self.anchor.clamp_into(&viewport, self.tuning.anchor_inset);
    }

    pub fn fish_by_id_mut(&mut self, id: u32) -> Option<&mut Fish> {
        self.fish.iter_mut().find(|f| f.id == id)
    }

    /// Stop drawing a sprite whose image failed to load
    pub fn mark_asset_broken(&mut self, key: SpriteKey) {
        if self.broken_assets.insert(key) {
            log::warn!("Image for {:?} failed to load; hiding it", key);
        }
    }

    pub fn is_asset_broken(&self, key: SpriteKey) -> bool {
        self.broken_assets.contains(&key)
    }

    /// Tank is up and running but has no fish to show
    pub fn is_empty_tank(&self) -> bool {
        self.populated && self.fish.is_empty()
    }

    /// Ensure sprite sets are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.fish.sort_by_key(|f| f.id);
        self.jellyfish.sort_by_key(|j| j.id);
        self.bubbles.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_needs_viewport() {
        let mut state = SceneState::new(1, Tuning::default());
        state.populate();
        assert!(!state.populated);
        assert!(state.fish.is_empty());

        state.viewport = Viewport::new(800.0, 600.0);
        state.populate();
        assert!(state.populated);
        assert_eq!(state.fish.len(), 8);
        assert_eq!(state.jellyfish.len(), crate::consts::JELLY_COUNT);
        assert_eq!(state.bubbles.len(), crate::consts::BUBBLE_COUNT);

        // Second call is a no-op
        state.populate();
        assert_eq!(state.fish.len(), 8);
    }

    #[test]
    fn test_fish_spawn_inside_viewport() {
        let mut state = SceneState::new(77, Tuning::default());
        state.viewport = Viewport::new(800.0, 600.0);
        state.populate();
        for fish in &state.fish {
            assert!(fish.pos.x >= 0.0 && fish.pos.x <= 600.0);
            assert!(fish.pos.y >= 0.0 && fish.pos.y <= 400.0);
            assert_eq!(fish.flipped, fish.vel.x < 0.0);
        }
        let images: Vec<_> = state.fish.iter().map(|f| f.image.as_str()).collect();
        assert_eq!(images[0], "/fish_1.png");
        assert_eq!(images[7], "/fish_8.png");
    }

    #[test]
    fn test_unique_ids() {
        let mut state = SceneState::new(1, Tuning::default());
        state.viewport = Viewport::new(800.0, 600.0);
        state.populate();
        let mut ids: Vec<u32> = state.fish.iter().map(|f| f.id).collect();
        ids.extend(state.jellyfish.iter().map(|j| j.id));
        ids.extend(state.bubbles.iter().map(|b| b.id));
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_empty_tank() {
        let tuning = Tuning {
            fish_images: Vec::new(),
            ..Default::default()
        };
        let mut state = SceneState::new(1, tuning);
        assert!(!state.is_empty_tank());
        state.viewport = Viewport::new(800.0, 600.0);
        state.populate();
        assert!(state.is_empty_tank());
    }

    #[test]
    fn test_mark_asset_broken() {
        let mut state = SceneState::new(1, Tuning::default());
        state.mark_asset_broken(SpriteKey::Shark);
        state.mark_asset_broken(SpriteKey::Shark);
        assert!(state.is_asset_broken(SpriteKey::Shark));
        assert_eq!(state.broken_assets.len(), 1);
    }
}
