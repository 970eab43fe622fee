//! Renderable sprite descriptions
//!
//! Turns scene state into a flat, draw-ordered list the browser frontend
//! writes straight into element styles.

use serde::Serialize;

use crate::sim::{SceneState, SpriteKey};

/// Stacking order
pub mod z {
    pub const ANCHOR: i32 = 4;
    pub const JELLYFISH: i32 = 6;
    pub const BUBBLE: i32 = 8;
    pub const FISH: i32 = 10;
    pub const SHARK: i32 = 15;
    pub const SCARED_FISH: i32 = 20;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Fish,
    Shark,
    Jellyfish,
    Anchor,
    Bubble,
}

/// One sprite as the render layer should draw it this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub key: SpriteKey,
    pub kind: SpriteKind,
    /// Image reference; bubbles are drawn without one
    pub image: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Mirror horizontally
    pub flipped: bool,
    pub z_index: i32,
    pub opacity: f32,
}

impl SpriteView {
    fn image(key: SpriteKey, kind: SpriteKind, image: &str, pos: glam::Vec2, size: f32) -> Self {
        Self {
            key,
            kind,
            image: Some(image.to_string()),
            x: pos.x,
            y: pos.y,
            width: size,
            height: size,
            flipped: false,
            z_index: 0,
            opacity: 1.0,
        }
    }
}

/// Everything visible this frame, sorted back to front
pub fn describe(state: &SceneState) -> Vec<SpriteView> {
    let mut views = Vec::with_capacity(state.fish.len() + state.jellyfish.len() + state.bubbles.len() + 2);
    if !state.populated || !state.viewport.is_ready() {
        return views;
    }
    let tuning = &state.tuning;

    for fish in &state.fish {
        let mut view = SpriteView::image(
            SpriteKey::Fish(fish.id),
            SpriteKind::Fish,
            &fish.image,
            fish.pos,
            fish.current_size,
        );
        view.flipped = fish.flipped;
        view.z_index = if fish.is_scared() { z::SCARED_FISH } else { z::FISH };
        views.push(view);
    }

    if state.shark.visible() {
        let mut view = SpriteView::image(
            SpriteKey::Shark,
            SpriteKind::Shark,
            &tuning.shark_image,
            state.shark.pos,
            state.shark.size,
        );
        view.flipped = state.shark.flipped;
        view.z_index = z::SHARK;
        views.push(view);
    }

    for jelly in state.jellyfish.iter().filter(|j| j.visible()) {
        let mut view = SpriteView::image(
            SpriteKey::Jellyfish(jelly.id),
            SpriteKind::Jellyfish,
            &tuning.jelly_image,
            jelly.pos,
            jelly.size,
        );
        view.z_index = z::JELLYFISH;
        views.push(view);
    }

    if state.anchor.visible {
        let mut view = SpriteView::image(
            SpriteKey::Anchor,
            SpriteKind::Anchor,
            &tuning.anchor_image,
            state.anchor.pos,
            state.anchor.size,
        );
        view.z_index = z::ANCHOR;
        views.push(view);
    }

    for bubble in &state.bubbles {
        if let Some(frame) = bubble.frame(state.clock, &state.viewport) {
            views.push(SpriteView {
                key: SpriteKey::Bubble(bubble.id),
                kind: SpriteKind::Bubble,
                image: None,
                x: frame.pos.x,
                y: frame.pos.y,
                width: frame.diameter,
                height: frame.diameter,
                flipped: false,
                z_index: z::BUBBLE,
                opacity: frame.opacity,
            });
        }
    }

    views.retain(|v| !state.is_asset_broken(v.key));
    views.sort_by_key(|v| (v.z_index, v.key));
    views
}
