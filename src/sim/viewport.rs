//! Scene bounds

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bounding rectangle of the scene container (CSS pixels, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Layout has produced real dimensions; animation is deferred until then
    pub fn is_ready(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Smaller of the two dimensions
    #[inline]
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Clamp a sprite's top-left corner so the sprite lies inside the viewport
    pub fn clamp_sprite(&self, pos: Vec2, size: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, crate::max_offset(self.width, size)),
            pos.y.clamp(0.0, crate::max_offset(self.height, size)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_viewport_not_ready() {
        assert!(!Viewport::default().is_ready());
        assert!(!Viewport::new(800.0, 0.0).is_ready());
        assert!(!Viewport::new(f32::NAN, 600.0).is_ready());
        assert!(Viewport::new(800.0, 600.0).is_ready());
    }

    #[test]
    fn test_clamp_sprite() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.clamp_sprite(Vec2::new(700.0, -5.0), 200.0), Vec2::new(600.0, 0.0));
        // Sprite wider than the viewport pins to the origin
        assert_eq!(vp.clamp_sprite(Vec2::new(50.0, 50.0), 900.0), Vec2::new(0.0, 0.0));
    }
}
