//! Anchor: drops to the sea bed at a random spot, rests, is hauled back up

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnchorPhase {
    Hidden,
    /// Descending, or resting once `landed_at` is set
    Showing { landed_at: Option<f32> },
    Ascending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anchor {
    pub pos: Vec2,
    pub size: f32,
    pub visible: bool,
    pub phase: AnchorPhase,
    /// Scene clock (seconds) when the current phase began
    pub phase_start: f32,
}

impl Anchor {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(0.0, -tuning.anchor_size),
            size: tuning.anchor_size,
            visible: false,
            phase: AnchorPhase::Hidden,
            phase_start: 0.0,
        }
    }

    /// Line the anchor comes to rest on
    pub fn rest_line(&self, viewport: &Viewport) -> f32 {
        (viewport.height - self.size).max(0.0)
    }

    /// Columns that keep `inset` of the width clear on both sides
    pub fn column_range(&self, viewport: &Viewport, inset: f32) -> (f32, f32) {
        let lo = viewport.width * inset;
        let hi = (viewport.width - viewport.width * inset - self.size).max(lo);
        (lo, hi)
    }

    /// Random drop column inside `column_range`
    pub fn pick_column<R: Rng + ?Sized>(&self, viewport: &Viewport, inset: f32, rng: &mut R) -> f32 {
        let (lo, hi) = self.column_range(viewport, inset);
        lo + rng.random::<f32>() * (hi - lo)
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        frames: f32,
        viewport: &Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        match self.phase {
            AnchorPhase::Hidden => {
                if now - self.phase_start >= tuning.anchor_hidden_duration {
                    self.pos = Vec2::new(
                        self.pick_column(viewport, tuning.anchor_inset, rng),
                        -self.size,
                    );
                    self.visible = true;
                    self.enter(AnchorPhase::Showing { landed_at: None }, now);
                    log::debug!("Anchor dropping at x={:.0}", self.pos.x);
                }
            }
            AnchorPhase::Showing { landed_at: None } => {
                let line = self.rest_line(viewport);
                self.pos.y += tuning.anchor_drop_speed * frames;
                if self.pos.y >= line {
                    self.pos.y = line;
                    self.phase = AnchorPhase::Showing {
                        landed_at: Some(now),
                    };
                }
            }
            AnchorPhase::Showing {
                landed_at: Some(landed),
            } => {
                if now - landed >= tuning.anchor_display_duration {
                    self.enter(AnchorPhase::Ascending, now);
                }
            }
            AnchorPhase::Ascending => {
                self.pos.y -= tuning.anchor_drop_speed * frames;
                if self.pos.y <= -self.size {
                    self.pos.y = -self.size;
                    self.visible = false;
                    self.enter(AnchorPhase::Hidden, now);
                }
            }
        }
    }

    fn enter(&mut self, phase: AnchorPhase, now: f32) {
        self.phase = phase;
        self.phase_start = now;
    }

    /// Re-fit to a resized viewport; a resting anchor moves to the new sea bed
    pub fn clamp_into(&mut self, viewport: &Viewport, inset: f32) {
        let line = self.rest_line(viewport);
        if let AnchorPhase::Showing { landed_at: Some(_) } = self.phase {
            self.pos.y = line;
        } else {
            self.pos.y = self.pos.y.clamp(-self.size, line);
        }
        let (lo, hi) = self.column_range(viewport, inset);
        self.pos.x = self.pos.x.clamp(lo, hi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_column_within_inset() {
        let vp = Viewport::new(800.0, 600.0);
        let anchor = Anchor::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..500 {
            let x = anchor.pick_column(&vp, 0.1, &mut rng);
            assert!((80.0..=570.0).contains(&x));
        }
    }

    #[test]
    fn test_column_narrow_viewport() {
        let vp = Viewport::new(100.0, 600.0);
        let anchor = Anchor::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(anchor.pick_column(&vp, 0.1, &mut rng), 10.0);
    }

    #[test]
    fn test_resize_keeps_column_inset() {
        let tuning = Tuning::default();
        let mut anchor = Anchor::new(&tuning);
        anchor.phase = AnchorPhase::Showing { landed_at: Some(1.0) };
        anchor.visible = true;
        anchor.pos = Vec2::new(620.0, 450.0);

        // 400 wide: columns run from 40 to 210
        anchor.clamp_into(&Viewport::new(400.0, 300.0), tuning.anchor_inset);
        assert_eq!(anchor.pos, Vec2::new(210.0, 150.0));

        anchor.pos.x = 5.0;
        anchor.clamp_into(&Viewport::new(400.0, 300.0), tuning.anchor_inset);
        assert_eq!(anchor.pos.x, 40.0);
    }

    #[test]
    fn test_cycle_keeps_column() {
        let vp = Viewport::new(800.0, 600.0);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut anchor = Anchor::new(&tuning);

        let mut now = 0.0;
        let mut column = None;
        let mut landed = false;
        let mut cycles = 0;
        let mut was_hidden = true;
        for _ in 0..(60 * 80) {
            now += FRAME_DT;
            anchor.update(now, 1.0, &vp, &tuning, &mut rng);

            let hidden = anchor.phase == AnchorPhase::Hidden;
            if was_hidden && !hidden {
                column = Some(anchor.pos.x);
                cycles += 1;
            } else if !hidden {
                assert_eq!(Some(anchor.pos.x), column);
            }
            if let AnchorPhase::Showing { landed_at: Some(_) } = anchor.phase {
                landed = true;
                assert_eq!(anchor.pos.y, 450.0);
            }
            assert!(anchor.pos.y >= -anchor.size && anchor.pos.y <= 450.0);
            assert_eq!(anchor.visible, !hidden);
            was_hidden = hidden;
        }
        assert!(landed);
        assert!(cycles >= 2);
    }
}
