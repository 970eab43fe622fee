//! Per-frame scene update
//!
//! One call advances every sprite set by the measured frame time, in a fixed
//! order: fish, shark, jellyfish, anchor, bubbles.

use super::state::SceneState;
use super::viewport::Viewport;
use crate::consts::*;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New container size (resize observer)
    pub resize: Option<Viewport>,
    /// Ids of fish clicked since the last tick
    pub clicks: Vec<u32>,
}

/// Advance the scene by `dt` seconds of wall-clock time
pub fn tick(state: &mut SceneState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    if let Some(viewport) = input.resize {
        state.resize(viewport);
    }

    // No layout yet: nothing moves, nothing spawns, clicks wait
    if !state.viewport.is_ready() {
        state.pending_clicks.extend_from_slice(&input.clicks);
        return;
    }
    state.populate();

    let mut clicks = std::mem::take(&mut state.pending_clicks);
    clicks.extend_from_slice(&input.clicks);

    // Clicked fish hold at progress 0 until the next tick
    let mut just_scared = Vec::with_capacity(clicks.len());
    for id in clicks {
        match state.fish_by_id_mut(id) {
            Some(fish) => {
                fish.scare();
                just_scared.push(id);
                log::debug!("Fish {} scared", id);
            }
            None => log::debug!("Click on unknown fish {}", id),
        }
    }

    state.ticks += 1;
    state.clock += dt;
    let now = state.clock;
    let frames = dt * REFERENCE_FPS;
    let viewport = state.viewport;

    for fish in &mut state.fish {
        if just_scared.contains(&fish.id) {
            continue;
        }
        fish.update(frames, dt, &viewport, &state.tuning, &mut state.rng);
    }

    if state.shark_timer.advance(dt) {
        state.shark.try_spawn(&viewport, &mut state.rng);
    }
    state.shark.update(frames, &viewport);

    for jelly in &mut state.jellyfish {
        jelly.update(now, frames, &viewport, &state.tuning);
    }

    state
        .anchor
        .update(now, frames, &viewport, &state.tuning, &mut state.rng);

    // Bubbles are a pure function of the clock; nothing to step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shark::SharkPhase;
    use crate::tuning::Tuning;

    fn ready_state(seed: u64) -> SceneState {
        let mut state = SceneState::new(seed, Tuning::default());
        let input = TickInput {
            resize: Some(Viewport::new(800.0, 600.0)),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        state
    }

    #[test]
    fn test_tick_deferred_without_viewport() {
        let mut state = SceneState::new(1, Tuning::default());
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.clock, 0.0);
        assert!(!state.populated);
    }

    #[test]
    fn test_tick_populates_on_first_viewport() {
        let state = ready_state(1);
        assert!(state.populated);
        assert_eq!(state.ticks, 1);
        assert_eq!(state.fish.len(), 8);
    }

    #[test]
    fn test_zero_resize_pauses() {
        let mut state = ready_state(1);
        let clock = state.clock;
        let input = TickInput {
            resize: Some(Viewport::new(0.0, 0.0)),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.clock, clock);
    }

    #[test]
    fn test_click_holds_progress_for_one_tick() {
        let mut state = ready_state(3);
        let id = state.fish[0].id;
        let input = TickInput {
            clicks: vec![id],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(state.fish[0].scare.active);
        assert_eq!(state.fish[0].scare.progress, 0.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert!(state.fish[0].scare.active);
        assert!(state.fish[0].scare.progress > 0.0);
    }

    #[test]
    fn test_click_kept_while_paused() {
        let mut state = ready_state(3);
        let id = state.fish[0].id;
        let paused = TickInput {
            resize: Some(Viewport::new(0.0, 0.0)),
            clicks: vec![id],
        };
        tick(&mut state, &paused, FRAME_DT);
        assert!(!state.fish[0].scare.active);
        assert_eq!(state.pending_clicks, vec![id]);

        let resumed = TickInput {
            resize: Some(Viewport::new(800.0, 600.0)),
            ..Default::default()
        };
        tick(&mut state, &resumed, FRAME_DT);
        assert!(state.fish[0].scare.active);
        assert!(state.pending_clicks.is_empty());
    }

    #[test]
    fn test_unknown_click_ignored() {
        let mut state = ready_state(3);
        let input = TickInput {
            clicks: vec![9999],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(state.fish.iter().all(|f| !f.scare.active));
    }

    #[test]
    fn test_shark_spawns_on_interval() {
        let mut state = ready_state(5);
        assert_eq!(state.shark.phase, SharkPhase::Idle);

        let input = TickInput::default();
        // Ticks are clamped to MAX_FRAME_DT, so step at 0.1s
        for _ in 0..205 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.shark.phase, SharkPhase::Crossing);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = ready_state(5);
        let before = state.clock;
        tick(&mut state, &TickInput::default(), 30.0);
        assert!((state.clock - before - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        // Two scenes with the same seed and inputs stay identical
        let mut state1 = ready_state(99999);
        let mut state2 = ready_state(99999);

        let inputs = [
            TickInput::default(),
            TickInput {
                clicks: vec![2],
                ..Default::default()
            },
            TickInput {
                resize: Some(Viewport::new(640.0, 480.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                tick(&mut state1, input, FRAME_DT);
                tick(&mut state2, input, FRAME_DT);
            }
        }

        assert_eq!(state1.ticks, state2.ticks);
        for (a, b) in state1.fish.iter().zip(&state2.fish) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.vel, b.vel);
        }
        assert_eq!(state1.shark.pos, state2.shark.pos);
        assert_eq!(state1.anchor.pos, state2.anchor.pos);
    }
}
