// Whole-scene runs exercising every sprite set together (native, no wasm).

use aquarium::consts::FRAME_DT;
use aquarium::sim::{JellyPhase, SceneState, SpriteKey, TickInput, Viewport, tick};
use aquarium::{SpriteKind, Tuning, describe};

fn run(state: &mut SceneState, seconds: f32) {
    let input = TickInput::default();
    for _ in 0..(seconds / FRAME_DT) as u32 {
        tick(state, &input, FRAME_DT);
    }
}

#[test]
fn all_sprites_within_loose_bounds() {
    let mut state = SceneState::new(2024, Tuning::default());
    let input = TickInput {
        resize: Some(Viewport::new(1280.0, 720.0)),
        ..Default::default()
    };
    tick(&mut state, &input, FRAME_DT);

    let idle = TickInput::default();
    let mut shark_seen = false;
    let mut anchor_seen = false;
    let mut jelly_seen = false;
    for _ in 0..(60 * 70) {
        tick(&mut state, &idle, FRAME_DT);
        for view in describe(&state) {
            assert!(view.x >= -view.width - 3.0 * FRAME_DT * 60.0, "{:?}", view.key);
            assert!(view.x <= 1280.0 + 3.0, "{:?}", view.key);
            assert!(view.y >= -view.height && view.y <= 720.0, "{:?}", view.key);
            match view.kind {
                SpriteKind::Shark => shark_seen = true,
                SpriteKind::Anchor => anchor_seen = true,
                SpriteKind::Jellyfish => jelly_seen = true,
                _ => {}
            }
        }
    }
    assert!(shark_seen && anchor_seen && jelly_seen);
}

#[test]
fn jellyfish_are_staggered() {
    let mut state = SceneState::new(7, Tuning::default());
    tick(
        &mut state,
        &TickInput {
            resize: Some(Viewport::new(800.0, 600.0)),
            ..Default::default()
        },
        FRAME_DT,
    );
    let starts: Vec<f32> = state.jellyfish.iter().map(|j| j.phase_start).collect();
    assert!(starts.windows(2).any(|w| w[0] != w[1]));

    run(&mut state, 30.0);
    assert!(state.jellyfish.iter().any(|j| j.phase != JellyPhase::Hidden) || state.jellyfish.is_empty());
}

#[test]
fn broken_shark_image_keeps_scene_running() {
    let mut state = SceneState::new(11, Tuning::default());
    tick(
        &mut state,
        &TickInput {
            resize: Some(Viewport::new(800.0, 600.0)),
            ..Default::default()
        },
        FRAME_DT,
    );
    state.mark_asset_broken(SpriteKey::Shark);

    run(&mut state, 25.0);
    assert!(state.shark.visible());
    let views = describe(&state);
    assert!(views.iter().all(|v| v.kind != SpriteKind::Shark));
    assert!(views.iter().any(|v| v.kind == SpriteKind::Fish));
}

#[test]
fn resize_keeps_fish_inside() {
    let mut state = SceneState::new(3, Tuning::default());
    tick(
        &mut state,
        &TickInput {
            resize: Some(Viewport::new(1600.0, 1000.0)),
            ..Default::default()
        },
        FRAME_DT,
    );
    run(&mut state, 5.0);

    tick(
        &mut state,
        &TickInput {
            resize: Some(Viewport::new(640.0, 480.0)),
            ..Default::default()
        },
        FRAME_DT,
    );
    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), FRAME_DT);
        for fish in &state.fish {
            assert!(fish.pos.x >= 0.0 && fish.pos.x + fish.current_size <= 640.0 + 1e-3);
            assert!(fish.pos.y >= 0.0 && fish.pos.y + fish.current_size <= 480.0 + 1e-3);
        }
    }
}

#[test]
fn tuning_from_json_drives_scene() {
    let tuning = Tuning::from_json(r#"{ "fish_images": ["/a.png", "/b.png"], "jelly_count": 1 }"#).unwrap();
    let mut state = SceneState::new(1, tuning);
    tick(
        &mut state,
        &TickInput {
            resize: Some(Viewport::new(800.0, 600.0)),
            ..Default::default()
        },
        FRAME_DT,
    );
    assert_eq!(state.fish.len(), 2);
    assert_eq!(state.jellyfish.len(), 1);
    assert_eq!(state.fish[1].image, "/b.png");
}
