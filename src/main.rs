//! Aquarium entry point
//!
//! On wasm32 this drives the scene from `requestAnimationFrame` and mirrors
//! every sprite into an absolutely positioned element inside `#aquarium`.
//! Natively it runs the simulation headless and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement, MouseEvent, PageTransitionEvent};

    use aquarium::sim::{SceneState, SpriteKey, TickInput, Viewport, tick};
    use aquarium::{FrameClock, SpriteKind, SpriteView, Tuning, describe};

    /// Scene instance holding simulation state and its DOM mirror
    struct Scene {
        state: SceneState,
        input: TickInput,
        frames: FrameClock,
        document: Document,
        container: HtmlElement,
        /// One element per sprite, created the first time the sprite is drawn
        elements: HashMap<SpriteKey, HtmlElement>,
        empty_notice: Option<Element>,
        frame_handle: Option<i32>,
    }

    impl Scene {
        fn measure(&self) -> Viewport {
            Viewport::new(
                self.container.client_width() as f32,
                self.container.client_height() as f32,
            )
        }

        /// Run one simulation tick with the input gathered since the last frame
        fn update(&mut self, time: f64) {
            let dt = self.frames.delta(time);
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);
        }

        /// Show/hide the "no fish" notice
        fn update_notice(&self) {
            if let Some(el) = &self.empty_notice {
                let class = if self.state.is_empty_tank() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Aquarium starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container: HtmlElement = document
            .get_element_by_id("aquarium")
            .expect("no #aquarium container")
            .dyn_into()?;

        let tuning = Tuning::from_json_or_default(container.get_attribute("data-tuning").as_deref());
        let seed = js_sys::Date::now() as u64;

        let scene = Rc::new(RefCell::new(Scene {
            state: SceneState::new(seed, tuning),
            input: TickInput::default(),
            frames: FrameClock::new(),
            empty_notice: document.get_element_by_id("empty-notice"),
            document,
            container,
            elements: HashMap::new(),
            frame_handle: None,
        }));

        {
            let mut s = scene.borrow_mut();
            let viewport = s.measure();
            s.input.resize = Some(viewport);
            log::info!(
                "Scene initialized with seed {} ({}x{})",
                seed,
                viewport.width,
                viewport.height
            );
        }

        setup_resize_handler(scene.clone());
        setup_teardown(scene.clone());

        request_animation_frame(scene);

        log::info!("Aquarium running!");
        Ok(())
    }

    fn setup_resize_handler(scene: Rc<RefCell<Scene>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut s = scene.borrow_mut();
            let viewport = s.measure();
            s.input.resize = Some(viewport);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop the frame loop when the page goes away, resume it if the page
    /// comes back from the back/forward cache
    fn setup_teardown(scene: Rc<RefCell<Scene>>) {
        let window = web_sys::window().unwrap();

        let hide_scene = scene.clone();
        let hide = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            let mut s = hide_scene.borrow_mut();
            s.frames.stop();
            if let Some(handle) = s.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
            log::info!("Aquarium stopped (cached: {})", event.persisted());
        });
        let _ = window.add_event_listener_with_callback("pagehide", hide.as_ref().unchecked_ref());
        hide.forget();

        let show = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            {
                let mut s = scene.borrow_mut();
                if !s.frames.resume(event.persisted()) {
                    return;
                }
                let viewport = s.measure();
                s.input.resize = Some(viewport);
            }
            log::info!("Aquarium resumed");
            request_animation_frame(scene.clone());
        });
        let _ = window.add_event_listener_with_callback("pageshow", show.as_ref().unchecked_ref());
        show.forget();
    }

    fn request_animation_frame(scene: Rc<RefCell<Scene>>) {
        let window = web_sys::window().unwrap();
        let scene_for_frame = scene.clone();
        let closure = Closure::once(move |time: f64| {
            frame_loop(scene_for_frame, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => scene.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn frame_loop(scene: Rc<RefCell<Scene>>, time: f64) {
        {
            let mut s = scene.borrow_mut();
            s.frame_handle = None;
            if s.frames.is_stopped() {
                return;
            }
            s.update(time);
        }

        if let Err(e) = render(&scene) {
            log::warn!("Render error: {:?}", e);
        }
        scene.borrow().update_notice();

        request_animation_frame(scene);
    }

    /// Mirror this frame's sprite views into the DOM
    fn render(scene: &Rc<RefCell<Scene>>) -> Result<(), JsValue> {
        let mut s = scene.borrow_mut();
        let views = describe(&s.state);
        let mut drawn = HashSet::with_capacity(views.len());

        for view in &views {
            if !s.elements.contains_key(&view.key) {
                let el = create_sprite_element(scene, &s.document, view)?;
                s.container.append_child(&el)?;
                s.elements.insert(view.key, el);
            }
            if let Some(el) = s.elements.get(&view.key) {
                apply_view(el, view);
            }
            drawn.insert(view.key);
        }

        for (key, el) in &s.elements {
            if !drawn.contains(key) {
                let _ = el.style().set_property("display", "none");
            }
        }
        Ok(())
    }

    fn create_sprite_element(
        scene: &Rc<RefCell<Scene>>,
        document: &Document,
        view: &SpriteView,
    ) -> Result<HtmlElement, JsValue> {
        let key = view.key;

        let el: HtmlElement = match &view.image {
            Some(src) => {
                let img: HtmlImageElement = document.create_element("img")?.dyn_into()?;
                img.set_src(src);
                img.set_alt(kind_name(view.kind));
                img.set_draggable(false);

                // Broken image: hide this sprite, leave everything else alone
                {
                    let scene = scene.clone();
                    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                        scene.borrow_mut().state.mark_asset_broken(key);
                    });
                    img.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())?;
                    closure.forget();
                }

                HtmlElement::from(img)
            }
            None => {
                let div: HtmlElement = document.create_element("div")?.dyn_into()?;
                let style = div.style();
                style.set_property("border-radius", "50%")?;
                style.set_property("background", "white")?;
                div
            }
        };

        el.set_class_name(&format!("sprite {}", kind_name(view.kind)));
        let style = el.style();
        style.set_property("position", "absolute")?;
        style.set_property("object-fit", "contain")?;
        style.set_property("user-select", "none")?;

        if let SpriteKey::Fish(id) = key {
            style.set_property("cursor", "pointer")?;
            let scene = scene.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                scene.borrow_mut().input.clicks.push(id);
            });
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            style.set_property("pointer-events", "none")?;
        }

        Ok(el)
    }

    fn apply_view(el: &HtmlElement, view: &SpriteView) {
        let style = el.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{:.2}px", view.x));
        let _ = style.set_property("top", &format!("{:.2}px", view.y));
        let _ = style.set_property("width", &format!("{:.2}px", view.width));
        let _ = style.set_property("height", &format!("{:.2}px", view.height));
        let _ = style.set_property("z-index", &view.z_index.to_string());
        let _ = style.set_property("opacity", &format!("{:.3}", view.opacity));
        let _ = style.set_property(
            "transform",
            if view.flipped { "scaleX(-1)" } else { "none" },
        );
    }

    fn kind_name(kind: SpriteKind) -> &'static str {
        match kind {
            SpriteKind::Fish => "fish",
            SpriteKind::Shark => "shark",
            SpriteKind::Jellyfish => "jellyfish",
            SpriteKind::Anchor => "anchor",
            SpriteKind::Bubble => "bubble",
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_scene::run() {
        log::error!("Aquarium failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    env_logger::init();
    log::info!("Aquarium (native) starting...");
    log::info!("Native mode runs the simulation headless - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {}", path))?;
            aquarium::Tuning::from_json(&json).with_context(|| format!("loading tuning from {}", path))?
        }
        None => aquarium::Tuning::default(),
    };

    run_headless(tuning, 90.0)
}

/// Simulate `seconds` of animation at 60 Hz on an 800x600 tank and log a summary
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(tuning: aquarium::Tuning, seconds: f32) -> anyhow::Result<()> {
    use aquarium::sim::{AnchorPhase, SceneState, TickInput, Viewport, tick};
    use aquarium::consts::FRAME_DT;

    let mut state = SceneState::new(0x5EA_BED, tuning);
    let mut input = TickInput {
        resize: Some(Viewport::new(800.0, 600.0)),
        ..Default::default()
    };

    let frames = (seconds / FRAME_DT) as u32;
    let mut shark_passes = 0;
    let mut anchor_drops = 0;
    let mut scares = 0;
    for frame in 0..frames {
        // Poke a fish every ten seconds
        if frame > 0 && frame % 600 == 0 {
            if let Some(fish) = state.fish.get(scares % state.fish.len().max(1)) {
                input.clicks.push(fish.id);
                scares += 1;
            }
        }

        let shark_was_visible = state.shark.visible();
        let anchor_was_hidden = state.anchor.phase == AnchorPhase::Hidden;

        tick(&mut state, &input, FRAME_DT);
        input = TickInput::default();

        if !shark_was_visible && state.shark.visible() {
            shark_passes += 1;
        }
        if anchor_was_hidden && state.anchor.phase != AnchorPhase::Hidden {
            anchor_drops += 1;
        }
    }

    log::info!(
        "Simulated {:.0}s ({} ticks): {} scares, {} shark passes, {} anchor drops",
        state.clock,
        state.ticks,
        scares,
        shark_passes,
        anchor_drops
    );
    for view in aquarium::describe(&state) {
        log::info!(
            "{:?} at ({:.0}, {:.0}) size {:.0}{}",
            view.key,
            view.x,
            view.y,
            view.width,
            if view.flipped { " (flipped)" } else { "" }
        );
    }
    log::debug!("Final state: {}", serde_json::to_string(&state)?);

    Ok(())
}
