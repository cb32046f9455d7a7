//! Ball Drop entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use ball_drop::Settings;
    use ball_drop::consts::*;
    use ball_drop::css_color;
    use ball_drop::platform::{FpsCounter, FrameLimiter};
    use ball_drop::renderer::{RenderState, TextLabel, scene};
    use ball_drop::sim::{FrameInput, InputEvent, SimState, frame, page_hide_event};

    /// DOM elements holding the sidebar text, keyed by label
    struct TextOverlay {
        root: HtmlElement,
        elements: HashMap<&'static str, HtmlElement>,
    }

    impl TextOverlay {
        fn new(document: &web_sys::Document) -> Self {
            let root: HtmlElement = document
                .get_element_by_id("overlay")
                .expect("no overlay")
                .dyn_into()
                .expect("overlay is not an HtmlElement");
            Self {
                root,
                elements: HashMap::new(),
            }
        }

        /// Place every label; `scale` converts viewport pixels to CSS pixels
        fn update(&mut self, labels: &[TextLabel], scale: f32) {
            for label in labels {
                let key = label.id.as_str();
                if !self.elements.contains_key(key) {
                    let Some(el) = self.create_element(key, label.color) else {
                        continue;
                    };
                    self.elements.insert(key, el);
                }
                let Some(el) = self.elements.get(key) else {
                    continue;
                };
                if el.text_content().as_deref() != Some(label.text.as_str()) {
                    el.set_text_content(Some(&label.text));
                }
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", label.pos.x * scale));
                let _ = style.set_property("top", &format!("{}px", label.pos.y * scale));
            }
        }

        fn create_element(&self, key: &str, color: [f32; 4]) -> Option<HtmlElement> {
            let document = self.root.owner_document()?;
            let el: HtmlElement = document.create_element("span").ok()?.dyn_into().ok()?;
            el.set_id(&format!("label-{key}"));
            el.set_class_name("label");
            let _ = el.style().set_property("color", &css_color(color));
            self.root.append_child(&el).ok()?;
            Some(el)
        }
    }

    /// Sandbox instance holding all state
    struct App {
        state: SimState,
        settings: Settings,
        render_state: Option<RenderState>,
        overlay: TextOverlay,
        canvas: HtmlCanvasElement,
        pending: Vec<InputEvent>,
        pointer: Vec2,
        limiter: FrameLimiter,
        fps: FpsCounter,
        running: bool,
    }

    impl App {
        /// Convert a client-space position to viewport pixels
        fn to_viewport(&self, client_x: f32, client_y: f32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let x = client_x - rect.left() as f32;
            let y = client_y - rect.top() as f32;
            Vec2::new(x, y) / self.css_scale()
        }

        /// CSS pixels per viewport pixel
        fn css_scale(&self) -> f32 {
            let w = self.canvas.client_width().max(1) as f32;
            w / VIEWPORT_WIDTH
        }

        fn pointer_down(&mut self, pos: Vec2) {
            self.pointer = pos;
            self.pending.push(InputEvent::PointerDown(pos));
        }

        fn pointer_up(&mut self, pos: Vec2) {
            self.pointer = pos;
            self.pending.push(InputEvent::PointerUp(pos));
        }

        /// One animation frame; returns `false` once the loop has stopped
        fn tick(&mut self, time: f64) -> bool {
            if !self.limiter.ready(time) {
                return true;
            }

            let input = FrameInput {
                events: std::mem::take(&mut self.pending),
                pointer: self.pointer,
            };
            if !frame(&mut self.state, &input) {
                self.running = false;
                log::info!("Stopped after {} frames", self.state.frame_count);
                return false;
            }

            self.fps.record(time);
            self.render();
            true
        }

        fn render(&mut self) {
            let fps = self.settings.show_fps.then(|| self.fps.fps());
            let scene = scene::build(&self.state, fps);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            let scale = self.css_scale();
            self.overlay.update(&scene.labels, scale);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store follows device pixels; logic stays in viewport pixels
        let dpr = window.device_pixel_ratio();
        let width = (VIEWPORT_WIDTH as f64 * dpr) as u32;
        let height = (VIEWPORT_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        settings.save();

        let app = Rc::new(RefCell::new(App {
            state: SimState::new(&settings),
            settings,
            render_state: None,
            overlay: TextOverlay::new(&document),
            canvas: canvas.clone(),
            pending: Vec::new(),
            pointer: Vec2::ZERO,
            limiter: FrameLimiter::new(TARGET_FPS),
            fps: FpsCounter::default(),
            running: true,
        }));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        )
        .await;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());
        setup_quit_handler(app.clone());

        request_animation_frame(app);

        log::info!("Ball Drop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Mouse down - only on the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut a = app.borrow_mut();
                let pos = a.to_viewport(event.client_x() as f32, event.client_y() as f32);
                a.pointer_down(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up/move - on the window, so drags released off-canvas still end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut a = app.borrow_mut();
                let pos = a.to_viewport(event.client_x() as f32, event.client_y() as f32);
                a.pointer_up(pos);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.pointer = a.to_viewport(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // Only the finger that just landed; earlier ones are already down
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut a = app.borrow_mut();
                    let pos = a.to_viewport(touch.client_x() as f32, touch.client_y() as f32);
                    a.pointer_down(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    a.pointer = a.to_viewport(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for kind in ["touchend", "touchcancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                let pos = match event.changed_touches().get(0) {
                    Some(touch) => a.to_viewport(touch.client_x() as f32, touch.client_y() as f32),
                    None => a.pointer,
                };
                a.pointer_up(pos);
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Page teardown is the browser's close request
    ///
    /// A page kept in the back/forward cache is only frozen, so the loop keeps
    /// its state and resumes when the page is shown again.
    fn setup_quit_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
            match page_hide_event(event.persisted()) {
                Some(quit) => app.borrow_mut().pending.push(quit),
                None => log::info!("Page frozen in back/forward cache"),
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            app_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn app_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_running = {
            let mut a = app.borrow_mut();
            a.running && a.tick(time)
        };

        if keep_running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ball Drop (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the interactive version");

    headless::run(&ball_drop::Settings::load());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session exercising the loop without a window
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use ball_drop::Settings;
    use ball_drop::consts::*;
    use ball_drop::renderer::scene;
    use ball_drop::sim::{FrameInput, InputEvent, SimState, frame};

    /// Seconds of simulated time after the scripted input
    const SETTLE_SECONDS: u32 = 3;

    pub fn run(settings: &Settings) {
        let mut state = SimState::new(settings);
        let increase = state.layout.increase_button.min() + Vec2::splat(5.0);
        let decrease = state.layout.decrease_button.min() + Vec2::splat(5.0);

        // Drop a row of balls, grab the first, drag it across, let go
        let mut script: Vec<FrameInput> = [100.0, 250.0, 400.0, 550.0, 700.0]
            .into_iter()
            .map(|x| FrameInput {
                events: vec![InputEvent::PointerDown(Vec2::new(x, 80.0))],
                pointer: Vec2::new(x, 80.0),
            })
            .collect();
        script.push(FrameInput {
            events: vec![InputEvent::PointerDown(Vec2::new(100.0, 82.0))],
            pointer: Vec2::new(100.0, 82.0),
        });
        script.extend((0..30).map(|i| FrameInput {
            events: Vec::new(),
            pointer: Vec2::new(100.0 + i as f32 * 5.0, 82.0),
        }));
        script.push(FrameInput {
            events: vec![
                InputEvent::PointerUp(Vec2::new(250.0, 82.0)),
                InputEvent::PointerDown(increase),
                InputEvent::PointerDown(increase),
                InputEvent::PointerDown(decrease),
            ],
            pointer: decrease,
        });
        script.extend((0..SETTLE_SECONDS * TARGET_FPS as u32).map(|_| FrameInput {
            events: Vec::new(),
            pointer: decrease,
        }));
        script.push(FrameInput {
            events: vec![InputEvent::Quit],
            pointer: decrease,
        });

        for input in &script {
            if !frame(&mut state, input) {
                break;
            }
        }

        let scene = scene::build(&state, None);
        log::info!(
            "{} frames, {} balls, gravity {}, {} shapes",
            state.frame_count,
            state.balls.len(),
            state.gravity,
            scene.shapes.len()
        );
        for (ball, sprite) in state.balls.iter().zip(state.sprites()) {
            log::info!("Ball {} at {}", ball.id, sprite.pos);
        }
    }
}
