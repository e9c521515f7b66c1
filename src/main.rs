//! Coin Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use coin_dash::consts::*;
    use coin_dash::renderer::{
        AssetError, FpsCounter, RenderInitError, RenderState, SpriteSet, SpriteTint, TextRun, TintPalette,
        VertexBatch, draw_fps, draw_frame,
    };
    use coin_dash::sim::{GameEvent, GameState, InputTracker, KeySnapshot, tick};
    use coin_dash::{KeyBindings, Settings};

    const CANVAS_ID: &str = "game";
    const RESTART_ID: &str = "restart";
    const TEXT_LAYER_ID: &str = "text-layer";

    /// Anything that stops the game from starting
    #[derive(Debug, Error)]
    enum StartupError {
        #[error("browser window is not available")]
        NoWindow,
        #[error("document is not available")]
        NoDocument,
        #[error("element #{0} not found")]
        MissingElement(&'static str),
        #[error("element #{0} has the wrong type")]
        WrongElement(&'static str),
        #[error(transparent)]
        Assets(#[from] AssetError),
        #[error("failed to create surface: {0}")]
        Surface(#[from] wgpu::CreateSurfaceError),
        #[error("no suitable GPU adapter: {0}")]
        Adapter(#[from] wgpu::RequestAdapterError),
        #[error(transparent)]
        Render(#[from] RenderInitError),
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        keys: KeySnapshot,
        tracker: InputTracker,
        sprites: SpriteSet<SpriteTint>,
        batch: VertexBatch,
        render_state: RenderState,
        fps: FpsCounter,
        document: Document,
        text_layer: HtmlElement,
        // Text currently shown in the overlay
        shown_text: Vec<TextRun>,
    }

    impl Game {
        /// One step followed by one render
        fn frame(&mut self, time: f64) {
            let fps = self.fps.record(time);

            let input = self.tracker.sample(&mut self.keys);
            for event in tick(&mut self.state, &input) {
                self.handle_event(event);
            }

            draw_frame(&self.state, &self.sprites, &mut self.batch);
            if self.settings.show_fps {
                draw_fps(fps, &mut self.batch);
            }
            match self.render_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            self.update_text_layer();
        }

        fn handle_event(&self, event: GameEvent) {
            match event {
                GameEvent::SessionEnded(outcome) => {
                    log::info!(
                        "Session ended: {:?} with {} coins after {} ticks",
                        outcome,
                        self.state.score,
                        self.state.time_ticks
                    );
                    set_restart_visible(&self.document, true);
                }
                GameEvent::CoinCollected { index, score } => {
                    log::debug!("Coin {} collected (score {})", index, score)
                }
                GameEvent::Jumped => log::debug!("Jump"),
            }
        }

        /// Discard the world and start over
        fn restart(&mut self, seed: u64) {
            self.state.reset(seed);
            self.tracker.reset();
            self.keys = KeySnapshot::default();
            set_restart_visible(&self.document, false);
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Mirror the batch's text runs into the HTML overlay
        fn update_text_layer(&mut self) {
            let runs = self.batch.text_runs();
            if runs == self.shown_text.as_slice() {
                return;
            }

            self.text_layer.set_inner_html("");
            for run in runs {
                let Ok(el) = self.document.create_element("div") else {
                    continue;
                };
                let Ok(el) = el.dyn_into::<HtmlElement>() else {
                    continue;
                };
                el.set_text_content(Some(&run.text));
                let style = el.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("white-space", "nowrap");
                let _ = style.set_property("left", &format!("{}px", run.pos.x));
                // Runs are positioned by baseline, CSS boxes by their top
                let _ = style.set_property(
                    "top",
                    &format!("{}px", run.pos.y - run.style.size_px),
                );
                let _ = style.set_property("font", &run.style.css_font());
                let _ = style.set_property("color", &run.style.color.to_css());
                let _ = self.text_layer.append_child(&el);
            }
            self.shown_text = runs.to_vec();
        }
    }

    fn set_restart_visible(document: &Document, visible: bool) {
        if let Some(btn) = document
            .get_element_by_id(RESTART_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "inline-block" } else { "none" };
            let _ = btn.style().set_property("display", display);
        }
    }

    fn element<T: JsCast>(document: &Document, id: &'static str) -> Result<T, StartupError> {
        document
            .get_element_by_id(id)
            .ok_or(StartupError::MissingElement(id))?
            .dyn_into::<T>()
            .map_err(|_| StartupError::WrongElement(id))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Coin Dash starting...");

        match start().await {
            Ok(game) => {
                request_animation_frame(game);
                log::info!("Coin Dash running!");
            }
            Err(e) => log::error!("Startup failed: {}", e),
        }
    }

    async fn start() -> Result<Rc<RefCell<Game>>, StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = element(&document, CANVAS_ID)?;
        let text_layer: HtmlElement = element(&document, TEXT_LAYER_ID)?;
        let restart_btn: HtmlElement = element(&document, RESTART_ID)?;

        let settings = Settings::load();
        // Write back so the stored copy picks up newly added fields
        settings.save();
        let sprites = SpriteSet::resolve(&TintPalette)?;

        // Backbuffer at device resolution, scene in logical viewport pixels
        let dpr = settings.effective_pixel_ratio(window.device_pixel_ratio());
        let width = (VIEWPORT_WIDTH as f64 * dpr) as u32;
        let height = (VIEWPORT_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let viewport = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        let render_state = RenderState::new(surface, &adapter, width, height, viewport).await?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_viewport(seed, viewport);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            keys: KeySnapshot::default(),
            tracker: InputTracker::new(),
            sprites,
            batch: VertexBatch::new(),
            render_state,
            fps: FpsCounter::new(),
            document: document.clone(),
            text_layer,
            shown_text: Vec::new(),
        }));

        set_restart_visible(&document, false);
        setup_input_handlers(&window, game.clone());
        setup_restart_button(&restart_btn, game.clone());

        Ok(game)
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if KeyBindings::blocks_default(&code) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if let Some(action) = g.settings.bindings.action_for(&code) {
                    g.keys.set(action, true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(action) = g.settings.bindings.action_for(&event.code()) {
                    g.keys.set(action, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events are lost, so release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys = KeySnapshot::default();
                log::debug!("Released held keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(btn: &HtmlElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            game.borrow_mut().restart(seed);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use coin_dash::renderer::{AssetError, SpriteSet, TintPalette, VertexBatch, draw_frame};
    use coin_dash::sim::{GameEvent, GameState, InputTracker, KeySnapshot, tick};

    /// Press jump for a few frames out of every `JUMP_PERIOD`
    const JUMP_PERIOD: u64 = 40;
    const JUMP_HOLD: u64 = 5;

    /// Run a scripted session: run right, hop on a fixed cadence
    pub fn run(seed: u64, max_frames: u64) -> Result<GameState, AssetError> {
        let sprites = SpriteSet::resolve(&TintPalette)?;
        let mut state = GameState::new(seed);
        let mut tracker = InputTracker::new();
        let mut batch = VertexBatch::new();

        for frame in 0..max_frames {
            let mut keys = KeySnapshot {
                right: true,
                jump: frame % JUMP_PERIOD < JUMP_HOLD,
                ..Default::default()
            };
            let input = tracker.sample(&mut keys);

            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::SessionEnded(outcome) => {
                        log::info!("Frame {}: session ended ({:?})", frame, outcome)
                    }
                    GameEvent::CoinCollected { index, score } => {
                        log::debug!("Frame {}: coin {} (score {})", frame, index, score)
                    }
                    GameEvent::Jumped => log::debug!("Frame {}: jump", frame),
                }
            }

            draw_frame(&state, &sprites, &mut batch);

            if state.outcome.is_terminal() {
                break;
            }
        }

        log::info!(
            "Final: {:?}, {} coins, player x {:.1}, camera {:.1}, {} vertices, {} text runs",
            state.outcome,
            state.score,
            state.player.rect.left(),
            state.camera_x,
            batch.vertices().len(),
            batch.text_runs().len()
        );

        Ok(state)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Coin Dash (native) starting...");
    log::info!("Native mode runs a headless scripted session - run with `trunk serve` for the web version");

    if let Err(e) = headless::run(1, 1200) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
