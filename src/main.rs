//! Neon Asteroids entry point
//!
//! In the browser this wires the canvas, keyboard and HUD to the simulation
//! and drives it from requestAnimationFrame. Natively it runs a headless
//! autopilot session and prints the final state as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use glam::Vec2;
    use neon_asteroids::Tuning;
    use neon_asteroids::consts::VIEWPORT_FRACTION;
    use neon_asteroids::platform::{FixedTimestep, InputTracker};
    use neon_asteroids::renderer::RenderState;
    use neon_asteroids::sim::{GameEvent, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        clock: FixedTimestep,
        input: InputTracker,
    }

    impl Game {
        fn new(seed: u64, field: Vec2, tuning: Tuning) -> Self {
            Self {
                state: GameState::with_tuning(seed, field, tuning),
                render_state: None,
                clock: FixedTimestep::new(),
                input: InputTracker::new(),
            }
        }

        /// Run however many simulation ticks this frame owes
        fn update(&mut self, time: f64) {
            let ticks = self.clock.advance_to(time);
            for _ in 0..ticks {
                let input = self.input.sample();
                tick(&mut self.state, &input);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push simulation events into the DOM
        fn update_hud(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) => set_text(document, "scoreVal", score),
                    GameEvent::LivesChanged(lives) => set_text(document, "livesVal", lives),
                    GameEvent::GameOver { score } => {
                        set_text(document, "finalScore", score);
                        set_hidden(document, "game-over", false);
                    }
                    _ => {}
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.clock.reset();
            self.input.clear();
        }
    }

    fn set_text(document: &Document, id: &str, value: impl ToString) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Canvas size for the current viewport
    fn viewport_size(window: &Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            let px = v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            ((px * VIEWPORT_FRACTION) as u32).max(1)
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn load_tuning(document: &Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Applying tuning overrides from page");
                Tuning::from_json_or_default(&json)
            }
            _ => Tuning::default(),
        }
    }

    fn js_err(e: impl ToString) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Neon Asteroids starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let field = Vec2::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, field, tuning)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        {
            let g = game.borrow();
            set_text(&document, "scoreVal", g.state.score);
            set_text(&document, "livesVal", g.state.lives);
        }
        set_hidden(&document, "game-over", true);

        setup_input_handlers(&window, game.clone());
        setup_resize_handler(&window, canvas, game.clone());
        setup_restart_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Neon Asteroids running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.code()) {
                    event.prevent_default();
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
                if game.borrow_mut().input.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport_size(&window_clone);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.state.resize_field(width as f32, height as f32);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
            log::debug!("Canvas resized to {}x{}", width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut g = game.borrow_mut();
                g.restart(seed);
                g.update_hud(&document);
                set_hidden(&document, "game-over", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            g.render();
            g.update(time);

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use glam::Vec2;
    use neon_asteroids::Tuning;
    use neon_asteroids::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, FPS};
    use neon_asteroids::sim::{GameEvent, GameState, TickInput, tick};
    use thiserror::Error;

    /// One minute of play
    pub const DEFAULT_TICKS: u64 = 60 * FPS as u64;
    pub const DEFAULT_SEED: u64 = 0x5EED_A57E;

    #[derive(Debug, Error)]
    pub enum RunError {
        #[error("could not read tuning file: {0}")]
        Io(#[from] std::io::Error),

        #[error("could not serialize state: {0}")]
        Json(#[from] serde_json::Error),
    }

    /// Tallies gathered from the event stream
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct Summary {
        pub ticks: u64,
        pub shots: u32,
        pub asteroids_destroyed: u32,
        pub deaths: u32,
        pub levels_cleared: u32,
    }

    /// Scripted input: sweep left and right, short thrust bursts, fire on a cadence
    pub fn autopilot(t: u64) -> TickInput {
        let sweep_left = (t / 120) % 2 == 0;
        TickInput {
            rotate_left: sweep_left,
            rotate_right: !sweep_left,
            thrust: t % 240 < 20,
            fire: t % 15 == 0,
        }
    }

    /// Run the autopilot until `ticks` have elapsed or the game ends
    pub fn simulate(seed: u64, tuning: Tuning, ticks: u64) -> (GameState, Summary) {
        let field = Vec2::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT);
        let mut state = GameState::with_tuning(seed, field, tuning);
        let mut summary = Summary::default();

        while summary.ticks < ticks && !state.is_game_over() {
            let input = autopilot(state.time_ticks);
            tick(&mut state, &input);
            summary.ticks += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::LaserFired => summary.shots += 1,
                    GameEvent::AsteroidDestroyed { .. } => summary.asteroids_destroyed += 1,
                    GameEvent::ShipDestroyed => summary.deaths += 1,
                    GameEvent::LevelCleared { .. } => summary.levels_cleared += 1,
                    _ => {}
                }
            }
        }

        (state, summary)
    }

    pub fn load_tuning(path: &Path) -> Result<Tuning, RunError> {
        let json = std::fs::read_to_string(path)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(Tuning::from_json_or_default(&json))
    }

    pub fn run(tuning_path: Option<&Path>) -> Result<(), RunError> {
        let tuning = match tuning_path {
            Some(path) => load_tuning(path)?,
            None => Tuning::default(),
        };

        let (state, summary) = simulate(DEFAULT_SEED, tuning, DEFAULT_TICKS);
        log::info!(
            "Ran {} ticks: score {}, level {}, lives {}, {} shots, {} asteroids destroyed, {} deaths",
            summary.ticks,
            state.score,
            state.level,
            state.lives,
            summary.shots,
            summary.asteroids_destroyed,
            summary.deaths,
        );

        println!("{}", serde_json::to_string_pretty(&state)?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autopilot_fire_cadence() {
            let fires = (0..60).filter(|&t| autopilot(t).fire).count();
            assert_eq!(fires, 4);
            assert!(!autopilot(0).rotate_right);
            assert!(autopilot(120).rotate_right);
        }

        #[test]
        fn test_simulate_is_deterministic() {
            let (a, sa) = simulate(11, Tuning::default(), 600);
            let (b, sb) = simulate(11, Tuning::default(), 600);
            assert_eq!(sa, sb);
            assert_eq!(a.score, b.score);
            assert_eq!(a.time_ticks, b.time_ticks);
            assert_eq!(a.asteroids.len(), b.asteroids.len());
        }

        #[test]
        fn test_simulate_fires_and_stops_at_budget() {
            let (state, summary) = simulate(3, Tuning::default(), 120);
            assert!(summary.ticks <= 120);
            assert!(summary.shots > 0);
            assert!(state.lasers.len() <= state.tuning.laser_max);
            assert!(serde_json::to_string(&state).is_ok());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Asteroids (native, headless) starting...");

    let tuning_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    if let Err(e) = headless::run(tuning_path.as_deref()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
