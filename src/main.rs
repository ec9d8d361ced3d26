//! Dino Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dino_run::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use dino_run::platform::web::RafScheduler;
    use dino_run::renderer::RenderState;
    use dino_run::settings::ConfigSource;
    use dino_run::sim::GamePhase;
    use dino_run::{Error, GameConfig, Result, Session};

    /// Game instance holding all state
    struct Game {
        session: Session,
        scheduler: RafScheduler,
        render_state: Option<RenderState>,
        document: Document,
    }

    impl Game {
        /// Frame callback body: step, draw, refresh the HUD
        fn on_frame(&mut self, time: f64) {
            let Game {
                session, scheduler, ..
            } = self;
            session.frame(time, scheduler);
            self.render();
            self.update_hud();
        }

        fn press_jump(&mut self) {
            let Game {
                session, scheduler, ..
            } = self;
            session.press_jump(scheduler);
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let Game {
                session, scheduler, ..
            } = self;
            session.reset(seed, scheduler);
            self.render();
            self.update_hud();
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.session.state()) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = self.session.state();
            let document = &self.document;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-speed .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!(
                    "{} - {:.1}x",
                    state.difficulty.label(),
                    state.speed
                )));
            }

            set_visible(document, "start-prompt", state.phase == GamePhase::NotStarted);
            set_visible(document, "pause-menu", state.phase == GamePhase::Paused);
            set_visible(document, "game-over", state.phase == GamePhase::GameOver);
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Host-side game over handler: fill in the final score panel
    fn show_game_over(score: u32) {
        log::info!("Final score: {}", score);
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("final-score"))
        {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    pub async fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Dino Run starting...");

        let window = web_sys::window().ok_or(Error::MissingBrowserObject("window"))?;
        let document = window
            .document()
            .ok_or(Error::MissingBrowserObject("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(Error::MissingBrowserObject("canvas"))?;

        // Backing store at device resolution, same aspect as the field
        let dpr = window.device_pixel_ratio();
        let width = (FIELD_WIDTH as f64 * dpr) as u32;
        let height = (FIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let (config, source) = GameConfig::load();
        if source == ConfigSource::Url {
            config.save();
        }
        if !config.allow_pause {
            set_visible(&document, "pause-btn", false);
        }

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(config, seed, show_game_over);
        let game = Rc::new(RefCell::new(Game {
            session,
            scheduler: RafScheduler::new()?,
            render_state: None,
            document: document.clone(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Frame closure; the scheduler re-requests it every live frame
        {
            let callback = game.borrow().scheduler.callback();
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                game.borrow_mut().on_frame(time);
            }));
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.render();
            g.update_hud();
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&document, game);

        log::info!("Dino Run ready ({})", config.difficulty.as_str());
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        g.press_jump();
                    }
                    "Escape" | "KeyP" => g.session.toggle_pause(),
                    "KeyR" => g.restart(),
                    "KeyI" => {
                        let enabled = !g.session.autopilot();
                        g.session.set_autopilot(enabled);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (jump)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press_jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click (jump)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press_jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press_jump();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.toggle_pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for id in ["restart-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().restart();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.session.config().allow_pause && g.session.phase() == GamePhase::Running {
                    g.session.request_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Dino Run failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_run::{Difficulty, GameConfig};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dino Run (native) starting...");
    log::info!("Rendering needs the web build - run with `trunk serve`; running headless autopilot demo");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    // Optional query-style argument, e.g. `difficulty=easy&pause=1`
    let configs = match std::env::args().nth(1) {
        Some(query) => {
            let (mut config, _) = GameConfig::load();
            if let Err(e) = config.apply_query(&query) {
                log::error!("{}", e);
                std::process::exit(2);
            }
            vec![config]
        }
        None => [Difficulty::Easy, Difficulty::Hard]
            .into_iter()
            .map(|difficulty| GameConfig {
                difficulty,
                ..GameConfig::load().0
            })
            .collect(),
    };

    for config in configs {
        let score = headless::run(config, seed);
        println!("{}: score {}", config.difficulty.label(), score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use dino_run::platform::ManualScheduler;
    use dino_run::{GameConfig, Session};

    /// Stop the demo after this much simulated time even if the autopilot survives
    const MAX_SECONDS: f64 = 300.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play one autopilot run, pumping frames by hand; returns the final score
    pub fn run(config: GameConfig, seed: u64) -> u32 {
        let final_score = Rc::new(Cell::new(None));
        let sink = final_score.clone();
        let mut session = Session::new(config, seed, move |score| sink.set(Some(score)));
        session.set_autopilot(true);

        let mut scheduler = ManualScheduler::new();
        session.press_jump(&mut scheduler);

        let mut t = 0.0;
        while t < MAX_SECONDS * 1000.0 && scheduler.fire().is_some() {
            t += FRAME_MS;
            session.frame(t, &mut scheduler);
        }

        let state = session.state();
        match final_score.get() {
            Some(score) => {
                log::info!(
                    "{} run over after {:.1}s at {:.1}x",
                    config.difficulty.as_str(),
                    state.elapsed,
                    state.speed
                );
                score
            }
            None => {
                log::info!(
                    "{} run survived {:.0}s at {:.1}x",
                    config.difficulty.as_str(),
                    state.elapsed,
                    state.speed
                );
                session.score()
            }
        }
    }
}
