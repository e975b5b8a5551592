//! Dino Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dino_runner::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use dino_runner::platform::{BrowserClock, Clock};
    use dino_runner::renderer::{RectBatch, RenderState};
    use dino_runner::{Driver, GameEvent, HostError, Settings};

    /// Host instance holding all state
    struct Host {
        driver: Driver,
        clock: BrowserClock,
        batch: RectBatch,
        render_state: Option<RenderState>,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Host {
        fn new(settings: Settings) -> Self {
            Self {
                driver: Driver::new(&settings),
                clock: BrowserClock::default(),
                batch: RectBatch::new(CANVAS_WIDTH, CANVAS_HEIGHT, settings.palette.clear),
                render_state: None,
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Space, Enter, click or tap
        fn press(&mut self) {
            let now = self.clock.now_ms();
            self.driver.press(now);
        }

        /// Run due ticks and log what happened
        fn update(&mut self, time: f64) {
            let now = self.clock.now_ms();
            let ticks = self.driver.frame(now, &mut self.batch);
            if ticks > 1 {
                log::trace!("Caught up {} ticks", ticks);
            }

            for event in self.driver.game.drain_events() {
                match event {
                    GameEvent::Crashed { score, new_best } => {
                        log::info!("Game over: score {} (new best: {})", score, new_best)
                    }
                    GameEvent::SpeedIncreased { speed } => log::debug!("Speed {:.1}", speed),
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.batch.vertices()) {
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
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let game = &self.driver.game;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&game.score().to_string()));
            }
            if let Some(el) = document
                .query_selector("#hud-high-score .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&game.high_score().to_string()));
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Start prompt only before the first run
            if let Some(el) = document.get_element_by_id("start-prompt") {
                let class = if game.is_idle() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if game.is_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&game.score().to_string()));
                    }
                    if let Some(runs_el) = document.get_element_by_id("recent-runs") {
                        runs_el.set_text_content(Some(&game.high_scores().recent_line()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(HostError::MissingElement("document"))?;

        let settings = Settings::load();
        log::set_max_level(settings.level_filter().unwrap_or(log::LevelFilter::Info));

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(HostError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| HostError::MissingElement("canvas"))?;

        // Backing store at device resolution, logical space stays 800 x 200
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let host = Rc::new(RefCell::new(Host::new(settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| HostError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| HostError::Surface(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let clear = host.borrow().settings.palette.clear;
        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (CANVAS_WIDTH, CANVAS_HEIGHT),
            clear,
        )
        .await?;
        host.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, host.clone());

        request_animation_frame(host);

        log::info!("Dino Runner running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        // Pointer
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                host.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "Enter" | "ArrowUp" => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        host.borrow_mut().press();
                    }
                    "KeyF" if !event.repeat() => {
                        let mut h = host.borrow_mut();
                        let shown = h.settings.toggle_fps();
                        h.settings.save();
                        log::debug!("FPS counter {}", if shown { "on" } else { "off" });
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            h.update(time);
            h.render();
            h.update_hud();
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    // Trace lets the settings level take over once they are loaded
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }

    log::info!("Dino Runner starting...");
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::PathBuf;

    use clap::Parser;

    use dino_runner::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, PLAYER_X, PLAYER_WIDTH};
    use dino_runner::platform::{Clock, ManualClock};
    use dino_runner::renderer::PixelBuffer;
    use dino_runner::{Driver, Game, GameEvent, HostError, Settings};

    /// Headless runner: simulates a run against a software surface
    #[derive(Debug, Parser)]
    #[command(name = "dino-runner", version, about)]
    pub struct Args {
        /// Stop after this many ticks if still alive
        #[arg(long, default_value_t = 3_600)]
        pub ticks: u64,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Write the final frame to this path as a binary PPM
        #[arg(long)]
        pub snapshot: Option<PathBuf>,

        /// Never jump; the run ends at the first cactus
        #[arg(long)]
        pub no_autopilot: bool,
    }

    /// Jump when the nearest cactus ahead is within reach
    fn autopilot_wants_jump(game: &Game) -> bool {
        let front = PLAYER_X + PLAYER_WIDTH;
        let reach = game.sim().speed * 7.0;
        game.sim()
            .obstacles
            .iter()
            .any(|o| o.x + o.width > PLAYER_X && o.x - front < reach)
    }

    pub fn run(args: Args, settings: Settings) -> Result<(), HostError> {
        let clock = ManualClock::new(0.0);
        let mut driver = Driver::new(&settings);
        let mut surface = PixelBuffer::new(
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            settings.render_scale,
            settings.palette.clear,
        );

        driver.press(clock.now_ms());
        while driver.is_ticking() && driver.game.sim().tick_count < args.ticks {
            if !args.no_autopilot && autopilot_wants_jump(&driver.game) {
                driver.game.jump();
            }
            clock.advance(settings.tick_ms());
            driver.frame(clock.now_ms(), &mut surface);

            for event in driver.game.drain_events() {
                match event {
                    GameEvent::Jumped => log::trace!("Jump at tick {}", driver.game.sim().tick_count),
                    GameEvent::SpeedIncreased { speed } => log::debug!("Speed {:.1}", speed),
                    _ => {}
                }
            }
        }

        let game = &driver.game;
        if game.is_over() {
            log::info!(
                "Run ended after {} ticks, score {}",
                game.sim().tick_count,
                game.score()
            );
        } else {
            log::info!(
                "Survived {} ticks, score {} at speed {:.1}",
                game.sim().tick_count,
                game.score(),
                game.sim().speed
            );
        }

        if let Some(path) = args.snapshot {
            let file = File::create(&path)?;
            surface.write_ppm(BufWriter::new(file))?;
            log::info!("Snapshot written to {}", path.display());
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use dino_runner::Settings;

    let args = native::Args::parse();

    // Settings pick the default log level, so read them before the logger
    let (settings, settings_error) = match args.settings.as_deref() {
        Some(path) => match Settings::from_path(path) {
            Ok(settings) => (settings, None),
            Err(e) => (Settings::default(), Some((path.to_path_buf(), e))),
        },
        None => (Settings::default(), None),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();
    log::info!("Dino Runner (native, headless) starting...");
    if let Some((path, e)) = settings_error {
        log::warn!("Using default settings, {}: {}", path.display(), e);
    }

    if let Err(e) = native::run(args, settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
