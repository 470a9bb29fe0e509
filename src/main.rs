//! Ninja Run entry point
//!
//! Handles platform-specific initialization and drives the engine clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use ninja_run::consts::*;
    use ninja_run::platform::{
        PAUSE_BUTTON_ID, RESTART_BUTTON_ID, RawInput, START_BUTTON_ID, USERNAME_INPUT_ID,
        clock_seed, map_input,
    };
    use ninja_run::sim::{Engine, GameEvent, GamePhase, Snapshot};

    const OFF_COLOR: &str = "#1a1a1a";

    /// Game instance holding the engine and the DOM cells it paints
    struct Game {
        engine: Engine,
        /// Marquee cells, row-major
        cells: Vec<HtmlElement>,
        /// performance.now() at engine time 0
        epoch: f64,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, cells: Vec<HtmlElement>, epoch: f64) -> Self {
            Self {
                engine: Engine::new(seed),
                cells,
                epoch,
                last_phase: GamePhase::NotStarted,
            }
        }

        /// Apply a raw input at the current wall time
        ///
        /// Tasks that fell due since the last frame fire first, so the input
        /// lands after them rather than at the stale frame time.
        fn dispatch(&mut self, raw: RawInput<'_>) {
            if let Some(now) = web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
            {
                self.update(now);
            }
            let username = read_username().unwrap_or_default();
            if let Some(input) = map_input(raw, &username) {
                let events = self.engine.handle(input);
                log_events(&events);
            }
        }

        /// Catch the engine clock up to wall time
        fn update(&mut self, time: f64) {
            let target = (time - self.epoch).max(0.0) as u64;
            let events = self.engine.advance_to(target);
            log_events(&events);
        }

        fn paint(&mut self) {
            let snap = self.engine.snapshot();
            for (r, row) in snap.grid.rows().iter().enumerate() {
                for (c, &cell) in row.iter().enumerate() {
                    if let Some(el) = self.cells.get(r * GRID_COLS + c) {
                        let color = if cell == 1 { snap.lit_color.as_str() } else { OFF_COLOR };
                        let _ = el.style().set_property("background-color", color);
                    }
                }
            }
            self.update_hud(&snap);
        }

        /// Update score, player and obstacle elements in DOM
        fn update_hud(&mut self, snap: &Snapshot) {
            let document = web_sys::window().unwrap().document().unwrap();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&snap.score.to_string()));
            }

            if let Some(el) = element(&document, "player") {
                let _ = el
                    .style()
                    .set_property("bottom", &format!("{}px", snap.player.vertical_offset));
                let pose = match snap.pose {
                    ninja_run::sim::Pose::Running => "running",
                    ninja_run::sim::Pose::Jumping => "jumping",
                };
                let _ = el.set_attribute("data-pose", pose);
                let _ = el.set_attribute("data-frame", &snap.scenery.sprite_frame.to_string());
            }

            if let Some(el) = element(&document, "buildings") {
                let _ = el.style().set_property(
                    "transform",
                    &format!("translateX({}px)", snap.scenery.building_offset),
                );
            }
            if let Some(el) = element(&document, "ground") {
                let _ = el.style().set_property(
                    "transform",
                    &format!("translateX({}px)", snap.scenery.ground_offset),
                );
            }

            if let Some(el) = document.get_element_by_id("obstacles") {
                let html: String = snap
                    .obstacles
                    .iter()
                    .map(|o| {
                        format!(
                            "<div class=\"obstacle {:?}\" style=\"left:{}px;height:{}px\"></div>",
                            o.kind, o.position, o.height
                        )
                    })
                    .collect();
                el.set_inner_html(&html);
            }

            // Title screen vs. game screen
            if snap.phase != self.last_phase {
                let in_game = snap.phase != GamePhase::NotStarted;
                if let Some(el) = document.get_element_by_id("title-screen") {
                    let _ = el.set_attribute("class", if in_game { "hidden" } else { "" });
                }
                if let Some(el) = document.get_element_by_id("game-screen") {
                    let _ = el.set_attribute("class", if in_game { "" } else { "hidden" });
                }
                if let Some(el) = document.get_element_by_id(PAUSE_BUTTON_ID) {
                    let label = if snap.phase == GamePhase::Paused { "Resume" } else { "Pause" };
                    el.set_text_content(Some(label));
                }
                self.last_phase = snap.phase;
            }
        }
    }

    fn element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn read_username() -> Option<String> {
        let document = web_sys::window()?.document()?;
        let input: HtmlInputElement = document
            .get_element_by_id(USERNAME_INPUT_ID)?
            .dyn_into()
            .ok()?;
        Some(input.value())
    }

    fn log_events(events: &[GameEvent]) {
        for event in events {
            if let GameEvent::GameOver { score } = event {
                log::info!("Game over, score {}", score);
            }
        }
    }

    /// Build the ROWS x COLS cell elements inside #marquee
    fn build_cells(document: &Document) -> Result<Vec<HtmlElement>, JsValue> {
        let container = document
            .get_element_by_id("marquee")
            .ok_or_else(|| JsValue::from_str("missing #marquee"))?;
        container.set_inner_html("");

        let mut cells = Vec::with_capacity(GRID_ROWS * GRID_COLS);
        for _ in 0..GRID_ROWS * GRID_COLS {
            let cell: HtmlElement = document.create_element("div")?.dyn_into()?;
            cell.set_class_name("cell");
            cell.style().set_property("background-color", OFF_COLOR)?;
            container.append_child(&cell)?;
            cells.push(cell);
        }
        container.set_attribute(
            "style",
            &format!("display:grid;grid-template-columns:repeat({GRID_COLS}, 20px);gap:1px"),
        )?;
        Ok(cells)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ninja Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let epoch = window.performance().map(|p| p.now()).unwrap_or(0.0);

        let cells = match build_cells(&document) {
            Ok(cells) => cells,
            Err(e) => {
                log::error!("Could not build marquee: {:?}", e);
                Vec::new()
            }
        };

        let seed = clock_seed();
        let game = Rc::new(RefCell::new(Game::new(seed, cells, epoch)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Ninja Run running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "Space" {
                    event.prevent_default();
                }
                game.borrow_mut().dispatch(RawInput::Key(&code));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (jump), suppressing page scroll while in game
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.engine.phase() != GamePhase::NotStarted {
                    event.prevent_default();
                    g.dispatch(RawInput::Touch);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Control buttons
        for id in [START_BUTTON_ID, PAUSE_BUTTON_ID, RESTART_BUTTON_ID] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().dispatch(RawInput::Button(id));
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.paint();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ninja Run (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable game");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a short run on the virtual clock and print the marquee to stdout.
///
/// Usage: `ninja-run [NAME] [SEED]`
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use ninja_run::consts::*;
    use ninja_run::platform::clock_seed;
    use ninja_run::sim::{Engine, GameEvent, GamePhase, Input, player_rect};

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "NINJA".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(clock_seed);

    let mut engine = Engine::new(seed);
    log::info!("Headless run for {} with seed {}", name, engine.seed());
    engine.handle(Input::Start { username: name });

    // Hop whenever the nearest obstacle is far enough away that the whole
    // jump finishes before it reaches the player; stop after 60 s.
    let player_right = player_rect(&engine.state().player).max().x;
    let clear_distance =
        OBSTACLE_STEP * (JUMP_DURATION_MS / OBSTACLE_PERIOD_MS + 1) as f32 + player_right;

    let mut printed_at = 0;
    while engine.now() < 60_000 && engine.phase() == GamePhase::Running {
        let nearest = engine
            .state()
            .obstacles
            .iter()
            .map(|o| o.position)
            .fold(f32::INFINITY, f32::min);
        if nearest > clear_distance && engine.now() % 1500 == 0 {
            engine.handle(Input::Jump);
        }

        for event in engine.advance(SCROLL_PERIOD_MS) {
            if let GameEvent::GameOver { score } = event {
                println!("GAME OVER at {} ms, score {}", engine.now(), score);
            }
        }

        if engine.now() - printed_at >= 1000 {
            printed_at = engine.now();
            let snap = engine.snapshot();
            println!(
                "t={}ms score={} obstacles={} color={}",
                snap.time,
                snap.score,
                snap.obstacles.len(),
                snap.lit_color
            );
            print!("{}", snap.grid.to_ascii());
        }
    }

    match engine.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize snapshot: {}", e),
    }
}
