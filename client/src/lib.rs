mod audio;
mod render;

pub use audio::*;
pub use render::*;

use common::{GameEngine, GameEvent, GameObserver, GameStatus, Settings, Snapshot};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Receives engine output on the page side: draws on the canvas, if one is attached, and
/// queues events for JavaScript to pick up.
struct CanvasView {
    canvas: Option<web_sys::HtmlCanvasElement>,
    palette: Palette,
    events: Vec<GameEvent>,
}

impl GameObserver for CanvasView {
    fn render(&mut self, snapshot: &Snapshot) {
        if let Some(canvas) = &self.canvas {
            if let Err(e) = draw_frame(canvas, snapshot, &self.palette) {
                log::error!("Failed to draw frame: {:?}", e);
            }
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// A game owned by the page. JavaScript drives it with `setTimeout`, feeding the delay
/// returned by `on_tick` back into the next timeout.
#[wasm_bindgen]
pub struct WebGame {
    engine: GameEngine,
    view: CanvasView,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str, seed: f64, canvas: Option<web_sys::HtmlCanvasElement>) -> Result<WebGame, JsValue> {
        let settings = parse_settings(settings_json)?;
        let config = common::GameConfig::from_settings(&settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut game = WebGame {
            engine: GameEngine::new_with_seed(config, seed as u64),
            view: CanvasView { canvas, palette: Palette::from_settings(&settings), events: Vec::new() },
            settings,
        };
        let snapshot = game.engine.snapshot();
        game.view.render(&snapshot);
        Ok(game)
    }

    /// Advances one tick and returns the delay in milliseconds before the next one.
    pub fn on_tick(&mut self) -> f64 {
        self.engine.on_tick(&mut self.view);
        self.tick_interval_ms()
    }

    pub fn on_direction_input(&mut self, direction: &str) {
        self.engine.on_direction_input_str(direction);
    }

    /// Keydown handler: arrow keys steer while playing, any key starts or restarts otherwise.
    pub fn on_key(&mut self, key: &str) {
        if self.engine.status() == GameStatus::Playing {
            self.engine.on_direction_input_str(key);
        } else {
            self.engine.on_start_or_restart_requested(&mut self.view);
        }
    }

    pub fn on_start_or_restart_requested(&mut self) {
        self.engine.on_start_or_restart_requested(&mut self.view);
    }

    pub fn apply_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings = parse_settings(settings_json)?;
        self.apply(settings)
    }

    /// Restores the default settings form values.
    pub fn reset_settings(&mut self) -> Result<(), JsValue> {
        self.apply(Settings::default())
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events emitted since the last call, as a JSON array.
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        let events = std::mem::take(&mut self.view.events);
        serde_json::to_string(&events)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn status(&self) -> String {
        status_name(self.engine.status()).to_string()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.engine.session().tick_interval_ms()
    }
}

impl WebGame {
    fn apply(&mut self, settings: Settings) -> Result<(), JsValue> {
        // Validate before touching the palette so a rejected form changes nothing
        let config = common::GameConfig::from_settings(&settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.view.palette = Palette::from_settings(&settings);
        self.settings = settings;
        self.engine.apply_config(config, &mut self.view);
        Ok(())
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }
}

fn parse_settings(settings_json: &str) -> Result<Settings, JsValue> {
    Settings::from_json(settings_json).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

pub fn status_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::NotStarted => "notStarted",
        GameStatus::Playing => "playing",
        GameStatus::Over => "over",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Direction;

    fn game() -> WebGame {
        WebGame::new("{}", 11.0, None).unwrap()
    }

    #[test]
    fn test_any_key_starts_then_arrows_steer() {
        let mut game = game();
        assert_eq!(game.status(), "notStarted");

        game.on_key("Enter");
        assert_eq!(game.status(), "playing");

        game.on_key("ArrowUp");
        assert_eq!(game.engine().session().pending_direction(), Some(Direction::Up));

        // Non-arrow keys are not directions while playing
        game.on_key("x");
        assert_eq!(game.engine().session().pending_direction(), Some(Direction::Up));
        assert_eq!(game.status(), "playing");
    }

    #[test]
    fn test_events_drained_once() {
        let mut game = game();
        game.on_start_or_restart_requested();
        let events: Vec<GameEvent> = serde_json::from_str(&game.drain_events_json().unwrap()).unwrap();
        assert_eq!(events[0], GameEvent::GameStarted);
        assert_eq!(game.drain_events_json().unwrap(), "[]");
    }

    #[test]
    fn test_settings_update_palette_and_interval() {
        let mut game = game();
        assert_eq!(game.tick_interval_ms(), 100.0);

        game.apply(Settings { speed_base: 200.0, snake_color: "#000000".to_string(), ..Settings::default() })
            .unwrap();
        assert_eq!(game.tick_interval_ms(), 50.0);
        assert_eq!(game.view.palette.snake_head, "rgb(20,20,20)");
        assert!(game.view.events.contains(&GameEvent::SettingsChanged));

        game.reset_settings().unwrap();
        assert_eq!(game.settings, Settings::default());
        assert_eq!(game.tick_interval_ms(), 100.0);
    }
}
