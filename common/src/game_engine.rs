use std::time::Duration;

use log::debug;

use crate::config::{ConfigError, GameConfig, Settings};
use crate::util::RandomGenerator;
use crate::{Direction, GameCommand, GameEvent, GameSession, GameStatus, Position, Snapshot};

/// Presentation and feedback collaborators. `render` runs once after every tick and every
/// start; `on_event` receives each event before that render.
pub trait GameObserver {
    fn render(&mut self, snapshot: &Snapshot);

    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

/// Drives a [`GameSession`] on behalf of a scheduler and reports every step to a
/// [`GameObserver`]. The engine never schedules anything itself: `on_tick` returns the delay
/// that has to elapse before it is called again.
pub struct GameEngine {
    session: GameSession,
    tick_count: u64,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        GameEngine { session: GameSession::new(config), tick_count: 0 }
    }

    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        GameEngine { session: GameSession::new_with_seed(config, seed), tick_count: 0 }
    }

    pub fn with_rng(config: GameConfig, rng: Box<dyn RandomGenerator>) -> Self {
        GameEngine { session: GameSession::with_rng(config, rng), tick_count: 0 }
    }

    /// Runs one tick, forwards its events, renders, and returns the delay until the next tick.
    pub fn on_tick(&mut self, observer: &mut dyn GameObserver) -> Duration {
        if self.session.status() == GameStatus::Playing {
            self.tick_count += 1;
        }
        self.run(&GameCommand::Tick, observer);
        self.tick_interval()
    }

    /// Stores the direction for the next tick. Nothing is rendered.
    pub fn on_direction_input(&mut self, direction: Direction) {
        self.session.exec_command(&GameCommand::Turn { direction });
    }

    /// Parses a textual direction; unrecognized input is dropped.
    pub fn on_direction_input_str(&mut self, input: &str) {
        match input.parse::<Direction>() {
            Ok(direction) => self.on_direction_input(direction),
            Err(e) => debug!("ignoring input: {}", e),
        }
    }

    pub fn on_start_or_restart_requested(&mut self, observer: &mut dyn GameObserver) {
        let events = self.session.exec_command(&GameCommand::Start);
        if !events.is_empty() {
            self.tick_count = 0;
        }
        self.dispatch(&events, observer);
    }

    /// Validates `settings` and swaps the configuration in one step. On error the current
    /// configuration stays active.
    pub fn apply_settings(
        &mut self,
        settings: &Settings,
        observer: &mut dyn GameObserver,
    ) -> Result<(), ConfigError> {
        let config = GameConfig::from_settings(settings)?;
        self.apply_config(config, observer);
        Ok(())
    }

    pub fn apply_config(&mut self, config: GameConfig, observer: &mut dyn GameObserver) {
        self.run(&GameCommand::ApplyConfig { config }, observer);
    }

    fn run(&mut self, command: &GameCommand, observer: &mut dyn GameObserver) {
        let events = self.session.exec_command(command);
        self.dispatch(&events, observer);
    }

    fn dispatch(&self, events: &[GameEvent], observer: &mut dyn GameObserver) {
        for event in events {
            observer.on_event(event);
        }
        observer.render(&self.session.snapshot());
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.session.tick_interval_ms() / 1000.0)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct access for setting up positions, e.g. forcing food in tests.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn snake_segments(&self) -> Vec<Position> {
        self.session.segments().copied().collect()
    }

    pub fn food_position(&self) -> Position {
        self.session.food()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn status(&self) -> GameStatus {
        self.session.status()
    }

    /// Ticks that moved the snake since the current run started.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
