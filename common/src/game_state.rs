use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::food::{place_food, PlacementError};
use crate::util::{PseudoRandom, RandomGenerator};
use crate::{Direction, GameConfig, Position, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    BoardFull,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    Tick,
    Turn { direction: Direction },
    Start,
    ApplyConfig { config: GameConfig },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted,
    FoodSpawned { position: Position },
    FoodEaten { position: Position, score: u32 },
    GameOver { final_score: u32, cause: GameOverCause },
    SettingsChanged,
}

/// What a presentation layer needs to draw one frame.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub segments: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
    pub grid_extent: u32,
    pub cell_size_px: u32,
}

/// One player's game: snake, food, status and speed under a single configuration.
pub struct GameSession {
    config: GameConfig,
    snake: Snake,
    food: Position,
    status: GameStatus,
    speed: f64,
    pending_direction: Option<Direction>,
    rng: Box<dyn RandomGenerator>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, Box::new(PseudoRandom::from_entropy()))
    }

    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Box::new(PseudoRandom::new(seed)))
    }

    pub fn with_rng(config: GameConfig, rng: Box<dyn RandomGenerator>) -> Self {
        let mut session = GameSession {
            speed: config.base_speed(),
            config,
            snake: Snake::new(),
            food: Position::new(0, 0),
            status: GameStatus::NotStarted,
            pending_direction: None,
            rng,
        };
        // The default grid always has room next to the starting body
        if let Err(e) = session.respawn_food() {
            warn!("initial food placement failed: {}", e);
        }
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.snake.body.iter()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.snake.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Ticks per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.speed
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.body.iter().copied().collect(),
            food: self.food,
            score: self.snake.score,
            status: self.status,
            grid_extent: self.config.grid_extent(),
            cell_size_px: self.config.cell_size_px(),
        }
    }

    /// Puts the food at `position` regardless of the random generator.
    pub fn force_food(&mut self, position: Position) {
        self.food = position;
    }

    /// Replaces the snake wholesale. Mainly useful for setting up scenarios.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn exec_command(&mut self, command: &GameCommand) -> Vec<GameEvent> {
        let mut out: Vec<GameEvent> = Vec::new();
        match command {
            GameCommand::Tick => self.tick(&mut out),

            GameCommand::Turn { direction } => {
                // Last write wins; the reversal check happens when the move consumes it
                if self.status == GameStatus::Playing {
                    self.pending_direction = Some(*direction);
                }
            }

            GameCommand::Start => {
                if self.status == GameStatus::Playing {
                    debug!("start requested while playing, ignored");
                } else {
                    self.start(&mut out);
                }
            }

            GameCommand::ApplyConfig { config } => self.apply_config(config.clone(), &mut out),
        }
        out
    }

    fn start(&mut self, out: &mut Vec<GameEvent>) {
        self.snake.reset();
        self.speed = self.config.base_speed();
        self.pending_direction = None;
        self.status = GameStatus::Playing;
        out.push(GameEvent::GameStarted);

        match self.respawn_food() {
            Ok(position) => out.push(GameEvent::FoodSpawned { position }),
            Err(e) => self.end(GameOverCause::BoardFull, e, out),
        }
        info!("game started at {:.2} ticks/s", self.speed);
    }

    fn tick(&mut self, out: &mut Vec<GameEvent>) {
        if self.status != GameStatus::Playing {
            return;
        }

        let requested = self.pending_direction.take().unwrap_or(self.snake.direction);
        let ate = self.snake.move_snake(requested, self.food);

        if self.snake.check_boundary_collision(self.config.grid_extent()) {
            self.game_over(GameOverCause::Wall, out);
            return;
        }
        if self.snake.check_self_collision() {
            self.game_over(GameOverCause::SelfCollision, out);
            return;
        }

        if ate {
            let position = self.food;
            self.speed = self.config.next_speed(self.speed);
            out.push(GameEvent::FoodEaten { position, score: self.snake.score });
            debug!("food eaten at {}, speed now {:.2} ticks/s", position, self.speed);

            match self.respawn_food() {
                Ok(position) => out.push(GameEvent::FoodSpawned { position }),
                Err(e) => self.end(GameOverCause::BoardFull, e, out),
            }
        }
    }

    fn apply_config(&mut self, config: GameConfig, out: &mut Vec<GameEvent>) {
        self.config = config;
        if self.status != GameStatus::Playing {
            self.speed = self.config.base_speed();
        }
        out.push(GameEvent::SettingsChanged);
        info!(
            "settings applied: {}x{} grid, base speed {:.2} ticks/s",
            self.config.grid_extent(),
            self.config.grid_extent(),
            self.config.base_speed()
        );

        if !self.food.in_grid(self.config.grid_extent()) {
            match self.respawn_food() {
                Ok(position) => out.push(GameEvent::FoodSpawned { position }),
                Err(e) if self.status == GameStatus::Playing => {
                    self.end(GameOverCause::BoardFull, e, out)
                }
                Err(e) => warn!("could not re-place food: {}", e),
            }
        }
    }

    fn respawn_food(&mut self) -> Result<Position, PlacementError> {
        let position = place_food(
            self.snake.body.iter(),
            self.config.grid_extent(),
            self.config.max_placement_attempts(),
            self.rng.as_mut(),
        )?;
        self.food = position;
        Ok(position)
    }

    fn end(&mut self, cause: GameOverCause, error: PlacementError, out: &mut Vec<GameEvent>) {
        warn!("{}", error);
        self.game_over(cause, out);
    }

    fn game_over(&mut self, cause: GameOverCause, out: &mut Vec<GameEvent>) {
        self.status = GameStatus::Over;
        self.pending_direction = None;
        let final_score = self.snake.score;
        info!("game over ({:?}) with score {}", cause, final_score);
        out.push(GameEvent::GameOver { final_score, cause });
    }
}
