use common::{Direction, GameEvent, GameObserver, GameOverCause, GameStatus, Settings, Snapshot};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::{debug, info};

use crate::render::board::BoardRenderer;
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::RenderConfig;

/// Speed number change per `+` / `-` press.
pub const SPEED_STEP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    Quit,
    Turn(Direction),
    StartOrRestart,
    AdjustSpeed(f64),
}

/// Maps a key press to a command. While playing only steering keys do something; otherwise
/// any key not bound to quitting or speed starts a new run.
pub fn command_for_key(key: KeyEvent, status: GameStatus) -> Option<AppCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppCommand::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(AppCommand::Quit),
        KeyCode::Char('+') | KeyCode::Char('=') => return Some(AppCommand::AdjustSpeed(SPEED_STEP)),
        KeyCode::Char('-') => return Some(AppCommand::AdjustSpeed(-SPEED_STEP)),
        _ => {}
    }

    if status != GameStatus::Playing {
        return Some(AppCommand::StartOrRestart);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d') => Direction::Right,
        _ => return None,
    };
    Some(AppCommand::Turn(direction))
}

/// Terminal presentation state. Fed by the engine as an observer, drawn by `draw`.
pub struct App {
    pub settings: Settings,
    snapshot: Option<Snapshot>,
    message: Option<String>,
    last_game_over: Option<(u32, GameOverCause)>,
    board: BoardRenderer<StandardRenderer>,
    render_config: RenderConfig,
    frames: u64,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let render_config = RenderConfig::default();
        Self {
            settings,
            snapshot: None,
            message: None,
            last_game_over: None,
            board: BoardRenderer::new(StandardRenderer::new(render_config.chars_per_point)),
            render_config,
            frames: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Number of snapshots received.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Board lines for the latest snapshot.
    pub fn board_lines(&self) -> Vec<String> {
        match &self.snapshot {
            Some(snapshot) => self.board.render(snapshot, &self.render_config).into_strings(),
            None => Vec::new(),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

        frame.render_widget(self.render_header(), chunks[0]);

        let lines: Vec<Line> = self.board_lines().into_iter().map(Line::from).collect();
        let board_width = lines.first().map(|l| l.width()).unwrap_or(0) as u16 + 2;
        let board_height = lines.len() as u16 + 2;
        let board_area = centered(chunks[1], board_width, board_height);
        let board = Paragraph::new(lines)
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(board, board_area);

        if let Some(banner) = self.render_banner() {
            let area = centered(board_area, 30, 5);
            frame.render_widget(Clear, area);
            frame.render_widget(banner, area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_header(&self) -> Paragraph {
        let (score, status) = match &self.snapshot {
            Some(s) => (s.score, s.status),
            None => (0, GameStatus::NotStarted),
        };
        let status_text = match status {
            GameStatus::NotStarted => "Press any key to start",
            GameStatus::Playing => "Playing",
            GameStatus::Over => "Game over",
        };
        let mut spans = vec![
            Span::styled("SNAKE  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(format!("Score: {}  ", score)),
            Span::styled(status_text, Style::default().fg(Color::Yellow)),
            Span::raw(format!("  Speed: {}", self.settings.speed_base)),
        ];
        if let Some(message) = &self.message {
            spans.push(Span::styled(format!("  {}", message), Style::default().fg(Color::Magenta)));
        }
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL))
    }

    fn render_banner(&self) -> Option<Paragraph> {
        let status = self.snapshot.as_ref()?.status;
        if status != GameStatus::Over {
            return None;
        }
        let (score, cause) = self.last_game_over?;
        let cause = match cause {
            GameOverCause::Wall => "hit the wall",
            GameOverCause::SelfCollision => "bit itself",
            GameOverCause::BoardFull => "filled the board",
        };
        Some(
            Paragraph::new(vec![
                Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
                Line::from(format!("Final score {} ({})", score, cause)),
                Line::from("Press any key to restart"),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        )
    }

    fn render_controls(&self) -> Paragraph {
        Paragraph::new(Line::from("Arrows/WASD: steer | +/-: speed | q: quit"))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL))
    }
}

impl GameObserver for App {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        self.snapshot = Some(snapshot.clone());
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted => {
                self.message = None;
                self.last_game_over = None;
                info!("game started");
            }
            GameEvent::FoodEaten { position, score } => {
                debug!(x = position.x, y = position.y, score, "food eaten");
            }
            GameEvent::FoodSpawned { position } => {
                debug!(x = position.x, y = position.y, "food spawned");
            }
            GameEvent::GameOver { final_score, cause } => {
                info!(final_score, ?cause, "game over");
                self.last_game_over = Some((*final_score, *cause));
            }
            GameEvent::SettingsChanged => {
                self.message = Some("settings applied".to_string());
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
