use anyhow::{Context, Result};
use clap::Parser;
use common::{GameConfig, GameEngine};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use terminal::app::App;
use terminal::cli::Args;
use terminal::scheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stderr so log lines stay out of the alternate screen; quiet unless RUST_LOG is set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let settings = args.resolve_settings()?;
    let config = GameConfig::from_settings(&settings).context("Invalid settings")?;
    info!(grid = config.grid_extent(), base_speed = config.base_speed(), "starting");

    let mut engine = match args.seed {
        Some(seed) => GameEngine::new_with_seed(config, seed),
        None => GameEngine::new(config),
    };
    let mut app = App::new(settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = scheduler::run(&mut engine, &mut app, EventStream::new(), |app| {
        terminal.draw(|f| app.draw(f))?;
        Ok(())
    })
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }
    println!("Final score: {}", engine.score());

    Ok(())
}
