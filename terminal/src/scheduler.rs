use anyhow::{Context, Result};
use common::{GameEngine, Settings};
use crossterm::event::{Event, KeyEventKind};
use futures_util::{Stream, StreamExt};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::app::{command_for_key, App, AppCommand};

/// Runs the game until the player quits or the input stream ends.
///
/// One tick at a time: the loop sleeps for the current tick interval, ticks, draws, then
/// re-arms the sleep with the interval the tick just produced. Key presses arriving in
/// between are handled without moving the deadline.
pub async fn run<S, D>(engine: &mut GameEngine, app: &mut App, events: S, mut draw: D) -> Result<()>
where
    S: Stream<Item = std::io::Result<Event>>,
    D: FnMut(&App) -> Result<()>,
{
    let mut events = std::pin::pin!(events);

    let snapshot = engine.snapshot();
    common::GameObserver::render(app, &snapshot);
    draw(app)?;

    let sleep = tokio::time::sleep(engine.tick_interval());
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => {
                let delay = engine.on_tick(app);
                draw(app)?;
                sleep.as_mut().reset(Instant::now() + delay);
            }

            maybe_event = events.next() => {
                let event = match maybe_event {
                    Some(event) => event.context("Failed to read terminal event")?,
                    None => {
                        info!("input closed, stopping");
                        break;
                    }
                };

                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match command_for_key(key, engine.status()) {
                            Some(AppCommand::Quit) => {
                                info!("quit requested");
                                break;
                            }
                            Some(AppCommand::Turn(direction)) => engine.on_direction_input(direction),
                            Some(AppCommand::StartOrRestart) => {
                                engine.on_start_or_restart_requested(app);
                                draw(app)?;
                                // First move comes one full interval after the start
                                sleep.as_mut().reset(Instant::now() + engine.tick_interval());
                            }
                            Some(AppCommand::AdjustSpeed(step)) => {
                                adjust_speed(engine, app, step);
                                draw(app)?;
                            }
                            None => {}
                        }
                    }
                    Event::Resize(..) => draw(app)?,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn adjust_speed(engine: &mut GameEngine, app: &mut App, step: f64) {
    let settings = Settings { speed_base: app.settings.speed_base + step, ..app.settings.clone() };
    match engine.apply_settings(&settings, app) {
        Ok(()) => {
            info!(speed_base = settings.speed_base, "speed changed");
            app.settings = settings;
        }
        Err(e) => {
            warn!("rejected settings: {}", e);
            app.set_message(e.to_string());
        }
    }
}
