use anyhow::{Context, Result};
use clap::Parser;
use common::Settings;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "snake-terminal", about = "Play Snake in the terminal")]
pub struct Args {
    /// JSON settings file ({"speedBase": 100, "cellSize": 20, ...}); flags below override it
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Speed number; the game starts at speedBase / 10 ticks per second
    #[arg(long)]
    pub speed_base: Option<f64>,

    /// Cell size in pixels on the 600px board (20 gives a 30x30 grid)
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Upper bound on ticks per second
    #[arg(long)]
    pub speed_cap: Option<f64>,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings file {:?}", path))?;
                Settings::from_json(&json)?
            }
            None => Settings::default(),
        };

        if let Some(speed_base) = self.speed_base {
            settings.speed_base = speed_base;
        }
        if let Some(cell_size) = self.cell_size {
            settings.cell_size = cell_size;
        }
        if self.speed_cap.is_some() {
            settings.speed_cap = self.speed_cap;
        }
        Ok(settings)
    }
}
