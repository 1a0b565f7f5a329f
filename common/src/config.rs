use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BASE_SPEED_DIVISOR, BOARD_PIXEL_EXTENT, DEFAULT_CELL_SIZE_PX, DEFAULT_SPEED_BASE,
    MIN_GRID_EXTENT, MIN_SPEED_BASE, PLACEMENT_ATTEMPTS_PER_CELL, SPEED_INCREMENT_DIVISOR,
};

/// Settings as supplied by a settings form or file. Colours are carried for the
/// presentation layer and never read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub speed_base: f64,
    pub cell_size: u32,
    pub speed_cap: Option<f64>,
    pub food_color: String,
    pub snake_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            speed_base: DEFAULT_SPEED_BASE,
            cell_size: DEFAULT_CELL_SIZE_PX,
            speed_cap: None,
            food_color: "#e74c3c".to_string(),
            snake_color: "#27ae60".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse settings")
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("cell size {cell_size}px leaves a {grid_extent}x{grid_extent} grid, need at least {}", MIN_GRID_EXTENT)]
    GridTooSmall { cell_size: u32, grid_extent: u32 },
    #[error("speed base must be a positive number, got {0}")]
    InvalidSpeedBase(f64),
    #[error("speed base {0} is below the minimum of {}", MIN_SPEED_BASE)]
    SpeedBaseTooLow(f64),
    #[error("speed cap {cap} is below the base speed {base}")]
    SpeedCapBelowBase { cap: f64, base: f64 },
}

/// Validated engine configuration. Built once and swapped wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    cell_size_px: u32,
    grid_extent: u32,
    speed_base: f64,
    speed_cap: Option<f64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            grid_extent: BOARD_PIXEL_EXTENT / DEFAULT_CELL_SIZE_PX,
            speed_base: DEFAULT_SPEED_BASE,
            speed_cap: None,
        }
    }
}

impl GameConfig {
    pub fn new(cell_size_px: u32, speed_base: f64, speed_cap: Option<f64>) -> Result<Self, ConfigError> {
        if cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if !speed_base.is_finite() || speed_base <= 0.0 {
            return Err(ConfigError::InvalidSpeedBase(speed_base));
        }
        if speed_base < MIN_SPEED_BASE {
            return Err(ConfigError::SpeedBaseTooLow(speed_base));
        }

        let grid_extent = BOARD_PIXEL_EXTENT / cell_size_px;
        if grid_extent < MIN_GRID_EXTENT {
            return Err(ConfigError::GridTooSmall { cell_size: cell_size_px, grid_extent });
        }
        if BOARD_PIXEL_EXTENT % cell_size_px != 0 {
            warn!(
                "cell size {}px does not divide the {}px board, using a {}x{} grid",
                cell_size_px, BOARD_PIXEL_EXTENT, grid_extent, grid_extent
            );
        }

        let base = speed_base / BASE_SPEED_DIVISOR;
        if let Some(cap) = speed_cap {
            if !cap.is_finite() || cap < base {
                return Err(ConfigError::SpeedCapBelowBase { cap, base });
            }
        }

        Ok(GameConfig { cell_size_px, grid_extent, speed_base, speed_cap })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(settings.cell_size, settings.speed_base, settings.speed_cap)
    }

    pub fn cell_size_px(&self) -> u32 {
        self.cell_size_px
    }

    /// Cells per side of the board.
    pub fn grid_extent(&self) -> u32 {
        self.grid_extent
    }

    pub fn grid_cells(&self) -> u32 {
        self.grid_extent * self.grid_extent
    }

    pub fn speed_base(&self) -> f64 {
        self.speed_base
    }

    pub fn speed_cap(&self) -> Option<f64> {
        self.speed_cap
    }

    /// Ticks per second at the start of a run.
    pub fn base_speed(&self) -> f64 {
        self.speed_base / BASE_SPEED_DIVISOR
    }

    /// Ticks per second gained per food eaten.
    pub fn speed_increment(&self) -> f64 {
        self.speed_base / SPEED_INCREMENT_DIVISOR
    }

    /// Speed after eating once more, starting from `current`.
    pub fn next_speed(&self, current: f64) -> f64 {
        let next = current + self.speed_increment();
        match self.speed_cap {
            Some(cap) => next.min(cap),
            None => next,
        }
    }

    pub fn max_placement_attempts(&self) -> u32 {
        self.grid_cells().saturating_mul(PLACEMENT_ATTEMPTS_PER_CELL)
    }
}
