use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::speed::SpeedLevel;

/// Configuration for the game
///
/// Board dimensions and positions are in board units; each snake segment and
/// the food cover `cell_size` units in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playable area
    pub board_width: i32,
    /// Height of the playable area
    pub board_height: i32,
    /// Side length of a cell
    pub cell_size: i32,
    /// Where the snake head is placed on every new game
    pub default_position: (i32, i32),
    /// Speed level (1..=6) at process start
    pub initial_speed: u8,
    /// Segments added when food is eaten
    pub growth_per_food: usize,
    /// Points awarded for each food
    pub food_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 400,
            board_height: 300,
            cell_size: 10,
            default_position: (200, 200),
            initial_speed: 4,
            growth_per_food: 5,
            food_score: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing, head placed near the middle
    pub fn small() -> Self {
        Self {
            board_width: 100,
            board_height: 100,
            default_position: (50, 50),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields use defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Number of cell columns on the board
    pub fn columns(&self) -> i32 {
        self.board_width / self.cell_size
    }

    /// Number of cell rows on the board
    pub fn rows(&self) -> i32 {
        self.board_height / self.cell_size
    }

    /// Whether `default_position` lies on an aligned cell inside the board
    fn start_fits(&self) -> bool {
        let (x, y) = self.default_position;
        self.cell_size > 0
            && x >= 0
            && y >= 0
            && x <= self.board_width - self.cell_size
            && y <= self.board_height - self.cell_size
            && x % self.cell_size == 0
            && y % self.cell_size == 0
    }

    /// Move the start to the middle cell when the board no longer holds it.
    ///
    /// Returns whether the position changed.
    pub fn center_start_if_outside(&mut self) -> bool {
        if self.cell_size <= 0 || self.start_fits() {
            return false;
        }
        self.default_position = (
            (self.columns() / 2) * self.cell_size,
            (self.rows() / 2) * self.cell_size,
        );
        true
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), GameError> {
        if self.cell_size <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }

        if self.board_width < self.cell_size || self.board_height < self.cell_size {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} cannot hold a single {} cell",
                self.board_width, self.board_height, self.cell_size
            )));
        }

        if self.board_width % self.cell_size != 0 || self.board_height % self.cell_size != 0 {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} is not a multiple of cell_size {}",
                self.board_width, self.board_height, self.cell_size
            )));
        }

        // Food has to find a cell the fresh snake does not sit on
        if self.columns() * self.rows() <= 1 {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} has room for only one cell",
                self.board_width, self.board_height
            )));
        }

        let (x, y) = self.default_position;
        if x < 0
            || y < 0
            || x > self.board_width - self.cell_size
            || y > self.board_height - self.cell_size
        {
            return Err(GameError::InvalidConfig(format!(
                "default_position ({}, {}) is outside the board",
                x, y
            )));
        }

        if x % self.cell_size != 0 || y % self.cell_size != 0 {
            return Err(GameError::InvalidConfig(format!(
                "default_position ({}, {}) is not aligned to the grid",
                x, y
            )));
        }

        if SpeedLevel::new(self.initial_speed).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "initial_speed must be in [{}, {}], got {}",
                SpeedLevel::MIN,
                SpeedLevel::MAX,
                self.initial_speed
            )));
        }

        if self.growth_per_food == 0 {
            return Err(GameError::InvalidConfig(
                "growth_per_food must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
