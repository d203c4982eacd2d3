use std::time::Duration;

use crate::error::GameError;

/// Dimensions and pacing of a game. Sizes are in grid units (pixels of the
/// original window), so every position is a multiple of `cell_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub initial_length: usize,
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 600,
            height: 400,
            cell_size: 20,
            initial_length: 3,
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl GameConfig {
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.cell_size <= 0 || self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "sizes must be positive (width {}, height {}, cell size {})",
                self.width, self.height, self.cell_size
            )));
        }

        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(GameError::InvalidConfig(format!(
                "{}x{} is not a multiple of cell size {}",
                self.width, self.height, self.cell_size
            )));
        }

        if self.initial_length == 0 {
            return Err(GameError::InvalidConfig("initial length must be at least 1".into()));
        }

        // The start snake is laid out rightwards from one cell left of centre.
        let room = (self.columns() - (self.columns() / 2 - 1)) as usize;
        if self.columns() < 2 || room < self.initial_length {
            return Err(GameError::InvalidConfig(format!(
                "grid of {} columns cannot hold a snake of length {}",
                self.columns(),
                self.initial_length
            )));
        }

        if self.tick_interval.as_millis() == 0 {
            return Err(GameError::InvalidConfig("tick interval must be non-zero".into()));
        }

        Ok(())
    }
}
