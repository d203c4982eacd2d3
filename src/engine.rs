//! Game rules without any terminal I/O: movement, collisions, food and the
//! running/paused/game-over state machine.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::snake::{Collision, Direction, MoveResult, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
}

pub struct GameEngine<R: Rng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    food: Coords,
    pending_direction: Direction,
    score: u32,
    state: GameState,
    collision: Option<Collision>,
}

impl<R: Rng> GameEngine<R> {
    /// Builds an engine and starts the first game.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let snake = start_snake(&config);
        let mut engine = GameEngine {
            config,
            rng,
            snake,
            food: (0, 0),
            pending_direction: Direction::Left,
            score: 0,
            state: GameState::Running,
            collision: None,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Puts every piece of state back to the start of a game.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        self.snake = start_snake(&self.config);
        self.pending_direction = self.snake.get_direction();
        self.score = 0;
        self.state = GameState::Running;
        self.collision = None;
        self.food = self.place_food()?;

        info!(head = ?self.snake.head(), food = ?self.food, "new game");
        Ok(())
    }

    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.initialize()
    }

    /// Last request before the next tick wins. Ignored unless running.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.state == GameState::Running {
            self.pending_direction = direction;
        }
    }

    pub fn tick(&mut self) -> Result<GameState, GameError> {
        if self.state != GameState::Running {
            return Ok(self.state);
        }

        self.snake.set_direction(self.pending_direction);

        match self.snake.move_step(self.config.width, self.config.height) {
            MoveResult::Crashed(collision) => {
                info!(?collision, score = self.score, head = ?self.snake.head(), "game over");
                self.collision = Some(collision);
                self.state = GameState::GameOver;
            }
            MoveResult::Moved { new_head } => {
                if new_head == self.food {
                    self.score += 1;
                    self.snake.grow();
                    self.food = self.place_food()?;
                    debug!(score = self.score, food = ?self.food, "food eaten");
                }
            }
        }

        Ok(self.state)
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
            info!(score = self.score, "paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Running;
            info!("resumed");
        }
    }

    pub fn snake_cells(&self) -> &[Coords] {
        self.snake.body()
    }

    pub fn food_cell(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Why the last game ended, if it has.
    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Samples the grid at random, at most once per cell. If that keeps
    /// landing on the snake, picks among the free cells directly.
    fn place_food(&mut self) -> Result<Coords, GameError> {
        let (columns, rows, cell) = (self.config.columns(), self.config.rows(), self.config.cell_size);

        for _ in 0..self.config.cell_count() {
            let pos = (self.rng.gen_range(0..columns) * cell, self.rng.gen_range(0..rows) * cell);
            if !self.snake.contains(&pos) {
                return Ok(pos);
            }
        }

        let snake = &self.snake;
        let free: Vec<Coords> = (0..rows)
            .flat_map(|y| (0..columns).map(move |x| (x * cell, y * cell)))
            .filter(|pos| !snake.contains(pos))
            .collect();

        free.choose(&mut self.rng).copied().ok_or(GameError::GridFull)
    }

    #[cfg(test)]
    fn set_snake(&mut self, snake: Snake) {
        self.pending_direction = snake.get_direction();
        self.snake = snake;
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Coords) {
        self.food = food;
    }
}

/// Horizontal line heading left, head one cell left of the grid centre.
fn start_snake(config: &GameConfig) -> Snake {
    let head = (
        (config.columns() / 2 - 1) * config.cell_size,
        (config.rows() / 2) * config.cell_size,
    );
    Snake::new(head, config.initial_length, Direction::Left, config.cell_size)
}
