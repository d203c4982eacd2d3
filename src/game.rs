use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;
use tracing::{debug, info};

use crate::engine::{GameEngine, GameState};
use crate::error::GameError;
use crate::input::{map_key, Command};
use crate::scheduler::TickScheduler;
use crate::snake::Collision;
use crate::term::TermManager;
use crate::{Coords, TermCoords, TermInt};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_CHAR: char = ' ';

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_COLUMNS: TermInt = 2;

/// Input poll timeout while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The presentation shell: owns the terminal, feeds keys to the engine and
/// redraws from its state after every change.
pub struct SnakeGame {
    term: TermManager,
    engine: GameEngine<ThreadRng>,
    scheduler: TickScheduler,
    origin: TermCoords,
}

impl SnakeGame {
    pub fn new(engine: GameEngine<ThreadRng>) -> Result<Self, GameError> {
        let term = TermManager::new()?;
        let needed = frame_size(&engine);
        let available = term.get_terminal_size();

        // Room for the score bar above the frame
        if available.0 < needed.0 || available.1 < needed.1 + 1 {
            return Err(GameError::TerminalTooSmall { needed: (needed.0, needed.1 + 1), available });
        }

        let origin = ((available.0 - needed.0) / 2, (available.1 - needed.1 - 1) / 2);
        let scheduler = TickScheduler::new(engine.config().tick_interval);
        Ok(SnakeGame { term, engine, scheduler, origin })
    }

    pub fn initialize(&mut self) -> Result<(), GameError> {
        self.term.setup()?;
        self.term.clear()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        self.term.restore()?;
        Ok(())
    }

    /// Runs until the player exits.
    pub fn play(&mut self) -> Result<(), GameError> {
        let size = frame_size(&self.engine);
        let frame_origin = (self.origin.0, self.origin.1 + 1);
        self.term.draw_borders(frame_origin, size)?;
        self.draw()?;
        sync_scheduler(&mut self.scheduler, self.engine.state(), Instant::now());

        loop {
            let timeout = self.scheduler.time_until_due(Instant::now()).unwrap_or(IDLE_POLL);
            let before = self.engine.state();
            let mut dirty = false;

            for key_ev in self.term.read_key_events(timeout)? {
                match map_key(&key_ev, self.engine.state()) {
                    Command::Turn(dir) => self.engine.request_direction(dir),
                    Command::Pause => self.engine.pause(),
                    Command::Resume => self.engine.resume(),
                    Command::NewGame => {
                        self.engine.new_game()?;
                        dirty = true;
                    }
                    Command::Exit => {
                        info!(score = self.engine.score(), "exit");
                        return Ok(());
                    }
                    Command::None => {}
                }
            }

            let now = Instant::now();
            sync_scheduler(&mut self.scheduler, self.engine.state(), now);

            if self.scheduler.fire(now) {
                let state = self.engine.tick()?;
                sync_scheduler(&mut self.scheduler, state, now);
                dirty = true;
            }

            if dirty || self.engine.state() != before {
                self.draw()?;
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw(&mut self) -> Result<(), GameError> {
        let state = self.engine.state();

        if state == GameState::Running {
            self.term.hide_message()?;
        }

        if state != GameState::Paused {
            self.draw_grid()?;
        }

        self.draw_top_bar()?;

        match state {
            GameState::Running => {}
            GameState::Paused => {
                self.term.show_message(&["Paused", "", "[R] Resume   [Q] Exit"])?;
            }
            GameState::GameOver => {
                let score = format!("Score: {}", self.engine.score());
                let reason = match self.engine.collision() {
                    Some(Collision::Wall) => "You hit the wall",
                    Some(Collision::SelfCollision) => "You bit yourself",
                    None => "",
                };
                self.term.show_message(&["Game Over", reason, score.as_str(), "", "[N] New Game   [Q] Exit"])?;
            }
        }

        self.term.flush()?;
        Ok(())
    }

    fn draw_top_bar(&mut self) -> Result<(), GameError> {
        let (width, _) = frame_size(&self.engine);
        let (left, top) = self.origin;

        let score = format!("Score: {}", self.engine.score());
        let pause = if self.engine.state() == GameState::Running { "[P] Pause" } else { "" };

        let gap = (width as usize).saturating_sub(score.len() + pause.len() + 2);
        let bar = format!(" {}{}{} ", score, " ".repeat(gap), pause);
        let bar = format!("{:<width$}", bar, width = width as usize);

        self.term.print_str_at((left, top), &bar)?;
        Ok(())
    }

    fn draw_grid(&mut self) -> Result<(), GameError> {
        let config = self.engine.config();
        let (columns, rows, cell) = (config.columns(), config.rows(), config.cell_size);
        let dead = self.engine.state() == GameState::GameOver;

        let mut cells = vec![EMPTY_CHAR; (columns * rows) as usize];
        let mut put = |pos: Coords, ch: char| {
            let (x, y) = (pos.0 / cell, pos.1 / cell);
            if x >= 0 && y >= 0 && x < columns && y < rows {
                cells[(y * columns + x) as usize] = ch;
            }
        };

        put(self.engine.food_cell(), FOOD_CHAR);

        let head_char = self.engine.snake().head_char();
        for (i, pos) in self.engine.snake_cells().iter().enumerate() {
            let ch = if dead {
                DEAD_SNAKE_CHAR
            } else if i == 0 {
                head_char
            } else {
                SNAKE_BODY_CHAR
            };
            put(*pos, ch);
        }

        let (left, top) = (self.origin.0 + 1, self.origin.1 + 2);
        for (idx, ch) in cells.into_iter().enumerate() {
            let (x, y) = (idx as TermInt % columns as TermInt, idx as TermInt / columns as TermInt);
            let pos = (left + x * CELL_COLUMNS, top + y);
            // Body fills both columns of the cell; glyphs sit in the first
            let fill = if ch == SNAKE_BODY_CHAR { ch } else { EMPTY_CHAR };
            self.term.print_at(pos, ch)?;
            self.term.print_at((pos.0 + 1, pos.1), fill)?;
        }

        Ok(())
    }
}

/// Ticks are only scheduled while the game is running. Entering the running
/// state (first game, resume, new game after a crash) ticks right away.
fn sync_scheduler(scheduler: &mut TickScheduler, state: GameState, now: Instant) {
    let running = state == GameState::Running;

    if running && !scheduler.is_running() {
        debug!("scheduler started");
        scheduler.start(now);
    } else if !running && scheduler.is_running() {
        debug!("scheduler stopped");
        scheduler.stop();
    }
}

/// Outer size of the bordered play area in terminal cells.
fn frame_size(engine: &GameEngine<ThreadRng>) -> TermCoords {
    let config = engine.config();
    (
        config.columns() as TermInt * CELL_COLUMNS + 2,
        config.rows() as TermInt + 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::snake::Direction;

    #[test]
    fn test_frame_size_fits_grid() {
        let engine = GameEngine::new(GameConfig::default(), rand::thread_rng()).unwrap();
        // 30 columns of two characters plus borders, 20 rows plus borders
        assert_eq!(frame_size(&engine), (62, 22));

        let config = GameConfig { width: 200, height: 100, ..Default::default() };
        let engine = GameEngine::new(config, rand::thread_rng()).unwrap();
        assert_eq!(frame_size(&engine), (22, 7));
    }

    #[test]
    fn test_scheduler_follows_game_state() {
        let interval = Duration::from_millis(100);
        let mut sched = TickScheduler::new(interval);
        let t0 = Instant::now();

        // First game: tick straight away
        sync_scheduler(&mut sched, GameState::Running, t0);
        assert!(sched.fire(t0));

        // Staying in the running state keeps the current deadline
        sync_scheduler(&mut sched, GameState::Running, t0 + Duration::from_millis(50));
        assert_eq!(sched.time_until_due(t0 + Duration::from_millis(50)), Some(Duration::from_millis(50)));

        sync_scheduler(&mut sched, GameState::Paused, t0 + interval);
        assert!(!sched.is_running());
        assert!(!sched.fire(t0 + interval * 3));

        // Resume
        let t1 = t0 + interval * 5;
        sync_scheduler(&mut sched, GameState::Running, t1);
        assert!(sched.fire(t1));

        sync_scheduler(&mut sched, GameState::GameOver, t1);
        assert!(!sched.is_running());
        assert_eq!(sched.time_until_due(t1), None);

        // New game after a crash
        let t2 = t1 + interval * 2;
        sync_scheduler(&mut sched, GameState::Running, t2);
        assert!(sched.fire(t2));
    }

    #[test]
    fn test_engine_transitions_drive_scheduler() {
        let mut engine = GameEngine::new(GameConfig::default(), rand::thread_rng()).unwrap();
        let mut sched = TickScheduler::new(engine.config().tick_interval);
        let t0 = Instant::now();

        sync_scheduler(&mut sched, engine.state(), t0);
        assert!(sched.is_running());

        engine.pause();
        sync_scheduler(&mut sched, engine.state(), t0);
        assert!(!sched.is_running());

        engine.resume();
        sync_scheduler(&mut sched, engine.state(), t0);
        assert!(sched.fire(t0));

        // Reversing straight into the neck ends the game
        engine.request_direction(Direction::Right);
        let state = engine.tick().unwrap();
        sync_scheduler(&mut sched, state, t0);
        assert!(!sched.is_running());

        engine.new_game().unwrap();
        sync_scheduler(&mut sched, engine.state(), t0);
        assert!(sched.fire(t0));
    }
}
