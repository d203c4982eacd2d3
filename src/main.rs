mod config;
mod engine;
mod error;
mod game;
mod input;
mod scheduler;
mod snake;
mod term;

use std::{fs::File, sync::Mutex};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::GameConfig;
use crate::engine::GameEngine;

/// Grid position, in the same units as the configured width and height.
pub type Coords = (i32, i32);

pub type TermInt = u16;
pub type TermCoords = (u16, u16);

const LOG_FILE: &str = "snake.log";

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::default();
    info!(?config, "starting");

    let engine = GameEngine::new(config, rand::thread_rng()).context("Error starting game")?;
    let mut game = game::SnakeGame::new(engine).context("Error preparing terminal")?;

    let res = game.initialize().and_then(|_| game.play());

    // Put the terminal back before reporting anything
    game.restore().context("Error restoring terminal")?;
    res.context("Game aborted")
}

/// The terminal belongs to the game, so logs only go to a file, and only when
/// RUST_LOG asks for them.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let file = File::create(LOG_FILE).with_context(|| format!("Error creating {}", LOG_FILE))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    Ok(())
}
