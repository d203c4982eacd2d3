use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::GameState;
use crate::snake::Direction::{self, *};

/// What a key press asks the shell to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Resume,
    NewGame,
    Exit,
    None,
}

/// Space toggles, so the current state decides whether it pauses or resumes.
pub fn map_key(ev: &KeyEvent, state: GameState) -> Command {
    if is_ctrl_c(ev) {
        return Command::Exit;
    }

    match ev.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Up),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Left),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Down),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Right),

        KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Resume,
        KeyCode::Char(' ') => match state {
            GameState::Running => Command::Pause,
            GameState::Paused => Command::Resume,
            GameState::GameOver => Command::None,
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => Command::NewGame,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Exit,
        _ => Command::None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL))
}
