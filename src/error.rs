use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No free cell is left to place the food on.
    #[error("no free cell left for food")]
    GridFull,

    #[error("terminal too small: need {needed:?}, have {available:?}")]
    TerminalTooSmall { needed: (u16, u16), available: (u16, u16) },

    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
}
