use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("coordinates outside the grid")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
