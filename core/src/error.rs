use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Coordinates out of bounds")]
    OutOfBounds,
}

/// Why a board configuration was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board dimensions must be positive")]
    EmptyBoard,
    #[error("{mines} mines requested but at most {max} fit while leaving a safe cell")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("fixed mine layout does not match the requested board")]
    LayoutMismatch,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

/// Failure to load a [`GameConfig`](crate::GameConfig) from JSON.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, GameError>;
