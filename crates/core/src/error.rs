//! Error types for the turn controller

use thiserror::Error;

/// Failure to encode or decode a row letter or a move string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Can't encode invalid row {0}")]
    RowOutOfRange(usize),

    #[error("Can't parse row '{0}'")]
    InvalidRow(char),

    #[error("Can't parse move count '{0}'")]
    InvalidCount(String),

    #[error("Can't parse empty move")]
    EmptyMove,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Illegal move: remove {count} from row {row}")]
    IllegalMove { row: usize, count: u32 },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
