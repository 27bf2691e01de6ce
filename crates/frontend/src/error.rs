//! Application error types.

use chess_session::MoveError;

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("No puzzle is loaded")]
    NoPuzzle,

    #[error("{0}")]
    Move(#[from] MoveError),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Puzzle data error: {0}")]
    PuzzleData(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Mail error: {0}")]
    Mail(String),
}
