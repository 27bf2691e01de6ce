//! Core logic for the Ridgeline chess front-end: notation cleanup,
//! deterministic move replay, solution matching, and derived board state.
//!
//! Rule legality itself is delegated to shakmaty; everything here is about
//! reconciling the heterogeneous move data the platform deals in (UI drags,
//! stored solution strings, engine replies) against concrete positions.

pub mod derived;
pub mod matcher;
pub mod moves;
pub mod notation;
pub mod replay;

pub use moves::{CoordinateMove, MoveInput, ResolvedMove};
pub use replay::{replay, replay_all, replay_resolved, Replayed};

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode};

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, thiserror::Error)]
pub enum FenError {
    #[error("Invalid FEN: {0}")]
    Syntax(String),

    #[error("FEN describes an illegal position: {0}")]
    IllegalPosition(String),
}

/// Parse a FEN string into a playable position.
pub fn parse_fen(fen: &str) -> Result<Chess, FenError> {
    let parsed: Fen = fen
        .parse()
        .map_err(|e| FenError::Syntax(format!("{e}")))?;
    parsed
        .into_position::<Chess>(CastlingMode::Standard)
        .map_err(|e| FenError::IllegalPosition(format!("{e}")))
}

/// Render a position as a FEN string.
pub fn position_fen(pos: &Chess) -> String {
    Fen::from_position(&pos.clone(), EnPassantMode::Legal).to_string()
}

/// The first four space-delimited FEN fields: board, side to move, castling
/// rights and en-passant square, i.e. everything except the move counters. Two
/// positions that agree on these are the same position for matching.
pub fn fen_board_key(pos: &Chess) -> String {
    position_fen(pos)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}
