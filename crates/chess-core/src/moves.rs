//! Move representations crossing the session boundary.
//!
//! A move reaches the core in one of three shapes: raw coordinates from a
//! board drag, algebraic text from a stored solution or an engine reply, or
//! a fully resolved record from our own history. `MoveInput` keeps the
//! shape explicit so downstream code matches on a tag instead of probing
//! fields.

use shakmaty::san::San;
use shakmaty::{Chess, File, Move, Position, Rank, Role, Square};

use crate::notation;

/// A from/to pair with an optional promotion choice. Only meaningful
/// relative to a specific position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

/// A move that has been validated against a concrete position and carries
/// both of its textual forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMove {
    pub san: String,
    /// Lowercase from+to+promotion, e.g. `e7e8q`.
    pub coord: String,
    pub from: Option<Square>,
    pub to: Square,
    pub role: Role,
    pub capture: Option<Role>,
    pub promotion: Option<Role>,
}

impl ResolvedMove {
    /// Build the record for a legal move in `pos` (the position before the
    /// move is played).
    pub fn from_move(pos: &Chess, m: &Move) -> Self {
        let (from, to) = move_squares(m);
        ResolvedMove {
            san: San::from_move(pos, *m).to_string(),
            coord: coord_string(from, to, m.promotion()),
            from,
            to,
            role: m.role(),
            capture: m.capture(),
            promotion: m.promotion(),
        }
    }
}

/// One move in any of the shapes the replay engine accepts.
#[derive(Debug, Clone)]
pub enum MoveInput {
    Coordinate(CoordinateMove),
    Text(String),
    Resolved(ResolvedMove),
}

/// From/to squares as the board UI understands them: castling is the king's
/// own square and the square it lands on, not the rook's.
pub fn move_squares(m: &Move) -> (Option<Square>, Square) {
    match *m {
        Move::Normal { from, to, .. } => (Some(from), to),
        Move::EnPassant { from, to } => (Some(from), to),
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            (Some(king), Square::from_coords(file, king.rank()))
        }
        Move::Put { to, .. } => (None, to),
    }
}

/// Lowercase coordinate text for a from/to pair.
pub fn coord_string(from: Option<Square>, to: Square, promotion: Option<Role>) -> String {
    let mut out = String::new();
    if let Some(from) = from {
        out.push_str(&from.to_string());
    }
    out.push_str(&to.to_string());
    if let Some(role) = promotion {
        out.push(role.char());
    }
    out
}

/// Find the legal move in `pos` matching a from/to pair and promotion
/// choice. Castling is matched on the king's two-square hop.
pub fn find_legal_move(
    pos: &Chess,
    from: Square,
    to: Square,
    promotion: Option<Role>,
) -> Option<Move> {
    for m in &pos.legal_moves() {
        let (m_from, m_to) = move_squares(m);
        if m_from == Some(from) && m_to == to && m.promotion() == promotion {
            return Some(m.clone());
        }
    }
    None
}

/// Does moving `from` → `to` require a promotion piece? True exactly when
/// the moving piece is a pawn headed for the final rank.
pub fn requires_promotion(pos: &Chess, from: Square, to: Square) -> bool {
    match pos.board().piece_at(from) {
        Some(piece) if piece.role == Role::Pawn => {
            to.rank() == Rank::Eighth || to.rank() == Rank::First
        }
        _ => false,
    }
}

/// Resolve algebraic or coordinate text against a position. SAN is tried
/// first; only input that scans exactly as a coordinate token falls back to
/// coordinate resolution.
pub fn resolve_text(pos: &Chess, text: &str) -> Option<Move> {
    let cleaned = notation::normalize(text);
    let bare = notation::strip_decorations(&cleaned);
    if let Ok(san) = bare.parse::<San>() {
        if let Ok(m) = san.to_move(pos) {
            return Some(m);
        }
    }
    let coord = notation::parse_coordinate(bare)?;
    find_legal_move(pos, coord.from, coord.to, coord.promotion)
}
