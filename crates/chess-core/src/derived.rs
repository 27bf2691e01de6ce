//! Board-derived display state: captured pieces and king indicators.
//!
//! Everything here is a pure function of a position, recomputed after every
//! state transition; nothing is cached or independently mutated.

use shakmaty::{Chess, Color, Position, Role, Square};

/// Conventional material scale.
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight => 3,
        Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

const STARTING_INVENTORY: [(Role, u8); 6] = [
    (Role::Pawn, 8),
    (Role::Knight, 2),
    (Role::Bishop, 2),
    (Role::Rook, 2),
    (Role::Queen, 1),
    (Role::King, 1),
];

/// Captured enemy pieces per side, most valuable first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    /// Black pieces White has taken.
    pub by_white: Vec<Role>,
    /// White pieces Black has taken.
    pub by_black: Vec<Role>,
}

/// Derive the captured sets by diffing the fixed starting inventory against
/// live piece counts. Promotions can push a live count above the inventory;
/// the diff saturates at zero rather than going negative.
pub fn captured_pieces(pos: &Chess) -> CapturedPieces {
    CapturedPieces {
        by_white: missing_pieces(pos, Color::Black),
        by_black: missing_pieces(pos, Color::White),
    }
}

fn missing_pieces(pos: &Chess, color: Color) -> Vec<Role> {
    let board = pos.board();
    let mut missing = Vec::new();
    for (role, start_count) in STARTING_INVENTORY {
        let live = (board.by_role(role) & board.by_color(color)).count() as u8;
        for _ in live..start_count {
            missing.push(role);
        }
    }
    missing.sort_by_key(|r| -piece_value(*r));
    missing
}

/// Flag shown on a king's square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KingFlag {
    Check,
    Checkmate,
    Winner,
    Stalemate,
    Draw,
}

/// Per-king indicator, if any. A side whose king is missing from the board
/// (corrupt data) simply gets no indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indicators {
    pub white: Option<(Square, KingFlag)>,
    pub black: Option<(Square, KingFlag)>,
}

/// Indicator flags for the current position. Checkmate and winner are
/// mutually exclusive per side; stalemate and draw only appear when
/// checkmate does not.
pub fn indicators(pos: &Chess) -> Indicators {
    let board = pos.board();
    let to_move = pos.turn();

    let flags = if pos.is_checkmate() {
        Some((KingFlag::Checkmate, Some(KingFlag::Winner)))
    } else if pos.is_stalemate() {
        Some((KingFlag::Stalemate, Some(KingFlag::Stalemate)))
    } else if is_draw(pos) {
        Some((KingFlag::Draw, Some(KingFlag::Draw)))
    } else if pos.is_check() {
        Some((KingFlag::Check, None))
    } else {
        None
    };

    let mut out = Indicators::default();
    if let Some((mover_flag, other_flag)) = flags {
        let mover = board.king_of(to_move).map(|sq| (sq, mover_flag));
        let other = other_flag.and_then(|f| board.king_of(!to_move).map(|sq| (sq, f)));
        match to_move {
            Color::White => {
                out.white = mover;
                out.black = other;
            }
            Color::Black => {
                out.black = mover;
                out.white = other;
            }
        }
    }
    out
}

/// Draw by rule: stalemate, insufficient material, or the 50-move rule.
/// Threefold repetition needs game history, which is tracked a level up.
pub fn is_draw(pos: &Chess) -> bool {
    pos.is_stalemate() || pos.is_insufficient_material() || pos.halfmoves() >= 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fen;

    #[test]
    fn test_captured_empty_at_start() {
        let captured = captured_pieces(&Chess::default());
        assert!(captured.by_white.is_empty());
        assert!(captured.by_black.is_empty());
    }

    #[test]
    fn test_captured_single_knight() {
        // Black is missing one knight, nothing else.
        let pos =
            parse_fen("r1bqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let captured = captured_pieces(&pos);
        assert_eq!(captured.by_white, vec![Role::Knight]);
        assert!(captured.by_black.is_empty());
    }

    #[test]
    fn test_captured_sorted_by_value() {
        // Black is missing queen, a knight and two pawns.
        let pos =
            parse_fen("r1b1kbnr/p1pp1ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let captured = captured_pieces(&pos);
        assert_eq!(
            captured.by_white,
            vec![Role::Queen, Role::Knight, Role::Pawn, Role::Pawn]
        );
    }

    #[test]
    fn test_checkmate_and_winner_are_exclusive() {
        // Fool's mate: white is checkmated.
        let pos = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        let ind = indicators(&pos);
        assert_eq!(ind.white.map(|(_, f)| f), Some(KingFlag::Checkmate));
        assert_eq!(ind.black.map(|(_, f)| f), Some(KingFlag::Winner));
    }

    #[test]
    fn test_check_flags_only_side_to_move() {
        // 1. e4 d5 2. Bb5+ and black is in check.
        let pos = parse_fen("rnbqkbnr/ppp1pppp/8/1B1p4/4P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 2")
            .unwrap();
        let ind = indicators(&pos);
        assert_eq!(ind.black.map(|(_, f)| f), Some(KingFlag::Check));
        assert_eq!(ind.white, None);
    }

    #[test]
    fn test_stalemate_flags_both_kings() {
        let pos = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(is_draw(&pos));
        let ind = indicators(&pos);
        assert_eq!(ind.white.map(|(_, f)| f), Some(KingFlag::Stalemate));
        assert_eq!(ind.black.map(|(_, f)| f), Some(KingFlag::Stalemate));
    }

    #[test]
    fn test_quiet_position_has_no_indicators() {
        let ind = indicators(&Chess::default());
        assert_eq!(ind, Indicators::default());
    }
}
