//! Equivalence checking between a user's move and a stored solution ply.
//!
//! Solution data sources disagree on notation style and decoration, so the
//! comparison runs from cheapest to most authoritative: SAN text,
//! coordinate text, and finally resulting-position equality. Two notations
//! that produce the identical board state are the same move regardless of
//! surface form.

use shakmaty::{Chess, Move, Position};

use crate::moves::{self, ResolvedMove};
use crate::notation;

/// Does `candidate` (a legal move in `pos_before`) satisfy the solution ply
/// `expected`? Never fails: an expected string that cannot be resolved at
/// all simply does not match.
pub fn matches(pos_before: &Chess, candidate: &Move, expected: &str) -> bool {
    let cleaned = notation::normalize(expected);
    let expected_bare = notation::strip_decorations(&cleaned);
    if expected_bare.is_empty() {
        return false;
    }

    let resolved = ResolvedMove::from_move(pos_before, candidate);
    let candidate_san = notation::strip_decorations(&resolved.san);

    // SAN text, exact then case-insensitive.
    if candidate_san == expected_bare || candidate_san.eq_ignore_ascii_case(expected_bare) {
        return true;
    }

    // Coordinate text.
    if resolved.coord == expected_bare.to_ascii_lowercase() {
        return true;
    }
    if let Some(coord) = notation::parse_coordinate(expected_bare) {
        if let Some(expected_move) =
            moves::find_legal_move(pos_before, coord.from, coord.to, coord.promotion)
        {
            if expected_move == *candidate {
                return true;
            }
        }
    }

    // Authoritative fallback: resolve the expected text independently and
    // compare resulting positions on everything except the move counters.
    let expected_move = match moves::resolve_text(pos_before, expected) {
        Some(m) => m,
        None => return false,
    };
    let mut candidate_after = pos_before.clone();
    candidate_after.play_unchecked(*candidate);
    let mut expected_after = pos_before.clone();
    expected_after.play_unchecked(expected_move);
    crate::fen_board_key(&candidate_after) == crate::fen_board_key(&expected_after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fen;
    use shakmaty::{Role, Square};

    fn candidate(pos: &Chess, from: Square, to: Square, promotion: Option<Role>) -> Move {
        moves::find_legal_move(pos, from, to, promotion).unwrap()
    }

    #[test]
    fn test_san_match_is_decoration_insensitive() {
        // Italian-game position where Nxe5 is a real capture.
        let pos = parse_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
            .unwrap();
        let m = candidate(&pos, Square::F3, Square::E5, None);
        assert_eq!(matches(&pos, &m, "Nxe5"), matches(&pos, &m, "Nxe5+"));

        let start = Chess::default();
        let nf3 = candidate(&start, Square::G1, Square::F3, None);
        assert!(matches(&start, &nf3, "Nf3"));
        assert!(matches(&start, &nf3, "Nf3+"));
        assert!(matches(&start, &nf3, "Nf3#"));
    }

    #[test]
    fn test_san_match_is_case_insensitive() {
        let start = Chess::default();
        let nf3 = candidate(&start, Square::G1, Square::F3, None);
        assert!(matches(&start, &nf3, "nf3"));
    }

    #[test]
    fn test_uci_and_san_forms_are_equivalent() {
        let start = Chess::default();
        let e4 = candidate(&start, Square::E2, Square::E4, None);
        assert!(matches(&start, &e4, "e4"));
        assert!(matches(&start, &e4, "e2e4"));
        assert!(matches(&start, &e4, "E2E4"));
    }

    #[test]
    fn test_move_number_prefixes_are_ignored() {
        let start = Chess::default();
        let e4 = candidate(&start, Square::E2, Square::E4, None);
        assert!(matches(&start, &e4, "1. e4"));
        assert!(matches(&start, &e4, "1... e4"));
    }

    #[test]
    fn test_promotion_notations_agree() {
        let pos = parse_fen("8/P7/8/8/8/8/k6K/8 w - - 0 1").unwrap();
        let promo = candidate(&pos, Square::A7, Square::A8, Some(Role::Queen));
        assert!(matches(&pos, &promo, "a8=Q"));
        assert!(matches(&pos, &promo, "a7a8q"));
        assert!(!matches(&pos, &promo, "a7a8n"));
    }

    #[test]
    fn test_wrong_move_does_not_match() {
        let start = Chess::default();
        let d4 = candidate(&start, Square::D2, Square::D4, None);
        assert!(!matches(&start, &d4, "e4"));
        assert!(!matches(&start, &d4, "e2e4"));
    }

    #[test]
    fn test_unresolvable_expected_is_false_not_fatal() {
        let start = Chess::default();
        let e4 = candidate(&start, Square::E2, Square::E4, None);
        assert!(!matches(&start, &e4, "Qxh8"));
        assert!(!matches(&start, &e4, "zzz"));
        assert!(!matches(&start, &e4, ""));
    }
}
