//! Move-notation cleanup.
//!
//! Solution strings arrive from more than one upstream source and mix SAN
//! with UCI-style coordinates, move-number prefixes (`3.` / `3...`) and
//! check decorations. Every function here is total: input that does not
//! parse is passed through trimmed or answered with `None`.

use regex::Regex;
use shakmaty::{File, Rank, Role, Square};

use crate::moves::CoordinateMove;

/// Remove a leading move-number token (`12.` or `12...`) and surrounding
/// whitespace. The move letters themselves are left untouched.
pub fn normalize(text: &str) -> String {
    let re = Regex::new(r"^\d+\.{1,3}\s*").unwrap();
    re.replace(text.trim(), "").trim().to_string()
}

/// Strip trailing check/checkmate decorations so comparisons are
/// decoration-insensitive.
pub fn strip_decorations(text: &str) -> &str {
    text.trim_end_matches(['+', '#'])
}

/// Recognize 4-5 character coordinate input (`e2e4`, `a7a8q`),
/// case-insensitive. Anything that is not exactly this shape returns
/// `None`, so ordinary algebraic text is never misread as coordinates.
pub fn parse_coordinate(text: &str) -> Option<CoordinateMove> {
    let bytes = text.trim().as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return None;
    }
    let lower: Vec<u8> = bytes.iter().map(|b| b.to_ascii_lowercase()).collect();
    let from = square_from_bytes(lower[0], lower[1])?;
    let to = square_from_bytes(lower[2], lower[3])?;
    let promotion = match lower.get(4) {
        None => None,
        Some(b'q') => Some(Role::Queen),
        Some(b'r') => Some(Role::Rook),
        Some(b'b') => Some(Role::Bishop),
        Some(b'n') => Some(Role::Knight),
        Some(_) => return None,
    };
    Some(CoordinateMove {
        from,
        to,
        promotion,
    })
}

fn square_from_bytes(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Square::from_coords(
        File::new((file - b'a') as u32),
        Rank::new((rank - b'1') as u32),
    ))
}

/// Extract SAN tokens from PGN movetext. Headers, comments and variations
/// are removed first; results and annotation glyphs never match the move
/// pattern. Used when a puzzle source delivers its start position as a game
/// PGN prefix instead of a FEN.
pub fn pgn_moves(pgn: &str) -> Vec<String> {
    let mut text = pgn.to_string();
    for pattern in [r"\[[^\]]*\]", r"\{[^}]*\}", r"\([^)]*\)"] {
        let re = Regex::new(pattern).unwrap();
        text = re.replace_all(&text, " ").to_string();
    }

    let move_re =
        Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap();
    move_re
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}
