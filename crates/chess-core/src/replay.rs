//! Deterministic replay of a move list from a fixed starting position.
//!
//! History navigation never mutates the stored move list; the position at
//! any cursor is always `replay(start, moves, cursor)`.

use shakmaty::{Chess, Move, Position};

use crate::moves::{self, MoveInput, ResolvedMove};

/// Result of a replay: the reached position and how many inputs were
/// applied. `applied` falling short of the requested range is the signal
/// that the history was corrupted or incompatible with the start position.
#[derive(Debug, Clone)]
pub struct Replayed {
    pub position: Chess,
    pub applied: usize,
}

/// Replay `inputs` on top of `start`, up to and including index `up_to`.
/// `-1` (the start-of-game cursor) returns `start` unchanged. An input that
/// fails to resolve stops the replay at the last good position; this never
/// fails outright.
pub fn replay(start: &Chess, inputs: &[MoveInput], up_to: isize) -> Replayed {
    let mut position = start.clone();
    let mut applied = 0usize;
    if up_to < 0 {
        return Replayed { position, applied };
    }
    let end = (up_to as usize + 1).min(inputs.len());
    for input in &inputs[..end] {
        match resolve_input(&position, input) {
            Some(m) => {
                position.play_unchecked(m);
                applied += 1;
            }
            None => break,
        }
    }
    Replayed { position, applied }
}

/// Replay the whole list.
pub fn replay_all(start: &Chess, inputs: &[MoveInput]) -> Replayed {
    replay(start, inputs, inputs.len() as isize - 1)
}

/// Replay already-resolved history records up to a cursor, without the
/// cost of re-wrapping them as `MoveInput`s.
pub fn replay_resolved(start: &Chess, records: &[ResolvedMove], up_to: isize) -> Replayed {
    let mut position = start.clone();
    let mut applied = 0usize;
    if up_to < 0 {
        return Replayed { position, applied };
    }
    let end = (up_to as usize + 1).min(records.len());
    for record in &records[..end] {
        match resolve_record(&position, record) {
            Some(m) => {
                position.play_unchecked(m);
                applied += 1;
            }
            None => break,
        }
    }
    Replayed { position, applied }
}

/// Resolve one input against the current position, following its tag:
/// coordinate fields first, then text.
pub fn resolve_input(pos: &Chess, input: &MoveInput) -> Option<Move> {
    match input {
        MoveInput::Coordinate(c) => moves::find_legal_move(pos, c.from, c.to, c.promotion),
        MoveInput::Text(text) => moves::resolve_text(pos, text),
        MoveInput::Resolved(record) => resolve_record(pos, record),
    }
}

fn resolve_record(pos: &Chess, record: &ResolvedMove) -> Option<Move> {
    if let Some(from) = record.from {
        if let Some(m) = moves::find_legal_move(pos, from, record.to, record.promotion) {
            return Some(m);
        }
    }
    moves::resolve_text(pos, &record.san)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    fn text_inputs(sans: &[&str]) -> Vec<MoveInput> {
        sans.iter().map(|s| MoveInput::Text(s.to_string())).collect()
    }

    #[test]
    fn test_cursor_minus_one_is_identity() {
        let start = Chess::default();
        let inputs = text_inputs(&["e4", "e5", "Nf3"]);
        let replayed = replay(&start, &inputs, -1);
        assert_eq!(replayed.applied, 0);
        assert_eq!(
            crate::position_fen(&replayed.position),
            crate::STANDARD_START_FEN
        );
    }

    #[test]
    fn test_single_step_matches_direct_application() {
        let start = Chess::default();
        let m = moves::find_legal_move(&start, Square::E2, Square::E4, None).unwrap();
        let mut direct = start.clone();
        direct.play_unchecked(m);

        let replayed = replay(&start, &[MoveInput::Text("e4".into())], 0);
        assert_eq!(replayed.applied, 1);
        assert_eq!(
            crate::position_fen(&replayed.position),
            crate::position_fen(&direct)
        );
    }

    #[test]
    fn test_replay_composes_over_prefixes() {
        let start = Chess::default();
        let inputs = text_inputs(&["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        let full = replay(&start, &inputs, 4);
        assert_eq!(full.applied, 5);

        let prefix = replay(&start, &inputs, 1);
        let rest = replay(&prefix.position, &inputs[2..], 2);
        assert_eq!(
            crate::position_fen(&full.position),
            crate::position_fen(&rest.position)
        );
    }

    #[test]
    fn test_replay_accepts_mixed_shapes() {
        let start = Chess::default();
        let e4 = moves::find_legal_move(&start, Square::E2, Square::E4, None).unwrap();
        let resolved = ResolvedMove::from_move(&start, &e4);
        let inputs = vec![
            MoveInput::Resolved(resolved),
            MoveInput::Text("e5".into()),
            MoveInput::Coordinate(crate::CoordinateMove {
                from: Square::G1,
                to: Square::F3,
                promotion: None,
            }),
        ];
        let replayed = replay_all(&start, &inputs);
        assert_eq!(replayed.applied, 3);
    }

    #[test]
    fn test_replay_stops_early_on_bad_input() {
        let start = Chess::default();
        let inputs = text_inputs(&["e4", "Qxh8", "e5"]);
        let replayed = replay_all(&start, &inputs);
        assert_eq!(replayed.applied, 1);

        let good = replay(&start, &inputs, 0);
        assert_eq!(
            crate::position_fen(&replayed.position),
            crate::position_fen(&good.position)
        );
    }

    #[test]
    fn test_replay_empty_list() {
        let start = Chess::default();
        let replayed = replay_all(&start, &[]);
        assert_eq!(replayed.applied, 0);
    }
}
