//! Move history display: paired rows and cursor/scroll bookkeeping.
//!
//! The navigator never owns the move list. It tracks only the view cursor
//! and which row the visible window starts at, and answers navigation
//! requests with a clamped cursor for the session to act on.

use shakmaty::Color;

use chess_core::moves::ResolvedMove;

/// One display row: move number plus the white and black halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRow {
    pub number: usize,
    pub white: Option<String>,
    pub black: Option<String>,
}

/// Pair a flat move list into display rows. A line that starts with Black
/// to move gets a leading row with an empty white half.
pub fn paired_rows(moves: &[ResolvedMove], start_turn: Color, start_number: usize) -> Vec<MoveRow> {
    let offset = usize::from(start_turn == Color::Black);
    let mut rows: Vec<MoveRow> = Vec::new();
    for (i, record) in moves.iter().enumerate() {
        let ply = i + offset;
        if ply / 2 == rows.len() {
            rows.push(MoveRow {
                number: start_number + ply / 2,
                white: None,
                black: None,
            });
        }
        if let Some(row) = rows.last_mut() {
            if ply % 2 == 0 {
                row.white = Some(record.san.clone());
            } else {
                row.black = Some(record.san.clone());
            }
        }
    }
    rows
}

/// Keyboard shortcuts understood by the history panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Home,
    End,
}

/// Cursor and scroll state for the history panel.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    len: usize,
    cursor: isize,
    start_turn: Color,
    scroll_row: usize,
    visible_rows: usize,
}

impl HistoryNavigator {
    pub fn new(start_turn: Color, visible_rows: usize) -> Self {
        HistoryNavigator {
            len: 0,
            cursor: -1,
            start_turn,
            scroll_row: 0,
            visible_rows: visible_rows.max(1),
        }
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First visible row of the window.
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    fn row_of(&self, index: isize) -> usize {
        if index < 0 {
            return 0;
        }
        (index as usize + usize::from(self.start_turn == Color::Black)) / 2
    }

    /// Clamp and apply a jump. The window follows the cursor exactly as far
    /// as needed, one row per round of single-step navigation.
    pub fn jump(&mut self, index: isize) -> isize {
        let clamped = index.clamp(-1, self.len as isize - 1);
        self.cursor = clamped;
        let row = self.row_of(clamped);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.visible_rows {
            self.scroll_row = row + 1 - self.visible_rows;
        }
        clamped
    }

    pub fn key(&mut self, key: NavKey) -> isize {
        match key {
            NavKey::Left => self.jump(self.cursor - 1),
            NavKey::Right => self.jump(self.cursor + 1),
            NavKey::Home => self.jump(-1),
            NavKey::End => self.jump(self.len as isize - 1),
        }
    }

    /// Record an appended move. When the cursor already sat at the tail the
    /// view advances with it (spectators stay pinned to the newest move);
    /// otherwise the reviewer is left where they are.
    pub fn on_append(&mut self) {
        let was_at_tail = self.cursor == self.len as isize - 1;
        self.len += 1;
        if was_at_tail {
            self.jump(self.len as isize - 1);
        }
    }

    /// Reset to a freshly replaced move list, cursor at the tail.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.cursor = len as isize - 1;
        self.scroll_row = 0;
        self.jump(self.cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::moves::{find_legal_move, MoveInput, ResolvedMove};
    use chess_core::replay;
    use shakmaty::{Chess, Position, Square};

    fn records(sans: &[&str]) -> Vec<ResolvedMove> {
        let mut pos = Chess::default();
        let mut out = Vec::new();
        for san in sans {
            let inputs = [MoveInput::Text(san.to_string())];
            let m = replay::resolve_input(&pos, &inputs[0]).unwrap();
            out.push(ResolvedMove::from_move(&pos, &m));
            pos.play_unchecked(m);
        }
        out
    }

    #[test]
    fn test_paired_rows_white_start() {
        let rows = paired_rows(&records(&["e4", "e5", "Nf3"]), Color::White, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].white.as_deref(), Some("e4"));
        assert_eq!(rows[0].black.as_deref(), Some("e5"));
        assert_eq!(rows[1].white.as_deref(), Some("Nf3"));
        assert_eq!(rows[1].black, None);
    }

    #[test]
    fn test_paired_rows_black_start() {
        // Black to move first: the opening row has an empty white half.
        let start = chess_core::parse_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        )
        .unwrap();
        let m = find_legal_move(&start, Square::E7, Square::E5, None).unwrap();
        let record = ResolvedMove::from_move(&start, &m);
        let rows = paired_rows(&[record], Color::Black, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].white, None);
        assert_eq!(rows[0].black.as_deref(), Some("e5"));
    }

    #[test]
    fn test_jump_clamps_both_ends() {
        let mut nav = HistoryNavigator::new(Color::White, 4);
        nav.reset(5);
        assert_eq!(nav.jump(99), 4);
        assert_eq!(nav.jump(-99), -1);
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut nav = HistoryNavigator::new(Color::White, 4);
        nav.reset(4);
        assert_eq!(nav.key(NavKey::Home), -1);
        assert_eq!(nav.key(NavKey::Right), 0);
        assert_eq!(nav.key(NavKey::Right), 1);
        assert_eq!(nav.key(NavKey::Left), 0);
        assert_eq!(nav.key(NavKey::End), 3);
        // Right at the tail stays clamped.
        assert_eq!(nav.key(NavKey::Right), 3);
    }

    #[test]
    fn test_append_pins_only_when_at_tail() {
        let mut nav = HistoryNavigator::new(Color::White, 2);
        nav.reset(2);
        assert_eq!(nav.cursor(), 1);
        nav.on_append();
        assert_eq!(nav.cursor(), 2);

        // Reviewing history: appends no longer yank the cursor.
        nav.jump(0);
        nav.on_append();
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.len(), 4);
    }

    #[test]
    fn test_scroll_follows_cursor_one_row_at_a_time() {
        let mut nav = HistoryNavigator::new(Color::White, 2);
        // Ten moves = five rows, window two rows tall.
        for _ in 0..10 {
            nav.on_append();
        }
        assert_eq!(nav.cursor(), 9);
        assert_eq!(nav.scroll_row(), 3);

        nav.key(NavKey::Home);
        assert_eq!(nav.scroll_row(), 0);
        nav.key(NavKey::Right); // index 0, row 0
        assert_eq!(nav.scroll_row(), 0);
        for _ in 0..5 {
            nav.key(NavKey::Right); // up to index 5, row 2
        }
        assert_eq!(nav.scroll_row(), 1);
    }
}
