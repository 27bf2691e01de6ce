//! Board interaction and presentation state.
//!
//! The board component is a controlled view: it receives a position plus
//! highlight inputs and emits move *attempts*. This presenter owns the
//! selection, the suspended promotion choice and the hover throttle, and
//! derives the per-square styles. It never touches the session's state.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use shakmaty::{Chess, Color, Position, Role, Square};

use chess_core::derived::{self, KingFlag};
use chess_core::moves;
use chess_core::position_fen;

/// Hover previews recompute at most once per this interval.
pub const HOVER_THROTTLE: Duration = Duration::from_millis(50);

/// Visual classes for a square. Check wins over everything else on the
/// same square; the rest never collide by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Check,
    LastMove,
    Selected,
    Destination,
    CaptureDestination,
}

/// A legal destination for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dest {
    pub square: Square,
    pub is_capture: bool,
}

/// What an interaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// A piece was selected (or reselected); destinations computed.
    Selected { square: Square, dests: Vec<Dest> },
    /// Selection cleared, nothing else.
    Cleared,
    /// A complete move attempt for the session to validate.
    MoveAttempt {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    /// A pawn reached the final rank: the move is suspended until a
    /// promotion piece is chosen.
    PromotionChoiceRequired { from: Square, to: Square },
    /// Input ignored (not this side's turn, or a promotion choice is open).
    Ignored,
}

/// Everything the board component receives, nothing it may mutate.
#[derive(Debug, Clone)]
pub struct BoardProps {
    pub fen: String,
    pub flipped: bool,
    pub last_move: Option<(Square, Square)>,
    pub square_styles: BTreeMap<Square, Highlight>,
    pub arrows: Vec<(Square, Square)>,
}

#[derive(Debug, Clone, Default)]
pub struct BoardPresenter {
    selected: Option<Square>,
    dests: Vec<Dest>,
    pending_promotion: Option<(Square, Square)>,
    hover_square: Option<Square>,
    hover_recomputed_at: Option<Instant>,
}

impl BoardPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn pending_promotion(&self) -> Option<(Square, Square)> {
        self.pending_promotion
    }

    /// Legal destinations from a square, captures marked.
    pub fn destinations(pos: &Chess, from: Square) -> Vec<Dest> {
        let mut dests = Vec::new();
        for m in &pos.legal_moves() {
            let (m_from, m_to) = moves::move_squares(m);
            if m_from == Some(from) {
                dests.push(Dest {
                    square: m_to,
                    is_capture: m.is_capture(),
                });
            }
        }
        dests
    }

    /// Click path: first interaction selects, second completes or
    /// reselects. Shares the promotion check with the drag path.
    pub fn click_square(&mut self, pos: &Chess, square: Square, human: Color) -> Interaction {
        if self.pending_promotion.is_some() {
            return Interaction::Ignored;
        }
        if pos.turn() != human {
            return Interaction::Ignored;
        }

        let own_piece = pos
            .board()
            .piece_at(square)
            .map(|p| p.color == human)
            .unwrap_or(false);

        if own_piece {
            let dests = Self::destinations(pos, square);
            self.selected = Some(square);
            self.dests = dests.clone();
            return Interaction::Selected { square, dests };
        }

        if let Some(from) = self.selected {
            if self.dests.iter().any(|d| d.square == square) {
                return self.attempt(pos, from, square);
            }
        }

        self.clear_selection();
        Interaction::Cleared
    }

    /// Drag path: the drop funnels through the same promotion check as the
    /// click path.
    pub fn drop_piece(
        &mut self,
        pos: &Chess,
        from: Square,
        to: Square,
        human: Color,
    ) -> Interaction {
        if self.pending_promotion.is_some() {
            return Interaction::Ignored;
        }
        if pos.turn() != human {
            return Interaction::Ignored;
        }
        self.attempt(pos, from, to)
    }

    fn attempt(&mut self, pos: &Chess, from: Square, to: Square) -> Interaction {
        self.clear_selection();
        if moves::requires_promotion(pos, from, to) {
            self.pending_promotion = Some((from, to));
            return Interaction::PromotionChoiceRequired { from, to };
        }
        Interaction::MoveAttempt {
            from,
            to,
            promotion: None,
        }
    }

    /// Finalize the suspended promotion move with the chosen piece. The
    /// pending move is taken, so it is submitted exactly once.
    pub fn choose_promotion(&mut self, role: Role) -> Option<Interaction> {
        let (from, to) = self.pending_promotion.take()?;
        Some(Interaction::MoveAttempt {
            from,
            to,
            promotion: Some(role),
        })
    }

    /// Abandon the suspended promotion move (dialog dismissed).
    pub fn cancel_promotion(&mut self) {
        self.pending_promotion = None;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.dests.clear();
    }

    /// Offer a hover square for move-preview highlighting. Returns whether
    /// the preview should recompute now: unchanged squares are skipped
    /// entirely and changes are coalesced to one recomputation per
    /// interval.
    pub fn hover_preview(&mut self, square: Option<Square>, now: Instant) -> bool {
        if square == self.hover_square {
            return false;
        }
        self.hover_square = square;
        match self.hover_recomputed_at {
            Some(at) if now.duration_since(at) < HOVER_THROTTLE => false,
            _ => {
                self.hover_recomputed_at = Some(now);
                true
            }
        }
    }

    /// Per-square styles. A king in check keeps its check highlight even
    /// when the last move touched the same square: check takes visual
    /// precedence, styles never silently overwrite each other.
    pub fn square_styles(
        &self,
        pos: &Chess,
        last_move: Option<(Square, Square)>,
    ) -> BTreeMap<Square, Highlight> {
        let mut styles = BTreeMap::new();

        let indicators = derived::indicators(pos);
        for entry in [indicators.white, indicators.black] {
            if let Some((square, flag)) = entry {
                if matches!(flag, KingFlag::Check | KingFlag::Checkmate) {
                    styles.insert(square, Highlight::Check);
                }
            }
        }

        if let Some((from, to)) = last_move {
            for square in [from, to] {
                styles.entry(square).or_insert(Highlight::LastMove);
            }
        }

        if let Some(square) = self.selected {
            styles.entry(square).or_insert(Highlight::Selected);
        }
        for dest in &self.dests {
            let style = if dest.is_capture {
                Highlight::CaptureDestination
            } else {
                Highlight::Destination
            };
            styles.entry(dest.square).or_insert(style);
        }

        styles
    }

    /// Assemble the full property set for the board component.
    pub fn board_props(
        &self,
        pos: &Chess,
        flipped: bool,
        last_move: Option<(Square, Square)>,
        arrows: Vec<(Square, Square)>,
    ) -> BoardProps {
        BoardProps {
            fen: position_fen(pos),
            flipped,
            last_move,
            square_styles: self.square_styles(pos, last_move),
            arrows,
        }
    }
}
