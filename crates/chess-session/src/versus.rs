//! Play-vs-engine game session.
//!
//! Same single-writer discipline as the puzzle session: this type owns the
//! position/move-list/cursor triple; the page controller only decides when
//! the engine reply fires. An engine that is unavailable or answers with
//! garbage degrades to a uniformly random legal move, so the game never
//! stalls on the engine.

use rand::prelude::IndexedRandom;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Color, Move, Position, Role, Square};

use chess_core::derived;
use chess_core::moves::{self, ResolvedMove};
use chess_core::replay;

use crate::error::MoveError;

#[derive(Debug, Clone)]
pub struct EngineGame {
    start: Chess,
    live: Chess,
    moves: Vec<ResolvedMove>,
    cursor: isize,
    user_color: Color,
    engine_pending: bool,
}

impl EngineGame {
    pub fn new(user_color: Color) -> Self {
        Self::from_position(Chess::default(), user_color)
    }

    pub fn from_position(start: Chess, user_color: Color) -> Self {
        EngineGame {
            live: start.clone(),
            start,
            moves: Vec::new(),
            cursor: -1,
            user_color,
            engine_pending: false,
        }
    }

    pub fn position(&self) -> &Chess {
        &self.live
    }

    pub fn move_list(&self) -> &[ResolvedMove] {
        &self.moves
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn user_color(&self) -> Color {
        self.user_color
    }

    pub fn is_engine_pending(&self) -> bool {
        self.engine_pending
    }

    pub fn is_over(&self) -> bool {
        self.live.is_game_over() || derived::is_draw(&self.live)
    }

    pub fn is_at_tail(&self) -> bool {
        self.cursor == self.moves.len() as isize - 1
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        if self.cursor < 0 {
            return None;
        }
        let record = self.moves.get(self.cursor as usize)?;
        record.from.map(|from| (from, record.to))
    }

    /// Browse the game history; the move list itself is never truncated.
    pub fn navigate_to(&mut self, index: isize) -> Chess {
        let clamped = index.clamp(-1, self.moves.len() as isize - 1);
        self.cursor = clamped;
        replay::replay_resolved(&self.start, &self.moves, clamped).position
    }

    /// Submit the human's move. After a successful application the engine
    /// reply becomes pending (unless the game just ended).
    pub fn submit_user_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<ResolvedMove, MoveError> {
        if self.engine_pending {
            return Err(MoveError::ReplyPending);
        }
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.live.turn() != self.user_color {
            return Err(MoveError::NotYourTurn);
        }
        if !self.is_at_tail() {
            return Err(MoveError::NotAtLivePosition);
        }

        let m = match moves::find_legal_move(&self.live, from, to, promotion) {
            Some(m) => m,
            None => {
                if promotion.is_none()
                    && moves::requires_promotion(&self.live, from, to)
                    && moves::find_legal_move(&self.live, from, to, Some(Role::Queen)).is_some()
                {
                    return Err(MoveError::PromotionRequired);
                }
                return Err(MoveError::IllegalMove);
            }
        };

        let played = self.apply(&m);
        self.engine_pending = !self.is_over();
        Ok(played)
    }

    /// Resolve the pending engine reply. `best_move` is the engine's UCI
    /// answer, or `None` when the engine failed outright; `"(none)"` and
    /// unplayable answers fall back to a uniformly random legal move. Stale
    /// calls (no reply pending) no-op.
    pub fn resolve_engine_reply(&mut self, best_move: Option<&str>) -> Option<ResolvedMove> {
        if !self.engine_pending {
            return None;
        }
        self.engine_pending = false;

        if let Some(uci) = best_move {
            if uci != "(none)" {
                if let Ok(parsed) = uci.parse::<UciMove>() {
                    if let Ok(m) = parsed.to_move(&self.live) {
                        return Some(self.apply(&m));
                    }
                }
                tracing::warn!(uci, "Engine move is unplayable here, using a random move");
            }
        } else {
            tracing::warn!("Engine unavailable, using a random move");
        }

        self.play_random_move()
    }

    fn play_random_move(&mut self) -> Option<ResolvedMove> {
        let legal = self.live.legal_moves();
        let mut rng = rand::rng();
        let m: Move = legal.choose(&mut rng)?.clone();
        Some(self.apply(&m))
    }

    fn apply(&mut self, m: &Move) -> ResolvedMove {
        let record = ResolvedMove::from_move(&self.live, m);
        self.live.play_unchecked(*m);
        self.moves.push(record.clone());
        self.cursor = self.moves.len() as isize - 1;
        record
    }
}
