//! The puzzle-solving state machine.
//!
//! One session per fetched puzzle. The solution is an ordered list of text
//! plies starting with the human's move; `solution_cursor` counts the plies
//! already consumed. The session is the single writer of the position,
//! move list and cursor; page controllers only schedule when the pending
//! opponent reply actually fires.

use shakmaty::{Chess, Color, Move, Position, Role, Square};

use chess_core::matcher;
use chess_core::moves::{self, ResolvedMove};
use chess_core::replay;

use crate::error::MoveError;
use crate::history::{self, MoveRow};

/// Terminal state of the current solving round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unknown,
    Correct,
    Incorrect,
}

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// The move matched and completed the solution.
    Solved(ResolvedMove),
    /// The move matched; the opponent's reply is now pending.
    CorrectSoFar(ResolvedMove),
    /// Legal but wrong; the move stays on the board and the round is lost.
    Incorrect(ResolvedMove),
    /// Free play after the solution was revealed; no correctness recorded.
    FreePlay {
        played: ResolvedMove,
        reply_pending: bool,
    },
}

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    id: String,
    start: Chess,
    solution: Vec<String>,
    solution_cursor: usize,
    moves: Vec<ResolvedMove>,
    live: Chess,
    cursor: isize,
    outcome: Outcome,
    revealing: bool,
    opponent_replying: bool,
    flipped: bool,
}

impl PuzzleSession {
    /// Start a session. Board orientation follows the platform policy: the
    /// side to move at the start position is the human side and is rendered
    /// at the bottom.
    pub fn new(id: impl Into<String>, start: Chess, solution: Vec<String>) -> Self {
        let flipped = start.turn() == Color::Black;
        PuzzleSession {
            id: id.into(),
            live: start.clone(),
            start,
            solution,
            solution_cursor: 0,
            moves: Vec::new(),
            cursor: -1,
            outcome: Outcome::Unknown,
            revealing: false,
            opponent_replying: false,
            flipped,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The live (tail) position.
    pub fn position(&self) -> &Chess {
        &self.live
    }

    /// The position at the current cursor; equals `position()` while the
    /// cursor sits at the tail.
    pub fn viewed_position(&self) -> Chess {
        if self.is_at_tail() {
            self.live.clone()
        } else {
            replay::replay_resolved(&self.start, &self.moves, self.cursor).position
        }
    }

    pub fn start_position(&self) -> &Chess {
        &self.start
    }

    pub fn move_list(&self) -> &[ResolvedMove] {
        &self.moves
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn solution_cursor(&self) -> usize {
        self.solution_cursor
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    pub fn is_opponent_replying(&self) -> bool {
        self.opponent_replying
    }

    /// True when the human side is Black (board rendered flipped).
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn human_color(&self) -> Color {
        if self.flipped {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn is_at_tail(&self) -> bool {
        self.cursor == self.moves.len() as isize - 1
    }

    /// From/to squares of the move at the cursor, for highlighting.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        if self.cursor < 0 {
            return None;
        }
        let record = self.moves.get(self.cursor as usize)?;
        record.from.map(|from| (from, record.to))
    }

    /// Paired display rows for the history panel.
    pub fn history_rows(&self) -> Vec<MoveRow> {
        history::paired_rows(
            &self.moves,
            self.start.turn(),
            self.start.fullmoves().get() as usize,
        )
    }

    /// Submit the human's move. Gated: nothing is accepted while the
    /// opponent reply is pending, after the round is decided (unless the
    /// solution was revealed, which allows free play), or while browsing
    /// history.
    pub fn submit_user_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<SubmitResult, MoveError> {
        if self.opponent_replying {
            return Err(MoveError::ReplyPending);
        }
        if self.outcome != Outcome::Unknown && !self.revealing {
            return Err(MoveError::RoundOver);
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

        if self.revealing {
            let played = self.apply(&m);
            let reply_pending = self.solution_cursor < self.solution.len();
            self.opponent_replying = reply_pending;
            return Ok(SubmitResult::FreePlay {
                played,
                reply_pending,
            });
        }

        let matched = match self.solution.get(self.solution_cursor) {
            Some(expected) => matcher::matches(&self.live, &m, expected),
            None => false,
        };
        let played = self.apply(&m);

        if matched {
            self.solution_cursor += 1;
            if self.solution_cursor >= self.solution.len() {
                self.outcome = Outcome::Correct;
                Ok(SubmitResult::Solved(played))
            } else {
                self.opponent_replying = true;
                Ok(SubmitResult::CorrectSoFar(played))
            }
        } else {
            // Legal but wrong: leave it on the board so the user sees what
            // they played.
            self.outcome = Outcome::Incorrect;
            Ok(SubmitResult::Incorrect(played))
        }
    }

    /// Apply the opponent's scheduled solution ply. No-ops when no reply is
    /// pending (stale scheduled callback). An unresolvable ply is skipped:
    /// the cursor still advances and the round stays undecided.
    pub fn play_pending_reply(&mut self) -> Option<ResolvedMove> {
        if !self.opponent_replying {
            return None;
        }
        self.opponent_replying = false;

        let text = self.solution.get(self.solution_cursor)?.clone();
        match moves::resolve_text(&self.live, &text) {
            Some(m) => {
                self.solution_cursor += 1;
                let played = self.apply(&m);
                if !self.revealing && self.solution_cursor >= self.solution.len() {
                    self.outcome = Outcome::Correct;
                }
                Some(played)
            }
            None => {
                tracing::warn!(puzzle = %self.id, ply = %text, "Skipping unresolvable solution ply");
                self.solution_cursor += 1;
                None
            }
        }
    }

    /// Replace the move list with the full solution line replayed from the
    /// start. Plies that fail to resolve are skipped, not fatal. The round
    /// counts as not solved and history browsing unlocks.
    pub fn reveal_solution(&mut self) {
        let mut pos = self.start.clone();
        let mut played = Vec::new();
        for text in &self.solution {
            match moves::resolve_text(&pos, text) {
                Some(m) => {
                    let record = ResolvedMove::from_move(&pos, &m);
                    pos.play_unchecked(m);
                    played.push(record);
                }
                None => {
                    tracing::warn!(puzzle = %self.id, ply = %text, "Skipping unresolvable ply in reveal");
                }
            }
        }
        self.moves = played;
        self.live = pos;
        self.cursor = self.moves.len() as isize - 1;
        self.solution_cursor = self.solution.len();
        self.outcome = Outcome::Incorrect;
        self.revealing = true;
        self.opponent_replying = false;
    }

    /// Move the view cursor. Only available while the solution is shown;
    /// history scrubbing is disabled during active solving. Does not touch
    /// the move list.
    pub fn navigate_to(&mut self, index: isize) -> Result<Chess, MoveError> {
        if !self.revealing {
            return Err(MoveError::NavigationLocked);
        }
        let clamped = index.clamp(-1, self.moves.len() as isize - 1);
        self.cursor = clamped;
        Ok(replay::replay_resolved(&self.start, &self.moves, clamped).position)
    }

    /// Back to the freshly-loaded state without refetching.
    pub fn retry(&mut self) {
        self.moves.clear();
        self.live = self.start.clone();
        self.cursor = -1;
        self.solution_cursor = 0;
        self.outcome = Outcome::Unknown;
        self.revealing = false;
        self.opponent_replying = false;
    }

    fn apply(&mut self, m: &Move) -> ResolvedMove {
        let record = ResolvedMove::from_move(&self.live, m);
        self.live.play_unchecked(*m);
        self.moves.push(record.clone());
        self.cursor = self.moves.len() as isize - 1;
        record
    }
}
