//! Session error types.

use thiserror::Error;

/// Why a move or navigation request was rejected. These are ordinary
/// control-flow answers, not failures: the caller disables an affordance or
/// opens the promotion picker, nothing is logged as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("A reply is already pending")]
    ReplyPending,

    #[error("The round is already decided")]
    RoundOver,

    #[error("The game is over")]
    GameOver,

    #[error("It is not your turn")]
    NotYourTurn,

    #[error("History cursor is not at the live position")]
    NotAtLivePosition,

    #[error("Move is not legal in this position")]
    IllegalMove,

    #[error("A promotion piece is required")]
    PromotionRequired,

    #[error("History can only be browsed while the solution is shown")]
    NavigationLocked,
}
