//! Session state machines for the Ridgeline chess front-end.
//!
//! Each session owns its position/move-list/cursor triple exclusively; the
//! presenter and navigator only read it and emit requests. Timing (reply
//! delays, clock ticks) lives a level up in the page controllers; the
//! types here are synchronous and deterministic.

pub mod board;
pub mod clock;
pub mod error;
pub mod history;
pub mod puzzle;
pub mod versus;

pub use error::MoveError;
pub use puzzle::{Outcome, PuzzleSession, SubmitResult};
