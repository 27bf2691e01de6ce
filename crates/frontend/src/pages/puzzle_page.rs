//! Puzzle page controller.
//!
//! Owns the puzzle session behind a mutex (the session stays the single
//! writer of its position/move-list/cursor) and drives the timing side:
//! bounded fetch retries, and the delayed opponent reply on a spawned task.
//! Every scheduled callback re-checks the session epoch before touching
//! state, so a session that was reset, revealed or replaced in the
//! meantime silently swallows the stale work.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shakmaty::{Chess, Role, Square};
use tokio::sync::Mutex;

use chess_session::{PuzzleSession, SubmitResult};

use crate::clients::puzzle_api::{PuzzleData, PuzzleSource};
use crate::error::FrontendError;

#[derive(Debug, Clone)]
pub struct PuzzlePageConfig {
    /// How many times to ask the source before giving up.
    pub fetch_attempts: u32,
    pub fetch_retry_delay: Duration,
    /// Longer than the free-play delay: telegraphs "the opponent is
    /// thinking".
    pub opponent_reply_delay: Duration,
    pub free_play_reply_delay: Duration,
}

impl Default for PuzzlePageConfig {
    fn default() -> Self {
        PuzzlePageConfig {
            fetch_attempts: 5,
            fetch_retry_delay: Duration::from_millis(1000),
            opponent_reply_delay: Duration::from_millis(1000),
            free_play_reply_delay: Duration::from_millis(400),
        }
    }
}

pub struct PuzzlePage<S: PuzzleSource> {
    source: Arc<S>,
    session: Arc<Mutex<Option<PuzzleSession>>>,
    epoch: Arc<AtomicU64>,
    config: PuzzlePageConfig,
}

impl<S: PuzzleSource + 'static> PuzzlePage<S> {
    pub fn new(source: Arc<S>, config: PuzzlePageConfig) -> Self {
        PuzzlePage {
            source,
            session: Arc::new(Mutex::new(None)),
            epoch: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    /// Fetch the next puzzle, skipping repeats of the currently loaded one
    /// (stall avoidance against a flaky or repeating source). Returns
    /// `Ok(false)` once the attempt budget runs out; the page stays in a
    /// neutral empty state, never an error.
    pub async fn load_next(&self) -> Result<bool, FrontendError> {
        let current_id = {
            let guard = self.session.lock().await;
            guard.as_ref().map(|s| s.id().to_string())
        };

        for attempt in 1..=self.config.fetch_attempts {
            match self.source.get_puzzle().await {
                Ok(Some(data)) if Some(data.puzzle.id.as_str()) != current_id.as_deref() => {
                    match Self::build_session(&data) {
                        Ok(session) => {
                            tracing::info!(puzzle = %session.id(), "Puzzle loaded");
                            self.epoch.fetch_add(1, Ordering::SeqCst);
                            *self.session.lock().await = Some(session);
                            return Ok(true);
                        }
                        Err(e) => {
                            tracing::warn!(puzzle = %data.puzzle.id, error = %e, "Discarding unusable puzzle");
                        }
                    }
                }
                Ok(Some(data)) => {
                    tracing::debug!(puzzle = %data.puzzle.id, attempt, "Source repeated the current puzzle");
                }
                Ok(None) => {
                    tracing::debug!(attempt, "Source returned no puzzle");
                }
                Err(e) => {
                    tracing::warn!(error = %e, attempt, "Puzzle fetch failed");
                }
            }
            if attempt < self.config.fetch_attempts {
                tokio::time::sleep(self.config.fetch_retry_delay).await;
            }
        }

        tracing::info!("Puzzle fetch budget exhausted, staying idle");
        Ok(false)
    }

    fn build_session(data: &PuzzleData) -> Result<PuzzleSession, FrontendError> {
        if data.puzzle.solution.is_empty() {
            return Err(FrontendError::PuzzleData("empty solution".to_string()));
        }
        let start = data.start_position()?;
        Ok(PuzzleSession::new(
            data.puzzle.id.clone(),
            start,
            data.puzzle.solution.clone(),
        ))
    }

    /// Submit the human's move; on a correct non-final move the opponent's
    /// reply is scheduled after the configured delay.
    pub async fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<SubmitResult, FrontendError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(FrontendError::NoPuzzle)?;
        let result = session.submit_user_move(from, to, promotion)?;
        drop(guard);

        match &result {
            SubmitResult::CorrectSoFar(_) => {
                self.schedule_opponent_reply(self.config.opponent_reply_delay);
            }
            SubmitResult::FreePlay {
                reply_pending: true,
                ..
            } => {
                self.schedule_opponent_reply(self.config.free_play_reply_delay);
            }
            _ => {}
        }
        Ok(result)
    }

    fn schedule_opponent_reply(&self, delay: Duration) {
        let session = Arc::clone(&self.session);
        let epoch = Arc::clone(&self.epoch);
        let token = epoch.load(Ordering::SeqCst);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if epoch.load(Ordering::SeqCst) != token {
                tracing::debug!("Dropping opponent reply for a stale session");
                return;
            }
            let mut guard = session.lock().await;
            if let Some(session) = guard.as_mut() {
                session.play_pending_reply();
            }
        });
    }

    /// Show the full solution. Cancels any pending reply via the epoch.
    pub async fn reveal_solution(&self) -> Result<(), FrontendError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(FrontendError::NoPuzzle)?;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        session.reveal_solution();
        Ok(())
    }

    /// Reset to the loaded state without refetching. Cancels pending work.
    pub async fn retry(&self) -> Result<(), FrontendError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(FrontendError::NoPuzzle)?;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        session.retry();
        Ok(())
    }

    /// Scrub through the revealed line.
    pub async fn navigate_to(&self, index: isize) -> Result<Chess, FrontendError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(FrontendError::NoPuzzle)?;
        Ok(session.navigate_to(index)?)
    }

    pub async fn has_puzzle(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Read a consistent snapshot of the session through a closure.
    pub async fn with_session<R>(&self, f: impl FnOnce(&PuzzleSession) -> R) -> Option<R> {
        let guard = self.session.lock().await;
        guard.as_ref().map(f)
    }
}
